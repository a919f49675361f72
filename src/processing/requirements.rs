//! Job requirement extraction
//!
//! Scans a job description (or any free text) for vocabulary terms using
//! whole-word regex matching over the lower-cased input. Every entry of the
//! resulting [`RequirementSet`] is drawn from the closed vocabulary, in
//! vocabulary scan order, without duplicates.

use crate::error::{Result, JobAssistantError};
use crate::processing::vocabulary::Vocabulary;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementSet {
    pub skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub experience_phrases: Vec<String>,
    pub qualifications: Vec<String>,
}

impl RequirementSet {
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
            && self.soft_skills.is_empty()
            && self.experience_phrases.is_empty()
            && self.qualifications.is_empty()
    }

    pub fn top_skills(&self, n: usize) -> &[String] {
        &self.skills[..n.min(self.skills.len())]
    }

    pub fn first_experience(&self) -> Option<&str> {
        self.experience_phrases.first().map(String::as_str)
    }
}

/// A vocabulary term with its precompiled whole-word matcher.
#[derive(Debug, Clone)]
struct TermMatcher {
    term: String,
    regex: Regex,
}

pub struct RequirementExtractor {
    skills: Vec<TermMatcher>,
    soft_skills: Vec<TermMatcher>,
    qualifications: Vec<TermMatcher>,
    experience_patterns: Vec<Regex>,
}

impl RequirementExtractor {
    pub fn new(vocabulary: &Vocabulary) -> Result<Self> {
        let experience_patterns = vocabulary
            .experience_patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| {
                    JobAssistantError::Vocabulary(format!("Invalid experience pattern '{}': {}", pattern, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            skills: compile_terms(vocabulary.all_skill_terms())?,
            soft_skills: compile_terms(vocabulary.soft_skills.iter().map(String::as_str))?,
            qualifications: compile_terms(vocabulary.qualifications.iter().map(String::as_str))?,
            experience_patterns,
        })
    }

    /// Extract every requirement signal from a job description.
    pub fn extract(&self, text: &str) -> RequirementSet {
        let lower = text.to_lowercase();

        RequirementSet {
            skills: matching_terms(&self.skills, &lower),
            soft_skills: matching_terms(&self.soft_skills, &lower),
            experience_phrases: self.experience_phrases_in(&lower),
            qualifications: matching_terms(&self.qualifications, &lower),
        }
    }

    /// Technical skills only; used to build the candidate side of a match.
    pub fn extract_skills(&self, text: &str) -> Vec<String> {
        matching_terms(&self.skills, &text.to_lowercase())
    }

    /// Whether `term` occurs as a whole word in `text`, case-insensitively.
    pub fn mentions(&self, text: &str, term: &str) -> bool {
        let lower = text.to_lowercase();
        let term_lower = term.to_lowercase();

        let known = self
            .skills
            .iter()
            .chain(&self.soft_skills)
            .chain(&self.qualifications)
            .find(|m| m.term == term_lower);

        match known {
            Some(matcher) => matcher.regex.is_match(&lower),
            None => whole_word_regex(&term_lower)
                .map(|regex| regex.is_match(&lower))
                .unwrap_or(false),
        }
    }

    // Overlapping patterns may report the same years twice in different phrasings;
    // only identical substrings are collapsed.
    fn experience_phrases_in(&self, lower: &str) -> Vec<String> {
        let mut phrases: Vec<String> = Vec::new();
        for pattern in &self.experience_patterns {
            for mat in pattern.find_iter(lower) {
                let phrase = mat.as_str();
                if !phrases.iter().any(|p| p == phrase) {
                    phrases.push(phrase.to_string());
                }
            }
        }
        phrases
    }
}

fn compile_terms<'a>(terms: impl Iterator<Item = &'a str>) -> Result<Vec<TermMatcher>> {
    let mut seen = HashSet::new();
    let mut matchers = Vec::new();
    for term in terms {
        if !seen.insert(term) {
            continue;
        }
        matchers.push(TermMatcher {
            term: term.to_string(),
            regex: whole_word_regex(term)?,
        });
    }
    Ok(matchers)
}

fn matching_terms(matchers: &[TermMatcher], lower: &str) -> Vec<String> {
    matchers
        .iter()
        .filter(|m| m.regex.is_match(lower))
        .map(|m| m.term.clone())
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Build a regex matching `term` literally as a whole word.
///
/// Edges that are word characters use `\b`. Edges that are punctuation, as in
/// `c++`, `c#` or `.net`, require a neighbouring character that cannot extend
/// the term, or the text boundary.
pub(crate) fn whole_word_regex(term: &str) -> Result<Regex> {
    let starts_with_word = term.chars().next().map_or(false, is_word_char);
    let ends_with_word = term.chars().last().map_or(false, is_word_char);

    let left = if starts_with_word { r"\b" } else { r"(?:^|[^\w.])" };
    let right = if ends_with_word { r"\b" } else { r"(?:[^\w+#]|$)" };

    let pattern = format!("{}{}{}", left, regex::escape(term), right);
    Regex::new(&pattern)
        .map_err(|e| JobAssistantError::Vocabulary(format!("Invalid term '{}': {}", term, e)))
}
