//! Closed vocabularies driving every extractor
//!
//! The vocabulary is data, not code: skill categories, soft skills,
//! qualification keywords, experience and achievement patterns, and the
//! section-heading keyword groups all live in a versioned JSON document.
//! The default document is embedded at build time; a replacement can be
//! loaded from disk through the `vocabulary.path` configuration key.

use crate::error::{Result, JobAssistantError};
use crate::processing::sectionizer::SectionKind;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

const DEFAULT_VOCABULARY_JSON: &str = include_str!("../../vocabulary/default.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Scanned in declaration order; a term listed in two categories is reported once.
    pub skill_categories: Vec<SkillCategory>,
    pub soft_skills: Vec<String>,
    pub qualifications: Vec<String>,
    pub experience_patterns: Vec<String>,
    pub achievement_patterns: Vec<String>,
    /// Tested in declaration order; the first matching group wins.
    pub section_headings: Vec<HeadingGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub terms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingGroup {
    pub section: SectionKind,
    pub keywords: Vec<String>,
}

impl Vocabulary {
    /// The vocabulary shipped with the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json(DEFAULT_VOCABULARY_JSON)
    }

    /// Load and validate a vocabulary document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            JobAssistantError::Vocabulary(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let vocabulary: Vocabulary = serde_json::from_str(json)
            .map_err(|e| JobAssistantError::Vocabulary(format!("Malformed vocabulary: {}", e)))?;
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that the vocabulary is well-formed.
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(JobAssistantError::Vocabulary("version must not be empty".into()));
        }

        if self.skill_categories.is_empty() {
            return Err(JobAssistantError::Vocabulary(
                "skill_categories must not be empty".into(),
            ));
        }

        for category in &self.skill_categories {
            if category.name.trim().is_empty() {
                return Err(JobAssistantError::Vocabulary(
                    "skill category name must not be empty".into(),
                ));
            }
            if category.terms.is_empty() {
                return Err(JobAssistantError::Vocabulary(format!(
                    "skill category '{}' has no terms",
                    category.name
                )));
            }
            validate_terms(&format!("skill category '{}'", category.name), &category.terms)?;
        }

        validate_terms("soft_skills", &self.soft_skills)?;
        validate_terms("qualifications", &self.qualifications)?;
        validate_patterns("experience_patterns", &self.experience_patterns)?;
        validate_patterns("achievement_patterns", &self.achievement_patterns)?;

        let mut seen_sections = HashSet::new();
        for group in &self.section_headings {
            if group.section == SectionKind::PersonalInfo {
                return Err(JobAssistantError::Vocabulary(
                    "personal_info is the implicit leading section and cannot have headings".into(),
                ));
            }
            if !seen_sections.insert(group.section) {
                return Err(JobAssistantError::Vocabulary(format!(
                    "section '{}' has more than one heading group",
                    group.section
                )));
            }
            if group.keywords.is_empty() {
                return Err(JobAssistantError::Vocabulary(format!(
                    "section '{}' has no heading keywords",
                    group.section
                )));
            }
            validate_terms(&format!("headings for '{}'", group.section), &group.keywords)?;
        }

        Ok(())
    }

    /// Every technical term in scan order, duplicates included.
    pub fn all_skill_terms(&self) -> impl Iterator<Item = &str> {
        self.skill_categories
            .iter()
            .flat_map(|category| category.terms.iter().map(String::as_str))
    }

    pub fn category_of(&self, term: &str) -> Option<&str> {
        self.skill_categories
            .iter()
            .find(|category| category.terms.iter().any(|t| t == term))
            .map(|category| category.name.as_str())
    }

    pub fn skill_term_count(&self) -> usize {
        self.all_skill_terms().collect::<HashSet<_>>().len()
    }
}

// Terms are matched against lower-cased text, so an upper-case term could never hit.
fn validate_terms(owner: &str, terms: &[String]) -> Result<()> {
    for term in terms {
        if term.trim().is_empty() {
            return Err(JobAssistantError::Vocabulary(format!("{} contains a blank term", owner)));
        }
        if term.to_lowercase() != *term {
            return Err(JobAssistantError::Vocabulary(format!(
                "{} term '{}' must be lower case",
                owner, term
            )));
        }
    }
    Ok(())
}

fn validate_patterns(owner: &str, patterns: &[String]) -> Result<()> {
    if patterns.is_empty() {
        return Err(JobAssistantError::Vocabulary(format!("{} must not be empty", owner)));
    }
    for pattern in patterns {
        let regex = Regex::new(pattern).map_err(|e| {
            JobAssistantError::Vocabulary(format!("{} pattern '{}' is invalid: {}", owner, pattern, e))
        })?;
        if regex.is_match("") {
            return Err(JobAssistantError::Vocabulary(format!(
                "{} pattern '{}' matches empty text",
                owner, pattern
            )));
        }
    }
    Ok(())
}
