//! Skill matching between job requirements and candidate skills
//!
//! Each requirement skill is classified exactly once:
//!
//! - **exact**: some candidate skill is identical up to case
//! - **partial**: some candidate skill contains the requirement, or is contained by it
//! - **missing**: neither
//!
//! The partial rule is a plain substring test, so `java` partially matches
//! `javascript` and `sql` partially matches `mysql`. That behaviour is kept
//! deliberately; callers that need stricter matching should filter `partial`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillPair {
    pub requirement: String,
    pub candidate: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchClass {
    Exact,
    Partial,
    Missing,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched: Vec<SkillPair>,
    pub partial: Vec<SkillPair>,
    pub missing: Vec<String>,
    /// 0..=100
    pub match_percentage: u8,
}

impl MatchResult {
    pub fn requirement_count(&self) -> usize {
        self.matched.len() + self.partial.len() + self.missing.len()
    }

    pub fn covered_requirements(&self) -> impl Iterator<Item = &str> {
        self.matched
            .iter()
            .chain(&self.partial)
            .map(|pair| pair.requirement.as_str())
    }
}

#[derive(Debug, Default)]
pub struct SkillMatcher;

impl SkillMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Classify one requirement skill, returning the candidate that decided it.
    pub fn classify<'a>(&self, requirement: &str, candidates: &'a [String]) -> (MatchClass, Option<&'a str>) {
        let requirement_lower = requirement.to_lowercase();
        let candidates_lower: Vec<(&'a str, String)> = candidates
            .iter()
            .filter(|c| !c.trim().is_empty())
            .map(|c| (c.as_str(), c.to_lowercase()))
            .collect();

        if let Some((original, _)) = candidates_lower.iter().find(|(_, lower)| *lower == requirement_lower) {
            return (MatchClass::Exact, Some(*original));
        }

        if let Some((original, _)) = candidates_lower
            .iter()
            .find(|(_, lower)| requirement_lower.contains(lower.as_str()) || lower.contains(requirement_lower.as_str()))
        {
            return (MatchClass::Partial, Some(*original));
        }

        (MatchClass::Missing, None)
    }

    pub fn match_skills(&self, requirements: &[String], candidates: &[String]) -> MatchResult {
        let mut result = MatchResult::default();

        for requirement in requirements {
            match self.classify(requirement, candidates) {
                (MatchClass::Exact, Some(candidate)) => result.matched.push(SkillPair {
                    requirement: requirement.clone(),
                    candidate: candidate.to_string(),
                }),
                (MatchClass::Partial, Some(candidate)) => result.partial.push(SkillPair {
                    requirement: requirement.clone(),
                    candidate: candidate.to_string(),
                }),
                _ => result.missing.push(requirement.clone()),
            }
        }

        result.match_percentage = match_percentage(
            result.matched.len() + result.partial.len(),
            requirements.len(),
        );
        result
    }
}

/// `round(100 * covered / total)`, or 0 when there is nothing to cover.
pub fn match_percentage(covered: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (covered.min(total) as f64 * 100.0 / total as f64).round();
    pct.clamp(0.0, 100.0) as u8
}
