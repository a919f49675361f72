//! Quantifiable achievement extraction from resume text

use crate::error::{Result, JobAssistantError};
use crate::processing::vocabulary::Vocabulary;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// Upper bound on achievements collected from one resume.
pub const MAX_ACHIEVEMENTS: usize = 10;

pub struct AchievementExtractor {
    patterns: Vec<Regex>,
    limit: usize,
}

impl AchievementExtractor {
    pub fn new(vocabulary: &Vocabulary) -> Result<Self> {
        let patterns = vocabulary
            .achievement_patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| {
                    JobAssistantError::Vocabulary(format!("Invalid achievement pattern '{}': {}", pattern, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            patterns,
            limit: MAX_ACHIEVEMENTS,
        })
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Achievements in pattern order, then match order within each pattern.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let mut achievements: Vec<String> = Vec::new();

        for pattern in &self.patterns {
            for mat in pattern.find_iter(&lower) {
                if achievements.len() >= self.limit {
                    return achievements;
                }
                let achievement = capitalize_first(mat.as_str());
                if !achievements.contains(&achievement) {
                    achievements.push(achievement);
                }
            }
        }

        achievements
    }
}

/// Upper-case the first grapheme, leaving the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut graphemes = text.graphemes(true);
    match graphemes.next() {
        Some(first) => {
            let mut out = first.to_uppercase();
            out.push_str(graphemes.as_str());
            out
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> AchievementExtractor {
        AchievementExtractor::new(&Vocabulary::builtin().unwrap()).unwrap()
    }

    #[test]
    fn test_quantified_outcomes_are_found() {
        let text = "Increased conversion rate by 20%. Reduced cloud spend by $5000. Led a platform team of 6.";
        let found = extractor().extract(text);

        assert_eq!(
            found,
            vec![
                "Increased conversion rate by 20%",
                "Reduced cloud spend by $5000",
                "Led a platform team",
            ]
        );
    }

    #[test]
    fn test_matches_do_not_cross_sentences() {
        let found = extractor().extract("Increased morale. Revenue grew by 20%.");
        assert!(found.is_empty());
    }

    #[test]
    fn test_verbs_inside_words_are_ignored() {
        let found = extractor().extract("Scaled the team and enabled the project");
        assert!(found.is_empty());
    }

    #[test]
    fn test_duplicates_are_suppressed() {
        let found = extractor().extract("Developed a billing system. developed a billing system.");
        assert_eq!(found, vec!["Developed a billing system"]);
    }

    #[test]
    fn test_capped_at_ten() {
        let text: String = (0..15)
            .map(|i| format!("Implemented solution number {} solution. ", i))
            .collect();
        let found = extractor().extract(&text);
        assert_eq!(found.len(), MAX_ACHIEVEMENTS);
        assert_eq!(found[0], "Implemented solution number 0 solution");
    }

    #[test]
    fn test_custom_limit() {
        let text = "Led a team. Managed a project. Developed a system.";
        assert_eq!(extractor().with_limit(2).extract(text).len(), 2);
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("led team"), "Led team");
        assert_eq!(capitalize_first("élan"), "Élan");
        assert_eq!(capitalize_first(""), "");
    }
}
