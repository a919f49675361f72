//! Analysis engine combining sectioning, requirement extraction, matching and gap analysis

use crate::config::Config;
use crate::error::{Result, JobAssistantError};
use crate::processing::achievements::AchievementExtractor;
use crate::processing::gaps::{analyze_gaps, GapReport};
use crate::processing::matcher::{MatchResult, SkillMatcher};
use crate::processing::requirements::{RequirementExtractor, RequirementSet};
use crate::processing::sectionizer::{CvSections, Sectionizer};
use crate::processing::vocabulary::Vocabulary;
use log::{debug, info};
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const COMPANY_PLACEHOLDER: &str = "[Company Name]";
pub const POSITION_PLACEHOLDER: &str = "[Position Name]";

/// First lines longer than this are prose, not a job title.
const MAX_TITLE_LINE_CHARS: usize = 80;

/// Optional LinkedIn-style profile data supplied alongside the documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileInput {
    pub url: Option<String>,
    pub about: Option<String>,
}

impl ProfileInput {
    pub fn about_text(&self) -> Option<&str> {
        self.about.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationInput {
    pub resume_text: String,
    pub job_text: String,
    pub profile: ProfileInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationAnalysis {
    pub requirements: RequirementSet,
    /// Vocabulary skills found anywhere in the resume
    pub resume_skills: Vec<String>,
    pub sections: CvSections,
    pub achievements: Vec<String>,
    pub cv_match: MatchResult,
    /// Present only when a profile about text was supplied
    pub profile_skills: Option<Vec<String>>,
    pub profile_match: Option<MatchResult>,
    pub gaps: GapReport,
    pub company_name: String,
    pub position_name: String,
    pub profile: ProfileInput,
}

pub struct ApplicationAnalyzer {
    vocabulary: Vocabulary,
    sectionizer: Sectionizer,
    requirement_extractor: RequirementExtractor,
    achievement_extractor: AchievementExtractor,
    skill_matcher: SkillMatcher,
    company_regex: Regex,
    position_regex: Regex,
}

impl ApplicationAnalyzer {
    pub fn new(vocabulary: Vocabulary) -> Result<Self> {
        // Capitalised words; a period only continues a word when followed by more letters ("Node.js", not "Inc.")
        let company_regex = Regex::new(
            r"\b(?i:at|for)\s+([A-Z][A-Za-z0-9&]*(?:\.[A-Za-z0-9&]+)*(?:[ \t]+[A-Z&][A-Za-z0-9&]*(?:\.[A-Za-z0-9&]+)*)*)",
        )
            .map_err(|e| JobAssistantError::Configuration(format!("Invalid company regex: {}", e)))?;
        let position_regex = Regex::new(r"(?i)\b(?:position|role|job)\s+of\s+([a-z][a-z0-9&/+# \t-]*)")
            .map_err(|e| JobAssistantError::Configuration(format!("Invalid position regex: {}", e)))?;

        Ok(Self {
            sectionizer: Sectionizer::new(&vocabulary)?,
            requirement_extractor: RequirementExtractor::new(&vocabulary)?,
            achievement_extractor: AchievementExtractor::new(&vocabulary)?,
            skill_matcher: SkillMatcher::new(),
            company_regex,
            position_regex,
            vocabulary,
        })
    }

    /// Build an analyzer from the configured vocabulary, or the embedded one.
    pub fn from_config(config: &Config) -> Result<Self> {
        let vocabulary = match &config.vocabulary.path {
            Some(path) => {
                info!("Loading vocabulary from {}", path.display());
                Vocabulary::load(path)?
            }
            None => Vocabulary::builtin()?,
        };
        Self::new(vocabulary)
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn sectionizer(&self) -> &Sectionizer {
        &self.sectionizer
    }

    pub fn requirement_extractor(&self) -> &RequirementExtractor {
        &self.requirement_extractor
    }

    pub fn analyze(&self, input: &ApplicationInput) -> ApplicationAnalysis {
        info!(
            "Analyzing application (vocabulary {} v{})",
            self.vocabulary.name, self.vocabulary.version
        );

        let requirements = self.requirement_extractor.extract(&input.job_text);
        let sections = self.sectionizer.sectionize(&input.resume_text);
        let resume_skills = self.requirement_extractor.extract_skills(&input.resume_text);
        let cv_match = self.skill_matcher.match_skills(&requirements.skills, &resume_skills);
        let achievements = self.achievement_extractor.extract(&input.resume_text);
        let gaps = analyze_gaps(&self.requirement_extractor, &sections, &requirements);

        debug!(
            "Requirements: {} skills, {} soft skills, {} experience phrases, {} qualifications",
            requirements.skills.len(),
            requirements.soft_skills.len(),
            requirements.experience_phrases.len(),
            requirements.qualifications.len()
        );
        debug!("Resume sections detected: {:?}", sections.detected());
        info!(
            "CV match: {}% ({} exact, {} partial, {} missing)",
            cv_match.match_percentage,
            cv_match.matched.len(),
            cv_match.partial.len(),
            cv_match.missing.len()
        );

        let (profile_skills, profile_match) = match input.profile.about_text() {
            Some(about) => {
                let skills = self.requirement_extractor.extract_skills(about);
                let result = self.skill_matcher.match_skills(&requirements.skills, &skills);
                info!("Profile match: {}%", result.match_percentage);
                (Some(skills), Some(result))
            }
            None => (None, None),
        };

        ApplicationAnalysis {
            company_name: self.company_name(&input.job_text),
            position_name: self.position_name(&input.job_text),
            requirements,
            resume_skills,
            sections,
            achievements,
            cv_match,
            profile_skills,
            profile_match,
            gaps,
            profile: input.profile.clone(),
        }
    }

    /// First "at/for <Capitalised Words>" phrase of a job description.
    pub fn company_name(&self, job_text: &str) -> String {
        self.company_regex
            .captures(job_text)
            .and_then(|caps| caps.get(1))
            .map(|m| clean_name(m.as_str()))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| COMPANY_PLACEHOLDER.to_string())
    }

    /// "position/role/job of X" phrase, else a short first line, else a placeholder.
    pub fn position_name(&self, job_text: &str) -> String {
        if let Some(name) = self
            .position_regex
            .captures(job_text)
            .and_then(|caps| caps.get(1))
            .map(|m| clean_name(m.as_str()))
            .filter(|name| !name.is_empty())
        {
            return name;
        }

        job_text
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .filter(|line| line.chars().count() <= MAX_TITLE_LINE_CHARS)
            .map(|line| clean_name(line.trim_end_matches(':')))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| POSITION_PLACEHOLDER.to_string())
    }
}

fn clean_name(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end_matches(|c: char| c == '.' || c == ',' || c == '-')
        .to_string()
}
