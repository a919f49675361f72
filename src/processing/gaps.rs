//! Section-level gap analysis between a resume and job requirements

use crate::processing::requirements::{RequirementExtractor, RequirementSet};
use crate::processing::sectionizer::CvSections;
use serde::{Deserialize, Serialize};

const MAX_MISSING_SKILLS: usize = 10;
const EXPERIENCE_SKILLS_CHECKED: usize = 5;
const SUMMARY_SKILLS_CHECKED: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapReport {
    /// Requirement skills not named in the skills section
    pub missing_from_skills_section: Vec<String>,
    pub present_in_skills_section: Vec<String>,
    pub experience_gaps: Vec<String>,
    pub summary_improvements: Vec<String>,
    pub skills_section_length: usize,
    pub experience_section_length: usize,
    pub summary_section_length: usize,
}

pub fn analyze_gaps(
    extractor: &RequirementExtractor,
    sections: &CvSections,
    requirements: &RequirementSet,
) -> GapReport {
    let (present, missing): (Vec<String>, Vec<String>) = requirements
        .skills
        .iter()
        .cloned()
        .partition(|skill| extractor.mentions(&sections.skills, skill));

    GapReport {
        missing_from_skills_section: missing.into_iter().take(MAX_MISSING_SKILLS).collect(),
        present_in_skills_section: present,
        experience_gaps: experience_gaps(extractor, &sections.experience, requirements),
        summary_improvements: summary_improvements(extractor, &sections.summary, requirements),
        skills_section_length: sections.skills.chars().count(),
        experience_section_length: sections.experience.chars().count(),
        summary_section_length: sections.summary.chars().count(),
    }
}

fn mentions_tenure(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("year") || lower.contains("experience")
}

fn experience_gaps(extractor: &RequirementExtractor, experience: &str, requirements: &RequirementSet) -> Vec<String> {
    let mut gaps: Vec<String> = requirements
        .top_skills(EXPERIENCE_SKILLS_CHECKED)
        .iter()
        .filter(|skill| !extractor.mentions(experience, skill))
        .map(|skill| format!("Add experience with {}", skill))
        .collect();

    if let Some(phrase) = requirements.first_experience() {
        if !mentions_tenure(experience) {
            gaps.push(format!("Highlight {} of relevant experience", phrase));
        }
    }

    gaps
}

fn summary_improvements(extractor: &RequirementExtractor, summary: &str, requirements: &RequirementSet) -> Vec<String> {
    let mut improvements: Vec<String> = requirements
        .top_skills(SUMMARY_SKILLS_CHECKED)
        .iter()
        .filter(|skill| !extractor.mentions(summary, skill))
        .map(|skill| format!("Include '{}' in summary", skill))
        .collect();

    if let Some(phrase) = requirements.first_experience() {
        if !mentions_tenure(summary) {
            improvements.push(format!("Add experience level: {}", phrase));
        }
    }

    improvements
}
