//! Resume section detection

use crate::error::{Result, JobAssistantError};
use crate::processing::vocabulary::Vocabulary;
use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    PersonalInfo,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
}

impl SectionKind {
    pub const ALL: [SectionKind; 7] = [
        SectionKind::PersonalInfo,
        SectionKind::Summary,
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Skills,
        SectionKind::Projects,
        SectionKind::Certifications,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::PersonalInfo => "personal_info",
            SectionKind::Summary => "summary",
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::Certifications => "certifications",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw text blocks of a resume, one per section. Blocks never assigned are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvSections {
    pub personal_info: String,
    pub summary: String,
    pub experience: String,
    pub education: String,
    pub skills: String,
    pub projects: String,
    pub certifications: String,
}

impl CvSections {
    pub fn get(&self, kind: SectionKind) -> &str {
        match kind {
            SectionKind::PersonalInfo => &self.personal_info,
            SectionKind::Summary => &self.summary,
            SectionKind::Experience => &self.experience,
            SectionKind::Education => &self.education,
            SectionKind::Skills => &self.skills,
            SectionKind::Projects => &self.projects,
            SectionKind::Certifications => &self.certifications,
        }
    }

    fn get_mut(&mut self, kind: SectionKind) -> &mut String {
        match kind {
            SectionKind::PersonalInfo => &mut self.personal_info,
            SectionKind::Summary => &mut self.summary,
            SectionKind::Experience => &mut self.experience,
            SectionKind::Education => &mut self.education,
            SectionKind::Skills => &mut self.skills,
            SectionKind::Projects => &mut self.projects,
            SectionKind::Certifications => &mut self.certifications,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionKind, &str)> {
        SectionKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    /// Sections that received at least one line.
    pub fn detected(&self) -> Vec<SectionKind> {
        self.iter()
            .filter(|(_, content)| !content.is_empty())
            .map(|(kind, _)| kind)
            .collect()
    }

    // A section heading seen twice keeps the earlier block and appends the new one.
    fn flush(&mut self, kind: SectionKind, buffer: &mut Vec<&str>) {
        if buffer.is_empty() {
            return;
        }
        let block = self.get_mut(kind);
        if !block.is_empty() {
            block.push('\n');
        }
        block.push_str(&buffer.join("\n"));
        buffer.clear();
    }
}

/// Splits resume text into sections using line-level heading keywords.
pub struct Sectionizer {
    matcher: AhoCorasick,
    /// Heading group index for every automaton pattern
    pattern_groups: Vec<usize>,
    group_sections: Vec<SectionKind>,
}

impl Sectionizer {
    pub fn new(vocabulary: &Vocabulary) -> Result<Self> {
        let mut patterns = Vec::new();
        let mut pattern_groups = Vec::new();
        let mut group_sections = Vec::new();

        for (group_idx, group) in vocabulary.section_headings.iter().enumerate() {
            group_sections.push(group.section);
            for keyword in &group.keywords {
                patterns.push(keyword.as_str());
                pattern_groups.push(group_idx);
            }
        }

        // Standard semantics so overlapping keywords from every group are reported
        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&patterns)
            .map_err(|e| JobAssistantError::Vocabulary(format!("Failed to build heading matcher: {}", e)))?;

        Ok(Self {
            matcher,
            pattern_groups,
            group_sections,
        })
    }

    /// Section a line switches to, if it is a heading. Earlier groups win ties.
    pub fn heading_of(&self, line: &str) -> Option<SectionKind> {
        let lower = line.to_lowercase();
        self.matcher
            .find_overlapping_iter(&lower)
            .map(|mat| self.pattern_groups[mat.pattern().as_usize()])
            .min()
            .map(|group_idx| self.group_sections[group_idx])
    }

    pub fn sectionize(&self, text: &str) -> CvSections {
        let mut sections = CvSections::default();
        let mut current = SectionKind::PersonalInfo;
        let mut buffer: Vec<&str> = Vec::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match self.heading_of(line) {
                Some(next) => {
                    sections.flush(current, &mut buffer);
                    current = next;
                }
                None => buffer.push(line),
            }
        }

        sections.flush(current, &mut buffer);
        sections
    }
}
