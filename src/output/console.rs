//! Console rendering of an application analysis

use crate::output::export::ExportOutcome;
use crate::processing::analyzer::ApplicationAnalysis;
use crate::processing::matcher::MatchResult;
use colored::{Color, Colorize};

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let (badge, color) = match score {
            80..=100 => ("STRONG MATCH", Color::Green),
            50..=79 => ("PARTIAL MATCH", Color::Yellow),
            _ => ("WEAK MATCH", Color::Red),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_match(&self, label: &str, result: &MatchResult) -> String {
        let mut output = format!(
            "{}: {}% {}\n",
            label,
            result.match_percentage,
            self.format_score_badge(result.match_percentage)
        );

        let exact: Vec<&str> = result.matched.iter().map(|p| p.requirement.as_str()).collect();
        output.push_str(&format!("  ✅ Exact: {}\n", list_or_dash(&exact)));

        let partial: Vec<String> = result
            .partial
            .iter()
            .map(|p| format!("{} ~ {}", p.requirement, p.candidate))
            .collect();
        output.push_str(&format!(
            "  🔶 Partial: {}\n",
            self.colorize(&list_or_dash(&partial), Color::Yellow)
        ));

        output.push_str(&format!(
            "  ❌ Missing: {}\n",
            self.colorize(&list_or_dash(&result.missing), Color::Red)
        ));
        output
    }

    pub fn format_analysis(&self, analysis: &ApplicationAnalysis) -> String {
        let mut output = String::new();
        let requirements = &analysis.requirements;

        output.push_str(&self.format_header("📊 APPLICATION ANALYSIS", 1));
        output.push_str(&format!(
            "Position: {} | Company: {}\n",
            self.colorize(&analysis.position_name, Color::Cyan),
            self.colorize(&analysis.company_name, Color::Cyan)
        ));

        output.push_str(&self.format_header("Skill Match", 2));
        output.push_str(&self.format_match("CV match", &analysis.cv_match));
        if let Some(profile_match) = &analysis.profile_match {
            output.push_str(&self.format_match("Profile match", profile_match));
        }

        output.push_str(&self.format_header("Job Requirements", 2));
        output.push_str(&format!("🎯 Skills: {}\n", list_or_dash(&requirements.skills)));
        output.push_str(&format!("🤝 Soft skills: {}\n", list_or_dash(&requirements.soft_skills)));
        output.push_str(&format!("⏳ Experience: {}\n", list_or_dash(&requirements.experience_phrases)));
        output.push_str(&format!("🎓 Qualifications: {}\n", list_or_dash(&requirements.qualifications)));

        if self.detailed {
            output.push_str(&self.format_header("Resume Sections", 3));
            for (kind, content) in analysis.sections.iter() {
                let status = if content.is_empty() {
                    self.colorize("missing", Color::Red)
                } else {
                    format!("{} chars", content.chars().count())
                };
                output.push_str(&format!("  {:<16} {}\n", kind.as_str(), status));
            }

            output.push_str(&self.format_header("Gaps", 3));
            for gap in analysis.gaps.experience_gaps.iter().chain(&analysis.gaps.summary_improvements) {
                output.push_str(&format!("  📋 {}\n", gap));
            }

            output.push_str(&self.format_header("Achievements", 3));
            if analysis.achievements.is_empty() {
                output.push_str("  No quantified achievements found\n");
            }
            for achievement in &analysis.achievements {
                output.push_str(&format!("  💡 {}\n", achievement));
            }
        }

        output
    }

    pub fn format_exports(&self, outcomes: &[ExportOutcome]) -> String {
        let mut output = String::new();
        for outcome in outcomes {
            match outcome {
                ExportOutcome::Text { path } | ExportOutcome::Pdf { path } => {
                    output.push_str(&format!("💾 {}\n", path.display()));
                }
                ExportOutcome::FallbackText { path, reason } => {
                    output.push_str(&format!(
                        "⚠️  {} ({})\n",
                        path.display(),
                        self.colorize(&format!("PDF failed, saved as text: {}", reason), Color::Yellow)
                    ));
                }
            }
        }
        output
    }
}

fn list_or_dash<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.iter().map(|item| item.as_ref()).collect::<Vec<&str>>().join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::analyzer::{ApplicationAnalyzer, ApplicationInput};
    use crate::processing::vocabulary::Vocabulary;
    use std::path::PathBuf;

    fn analysis() -> ApplicationAnalysis {
        let analyzer = ApplicationAnalyzer::new(Vocabulary::builtin().unwrap()).unwrap();
        analyzer.analyze(&ApplicationInput {
            resume_text: "Skills\nPython, JavaScript".to_string(),
            job_text: "Data Engineer\nPython, Java and SQL required".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_plain_console_summary() {
        let output = ConsoleFormatter::new(false, true).format_analysis(&analysis());

        assert!(output.contains("CV match: 67% [PARTIAL MATCH]"));
        assert!(output.contains("🔶 Partial: java ~ javascript"));
        assert!(output.contains("❌ Missing: sql"));
        assert!(output.contains("Position: Data Engineer"));
        assert!(output.contains("skills           18 chars"));
        assert!(!output.contains("Profile match"));
    }

    #[test]
    fn test_summary_without_details_skips_sections() {
        let output = ConsoleFormatter::new(false, false).format_analysis(&analysis());
        assert!(!output.contains("Resume Sections"));
    }

    #[test]
    fn test_fallback_exports_are_flagged() {
        let outcomes = vec![
            ExportOutcome::Pdf { path: PathBuf::from("out/cv.pdf") },
            ExportOutcome::FallbackText {
                path: PathBuf::from("out/letter.txt"),
                reason: "bad glyph".to_string(),
            },
        ];
        let output = ConsoleFormatter::new(false, false).format_exports(&outcomes);
        assert!(output.contains("💾 out/cv.pdf"));
        assert!(output.contains("PDF failed, saved as text: bad glyph"));
    }
}
