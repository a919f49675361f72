//! CLI interface for the job assistant

use crate::config::ExportFormat;
use crate::output::compose::DocumentKind;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Extensions accepted for resumes and job descriptions.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "docx", "txt", "md"];

#[derive(Parser)]
#[command(name = "job-assistant")]
#[command(about = "Generate CV improvements, LinkedIn suggestions, a motivation letter and interview prep")]
#[command(long_about = "Extract skills from a resume and a job description, classify each requirement as an exact, partial or missing match, and write tailored application documents as text or PDF")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a resume against a job description and write the application documents
    Generate {
        /// Path to resume file (PDF, DOCX, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (PDF, DOCX, TXT, MD)
        #[arg(short, long, required_unless_present = "job_text")]
        job: Option<PathBuf>,

        /// Job description given inline instead of as a file
        #[arg(long, conflicts_with = "job")]
        job_text: Option<String>,

        /// LinkedIn profile URL
        #[arg(long)]
        profile_url: Option<String>,

        /// LinkedIn About section text
        #[arg(long)]
        about: Option<String>,

        /// File holding the LinkedIn About section
        #[arg(long, conflicts_with = "about")]
        about_file: Option<PathBuf>,

        /// Export format: txt, pdf, both, none (defaults to the configured format)
        #[arg(short, long)]
        format: Option<String>,

        /// Only generate one document: cv, linkedin, letter, interview
        #[arg(long)]
        only: Option<String>,

        /// Output directory (defaults to the configured directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Print generated documents to stdout
        #[arg(short, long)]
        print: bool,
    },

    /// Show the skill match between a resume and a job description
    Analyze {
        /// Path to resume file (PDF, DOCX, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (PDF, DOCX, TXT, MD)
        #[arg(short, long, required_unless_present = "job_text")]
        job: Option<PathBuf>,

        /// Job description given inline instead of as a file
        #[arg(long, conflicts_with = "job")]
        job_text: Option<String>,

        /// LinkedIn About section text
        #[arg(long)]
        about: Option<String>,

        /// Output detailed analysis
        #[arg(short, long)]
        detailed: bool,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Skill vocabulary commands
    Vocabulary {
        #[command(subcommand)]
        action: VocabularyAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },

    /// Remove all generated files
    Clean,
}

#[derive(Subcommand)]
pub enum VocabularyAction {
    /// Summarize the active vocabulary
    Show,

    /// Write the active vocabulary as JSON
    Export {
        /// Destination file (stdout when omitted)
        path: Option<PathBuf>,
    },

    /// Check a vocabulary file without activating it
    Validate {
        path: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate export format
pub fn parse_export_format(format: &str) -> Result<ExportFormat, String> {
    match format.to_lowercase().as_str() {
        "txt" | "text" => Ok(ExportFormat::Txt),
        "pdf" => Ok(ExportFormat::Pdf),
        "both" | "all" => Ok(ExportFormat::Both),
        "none" => Ok(ExportFormat::None),
        _ => Err(format!("Invalid export format: {}. Supported: txt, pdf, both, none", format)),
    }
}

pub fn parse_document_kind(kind: &str) -> Result<DocumentKind, String> {
    match kind.to_lowercase().as_str() {
        "cv" | "cv_improvements" => Ok(DocumentKind::CvImprovements),
        "linkedin" | "linkedin_suggestions" => Ok(DocumentKind::LinkedinSuggestions),
        "letter" | "motivation_letter" => Ok(DocumentKind::MotivationLetter),
        "interview" | "interview_preparation" => Ok(DocumentKind::InterviewPreparation),
        _ => Err(format!("Invalid document: {}. Supported: cv, linkedin, letter, interview", kind)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_requires_a_job() {
        assert!(Cli::try_parse_from(["job-assistant", "generate", "-r", "cv.pdf"]).is_err());
        assert!(Cli::try_parse_from(["job-assistant", "generate", "-r", "cv.pdf", "--job-text", "Rust dev"]).is_ok());
        assert!(Cli::try_parse_from([
            "job-assistant", "generate", "-r", "cv.pdf", "-j", "job.txt", "--job-text", "Rust dev"
        ])
        .is_err());
    }

    #[test]
    fn test_parse_export_format() {
        assert_eq!(parse_export_format("PDF"), Ok(ExportFormat::Pdf));
        assert_eq!(parse_export_format("text"), Ok(ExportFormat::Txt));
        assert!(parse_export_format("html").is_err());
    }

    #[test]
    fn test_parse_document_kind() {
        assert_eq!(parse_document_kind("letter"), Ok(DocumentKind::MotivationLetter));
        assert_eq!(parse_document_kind("cv_improvements"), Ok(DocumentKind::CvImprovements));
        assert!(parse_document_kind("resume").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("cv.DOCX"), DOCUMENT_EXTENSIONS).is_ok());
        assert!(validate_file_extension(Path::new("cv.doc"), DOCUMENT_EXTENSIONS).is_err());
        assert!(validate_file_extension(Path::new("cv"), DOCUMENT_EXTENSIONS).is_err());
    }
}
