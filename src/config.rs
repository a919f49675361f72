//! Configuration management for the job assistant

use crate::error::{Result, JobAssistantError};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub output: OutputConfig,
    pub pdf: PdfConfig,
    pub vocabulary: VocabularyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Flat directory holding every exported document
    pub output_dir: PathBuf,
    pub default_format: ExportFormat,
    pub color_output: bool,
}

/// Page geometry for the fixed-width PDF layout, in millimetres and points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfConfig {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    pub printable_width_mm: f32,
    pub font_size_pt: f32,
    pub line_height_mm: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VocabularyConfig {
    /// Replacement vocabulary JSON; the embedded default is used when unset
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Txt,
    Pdf,
    Both,
    None,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: OutputConfig {
                output_dir: PathBuf::from("generated_files"),
                default_format: ExportFormat::Txt,
                color_output: true,
            },
            pdf: PdfConfig::default(),
            vocabulary: VocabularyConfig::default(),
        }
    }
}

impl Default for PdfConfig {
    fn default() -> Self {
        // A4 with a 10mm margin and 190mm of usable line width
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 10.0,
            printable_width_mm: 190.0,
            font_size_pt: 10.0,
            line_height_mm: 5.0,
        }
    }
}

impl Config {
    /// Load the config at `path`, writing the defaults there on first use.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            info!("Created default configuration at {}", path.display());
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| JobAssistantError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| JobAssistantError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("job-assistant")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let pdf = &self.pdf;
        if pdf.font_size_pt <= 0.0 || pdf.line_height_mm <= 0.0 {
            return Err(JobAssistantError::Configuration(
                "pdf.font_size_pt and pdf.line_height_mm must be positive".to_string(),
            ));
        }
        if pdf.printable_width_mm <= 0.0
            || pdf.margin_mm * 2.0 + pdf.printable_width_mm > pdf.page_width_mm
        {
            return Err(JobAssistantError::Configuration(format!(
                "pdf.printable_width_mm ({}) does not fit a {}mm page with {}mm margins",
                pdf.printable_width_mm, pdf.page_width_mm, pdf.margin_mm
            )));
        }
        if pdf.margin_mm * 2.0 + pdf.line_height_mm > pdf.page_height_mm {
            return Err(JobAssistantError::Configuration(
                "pdf.page_height_mm leaves no room for a single line".to_string(),
            ));
        }
        Ok(())
    }

    pub fn output_dir(&self) -> &PathBuf {
        &self.output.output_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.output_dir(), &PathBuf::from("generated_files"));
        assert_eq!(config.output.default_format, ExportFormat::Txt);
        assert!(config.vocabulary.path.is_none());
    }

    #[test]
    fn test_config_toml_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.output.default_format = ExportFormat::Both;
        config.vocabulary.path = Some(PathBuf::from("/tmp/vocab.json"));
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.output.default_format, ExportFormat::Both);
        assert_eq!(loaded.vocabulary.path, Some(PathBuf::from("/tmp/vocab.json")));
    }

    #[test]
    fn test_load_or_create_writes_defaults_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job-assistant").join("config.toml");

        let created = Config::load_or_create(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created.output.default_format, ExportFormat::Txt);

        let mut edited = created;
        edited.output.default_format = ExportFormat::Pdf;
        edited.save_to(&path).unwrap();
        assert_eq!(Config::load_or_create(&path).unwrap().output.default_format, ExportFormat::Pdf);
    }

    #[test]
    fn test_rejects_oversized_printable_width() {
        let mut config = Config::default();
        config.pdf.printable_width_mm = 250.0;
        assert!(matches!(
            config.validate(),
            Err(JobAssistantError::Configuration(_))
        ));
    }

    #[test]
    fn test_malformed_toml_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "output = 3").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(JobAssistantError::Configuration(_))
        ));
    }
}
