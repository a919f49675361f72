//! Writing composed documents to the output directory

use crate::config::{Config, ExportFormat};
use crate::error::{Result, JobAssistantError};
use crate::output::compose::DocumentKind;
use crate::output::pdf::{DocumentRenderer, PrintPdfRenderer};
use chrono::NaiveDateTime;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Text,
    Pdf,
}

impl DocumentFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Text => "txt",
            DocumentFormat::Pdf => "pdf",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Text { path: PathBuf },
    Pdf { path: PathBuf },
    /// PDF rendering failed and the content was written as text instead
    FallbackText { path: PathBuf, reason: String },
}

impl ExportOutcome {
    pub fn path(&self) -> &Path {
        match self {
            ExportOutcome::Text { path }
            | ExportOutcome::Pdf { path }
            | ExportOutcome::FallbackText { path, .. } => path,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ExportOutcome::FallbackText { .. })
    }
}

/// `<kind>_<YYYYMMDD_HHMMSS>.<ext>`
pub fn file_name(kind: DocumentKind, format: DocumentFormat, timestamp: NaiveDateTime) -> String {
    format!(
        "{}_{}.{}",
        kind.as_str(),
        timestamp.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

pub struct Exporter<R = PrintPdfRenderer> {
    output_dir: PathBuf,
    renderer: R,
}

impl Exporter<PrintPdfRenderer> {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self::with_renderer(output_dir, PrintPdfRenderer::default())
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_renderer(
            config.output_dir().clone(),
            PrintPdfRenderer::new(config.pdf.clone()),
        )
    }
}

impl<R: DocumentRenderer> Exporter<R> {
    pub fn with_renderer(output_dir: impl Into<PathBuf>, renderer: R) -> Self {
        Self {
            output_dir: output_dir.into(),
            renderer,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write `content` verbatim as `<output_dir>/<name>`.
    pub fn save_as_text(&self, content: &str, name: &str) -> Result<PathBuf> {
        let path = self.target_path(name)?;
        self.write(&path, content.as_bytes())?;
        info!("Saved {}", path.display());
        Ok(path)
    }

    /// Render `content` to `<output_dir>/<name>`, falling back to a `.txt`
    /// file with the same stem when rendering fails.
    pub fn save_as_pdf(&self, content: &str, name: &str) -> Result<ExportOutcome> {
        let path = self.target_path(name)?;
        let title = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();

        match self.renderer.render(&title, content) {
            Ok(bytes) => {
                self.write(&path, &bytes)?;
                info!("Saved {}", path.display());
                Ok(ExportOutcome::Pdf { path })
            }
            Err(e) => {
                let reason = e.to_string();
                warn!("PDF generation failed for {}, saving as text: {}", name, reason);
                let text_name = Path::new(name).with_extension(DocumentFormat::Text.extension());
                let path = self.save_as_text(content, &text_name.to_string_lossy())?;
                Ok(ExportOutcome::FallbackText { path, reason })
            }
        }
    }

    pub fn export(
        &self,
        kind: DocumentKind,
        content: &str,
        format: ExportFormat,
        timestamp: NaiveDateTime,
    ) -> Result<Vec<ExportOutcome>> {
        let mut outcomes = Vec::new();

        if matches!(format, ExportFormat::Txt | ExportFormat::Both) {
            let name = file_name(kind, DocumentFormat::Text, timestamp);
            outcomes.push(ExportOutcome::Text {
                path: self.save_as_text(content, &name)?,
            });
        }

        if matches!(format, ExportFormat::Pdf | ExportFormat::Both) {
            let name = file_name(kind, DocumentFormat::Pdf, timestamp);
            outcomes.push(self.save_as_pdf(content, &name)?);
        }

        Ok(outcomes)
    }

    /// Remove every generated file and recreate the empty directory.
    pub fn clear(&self) -> Result<usize> {
        let mut removed = 0;
        if self.output_dir.exists() {
            removed = fs::read_dir(&self.output_dir)?.count();
            fs::remove_dir_all(&self.output_dir).map_err(|e| self.export_error(&self.output_dir, e))?;
        }
        fs::create_dir_all(&self.output_dir).map_err(|e| self.export_error(&self.output_dir, e))?;
        info!("Cleared {} entries from {}", removed, self.output_dir.display());
        Ok(removed)
    }

    // The output directory is flat: only the final path component of `name` is used.
    fn target_path(&self, name: &str) -> Result<PathBuf> {
        let file_name = Path::new(name)
            .file_name()
            .ok_or_else(|| JobAssistantError::InvalidInput(format!("Invalid output file name: '{}'", name)))?;
        Ok(self.output_dir.join(file_name))
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.output_dir).map_err(|e| self.export_error(path, e))?;
        fs::write(path, bytes).map_err(|e| self.export_error(path, e))?;
        debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    fn export_error(&self, path: &Path, e: std::io::Error) -> JobAssistantError {
        JobAssistantError::Export {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
    }
}
