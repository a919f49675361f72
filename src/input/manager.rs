//! Input manager for handling different file types

use crate::error::{Result, JobAssistantError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    DocxExtractor, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;

pub struct InputManager {
    cache: HashMap<String, String>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if let Some(cached_text) = self.cache.get(&path_str) {
            info!("Using cached text for: {}", path.display());
            return Ok(cached_text.clone());
        }

        if !path.exists() {
            return Err(JobAssistantError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = self.detect_file_type(path)?;
        let mime = file_type.mime().ok_or_else(|| {
            JobAssistantError::UnsupportedFormat(format!("{}", path.display()))
        })?;

        info!("Reading {} as {}", path.display(), mime);
        let bytes = tokio::fs::read(path).await?;
        let text = Self::extract_bytes(&bytes, mime)?;

        self.cache.insert(path_str, text.clone());

        Ok(text)
    }

    /// Extract text from an uploaded document given its declared MIME type.
    pub fn extract_bytes(bytes: &[u8], mime: &str) -> Result<String> {
        debug!("Extracting {} bytes of {}", bytes.len(), mime);
        match FileType::from_mime(mime) {
            FileType::Pdf => PdfExtractor.extract_bytes(bytes),
            FileType::Docx => DocxExtractor.extract_bytes(bytes),
            FileType::Text => PlainTextExtractor.extract_bytes(bytes),
            FileType::Markdown => MarkdownExtractor.extract_bytes(bytes),
            FileType::Unknown => Err(JobAssistantError::UnsupportedFormat(mime.to_string())),
        }
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                JobAssistantError::InvalidInput(format!("File has no extension: {}", path.display()))
            })?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
