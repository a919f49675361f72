//! File type detection

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_TEXT: &str = "text/plain";
pub const MIME_MARKDOWN: &str = "text/markdown";

#[derive(Debug, Clone, PartialEq)]
pub enum FileType {
    Pdf,
    Docx,
    Text,
    Markdown,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "docx" => FileType::Docx,
            "txt" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    /// Parameters such as `; charset=utf-8` are ignored.
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime.split(';').next().unwrap_or("").trim().to_lowercase();
        match essence.as_str() {
            MIME_PDF => FileType::Pdf,
            MIME_DOCX => FileType::Docx,
            MIME_TEXT => FileType::Text,
            MIME_MARKDOWN => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    pub fn mime(&self) -> Option<&'static str> {
        match self {
            FileType::Pdf => Some(MIME_PDF),
            FileType::Docx => Some(MIME_DOCX),
            FileType::Text => Some(MIME_TEXT),
            FileType::Markdown => Some(MIME_MARKDOWN),
            FileType::Unknown => None,
        }
    }
}
