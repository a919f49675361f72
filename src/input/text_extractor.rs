//! Text extraction from various file formats

use crate::error::{Result, JobAssistantError};
use pulldown_cmark::{html, Parser};
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use std::io::{Cursor, Read};

pub trait TextExtractor {
    fn extract_bytes(&self, bytes: &[u8]) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract_bytes(&self, bytes: &[u8]) -> Result<String> {
        let text = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| JobAssistantError::PdfExtraction(e.to_string()))?;
        Ok(text.trim().to_string())
    }
}

/// Word (OOXML) documents: a zip archive whose body lives in `word/document.xml`.
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract_bytes(&self, bytes: &[u8]) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| JobAssistantError::DocxExtraction(format!("not a Word archive: {}", e)))?;

        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .map_err(|e| JobAssistantError::DocxExtraction(format!("missing word/document.xml: {}", e)))?
            .read_to_string(&mut xml)
            .map_err(|e| JobAssistantError::DocxExtraction(format!("unreadable word/document.xml: {}", e)))?;

        Self::document_text(&xml)
    }
}

// Open table row: finished cells plus the cell being read.
#[derive(Default)]
struct TableRow {
    cells: Vec<String>,
    cell: String,
}

impl TableRow {
    fn finish_cell(&mut self) {
        let cell = std::mem::take(&mut self.cell);
        let cell = cell.trim();
        if !cell.is_empty() {
            self.cells.push(cell.to_string());
        }
    }
}

impl DocxExtractor {
    /// Text of a WordprocessingML body: one line per paragraph, and one line
    /// per table row with its non-empty cells joined by `" | "`.
    pub fn document_text(xml: &str) -> Result<String> {
        let mut reader = Reader::from_str(xml);
        let mut text = String::new();
        let mut rows: Vec<TableRow> = Vec::new();
        let mut in_text_run = false;

        loop {
            let event = reader.read_event().map_err(|e| {
                JobAssistantError::DocxExtraction(format!(
                    "malformed document.xml at byte {}: {}",
                    reader.buffer_position(),
                    e
                ))
            })?;

            match event {
                Event::Start(e) => match e.name().as_ref() {
                    b"w:t" => in_text_run = true,
                    b"w:tr" => rows.push(TableRow::default()),
                    _ => {}
                },
                Event::End(e) => match e.name().as_ref() {
                    b"w:t" => in_text_run = false,
                    b"w:p" => sink(&mut text, &mut rows).push('\n'),
                    b"w:tc" => {
                        if let Some(row) = rows.last_mut() {
                            row.finish_cell();
                        }
                    }
                    b"w:tr" => {
                        if let Some(row) = rows.pop() {
                            if !row.cells.is_empty() {
                                let out = sink(&mut text, &mut rows);
                                out.push_str(&row.cells.join(" | "));
                                out.push('\n');
                            }
                        }
                    }
                    b"w:tbl" => sink(&mut text, &mut rows).push('\n'),
                    _ => {}
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"w:tab" => sink(&mut text, &mut rows).push('\t'),
                    b"w:br" | b"w:cr" | b"w:p" => sink(&mut text, &mut rows).push('\n'),
                    _ => {}
                },
                Event::Text(t) if in_text_run => {
                    let unescaped = t
                        .unescape()
                        .map_err(|e| JobAssistantError::DocxExtraction(format!("bad text run: {}", e)))?;
                    sink(&mut text, &mut rows).push_str(&unescaped);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(text.trim().to_string())
    }
}

// Inside a table, text goes to the innermost open cell.
fn sink<'a>(text: &'a mut String, rows: &'a mut [TableRow]) -> &'a mut String {
    match rows.last_mut() {
        Some(row) => &mut row.cell,
        None => text,
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract_bytes(&self, bytes: &[u8]) -> Result<String> {
        let content = std::str::from_utf8(bytes)
            .map_err(|e| JobAssistantError::TextExtraction(format!("not valid UTF-8: {}", e)))?;
        Ok(content.trim().to_string())
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract_bytes(&self, bytes: &[u8]) -> Result<String> {
        let markdown_content = PlainTextExtractor.extract_bytes(bytes)?;

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        self.html_to_text(&html_output)
    }
}

impl MarkdownExtractor {
    fn html_to_text(&self, html: &str) -> Result<String> {
        let text = html
            .replace("<br>", "\n")
            .replace("<br />", "\n")
            .replace("</p>", "\n\n")
            .replace("</li>", "\n")
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");

        let re = Regex::new(r"<[^>]*>")
            .map_err(|e| JobAssistantError::TextExtraction(format!("tag regex: {}", e)))?;
        let clean_text = re.replace_all(&text, "");

        let lines: Vec<String> = clean_text
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn docx_bytes(document_xml: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        writer.start_file("word/document.xml", options).unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Jane Roe</w:t></w:r></w:p>
    <w:p><w:r><w:t>Skills</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">Python </w:t></w:r><w:r><w:t>&amp; AWS</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn test_docx_paragraphs_become_lines() {
        let text = DocxExtractor.extract_bytes(&docx_bytes(BODY)).unwrap();
        assert_eq!(text, "Jane Roe\nSkills\nPython & AWS");
    }

    #[test]
    fn test_docx_table_rows_become_single_lines() {
        let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>
    <w:p><w:r><w:t>Skills</w:t></w:r></w:p>
    <w:tbl>
      <w:tr>
        <w:tc><w:p><w:r><w:t>Languages</w:t></w:r></w:p></w:tc>
        <w:tc><w:p><w:r><w:t>Rust</w:t></w:r></w:p><w:p><w:r><w:t>Python</w:t></w:r></w:p></w:tc>
      </w:tr>
      <w:tr>
        <w:tc><w:p/></w:tc>
        <w:tc><w:p><w:r><w:t>Docker</w:t></w:r></w:p></w:tc>
      </w:tr>
      <w:tr><w:tc><w:p/></w:tc></w:tr>
    </w:tbl>
    <w:p><w:r><w:t>Experience</w:t></w:r></w:p>
  </w:body></w:document>"#;

        let text = DocxExtractor::document_text(xml).unwrap();
        assert_eq!(text, "Skills\nLanguages | Rust\nPython\nDocker\n\nExperience");
    }

    #[test]
    fn test_docx_without_body_part_fails() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("other.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        assert!(matches!(
            DocxExtractor.extract_bytes(&bytes),
            Err(JobAssistantError::DocxExtraction(_))
        ));
    }

    #[test]
    fn test_garbage_is_not_a_docx() {
        assert!(matches!(
            DocxExtractor.extract_bytes(b"definitely not a zip"),
            Err(JobAssistantError::DocxExtraction(_))
        ));
    }

    #[test]
    fn test_garbage_is_not_a_pdf() {
        assert!(matches!(
            PdfExtractor.extract_bytes(b"%PDF-garbage"),
            Err(JobAssistantError::PdfExtraction(_))
        ));
    }

    #[test]
    fn test_plain_text_is_trimmed_and_validated() {
        assert_eq!(PlainTextExtractor.extract_bytes(b"  hello\n").unwrap(), "hello");
        assert!(PlainTextExtractor.extract_bytes(&[0xff, 0xfe, 0xfd]).is_err());
    }

    #[test]
    fn test_markdown_formatting_is_stripped() {
        let text = MarkdownExtractor
            .extract_bytes(b"# Jane Roe\n\n## Skills\n\n- **Rust**\n- Go & C\n")
            .unwrap();
        assert_eq!(text, "Jane Roe\nSkills\nRust\nGo & C");
    }
}
