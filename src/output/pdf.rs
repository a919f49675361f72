//! Plain-text to PDF rendering with a single fixed-width font

use crate::config::PdfConfig;
use crate::error::{Result, JobAssistantError};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use unicode_segmentation::UnicodeSegmentation;

/// Points to millimetres.
const MM_PER_PT: f32 = 0.352_778;
/// Courier glyphs are 600/1000 em wide.
const COURIER_ADVANCE_EM: f32 = 0.6;
const TAB_WIDTH: usize = 4;

/// Renders document text to a complete file body.
pub trait DocumentRenderer {
    fn render(&self, title: &str, content: &str) -> Result<Vec<u8>>;
}

pub struct PrintPdfRenderer {
    config: PdfConfig,
}

impl PrintPdfRenderer {
    pub fn new(config: PdfConfig) -> Self {
        Self { config }
    }

    /// Characters per line at the configured font size and printable width.
    pub fn line_capacity(&self) -> usize {
        let glyph_mm = self.config.font_size_pt * COURIER_ADVANCE_EM * MM_PER_PT;
        ((self.config.printable_width_mm / glyph_mm).floor() as usize).max(1)
    }

    fn lines_per_page(&self) -> usize {
        let usable = self.config.page_height_mm - 2.0 * self.config.margin_mm;
        ((usable / self.config.line_height_mm).floor() as usize).max(1)
    }
}

impl Default for PrintPdfRenderer {
    fn default() -> Self {
        Self::new(PdfConfig::default())
    }
}

impl DocumentRenderer for PrintPdfRenderer {
    fn render(&self, title: &str, content: &str) -> Result<Vec<u8>> {
        let text = sanitize_for_pdf(content);
        if let Some(bad) = text.chars().find(|c| !is_encodable(*c)) {
            return Err(JobAssistantError::PdfRender(format!(
                "character {:?} (U+{:04X}) is not available in the Courier encoding",
                bad, bad as u32
            )));
        }

        let capacity = self.line_capacity();
        let lines: Vec<String> = text
            .lines()
            .flat_map(|line| wrap_line(&line.replace('\t', &" ".repeat(TAB_WIDTH)), capacity))
            .collect();

        let cfg = &self.config;
        let (doc, first_page, first_layer) =
            PdfDocument::new(title, Mm(cfg.page_width_mm), Mm(cfg.page_height_mm), "Layer 1");
        let font = doc
            .add_builtin_font(BuiltinFont::Courier)
            .map_err(|e| JobAssistantError::PdfRender(e.to_string()))?;

        let per_page = self.lines_per_page();
        let mut layer = doc.get_page(first_page).get_layer(first_layer);
        for (index, line) in lines.iter().enumerate() {
            let row = index % per_page;
            if index > 0 && row == 0 {
                let (page, page_layer) =
                    doc.add_page(Mm(cfg.page_width_mm), Mm(cfg.page_height_mm), "Layer 1");
                layer = doc.get_page(page).get_layer(page_layer);
            }
            if line.is_empty() {
                continue;
            }
            let y = cfg.page_height_mm - cfg.margin_mm - cfg.line_height_mm * (row as f32 + 1.0);
            layer.use_text(line.as_str(), cfg.font_size_pt, Mm(cfg.margin_mm), Mm(y), &font);
        }

        doc.save_to_bytes()
            .map_err(|e| JobAssistantError::PdfRender(e.to_string()))
    }
}

/// Replace common typographic characters with ASCII the built-in fonts can draw.
pub fn sanitize_for_pdf(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '\u{2022}' | '\u{25CF}' | '\u{25AA}' | '\u{2023}' => out.push('-'),
            '\u{2713}' | '\u{2714}' | '\u{2705}' | '\u{2611}' => out.push_str("[X]"),
            '\u{2192}' | '\u{279C}' | '\u{27A1}' => out.push_str("->"),
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => out.push('"'),
            '\u{2013}' | '\u{2014}' | '\u{2212}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\u{00A0}' => out.push(' '),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

// Built-in fonts are WinAnsi encoded; Latin-1 is the portable subset.
fn is_encodable(c: char) -> bool {
    matches!(c, '\n' | '\t' | ' '..='~' | '\u{00A1}'..='\u{00FF}')
}

/// Greedy word wrap measured in graphemes; over-long words are hard split.
pub fn wrap_line(line: &str, capacity: usize) -> Vec<String> {
    let line = line.trim_end();
    if line.graphemes(true).count() <= capacity {
        return vec![line.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for token in line.split_word_bounds() {
        let token_len = token.graphemes(true).count();

        if current_len + token_len > capacity && current_len > 0 {
            lines.push(current.trim_end().to_string());
            current.clear();
            current_len = 0;
            if token.trim().is_empty() {
                continue;
            }
        }

        if token_len > capacity {
            for grapheme in token.graphemes(true) {
                if current_len == capacity {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                current.push_str(grapheme);
                current_len += 1;
            }
        } else {
            current.push_str(token);
            current_len += token_len;
        }
    }

    if !current.trim().is_empty() {
        lines.push(current.trim_end().to_string());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_substitutions() {
        let text = sanitize_for_pdf("\u{2022} done \u{2713} next \u{2192} \u{201C}quoted\u{201D} it\u{2019}s 1\u{2013}2 wait\u{2026}");
        assert_eq!(text, "- done [X] next -> \"quoted\" it's 1-2 wait...");
    }

    #[test]
    fn test_latin1_is_encodable_but_cjk_is_not() {
        assert!(sanitize_for_pdf("Résumé café").chars().all(is_encodable));
        assert!(!is_encodable('\u{6F22}'));
        assert!(!is_encodable('\u{1F680}'));
    }

    #[test]
    fn test_wrap_respects_capacity() {
        let line = "Developed scalable backend services using Python and AWS for millions of users";
        let wrapped = wrap_line(line, 20);
        assert!(wrapped.len() > 1);
        assert!(wrapped.iter().all(|l| l.chars().count() <= 20));
        assert_eq!(wrapped.join(" "), line);
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let wrapped = wrap_line(&"x".repeat(25), 10);
        assert_eq!(wrapped, vec!["x".repeat(10), "x".repeat(10), "x".repeat(5)]);
    }

    #[test]
    fn test_short_lines_are_untouched() {
        assert_eq!(wrap_line("short", 80), vec!["short"]);
        assert_eq!(wrap_line("", 80), vec![""]);
    }

    #[test]
    fn test_line_capacity_for_a4() {
        // 10pt Courier is about 2.1mm per glyph, 190mm gives 89 columns
        assert_eq!(PrintPdfRenderer::default().line_capacity(), 89);
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let content = "CV MODIFICATION REQUIREMENTS\n\u{2022} Python\n".repeat(80);
        let bytes = PrintPdfRenderer::default().render("CV", &content).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_rejects_unencodable_text() {
        let result = PrintPdfRenderer::default().render("CV", "Rocket \u{1F680}");
        assert!(matches!(result, Err(JobAssistantError::PdfRender(_))));
    }
}
