//! Per-format content cleanup and title extraction.
//!
//! The format tag picks the title strategy; cleanup is shared. PDF-derived
//! HTML goes through the HTML strategy so the `<h1>` inserted by the layout
//! extractor becomes the document title.

pub mod html;
pub mod text;

use crate::pipeline::FileFormat;
use crate::tokenizer::TokenCounter;

/// A document after cleanup and title extraction, before splitting.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub content: String,
    pub title: String,
}

/// Clean `content` and extract a title using the strategy for `format`.
/// `file_name` is the title of last resort.
pub fn parse(
    content: &str,
    file_name: &str,
    format: FileFormat,
    tokens: &TokenCounter,
) -> ParsedDocument {
    let title = match format {
        FileFormat::Html | FileFormat::PdfHtml => html::extract_title(content, file_name, tokens),
        _ => text::extract_title(content, file_name),
    };
    ParsedDocument {
        content: text::cleanup_content(content),
        title,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_parse_cleans_and_titles() {
        let tokens = TokenCounter::new().unwrap();
        let doc = parse("Report 2024\n\n\nbody   text", "r.txt", FileFormat::Text, &tokens);
        assert_eq!(doc.title, "Report 2024");
        assert_eq!(doc.content, "Report 2024\nbody text");
    }

    #[test]
    fn pdf_html_parse_titles_from_inserted_heading() {
        let tokens = TokenCounter::new().unwrap();
        let doc = parse(
            "<h1>Annual Summary</h1>Some body text.",
            "scan.pdf",
            FileFormat::PdfHtml,
            &tokens,
        );
        assert_eq!(doc.title, "Annual Summary");
    }
}
