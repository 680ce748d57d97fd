//! HTML title extraction.
//!
//! Priority: `<title>`, then `<h1>`, then `<h2>`, then the first
//! non-whitespace text node in document order (truncated to a token budget),
//! then the caller-supplied fallback name.

use scraper::{Html, Selector};

use crate::tokenizer::TokenCounter;

const TITLE_MAX_TOKENS: usize = 128;

pub fn extract_title(content: &str, fallback: &str, tokens: &TokenCounter) -> String {
    let doc = Html::parse_document(content);

    for css in ["title", "h1", "h2"] {
        if let Some(text) = select_first_text(&doc, css) {
            return text;
        }
    }

    if let Some(text) = first_text_node(&doc) {
        let text = tokens.truncate(&text, TITLE_MAX_TOKENS);
        if !text.is_empty() {
            return text;
        }
    }

    fallback.to_string()
}

fn select_first_text(doc: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    doc.select(&selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .find(|text| !text.is_empty())
}

fn first_text_node(doc: &Html) -> Option<String> {
    doc.root_element()
        .text()
        .map(str::trim)
        .find(|t| !t.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> TokenCounter {
        TokenCounter::new().unwrap()
    }

    #[test]
    fn prefers_title_element() {
        let html = "<html><head><title>Page Title</title></head><body><h1>Heading</h1></body></html>";
        assert_eq!(extract_title(html, "fb", &counter()), "Page Title");
    }

    #[test]
    fn falls_back_to_h1_then_h2() {
        let html = "<body><h1>Main</h1><h2>Sub</h2></body>";
        assert_eq!(extract_title(html, "fb", &counter()), "Main");

        let html = "<body><p>intro</p><h2>Report</h2></body>";
        assert_eq!(extract_title(html, "fb", &counter()), "Report");
    }

    #[test]
    fn uses_first_text_node_when_no_headings() {
        let html = "<body><div>   </div><p>First words here</p></body>";
        assert_eq!(extract_title(html, "fb", &counter()), "First words here");
    }

    #[test]
    fn first_text_node_is_token_truncated() {
        let long = "word ".repeat(400);
        let html = format!("<body><p>{long}</p></body>");
        let tokens = counter();
        let title = extract_title(&html, "fb", &tokens);
        assert!(tokens.count(&title) <= 128);
    }

    #[test]
    fn falls_back_to_file_name() {
        assert_eq!(extract_title("<body></body>", "page.html", &counter()), "page.html");
    }
}
