// src/services/page.rs

//! HTML-to-text reduction.
//!
//! The ranking page is a blog; the table lives in the entry body. The
//! reducer picks a best-effort content region and flattens it to plain text
//! for the extractor.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};

/// Reduces page markup to a single text blob.
///
/// Region selectors are tried in order; the first one that matches wins,
/// and the whole document is the fallback.
pub struct ContentReducer {
    selectors: Vec<Selector>,
}

impl ContentReducer {
    /// Create a reducer from CSS selector strings.
    pub fn new(selector_strs: &[String]) -> Result<Self> {
        let selectors = selector_strs
            .iter()
            .map(|s| Self::parse_selector(s))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { selectors })
    }

    /// Reduce markup to text with block-level newline separators.
    pub fn reduce(&self, html: &str) -> String {
        let document = Html::parse_document(html);

        for selector in &self.selectors {
            if let Some(region) = document.select(selector).next() {
                return Self::text_of(region);
            }
        }
        Self::text_of(document.root_element())
    }

    /// Collect trimmed, non-empty text nodes joined with newlines.
    fn text_of(element: ElementRef) -> String {
        element
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn parse_selector(s: &str) -> Result<Selector> {
        Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reducer() -> ContentReducer {
        ContentReducer::new(&[".entry-body".to_string(), "#main".to_string()]).unwrap()
    }

    #[test]
    fn test_entry_body_takes_priority() {
        let html = r#"
            <html><body>
            <div id="main">main text</div>
            <div class="entry-body">entry text</div>
            </body></html>
        "#;
        assert_eq!(reducer().reduce(html), "entry text");
    }

    #[test]
    fn test_main_fallback() {
        let html = r#"<html><body><div id="main">main text</div></body></html>"#;
        assert_eq!(reducer().reduce(html), "main text");
    }

    #[test]
    fn test_whole_document_fallback() {
        let html = "<html><body><p>loose text</p></body></html>";
        assert_eq!(reducer().reduce(html), "loose text");
    }

    #[test]
    fn test_block_separators_and_trimming() {
        let html = r#"
            <div class="entry-body">
              <p> 1 500 10 25.5 8.0 300 350 85.0% Movie A </p>
              <p>   </p>
              <p>2 400 8 20.1 7.5 250 300 70.2% Movie B</p>
            </div>
        "#;
        let text = reducer().reduce(html);
        assert_eq!(
            text,
            "1 500 10 25.5 8.0 300 350 85.0% Movie A\n2 400 8 20.1 7.5 250 300 70.2% Movie B"
        );
    }

    #[test]
    fn test_invalid_selector_is_rejected() {
        assert!(ContentReducer::new(&["[[invalid".to_string()]).is_err());
    }
}
