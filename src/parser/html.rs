//! Generic article content extractor
//!
//! Turns publisher markup into a title, cleaned body text and raw byline
//! strings. The body container is located through an ordered selector list
//! and stripped of navigation, promos and other noise before its block
//! elements are read.

use scraper::{ElementRef, Html, Selector};

use crate::crawler::url::registrable_domain;
use crate::parser::sanitize::{has_content, sanitize_text, squash_whitespace};
use crate::parser::selectors::{NoiseSelectors, PageSelectors, BLOCK_TAGS};
use crate::utils::error::ExtractError;

/// Bylines longer than this are author bios, not names
const MAX_BYLINE_CHARS: usize = 120;

/// Result of parsing one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    /// Page title; empty when none was found
    pub title: String,

    /// Sanitized body text, one block per paragraph group
    pub text: String,

    /// Body container markup with noise elements removed
    pub body_html: String,

    /// Raw author strings in document order
    pub bylines: Vec<String>,

    /// Registrable domain of the page URL
    pub domain: String,
}

/// Markup-to-article extractor
pub struct ContentExtractor {
    page: PageSelectors,
    noise: NoiseSelectors,
}

impl ContentExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            page: PageSelectors::new(),
            noise: NoiseSelectors::new(),
        }
    }

    /// Extract title, body and bylines from a page
    ///
    /// # Arguments
    /// * `html` - Decoded page markup
    /// * `url` - Page URL, used for the domain
    ///
    /// # Errors
    /// Returns `ExtractError::NoContent` if no body text survives cleaning.
    /// A missing title is not an error here; `title` is left empty.
    pub fn extract(&self, html: &str, url: &str) -> Result<ExtractedDocument, ExtractError> {
        let document = Html::parse_document(html);

        let title = self
            .extract_first_match(&document, self.page.title)
            .map(|t| squash_whitespace(&t))
            .unwrap_or_default();

        let (body_html, text) = self.extract_body(&document).ok_or(ExtractError::NoContent)?;

        let bylines = self.extract_bylines(&document);
        let domain = registrable_domain(url).unwrap_or_default();

        tracing::debug!(
            domain = %domain,
            title_len = title.len(),
            text_len = text.len(),
            bylines = bylines.len(),
            "Extracted document"
        );

        Ok(ExtractedDocument {
            title,
            text,
            body_html,
            bylines,
            domain,
        })
    }

    /// Extract first matching text from list of selectors
    ///
    /// `<meta>` elements contribute their `content` attribute.
    fn extract_first_match(&self, document: &Html, selectors: &[Selector]) -> Option<String> {
        for selector in selectors {
            for element in document.select(selector) {
                let text = element_text(&element);
                if has_content(&text) {
                    return Some(text);
                }
            }
        }
        None
    }

    /// Locate the body container and return its cleaned markup and text
    fn extract_body(&self, document: &Html) -> Option<(String, String)> {
        let candidates = self
            .page
            .body
            .iter()
            .chain(std::iter::once(self.page.body_fallback));

        for selector in candidates {
            for element in document.select(selector) {
                let clean_html = self.remove_noise_from_html(&element.html());
                let text = self.block_text(&clean_html);
                if has_content(&text) {
                    return Some((clean_html, text));
                }
            }
        }
        None
    }

    /// Text of the outermost block elements, falling back to all text
    fn block_text(&self, clean_html: &str) -> String {
        let fragment = Html::parse_fragment(clean_html);

        let blocks: Vec<String> = fragment
            .select(self.page.blocks)
            .filter(|el| !has_block_ancestor(el))
            .map(|el| squash_whitespace(&el.text().collect::<String>()))
            .filter(|t| has_content(t))
            .collect();

        if blocks.is_empty() {
            let all = fragment.root_element().text().collect::<String>();
            sanitize_text(&all)
        } else {
            sanitize_text(&blocks.join("\n\n"))
        }
    }

    /// Raw byline strings in document order
    fn extract_bylines(&self, document: &Html) -> Vec<String> {
        document
            .select(self.page.bylines)
            .map(|el| squash_whitespace(&element_text(&el)))
            .filter(|s| has_content(s) && s.chars().count() <= MAX_BYLINE_CHARS)
            .filter(|s| !s.starts_with("http://") && !s.starts_with("https://"))
            .collect()
    }

    /// Remove noise elements from HTML string
    fn remove_noise_from_html(&self, html: &str) -> String {
        let doc = Html::parse_fragment(html);
        let mut result = html.to_string();

        for selector in self.noise.elements {
            for element in doc.select(selector) {
                let noise_html = element.html();
                result = result.replace(&noise_html, "");
            }
        }

        result
    }
}

impl Default for ContentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn element_text(element: &ElementRef<'_>) -> String {
    if element.value().name() == "meta" {
        element.value().attr("content").unwrap_or_default().to_string()
    } else {
        element.text().collect()
    }
}

fn has_block_ancestor(element: &ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| BLOCK_TAGS.contains(&a.value().name()))
}
