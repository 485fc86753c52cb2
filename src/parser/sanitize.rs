//! Text sanitization utilities for cleaning extracted article content
//!
//! This module provides functions to clean and normalize text extracted from
//! HTML pages, removing invisible characters, normalizing whitespace, and
//! decoding HTML entities.

use regex::Regex;
use std::sync::LazyLock;

// Pre-compiled regex patterns for performance
static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

static MULTI_NEWLINE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Sanitize extracted text content
///
/// This function applies multiple cleaning steps:
/// 1. Remove zero-width characters
/// 2. Remove control characters (except newline/tab)
/// 3. Decode HTML entities left in the text
/// 4. Normalize whitespace
/// 5. Trim each line
/// 6. Remove excessive blank lines
///
/// # Examples
///
/// ```
/// use newsdesk::parser::sanitize::sanitize_text;
///
/// let dirty = "Hello\u{200B}World  \n\n\n\nTest";
/// let clean = sanitize_text(dirty);
/// assert_eq!(clean, "HelloWorld\n\nTest");
/// ```
pub fn sanitize_text(text: &str) -> String {
    let mut result = remove_zero_width(text);
    result = remove_control_chars(&result);
    result = decode_html_entities(&result);
    result = normalize_whitespace(&result);
    result = trim_lines(&result);
    result = collapse_newlines(&result);

    result.trim().to_string()
}

/// Remove zero-width spaces and similar invisible characters
///
/// # Examples
///
/// ```
/// use newsdesk::parser::sanitize::remove_zero_width;
///
/// assert_eq!(remove_zero_width("a\u{200B}b\u{FEFF}c"), "abc");
/// ```
pub fn remove_zero_width(text: &str) -> String {
    text.chars()
        .filter(|c| {
            !matches!(*c,
                '\u{200B}'..='\u{200F}' |
                '\u{2028}'..='\u{202E}' |
                '\u{2060}' |
                '\u{FEFF}'
            )
        })
        .collect()
}

/// Remove control characters except newline and tab
pub fn remove_control_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

/// Decode HTML entities, mapping non-breaking spaces to plain spaces
///
/// # Examples
///
/// ```
/// use newsdesk::parser::sanitize::decode_html_entities;
///
/// assert_eq!(decode_html_entities("Q&amp;A&nbsp;session"), "Q&A session");
/// assert_eq!(decode_html_entities("10&#8239;km"), "10 km");
/// ```
pub fn decode_html_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).replace(['\u{00A0}', '\u{202F}'], " ")
}

/// Normalize multiple spaces/tabs to single space
///
/// Does NOT affect newlines - those are handled separately.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").to_string()
}

/// Collapse every run of whitespace, newlines included, to one space
///
/// # Examples
///
/// ```
/// use newsdesk::parser::sanitize::squash_whitespace;
///
/// assert_eq!(squash_whitespace("  By\n   Jane   Doe "), "By Jane Doe");
/// ```
pub fn squash_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trim whitespace from each line
pub fn trim_lines(text: &str) -> String {
    text.lines()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collapse excessive newlines to maximum of 2
pub fn collapse_newlines(text: &str) -> String {
    MULTI_NEWLINE_REGEX.replace_all(text, "\n\n").to_string()
}

/// Check if text contains meaningful content
///
/// # Examples
///
/// ```
/// use newsdesk::parser::sanitize::has_content;
///
/// assert!(has_content("Hello"));
/// assert!(!has_content("   \n\t  "));
/// ```
pub fn has_content(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Truncate text to max length with ellipsis
///
/// # Examples
///
/// ```
/// use newsdesk::parser::sanitize::truncate;
///
/// assert_eq!(truncate("Hello World", 5), "He...");
/// assert_eq!(truncate("Hello World", 20), "Hello World");
/// ```
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}
