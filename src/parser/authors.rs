//! Author name normalization
//!
//! Byline markup is messy: the same person often appears several times
//! ("By Jane Doe", "Jane Doe", "Doe"), several people share one string, and
//! boilerplate such as "Updated On" leaks in. [`normalize_authors`] reduces
//! raw byline strings to an ordered list of distinct names.
//!
//! The persisted collection stores the list in a bracketed literal
//! (`['Jane Doe', 'John Roe']`); [`to_list_literal`] and
//! [`parse_list_literal`] convert to and from that form.

use std::sync::LazyLock;

use regex::Regex;

/// Boilerplate phrases removed from byline strings
const JUNK_PHRASES: &[&str] = &["Updated On", "By"];

static JUNK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives = JUNK_PHRASES
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{alternatives})\b")).unwrap()
});

/// Reduce raw byline strings to distinct author names
///
/// 1. Junk phrases are removed (whole words only, so "Byron" survives)
/// 2. Each string is split on commas; parts are trimmed, empties dropped
/// 3. Exact duplicates are removed, keeping first-seen order
/// 4. With more than one name left, any name that is a proper substring of
///    another name is dropped
///
/// # Examples
///
/// ```
/// use newsdesk::parser::authors::normalize_authors;
///
/// assert_eq!(normalize_authors(&["By Jane Doe", "Doe"]), vec!["Jane Doe"]);
/// assert_eq!(
///     normalize_authors(&["Jane Doe, John Roe", "John Roe"]),
///     vec!["Jane Doe", "John Roe"]
/// );
/// ```
pub fn normalize_authors<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();

    for entry in raw {
        let cleaned = JUNK_REGEX.replace_all(entry.as_ref(), "");
        for part in cleaned.split(',') {
            let name = part
                .trim_matches(|c: char| c.is_whitespace() || c == ':')
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");
            if !name.is_empty() && !unique.contains(&name) {
                unique.push(name);
            }
        }
    }

    if unique.len() <= 1 {
        return unique;
    }

    unique
        .iter()
        .filter(|name| {
            !unique
                .iter()
                .any(|other| other != *name && other.contains(name.as_str()))
        })
        .cloned()
        .collect()
}

/// Render names as a bracketed list literal
///
/// Each name is single-quoted unless it contains a single quote and no
/// double quote, in which case it is double-quoted. Backslashes and the
/// chosen quote are escaped.
///
/// # Examples
///
/// ```
/// use newsdesk::parser::authors::to_list_literal;
///
/// assert_eq!(to_list_literal(&[]), "[]");
/// assert_eq!(
///     to_list_literal(&["Jane Doe".to_string(), "Pat O'Brien".to_string()]),
///     r#"['Jane Doe', "Pat O'Brien"]"#
/// );
/// ```
pub fn to_list_literal(names: &[String]) -> String {
    let items: Vec<String> = names.iter().map(|n| quote(n)).collect();
    format!("[{}]", items.join(", "))
}

fn quote(name: &str) -> String {
    let q = if name.contains('\'') && !name.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(name.len() + 2);
    out.push(q);
    for c in name.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c if c == q => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(q);
    out
}

/// Parse a list literal back into names
///
/// Tolerant of hand-edited files: accepts single or double quotes, escape
/// sequences, bare comma-separated text, and a missing pair of brackets.
/// Empty input yields an empty list.
///
/// # Examples
///
/// ```
/// use newsdesk::parser::authors::parse_list_literal;
///
/// assert_eq!(parse_list_literal("['Jane Doe', \"Pat O'Brien\"]"), vec!["Jane Doe", "Pat O'Brien"]);
/// assert_eq!(parse_list_literal("Jane Doe, John Roe"), vec!["Jane Doe", "John Roe"]);
/// assert!(parse_list_literal("").is_empty());
/// ```
pub fn parse_list_literal(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed);

    let mut items = Vec::new();
    let mut chars = inner.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        match chars.peek().copied() {
            None => break,
            Some(q @ ('\'' | '"')) => {
                chars.next();
                let mut item = String::new();
                while let Some(c) = chars.next() {
                    match c {
                        '\\' => match chars.next() {
                            Some('n') => item.push('\n'),
                            Some('t') => item.push('\t'),
                            Some(other) => item.push(other),
                            None => {}
                        },
                        c if c == q => break,
                        c => item.push(c),
                    }
                }
                push_item(&mut items, &item);
                // Skip anything up to the next separator
                for c in chars.by_ref() {
                    if c == ',' {
                        break;
                    }
                }
            }
            Some(_) => {
                let mut item = String::new();
                for c in chars.by_ref() {
                    if c == ',' {
                        break;
                    }
                    item.push(c);
                }
                push_item(&mut items, &item);
            }
        }
    }

    items
}

fn push_item(items: &mut Vec<String>, item: &str) {
    let item = item.trim();
    if !item.is_empty() {
        items.push(item.to_string());
    }
}
