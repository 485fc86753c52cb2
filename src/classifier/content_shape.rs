//! Extracted-content shape classifier
//!
//! Interactive graphics, data tables and link listings often survive
//! extraction with plenty of text but none of the shape of prose. The
//! classifier scores the cleaned body against four red flags and rejects
//! content that raises too many of them.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;
use serde::{Deserialize, Serialize};

use crate::parser::html::ExtractedDocument;
use crate::parser::sanitize::squash_whitespace;
use crate::parser::selectors::ShapeSelectors;

static NUMERIC_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[$€£¥]?\d+(?:[.,]\d+)*%?").unwrap()
});

/// Limits for each red flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentShapeThresholds {
    /// Flag when list items exceed this multiple of paragraphs
    pub list_to_paragraph_ratio: f64,

    /// Flag when more than this share of paragraphs is short
    pub short_paragraph_share: f64,

    /// Paragraphs with fewer characters than this count as short
    pub min_paragraph_chars: usize,

    /// Flag when the text holds more numeric tokens than this
    pub max_numeric_tokens: usize,

    /// Flag when more than this share of list items are fragments
    pub fragment_list_item_share: f64,

    /// List items with at most this many words count as fragments
    pub fragment_max_words: usize,

    /// Highest score still accepted as an article
    pub max_score: u32,
}

impl Default for ContentShapeThresholds {
    fn default() -> Self {
        Self {
            list_to_paragraph_ratio: 3.0,
            short_paragraph_share: 0.7,
            min_paragraph_chars: 40,
            max_numeric_tokens: 50,
            fragment_list_item_share: 0.5,
            fragment_max_words: 2,
            max_score: 1,
        }
    }
}

impl ContentShapeThresholds {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(self.list_to_paragraph_ratio > 0.0) {
            anyhow::bail!("classifier.content.list_to_paragraph_ratio must be positive");
        }
        for (name, share) in [
            ("short_paragraph_share", self.short_paragraph_share),
            ("fragment_list_item_share", self.fragment_list_item_share),
        ] {
            if !(0.0..=1.0).contains(&share) {
                anyhow::bail!("classifier.content.{name} must be between 0 and 1");
            }
        }
        if self.fragment_max_words == 0 {
            anyhow::bail!("classifier.content.fragment_max_words must be at least 1");
        }
        Ok(())
    }
}

/// One red flag raised against extracted content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeFlag {
    /// Far more list items than paragraphs
    ListHeavy,
    /// Most paragraphs are short
    ShortParagraphs,
    /// Text dominated by figures
    NumericDense,
    /// List items are mostly one- or two-word fragments
    FragmentedLists,
}

impl fmt::Display for ShapeFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ListHeavy => "list-heavy",
            Self::ShortParagraphs => "short paragraphs",
            Self::NumericDense => "numeric-dense",
            Self::FragmentedLists => "fragmented lists",
        };
        f.write_str(s)
    }
}

/// Measurements and flags for one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShapeReport {
    pub score: u32,
    pub flags: Vec<ShapeFlag>,
    pub paragraphs: usize,
    pub list_items: usize,
    pub numeric_tokens: usize,
    pub max_score: u32,
}

impl ShapeReport {
    /// Whether the content passes as prose
    pub fn is_article_shaped(&self) -> bool {
        self.score <= self.max_score
    }
}

/// Content-shape classifier with configurable thresholds
#[derive(Debug, Clone, Default)]
pub struct ContentShapeClassifier {
    thresholds: ContentShapeThresholds,
}

impl ContentShapeClassifier {
    pub fn new(thresholds: ContentShapeThresholds) -> Self {
        Self { thresholds }
    }

    /// Score a document's cleaned body markup and text
    pub fn classify(&self, document: &ExtractedDocument) -> ShapeReport {
        let t = &self.thresholds;
        let selectors = ShapeSelectors::new();
        let fragment = Html::parse_fragment(&document.body_html);

        let paragraphs: Vec<String> = fragment
            .select(selectors.paragraphs)
            .map(|el| squash_whitespace(&el.text().collect::<String>()))
            .filter(|p| !p.is_empty())
            .collect();
        let list_items: Vec<String> = fragment
            .select(selectors.list_items)
            .map(|el| squash_whitespace(&el.text().collect::<String>()))
            .filter(|li| !li.is_empty())
            .collect();
        let numeric_tokens = NUMERIC_TOKEN.find_iter(&document.text).count();

        let mut flags = Vec::new();

        if list_items.len() as f64 > t.list_to_paragraph_ratio * paragraphs.len() as f64 {
            flags.push(ShapeFlag::ListHeavy);
        }

        if !paragraphs.is_empty() {
            let short = paragraphs
                .iter()
                .filter(|p| p.chars().count() < t.min_paragraph_chars)
                .count();
            if short as f64 / paragraphs.len() as f64 > t.short_paragraph_share {
                flags.push(ShapeFlag::ShortParagraphs);
            }
        }

        if numeric_tokens > t.max_numeric_tokens {
            flags.push(ShapeFlag::NumericDense);
        }

        if !list_items.is_empty() {
            let fragments = list_items
                .iter()
                .filter(|li| li.split_whitespace().count() <= t.fragment_max_words)
                .count();
            if fragments as f64 / list_items.len() as f64 > t.fragment_list_item_share {
                flags.push(ShapeFlag::FragmentedLists);
            }
        }

        let report = ShapeReport {
            score: flags.len() as u32,
            flags,
            paragraphs: paragraphs.len(),
            list_items: list_items.len(),
            numeric_tokens,
            max_score: t.max_score,
        };

        tracing::debug!(
            score = report.score,
            paragraphs = report.paragraphs,
            list_items = report.list_items,
            numeric_tokens = report.numeric_tokens,
            "Scored content shape"
        );
        report
    }
}

/// Score a document with the default thresholds
pub fn is_likely_article_content(document: &ExtractedDocument) -> ShapeReport {
    ContentShapeClassifier::default().classify(document)
}
