//! HTML parsing and metadata normalization
//!
//! This module turns fetched markup into article fields and normalizes the
//! metadata that ends up in the collection.

pub mod authors;
pub mod format;
pub mod html;
pub mod sanitize;
pub mod selectors;

// Re-export main extractor and public types
pub use authors::normalize_authors;
pub use format::{format_article, source_name, title_case};
pub use html::{ContentExtractor, ExtractedDocument};
