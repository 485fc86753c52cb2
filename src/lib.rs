//! newsdesk - News article curation pipeline
//!
//! Fetches news articles by URL, decides whether they really are articles,
//! normalizes their metadata, and keeps them in an ordered, deduplicated
//! collection persisted to a CSV file.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`crawler`] - Page fetching and the URL-to-article pipeline
//! - [`parser`] - Content extraction, author and title normalization
//! - [`classifier`] - Search-result and content-shape heuristics
//! - [`models`] - Core data structures and types
//! - [`storage`] - The article collection and its file format
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use newsdesk::config::Config;
//! use newsdesk::crawler::Scraper;
//! use newsdesk::storage::CollectionStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let scraper = Scraper::new(&config)?;
//!     let mut store = CollectionStore::open(&config.storage.path);
//!
//!     scraper
//!         .scrape_into(&mut store, "https://apnews.com/article/example", Some("tariffs"))
//!         .await?;
//!     store.save();
//!     Ok(())
//! }
//! ```

pub mod classifier;
pub mod config;
pub mod crawler;
pub mod error;
pub mod models;
pub mod parser;
pub mod storage;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::classifier::{is_article, is_likely_article_content, ShapeReport, Verdict};
    pub use crate::config::Config;
    pub use crate::crawler::Scraper;
    pub use crate::error::{Error, ErrorCategory, NewsdeskErrorTrait, Result};
    pub use crate::models::{AddOutcome, Article, SearchResult};
    pub use crate::storage::{CollectionEvent, CollectionStore};
}

// Direct re-exports for convenience
pub use models::{AddOutcome, Article};
