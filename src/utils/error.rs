//! Error types for the newsdesk pipeline
//!
//! This module defines the domain-specific error types raised by the fetcher,
//! the content extractor, the scrape pipeline and the collection store.

use std::fmt;

use thiserror::Error;

use crate::classifier::ShapeReport;

/// Classified reason behind an HTTP error status
///
/// Produced by the fetcher at the point the status code is known, so callers
/// never have to inspect error text to decide on a remediation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusReason {
    /// 404 Not Found / 410 Gone
    NotFound,
    /// 403 Forbidden (typically bot blocking)
    Forbidden,
    /// 401 Unauthorized / 402 Payment Required (login wall or paywall)
    Unauthorized,
    /// Any other 4xx/5xx status
    Other,
}

impl StatusReason {
    /// Classify an HTTP status code
    #[must_use]
    pub fn from_status(code: u16) -> Self {
        match code {
            404 | 410 => Self::NotFound,
            403 => Self::Forbidden,
            401 | 402 => Self::Unauthorized,
            _ => Self::Other,
        }
    }

    /// Whether this class of failure is worth one attempt against the cache mirror
    #[must_use]
    pub fn allows_cache_fallback(self) -> bool {
        matches!(self, Self::NotFound | Self::Forbidden | Self::Unauthorized)
    }
}

impl fmt::Display for StatusReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotFound => "not found",
            Self::Forbidden => "forbidden",
            Self::Unauthorized => "unauthorized",
            Self::Other => "error",
        };
        f.write_str(s)
    }
}

/// Errors that can occur during HTTP fetching operations
#[derive(Error, Debug)]
pub enum FetchError {
    /// URL was empty or not an http(s) URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Transport-level failure (DNS, TLS, connection reset, body read)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Client or server error status
    #[error("HTTP status {code} ({reason})")]
    Status { code: u16, reason: StatusReason },

    /// Response body was empty after trimming whitespace
    #[error("Empty response body")]
    EmptyBody,

    /// Live URL and cache mirror both failed
    #[error("Failed live URL ({live}) and cache mirror ({cache})")]
    BothAttemptsFailed {
        live: Box<FetchError>,
        cache: Box<FetchError>,
    },
}

impl FetchError {
    /// Status-coded sub-reason, when the failure carries one
    ///
    /// For a combined failure the live attempt's reason is reported, since
    /// that is the one describing the publisher's site.
    #[must_use]
    pub fn status_reason(&self) -> Option<StatusReason> {
        match self {
            Self::Status { reason, .. } => Some(*reason),
            Self::BothAttemptsFailed { live, .. } => live.status_reason(),
            _ => None,
        }
    }

    /// Whether the fetcher should try the cache mirror after this failure
    #[must_use]
    pub fn allows_cache_fallback(&self) -> bool {
        matches!(self, Self::Status { reason, .. } if reason.allows_cache_fallback())
    }
}

/// Errors that can occur while extracting content from fetched markup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// No body text survived parsing and cleaning
    #[error("Scrape resulted in no content")]
    NoContent,

    /// Page carried no usable title
    #[error("Title not found in page")]
    NoTitle,
}

/// Required article fields that were left empty
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Article title is empty")]
    EmptyTitle,

    #[error("Article content is empty")]
    EmptyContent,

    #[error("Article source is empty")]
    EmptySource,
}

/// Errors from the URL-to-article scrape pipeline
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Fetch failed
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Extraction failed
    #[error("Extract error: {0}")]
    Extract(#[from] ExtractError),

    /// Extracted content looks like a listing or data graphic
    #[error("Content does not look like an article (shape score {})", .0.score)]
    NonArticleContent(ShapeReport),

    /// Assembled article is missing required fields
    #[error("Invalid article: {0}")]
    Invalid(#[from] ValidationError),
}

/// Errors raised while reading or writing the persisted collection
#[derive(Error, Debug)]
pub enum StorageError {
    /// File system failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed tabular data
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
