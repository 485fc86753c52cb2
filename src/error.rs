//! Unified error handling for the newsdesk crate
//!
//! This module provides a unified error type that consolidates all domain-specific
//! errors into a single `Error` enum, while maintaining the ability to use
//! domain-specific errors when needed.
//!
//! # Architecture
//!
//! - [`NewsdeskErrorTrait`] - Common interface implemented by all error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors
//!
//! # Usage
//!
//! ```rust,ignore
//! use newsdesk::error::{Error, NewsdeskErrorTrait};
//!
//! fn report(err: Error) {
//!     eprintln!("{err}");
//!     eprintln!("{}", err.remediation());
//! }
//! ```

use thiserror::Error;

pub use crate::utils::error::{
    ExtractError, FetchError, ScrapeError, StatusReason, StorageError, ValidationError,
};

/// Common trait for all newsdesk error types
pub trait NewsdeskErrorTrait: std::error::Error {
    /// Check if this error is transient (the same call may succeed later)
    fn is_recoverable(&self) -> bool;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;

    /// Suggested next step for the operator
    fn remediation(&self) -> String;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (transport, HTTP status, empty body)
    Network,
    /// Markup parsing and extraction errors
    Parsing,
    /// Extracted content rejected by the shape classifier or validation
    Content,
    /// Storage and I/O errors
    Storage,
    /// Invalid settings or input that can never succeed
    Config,
}

impl ErrorCategory {
    /// Short human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Network => "network error",
            Self::Parsing => "parse error",
            Self::Content => "content error",
            Self::Storage => "storage error",
            Self::Config => "configuration error",
        }
    }
}

const MANUAL_ENTRY_HINT: &str = "Please add this article manually.";
const LOGIN_HINT: &str =
    "Please attempt to log in to the website.\nIf paywalled, add this article manually.";

impl NewsdeskErrorTrait for FetchError {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout => true,
            Self::Status { code, .. } => *code >= 500 || *code == 429,
            Self::BothAttemptsFailed { live, .. } => live.is_recoverable(),
            Self::InvalidUrl(_) | Self::EmptyBody => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidUrl(_) => ErrorCategory::Config,
            _ => ErrorCategory::Network,
        }
    }

    fn remediation(&self) -> String {
        match self.status_reason() {
            Some(StatusReason::Unauthorized | StatusReason::Forbidden) => LOGIN_HINT.to_string(),
            _ => MANUAL_ENTRY_HINT.to_string(),
        }
    }
}

impl NewsdeskErrorTrait for ExtractError {
    fn is_recoverable(&self) -> bool {
        false
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Parsing
    }

    fn remediation(&self) -> String {
        MANUAL_ENTRY_HINT.to_string()
    }
}

impl NewsdeskErrorTrait for ScrapeError {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Fetch(e) => e.is_recoverable(),
            _ => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Fetch(e) => e.category(),
            Self::Extract(e) => e.category(),
            Self::NonArticleContent(_) | Self::Invalid(_) => ErrorCategory::Content,
        }
    }

    fn remediation(&self) -> String {
        match self {
            Self::Fetch(e) => e.remediation(),
            Self::NonArticleContent(_) => {
                "This page looks like a listing or interactive graphic, not an article.".to_string()
            }
            _ => MANUAL_ENTRY_HINT.to_string(),
        }
    }
}

impl NewsdeskErrorTrait for StorageError {
    fn is_recoverable(&self) -> bool {
        matches!(self, Self::Io(_))
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Storage
    }

    fn remediation(&self) -> String {
        "Check that the data directory exists and is writable.".to_string()
    }
}

/// Unified error type for the newsdesk crate
#[derive(Error, Debug)]
pub enum Error {
    /// Scrape pipeline errors (fetch, extract, classify)
    #[error("Scrape error: {0}")]
    Scrape(#[from] ScrapeError),

    /// Fetch-specific errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Extraction-specific errors
    #[error("Extract error: {0}")]
    Extract(#[from] ExtractError),

    /// Article rejected at insertion
    #[error("Invalid article: {0}")]
    Validation(#[from] ValidationError),

    /// Persistence errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl NewsdeskErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Scrape(e) => e.is_recoverable(),
            Self::Fetch(e) => e.is_recoverable(),
            Self::Extract(e) => e.is_recoverable(),
            Self::Validation(_) => false,
            Self::Storage(e) => e.is_recoverable(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Scrape(e) => e.category(),
            Self::Fetch(e) => e.category(),
            Self::Extract(e) => e.category(),
            Self::Validation(_) => ErrorCategory::Content,
            Self::Storage(e) => e.category(),
        }
    }

    fn remediation(&self) -> String {
        match self {
            Self::Scrape(e) => e.remediation(),
            Self::Fetch(e) => e.remediation(),
            Self::Extract(e) => e.remediation(),
            Self::Validation(_) => "Title, content and source are all required.".to_string(),
            Self::Storage(e) => e.remediation(),
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
