// Core data structures for newsdesk

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::error::ValidationError;

/// Provenance tag for articles entered by hand rather than found by a search
pub const MANUAL_KEYWORD: &str = "Manual";

/// A curated news article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    id: Uuid,
    pub title: String,
    pub lead: Option<String>,
    pub content: String,
    pub source: String,
    pub url: Option<String>,
    pub authors: Vec<String>,
    pub keyword: String,
}

impl Article {
    /// Create a manually entered article with a fresh id
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            lead: None,
            content: content.into(),
            source: source.into(),
            url: None,
            authors: Vec::new(),
            keyword: MANUAL_KEYWORD.to_string(),
        }
    }

    /// Stable identifier, assigned once at construction
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.url = if url.trim().is_empty() { None } else { Some(url) };
        self
    }

    pub fn with_lead(mut self, lead: impl Into<String>) -> Self {
        let lead = lead.into();
        self.lead = if lead.trim().is_empty() {
            None
        } else {
            Some(lead)
        };
        self
    }

    pub fn with_authors(mut self, authors: Vec<String>) -> Self {
        self.authors = authors;
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self
    }

    /// Whether this article came from manual entry
    pub fn is_manual(&self) -> bool {
        self.keyword == MANUAL_KEYWORD
    }

    /// URL if present and non-blank
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.trim().is_empty())
    }

    /// Check the fields every stored article must carry
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.content.trim().is_empty() {
            return Err(ValidationError::EmptyContent);
        }
        if self.source.trim().is_empty() {
            return Err(ValidationError::EmptySource);
        }
        Ok(())
    }
}

/// Outcome of offering an article to the collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Admitted into the collection
    Added(Article),
    /// Rejected because an equivalent article is already present
    Duplicate(Article),
}

impl AddOutcome {
    pub fn article(&self) -> &Article {
        match self {
            Self::Added(a) | Self::Duplicate(a) => a,
        }
    }

    pub fn was_added(&self) -> bool {
        matches!(self, Self::Added(_))
    }
}

/// A search hit handed over by a search collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    /// Display domain reported by the search provider
    pub source: String,
    /// Search term that produced this hit
    pub keyword: String,
}
