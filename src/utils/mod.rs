//! Common utilities and helper functions
//!
//! This module provides shared utilities used across the application.

pub mod error;

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// Reference to a stored article given on the command line
///
/// Ids are regenerated every time the collection is loaded, so a 1-based
/// position (as printed by a listing) is the stable way to name an article
/// across runs. A full id is accepted as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleRef {
    /// 1-based position in display order
    Position(usize),
    Id(Uuid),
}

impl ArticleRef {
    /// 0-based index for a position reference
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Position(n) => n.checked_sub(1),
            Self::Id(_) => None,
        }
    }
}

impl FromStr for ArticleRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<usize>() {
            return if n == 0 {
                Err("positions start at 1".to_string())
            } else {
                Ok(Self::Position(n))
            };
        }
        Uuid::parse_str(s)
            .map(Self::Id)
            .map_err(|_| format!("'{s}' is neither a position nor an article id"))
    }
}

impl fmt::Display for ArticleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position(n) => write!(f, "#{n}"),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}
