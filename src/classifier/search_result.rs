//! Search-result relevance filter
//!
//! Decides from a URL and title alone whether a search hit is likely to be a
//! news article, before anything is fetched. Rules are evaluated as an
//! ordered cascade and the first rule that matches decides; a strong
//! positive path signal therefore wins over the general exclusions below it.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::crawler::url::normalize_url;
use crate::models::SearchResult;

/// Path fragments that reject a result before any positive signal is checked
const HIGH_PRIORITY_EXCLUDED_PATHS: &[&str] = &[
    "/print-edition",
    "/digital-print-edition",
    "/subscribe",
    "/archive",
    "/home",
    "/index",
    "/category",
    "/podcast",
    "/video",
    "/sport",
    "/athletic",
];

const HIGH_PRIORITY_EXCLUDED_TITLES: &[&str] = &["live:", "live blog", "live updates"];

/// Path fragments that mark a page as an article
const ARTICLE_PATH_SEGMENTS: &[&str] = &["/article/", "/story/", "/post/", "/report/"];

const EXCLUDED_PATHS: &[&str] = &[
    "/user",
    "/author",
    "/tags",
    "/topic",
    "/section",
    "/profile",
    "/account",
    "/login",
    "/signup",
    "/register",
    "/about",
    "/contact",
    "/by",
    "/newsletter",
    "/people",
    "/quotes",
    "/company",
    "/earnings",
];

/// Exclusions that only apply on one publisher, matched against the normalized URL
const EXCLUDED_HOST_PATHS: &[&str] = &["scmp.com/news/china/diplomacy", "scmp.com/opinion"];

const EXCLUDED_TITLE_KEYWORDS: &[&str] = &[
    "sign up",
    "topic:",
    "author:",
    "homepage",
    "section:",
    "your daily",
    "briefing",
    "bulletin",
    "alert",
    "update",
    "digest",
];

static YEAR_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(?:19|20)\d{2}(?:/|-|$)").unwrap());

static MONTH_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)/").unwrap()
});

/// Structural limits applied when no keyword rule decided
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilterThresholds {
    /// Paths with fewer `/` than this are rejected as too shallow
    pub min_path_separators: usize,

    /// Paths this long or shorter are rejected as too short
    pub short_path_max_len: usize,
}

impl Default for SearchFilterThresholds {
    fn default() -> Self {
        Self {
            min_path_separators: 2,
            short_path_max_len: 30,
        }
    }
}

impl SearchFilterThresholds {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.min_path_separators == 0 {
            anyhow::bail!("classifier.search.min_path_separators must be at least 1");
        }
        Ok(())
    }
}

/// Accept/reject decision with a human-readable reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub accepted: bool,
    /// Empty when accepted
    pub reason: String,
}

impl Verdict {
    fn accept() -> Self {
        Self {
            accepted: true,
            reason: String::new(),
        }
    }

    fn reject(reason: impl Into<String>) -> Self {
        Self {
            accepted: false,
            reason: reason.into(),
        }
    }
}

/// A search result dropped by [`SearchResultFilter::screen`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub result: SearchResult,
    pub reason: String,
}

/// Outcome of screening a batch of search results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Screening {
    /// Likely articles, in input order, one per normalized URL
    pub accepted: Vec<SearchResult>,
    pub rejected: Vec<Rejection>,
}

/// Search-result filter with configurable structural thresholds
#[derive(Debug, Clone, Default)]
pub struct SearchResultFilter {
    thresholds: SearchFilterThresholds,
}

impl SearchResultFilter {
    pub fn new(thresholds: SearchFilterThresholds) -> Self {
        Self { thresholds }
    }

    /// Classify a result by URL and title
    pub fn is_article(&self, url: &str, title: &str) -> Verdict {
        let path = url_path(url);
        let title = title.to_lowercase();

        // Rule 1: high-priority exclusions
        if let Some(p) = find_fragment(&path, HIGH_PRIORITY_EXCLUDED_PATHS) {
            return Verdict::reject(format!("High-priority excluded path: '{p}'"));
        }
        if let Some(t) = find_fragment(&title, HIGH_PRIORITY_EXCLUDED_TITLES) {
            return Verdict::reject(format!("High-priority excluded title: '{t}'"));
        }

        // Rule 2: strong positive signals
        if find_fragment(&path, ARTICLE_PATH_SEGMENTS).is_some()
            || YEAR_SEGMENT.is_match(&path)
            || MONTH_SEGMENT.is_match(&path)
        {
            return Verdict::accept();
        }

        // Rule 3: general exclusions
        if let Some(p) = find_fragment(&path, EXCLUDED_PATHS) {
            return Verdict::reject(format!("Excluded path: '{p}'"));
        }
        let normalized = normalize_url(url).to_lowercase();
        if let Some(p) = find_fragment(&normalized, EXCLUDED_HOST_PATHS) {
            return Verdict::reject(format!("Excluded path: '{p}'"));
        }
        if let Some(t) = find_fragment(&title, EXCLUDED_TITLE_KEYWORDS) {
            return Verdict::reject(format!("Excluded title keyword: '{t}'"));
        }

        // Rule 4: structure
        if path.matches('/').count() < self.thresholds.min_path_separators {
            return Verdict::reject("Path too shallow");
        }
        if path.chars().count() <= self.thresholds.short_path_max_len {
            return Verdict::reject("Path too short");
        }

        Verdict::accept()
    }

    /// Drop non-articles and repeated URLs from a batch of results
    ///
    /// The first result for a normalized URL wins; later ones are rejected.
    pub fn screen(&self, results: Vec<SearchResult>) -> Screening {
        let mut screening = Screening::default();
        let mut seen = HashSet::new();

        for result in results {
            let verdict = self.is_article(&result.url, &result.title);
            if !verdict.accepted {
                tracing::debug!(url = %result.url, reason = %verdict.reason, "Skipping non-article");
                screening.rejected.push(Rejection {
                    result,
                    reason: verdict.reason,
                });
                continue;
            }

            if seen.insert(normalize_url(&result.url)) {
                screening.accepted.push(result);
            } else {
                screening.rejected.push(Rejection {
                    result,
                    reason: "Duplicate URL".to_string(),
                });
            }
        }

        tracing::info!(
            accepted = screening.accepted.len(),
            rejected = screening.rejected.len(),
            "Screened search results"
        );
        screening
    }
}

/// Classify a search result with the default thresholds
///
/// # Examples
///
/// ```
/// use newsdesk::classifier::is_article;
///
/// assert!(is_article("https://example.com/2024/05/01/article/my-story", "A Story").accepted);
///
/// let verdict = is_article("https://example.com/category/sports", "Sports");
/// assert!(!verdict.accepted);
/// assert_eq!(verdict.reason, "High-priority excluded path: '/category'");
/// ```
pub fn is_article(url: &str, title: &str) -> Verdict {
    SearchResultFilter::default().is_article(url, title)
}

/// Screen a batch of search results with the default thresholds
pub fn screen_results(results: Vec<SearchResult>) -> Screening {
    SearchResultFilter::default().screen(results)
}

/// Lowercased path component of a URL; scheme-less input is tolerated
fn url_path(url: &str) -> String {
    let url = url.trim();
    let parsed = Url::parse(url).or_else(|_| Url::parse(&format!("http://{url}")));
    match parsed {
        Ok(u) => u.path().to_lowercase(),
        Err(_) => String::new(),
    }
}

fn find_fragment<'a>(haystack: &str, fragments: &[&'a str]) -> Option<&'a str> {
    fragments.iter().copied().find(|f| haystack.contains(f))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dated_article_accepted() {
        assert!(is_article("https://example.com/2024/05/01/article/my-story", "My Story").accepted);
        assert!(is_article("https://www.theguardian.com/world/2024/may/01/x", "x").accepted);
    }

    #[test]
    fn test_high_priority_path() {
        let v = is_article("https://example.com/category/sports", "Sports News");
        assert!(!v.accepted);
        assert_eq!(v.reason, "High-priority excluded path: '/category'");
    }

    #[test]
    fn test_live_title_beats_positive_path() {
        let v = is_article(
            "https://example.com/2024/05/01/article/election",
            "Election Live Updates",
        );
        assert!(!v.accepted);
        assert_eq!(v.reason, "High-priority excluded title: 'live updates'");
    }

    #[test]
    fn test_positive_path_beats_general_exclusion() {
        let v = is_article("https://example.com/author/story/jane-doe", "Jane Doe");
        assert!(v.accepted);
    }

    #[test]
    fn test_general_path_exclusion() {
        let v = is_article("https://example.com/topic/climate-change-and-policy", "Climate");
        assert_eq!(v.reason, "Excluded path: '/topic'");
    }

    #[test]
    fn test_host_qualified_exclusion() {
        let v = is_article(
            "https://www.scmp.com/news/china/diplomacy/long-running-thread",
            "Diplomacy",
        );
        assert_eq!(v.reason, "Excluded path: 'scmp.com/news/china/diplomacy'");
    }

    #[test]
    fn test_title_keyword_exclusion() {
        let v = is_article(
            "https://example.com/world/asia/some-long-explainer-piece",
            "Your Morning Briefing",
        );
        assert_eq!(v.reason, "Excluded title keyword: 'briefing'");
    }

    #[test]
    fn test_structural_checks() {
        assert_eq!(is_article("https://example.com/x", "Headline").reason, "Path too shallow");
        assert_eq!(
            is_article("https://example.com/world/short", "Headline").reason,
            "Path too short"
        );
        assert!(is_article(
            "https://example.com/world/a-sufficiently-long-slug-here",
            "Headline"
        )
        .accepted);
    }

    #[test]
    fn test_year_segment_shapes() {
        assert!(YEAR_SEGMENT.is_match("/2024/x"));
        assert!(YEAR_SEGMENT.is_match("/1999-review"));
        assert!(YEAR_SEGMENT.is_match("/archive2/2023"));
        assert!(!YEAR_SEGMENT.is_match("/20245/x"));
        assert!(!YEAR_SEGMENT.is_match("/2100/x"));
    }

    #[test]
    fn test_custom_thresholds() {
        let filter = SearchResultFilter::new(SearchFilterThresholds {
            min_path_separators: 1,
            short_path_max_len: 5,
        });
        assert!(filter.is_article("https://example.com/world", "Headline").accepted);
    }

    #[test]
    fn test_screen_results() {
        let hit = |title: &str, url: &str| SearchResult {
            title: title.to_string(),
            url: url.to_string(),
            source: "example.com".to_string(),
            keyword: "tariffs".to_string(),
        };

        let screening = screen_results(vec![
            hit("One", "https://example.com/2024/05/01/one"),
            hit("One again", "http://www.example.com/2024/05/01/one/?ref=x"),
            hit("Podcast", "https://example.com/podcast/episode-1"),
            hit("Two", "https://example.com/story/two"),
        ]);

        let titles: Vec<&str> = screening.accepted.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Two"]);
        assert_eq!(screening.rejected.len(), 2);
        assert_eq!(screening.rejected[0].reason, "Duplicate URL");
        assert_eq!(
            screening.rejected[1].reason,
            "High-priority excluded path: '/podcast'"
        );
    }
}
