//! Integration tests for the search-result filter

use newsdesk::classifier::{is_article, screen_results, SearchFilterThresholds, SearchResultFilter};
use newsdesk::models::SearchResult;

fn result(url: &str, title: &str) -> SearchResult {
    SearchResult {
        title: title.to_string(),
        url: url.to_string(),
        source: "example.com".to_string(),
        keyword: "tariffs".to_string(),
    }
}

#[test]
fn test_dated_article_path_accepted() {
    let verdict = is_article("https://example.com/2024/05/01/article/my-story", "My Story");
    assert!(verdict.accepted);
    assert!(verdict.reason.is_empty());
}

#[test]
fn test_category_path_rejected() {
    let verdict = is_article("https://example.com/category/sports", "Sports");
    assert!(!verdict.accepted);
    assert!(verdict.reason.contains("excluded path"));
}

#[test]
fn test_live_title_beats_positive_path() {
    let verdict = is_article(
        "https://example.com/2024/05/01/article/election",
        "Live Updates: Election Night",
    );
    assert!(!verdict.accepted);
    assert!(verdict.reason.contains("live updates"));
}

#[test]
fn test_positive_path_beats_general_exclusion() {
    assert!(is_article("https://example.com/author/2024/05/profile-piece", "Profile").accepted);
    assert!(!is_article("https://example.com/author/jane-doe-staff-writer", "Jane Doe").accepted);
}

#[test]
fn test_publisher_specific_exclusion() {
    let verdict = is_article(
        "https://www.scmp.com/opinion/world-opinion/long-commentary-slug",
        "Commentary",
    );
    assert!(!verdict.accepted);
    assert!(verdict.reason.contains("scmp.com/opinion"));
}

#[test]
fn test_structure_rules() {
    assert_eq!(is_article("https://example.com/story-slug", "A Story").reason, "Path too shallow");
    assert_eq!(is_article("https://example.com/a/b", "A Story").reason, "Path too short");
    assert!(is_article("https://example.com/world/asia/long-story-slug-about-trade", "Trade").accepted);
}

#[test]
fn test_custom_thresholds() {
    let filter = SearchResultFilter::new(SearchFilterThresholds {
        min_path_separators: 1,
        short_path_max_len: 5,
    });
    assert!(filter.is_article("https://example.com/story-slug", "A Story").accepted);
}

#[test]
fn test_screen_results() {
    let screening = screen_results(vec![
        result("https://example.com/2024/05/01/trade-deal", "Trade Deal Signed"),
        result("https://www.example.com/2024/05/01/trade-deal/?ref=rss", "Trade Deal Signed"),
        result("https://example.com/category/markets", "Markets"),
        result("https://example.com/article/tariff-talks", "Tariff Talks Resume"),
    ]);

    let accepted: Vec<&str> = screening.accepted.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(accepted, vec!["Trade Deal Signed", "Tariff Talks Resume"]);

    assert_eq!(screening.rejected.len(), 2);
    assert_eq!(screening.rejected[0].reason, "Duplicate URL");
    assert!(screening.rejected[1].reason.contains("/category"));
}
