//! Integration tests for content extraction and metadata normalization

mod common;

use newsdesk::classifier::{is_likely_article_content, ShapeFlag};
use newsdesk::error::ExtractError;
use newsdesk::parser::{normalize_authors, title_case, ContentExtractor};

use common::fixture;

const URL: &str = "https://www.example.com/2024/05/01/politics/budget";

#[test]
fn test_extract_article_fixture() {
    let doc = ContentExtractor::new()
        .extract(&fixture("article.html"), URL)
        .unwrap();

    assert_eq!(doc.title, "senate passes the budget bill");
    assert_eq!(doc.domain, "example.com");

    let paragraphs: Vec<&str> = doc.text.split("\n\n").collect();
    assert_eq!(paragraphs.len(), 4);
    assert!(paragraphs[0].starts_with("The Senate approved"));
    assert!(paragraphs[3].starts_with("Analysts cautioned"));
}

#[test]
fn test_noise_removed_from_article_fixture() {
    let doc = ContentExtractor::new()
        .extract(&fixture("article.html"), URL)
        .unwrap();

    assert!(!doc.text.contains("Related:"));
    assert!(!doc.text.contains("newsletter"));
    assert!(!doc.text.contains("Copyright"));
    assert!(!doc.body_html.contains("<aside"));
}

#[test]
fn test_bylines_normalized() {
    let doc = ContentExtractor::new()
        .extract(&fixture("article.html"), URL)
        .unwrap();

    assert_eq!(doc.bylines, vec!["By Jane Doe", "Doe"]);
    assert_eq!(normalize_authors(&doc.bylines), vec!["Jane Doe"]);
}

#[test]
fn test_title_case_fixture_title() {
    assert_eq!(
        title_case("senate passes the budget bill"),
        "Senate Passes the Budget Bill"
    );
}

#[test]
fn test_missing_title_left_empty() {
    let doc = ContentExtractor::new()
        .extract(&fixture("no_title.html"), URL)
        .unwrap();

    assert!(doc.title.is_empty());
    assert!(doc.text.contains("perfectly readable story body"));
}

#[test]
fn test_page_without_body_text() {
    let html = "<html><head><title>Empty</title></head><body><nav>Menu</nav></body></html>";
    let result = ContentExtractor::new().extract(html, URL);

    assert_eq!(result, Err(ExtractError::NoContent));
}

#[test]
fn test_article_fixture_is_article_shaped() {
    let doc = ContentExtractor::new()
        .extract(&fixture("article.html"), URL)
        .unwrap();
    let report = is_likely_article_content(&doc);

    assert!(report.is_article_shaped(), "{report:?}");
    assert_eq!(report.paragraphs, 4);
    assert_eq!(report.list_items, 0);
}

#[test]
fn test_listing_fixture_rejected() {
    let doc = ContentExtractor::new()
        .extract(&fixture("listing.html"), URL)
        .unwrap();
    let report = is_likely_article_content(&doc);

    assert!(!report.is_article_shaped());
    assert!(report.flags.contains(&ShapeFlag::ListHeavy));
    assert!(report.flags.contains(&ShapeFlag::FragmentedLists));
}

#[test]
fn test_data_graphic_fixture_rejected() {
    let doc = ContentExtractor::new()
        .extract(&fixture("data_graphic.html"), URL)
        .unwrap();
    let report = is_likely_article_content(&doc);

    assert!(!report.is_article_shaped());
    assert!(report.flags.contains(&ShapeFlag::ShortParagraphs));
    assert!(report.flags.contains(&ShapeFlag::NumericDense));
}
