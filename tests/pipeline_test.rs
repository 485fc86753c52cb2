//! End-to-end tests for the URL-to-article pipeline against mock servers

mod common;

use newsdesk::classifier::ShapeFlag;
use newsdesk::crawler::Scraper;
use newsdesk::error::{ExtractError, FetchError, ScrapeError, StatusReason};
use newsdesk::models::{AddOutcome, MANUAL_KEYWORD};
use newsdesk::storage::CollectionStore;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{fixture, mock_config};

async fn serve(server: &MockServer, route: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html; charset=utf-8"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_scrape_article() {
    let server = MockServer::start().await;
    serve(&server, "/2024/05/01/budget", fixture("article.html")).await;

    let scraper = Scraper::new(&mock_config(&server.uri())).unwrap();
    let url = format!("{}/2024/05/01/budget", server.uri());
    let article = scraper.scrape(&url, Some("budget")).await.unwrap();

    assert_eq!(article.title, "Senate Passes the Budget Bill");
    assert_eq!(article.authors, vec!["Jane Doe"]);
    assert_eq!(article.keyword, "budget");
    assert_eq!(article.url(), Some(url.as_str()));
    assert!(article.content.starts_with("The Senate approved"));
    assert!(!article.source.is_empty());
    assert!(article.validate().is_ok());
}

#[tokio::test]
async fn test_scrape_without_keyword_is_manual() {
    let server = MockServer::start().await;
    serve(&server, "/story", fixture("article.html")).await;

    let scraper = Scraper::new(&mock_config(&server.uri())).unwrap();
    let article = scraper
        .scrape(&format!("{}/story", server.uri()), None)
        .await
        .unwrap();

    assert_eq!(article.keyword, MANUAL_KEYWORD);
}

#[tokio::test]
async fn test_scrape_into_detects_duplicates() {
    let server = MockServer::start().await;
    serve(&server, "/story", fixture("article.html")).await;

    let dir = TempDir::new().unwrap();
    let mut store = CollectionStore::new(dir.path().join("articles.csv"));
    let scraper = Scraper::new(&mock_config(&server.uri())).unwrap();

    let first = scraper
        .scrape_into(&mut store, &format!("{}/story", server.uri()), Some("budget"))
        .await
        .unwrap();
    assert!(matches!(first, AddOutcome::Added(_)));

    let again = scraper
        .scrape_into(&mut store, &format!("{}/story?utm_source=rss", server.uri()), None)
        .await
        .unwrap();
    assert!(matches!(again, AddOutcome::Duplicate(_)));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_listing_page_rejected() {
    let server = MockServer::start().await;
    serve(&server, "/sections", fixture("listing.html")).await;

    let scraper = Scraper::new(&mock_config(&server.uri())).unwrap();
    let err = scraper
        .scrape(&format!("{}/sections", server.uri()), None)
        .await
        .unwrap_err();

    match err {
        ScrapeError::NonArticleContent(report) => {
            assert!(report.score > report.max_score);
            assert!(report.flags.contains(&ShapeFlag::ListHeavy));
        }
        other => panic!("expected NonArticleContent, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_title_rejected() {
    let server = MockServer::start().await;
    serve(&server, "/untitled", fixture("no_title.html")).await;

    let scraper = Scraper::new(&mock_config(&server.uri())).unwrap();
    let err = scraper
        .scrape(&format!("{}/untitled", server.uri()), None)
        .await
        .unwrap_err();

    assert!(matches!(err, ScrapeError::Extract(ExtractError::NoTitle)));
}

#[tokio::test]
async fn test_fetch_failure_leaves_store_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/paywalled"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cache"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut store = CollectionStore::new(dir.path().join("articles.csv"));
    let scraper = Scraper::new(&mock_config(&server.uri())).unwrap();

    let err = scraper
        .scrape_into(&mut store, &format!("{}/paywalled", server.uri()), None)
        .await
        .unwrap_err();

    match &err {
        ScrapeError::Fetch(fetch) => {
            assert!(matches!(fetch, FetchError::BothAttemptsFailed { .. }));
            assert_eq!(fetch.status_reason(), Some(StatusReason::Unauthorized));
        }
        other => panic!("expected Fetch error, got {other:?}"),
    }
    assert!(store.is_empty());
}
