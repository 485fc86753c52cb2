//! Common test utilities

use std::path::PathBuf;

use newsdesk::config::Config;
use newsdesk::models::Article;

/// Read an HTML fixture from `tests/fixtures/html`
#[allow(dead_code)]
pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/html")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("fixture {} unreadable: {e}", path.display()))
}

/// Create a test article with default values
#[allow(dead_code)]
pub fn create_test_article() -> Article {
    Article::new(
        "Senate Passes the Budget Bill",
        "The Senate approved the annual budget late on Thursday.",
        "Example News",
    )
    .with_url("https://www.example.com/2024/05/01/politics/budget")
    .with_authors(vec!["Jane Doe".to_string()])
    .with_keyword("budget")
}

/// Create article with a specific url and title
#[allow(dead_code)]
pub fn create_article_with_url(n: usize) -> Article {
    Article::new(
        format!("Story number {n}"),
        format!("Body of story {n}."),
        "Example News",
    )
    .with_url(format!("https://example.com/2024/05/{n:02}/story"))
}

/// Configuration whose fetcher talks to a mock server, cache mirror included
#[allow(dead_code)]
pub fn mock_config(server_uri: &str) -> Config {
    let mut config = Config::default();
    config.fetcher.user_agent = Some("newsdesk-test".to_string());
    config.fetcher.timeout_secs = 5;
    config.fetcher.cache_mirror_prefix = format!("{server_uri}/cache?q=");
    config
}
