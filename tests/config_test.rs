//! Tests for configuration loading

use std::io::Write;
use std::path::PathBuf;

use newsdesk::config::{Config, DEFAULT_CACHE_MIRROR_PREFIX};
use serial_test::serial;
use tempfile::NamedTempFile;

const ENV_VARS: &[&str] = &[
    "NEWSDESK_USER_AGENT",
    "NEWSDESK_REQUEST_TIMEOUT",
    "NEWSDESK_CACHE_MIRROR",
    "NEWSDESK_STORE_PATH",
    "NEWSDESK_LOG_LEVEL",
    "NEWSDESK_LOG_FORMAT",
];

fn clear_env() {
    for var in ENV_VARS {
        std::env::remove_var(var);
    }
}

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
#[serial]
fn test_defaults_without_env() {
    clear_env();
    let config = Config::from_env().unwrap();

    assert_eq!(config.fetcher.timeout_secs, 30);
    assert!(config.fetcher.user_agent.is_none());
    assert_eq!(config.fetcher.cache_mirror_prefix, DEFAULT_CACHE_MIRROR_PREFIX);
    assert_eq!(config.storage.path, PathBuf::from("data/full_articles.csv"));
    assert_eq!(config.logging.format, "text");
}

#[test]
#[serial]
fn test_env_overrides() {
    clear_env();
    std::env::set_var("NEWSDESK_USER_AGENT", "digest-bot/1.0");
    std::env::set_var("NEWSDESK_REQUEST_TIMEOUT", "12");
    std::env::set_var("NEWSDESK_STORE_PATH", "/tmp/articles.csv");
    std::env::set_var("NEWSDESK_LOG_FORMAT", "json");

    let config = Config::from_env().unwrap();
    clear_env();

    assert_eq!(config.fetcher.user_agent.as_deref(), Some("digest-bot/1.0"));
    assert_eq!(config.fetcher.timeout_secs, 12);
    assert_eq!(config.storage.path, PathBuf::from("/tmp/articles.csv"));
    assert_eq!(config.logging.format, "json");
}

#[test]
#[serial]
fn test_bad_timeout_env_is_error() {
    clear_env();
    std::env::set_var("NEWSDESK_REQUEST_TIMEOUT", "soon");

    let result = Config::from_env();
    clear_env();

    assert!(result.is_err());
}

#[test]
#[serial]
fn test_load_from_file() {
    clear_env();
    let file = write_config(
        r#"
[fetcher]
timeout_secs = 10
accept_language = "en-GB,en;q=0.8"

[storage]
path = "digest/articles.csv"

[classifier.search]
min_path_separators = 3

[classifier.content]
max_score = 2
"#,
    );

    let config = Config::load(Some(file.path())).unwrap();

    assert_eq!(config.fetcher.timeout_secs, 10);
    assert_eq!(config.fetcher.accept_language, "en-GB,en;q=0.8");
    assert_eq!(config.storage.path, PathBuf::from("digest/articles.csv"));
    assert_eq!(config.classifier.search.min_path_separators, 3);
    assert_eq!(config.classifier.search.short_path_max_len, 30);
    assert_eq!(config.classifier.content.max_score, 2);
    assert_eq!(config.logging.level, "info");
}

#[test]
#[serial]
fn test_env_beats_file() {
    clear_env();
    let file = write_config("[storage]\npath = \"from-file.csv\"\n");
    std::env::set_var("NEWSDESK_STORE_PATH", "from-env.csv");

    let config = Config::load(Some(file.path()));
    clear_env();

    assert_eq!(config.unwrap().storage.path, PathBuf::from("from-env.csv"));
}

#[test]
#[serial]
fn test_load_rejects_invalid_values() {
    clear_env();
    let file = write_config("[fetcher]\ntimeout_secs = 0\n");
    assert!(Config::load(Some(file.path())).is_err());

    let file = write_config("[classifier.content]\nshort_paragraph_share = 1.5\n");
    assert!(Config::load(Some(file.path())).is_err());
}

#[test]
#[serial]
fn test_missing_file_is_error() {
    clear_env();
    assert!(Config::load(Some(std::path::Path::new("/nonexistent/newsdesk.toml"))).is_err());
}
