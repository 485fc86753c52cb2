//! URL normalization and domain extraction
//!
//! This module provides the identity key used for duplicate detection
//! (`domain+path`) and the registrable-domain lookup used to name an
//! article's source.

use std::net::IpAddr;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Public suffixes made of two labels that are common among news publishers
///
/// A registrable domain under one of these keeps three labels
/// (`bbc.co.uk`), everything else keeps two (`nytimes.com`).
const MULTI_LABEL_SUFFIXES: &[&str] = &[
    "co.uk", "org.uk", "ac.uk", "gov.uk", "ltd.uk", "com.au", "net.au", "org.au", "co.nz",
    "co.jp", "ne.jp", "or.jp", "co.kr", "or.kr", "com.br", "com.cn", "com.hk", "com.sg",
    "com.tw", "co.in", "co.za", "com.mx", "com.ar", "co.il", "com.tr",
];

static LEADING_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://").unwrap());

/// Normalize a URL to its `domain+path` identity key
///
/// Strips the scheme, any leading `www.`, the query string, the fragment and
/// trailing slashes. The host is lowercased; the path keeps its case.
/// Empty input yields an empty string, which means "no identity key".
///
/// The function is idempotent: normalizing a key returns the key itself.
///
/// # Examples
///
/// ```
/// use newsdesk::crawler::url::normalize_url;
///
/// assert_eq!(
///     normalize_url("https://www.example.com/news/story/?utm=1#top"),
///     "example.com/news/story"
/// );
/// assert_eq!(normalize_url("example.com/news/story"), "example.com/news/story");
/// assert_eq!(normalize_url(""), "");
/// ```
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    match parse_lenient(trimmed) {
        Some(parsed) => {
            let host = strip_www(&parsed.host_str().unwrap_or("").to_lowercase()).to_string();
            if host.is_empty() {
                return String::new();
            }
            let mut key = host;
            // Default ports are dropped regardless of scheme so a scheme-less
            // key re-parses to the same value.
            if let Some(port) = parsed.port().filter(|p| *p != 80 && *p != 443) {
                key.push(':');
                key.push_str(&port.to_string());
            }
            key.push_str(parsed.path().trim_end_matches('/'));
            key
        }
        None => normalize_raw(strip_scheme(trimmed)),
    }
}

/// Registrable domain of a URL (`bbc.co.uk`, `nytimes.com`)
///
/// IP-address hosts are returned unchanged.
///
/// # Examples
///
/// ```
/// use newsdesk::crawler::url::registrable_domain;
///
/// assert_eq!(
///     registrable_domain("https://www.bbc.co.uk/news/world").as_deref(),
///     Some("bbc.co.uk")
/// );
/// assert_eq!(
///     registrable_domain("https://edition.cnn.com/2024/05/01/x").as_deref(),
///     Some("cnn.com")
/// );
/// ```
pub fn registrable_domain(url: &str) -> Option<String> {
    let parsed = parse_lenient(url.trim())?;
    let host = parsed.host_str()?.to_lowercase();
    let host = host.trim_end_matches('.');

    if host.parse::<IpAddr>().is_ok() || host.starts_with('[') {
        return Some(host.to_string());
    }

    let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();
    match labels.len() {
        0 => None,
        1 => Some(labels[0].to_string()),
        n => {
            let last_two = format!("{}.{}", labels[n - 2], labels[n - 1]);
            if n >= 3 && MULTI_LABEL_SUFFIXES.contains(&last_two.as_str()) {
                Some(format!("{}.{last_two}", labels[n - 3]))
            } else {
                Some(last_two)
            }
        }
    }
}

/// Label of the registrable domain without its public suffix (`nytimes`)
///
/// This is the key used to look up a publisher's display name.
///
/// # Examples
///
/// ```
/// use newsdesk::crawler::url::domain_token;
///
/// assert_eq!(domain_token("https://www.nytimes.com/2024/x").as_deref(), Some("nytimes"));
/// assert_eq!(domain_token("https://www.bbc.co.uk/news").as_deref(), Some("bbc"));
/// ```
pub fn domain_token(url: &str) -> Option<String> {
    let domain = registrable_domain(url)?;
    if domain.parse::<IpAddr>().is_ok() {
        return Some(domain);
    }
    domain.split('.').next().map(str::to_string)
}

/// Parse a URL's host and path under `http`, whatever its scheme
///
/// Every input goes through the same host rules, so a key produced by
/// [`normalize_url`] parses back to itself. Input with no host (`file:///x`,
/// `/a/b`) yields `None`.
fn parse_lenient(url: &str) -> Option<Url> {
    let rest = strip_scheme(url.trim());
    if rest.is_empty() || rest.starts_with(['/', '\\']) {
        return None;
    }
    Url::parse(&format!("http://{rest}"))
        .ok()
        .filter(|u| u.host_str().is_some_and(|h| !h.is_empty()))
}

/// Drop a leading `scheme://`; a `://` later in the string is left alone
fn strip_scheme(url: &str) -> &str {
    LEADING_SCHEME
        .find(url)
        .map_or(url, |m| &url[m.end()..])
}

/// Fallback for strings the URL parser rejects; `url` carries no scheme
fn normalize_raw(url: &str) -> String {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let core = &url[..end];

    let (host, path) = match core.find('/') {
        Some(idx) => (&core[..idx], &core[idx..]),
        None => (core, ""),
    };
    let host = host.trim().to_lowercase();
    let host = strip_www(&host);
    if host.is_empty() {
        return String::new();
    }
    let path = path.trim_end_matches(|c: char| c == '/' || c.is_whitespace());
    format!("{host}{path}")
}

fn strip_www(host: &str) -> &str {
    let mut host = host;
    while let Some(rest) = host.strip_prefix("www.") {
        host = rest;
    }
    host
}

/// URL validation for fetchable targets
pub mod validators {
    use url::Url;

    /// Validate that a URL is non-empty, absolute and uses http or https
    ///
    /// # Examples
    ///
    /// ```
    /// use newsdesk::crawler::url::validators;
    ///
    /// assert!(validators::validate_url("https://example.com/a").is_ok());
    /// assert!(validators::validate_url("").is_err());
    /// assert!(validators::validate_url("file:///etc/passwd").is_err());
    /// ```
    pub fn validate_url(url: &str) -> Result<Url, String> {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err("URL is empty".to_string());
        }

        let parsed = Url::parse(trimmed).map_err(|e| format!("Invalid URL format: {e}"))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(format!("Unsupported scheme: {}", parsed.scheme()));
        }

        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(format!("No host in URL: {trimmed}"));
        }

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_decorations() {
        let expected = "example.com/world/story";
        for url in [
            "https://www.example.com/world/story",
            "http://example.com/world/story/",
            "https://example.com/world/story?utm_source=x",
            "https://example.com/world/story#comments",
            "HTTPS://WWW.EXAMPLE.COM/world/story/?a=1#b",
        ] {
            assert_eq!(normalize_url(url), expected, "input: {url}");
        }
    }

    #[test]
    fn test_normalize_keeps_path_case() {
        assert_eq!(
            normalize_url("https://example.com/World/Story"),
            "example.com/World/Story"
        );
    }

    #[test]
    fn test_normalize_root() {
        assert_eq!(normalize_url("https://www.example.com/"), "example.com");
        assert_eq!(normalize_url("example.com"), "example.com");
    }

    #[test]
    fn test_normalize_keeps_port() {
        assert_eq!(
            normalize_url("http://127.0.0.1:8080/a/b/"),
            "127.0.0.1:8080/a/b"
        );
        assert_eq!(normalize_url("127.0.0.1:8080/a/b"), "127.0.0.1:8080/a/b");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_url(""), "");
        assert_eq!(normalize_url("   "), "");
    }

    #[test]
    fn test_normalize_idempotent_on_samples() {
        for url in [
            "https://www.nytimes.com/2024/05/01/us/politics/story.html?smid=tw",
            "www.www.example.com/a/",
            "http://exa mple.com/Path/?q",
            "https://example.com",
        ] {
            let once = normalize_url(url);
            assert_eq!(normalize_url(&once), once, "input: {url}");
        }
    }

    #[test]
    fn test_normalize_embedded_scheme_in_path() {
        let wayback = "https://web.archive.org/web/20240101000000/https://www.nytimes.com/2024/01/01/us/story.html";
        let key = normalize_url(wayback);
        assert_eq!(
            key,
            "web.archive.org/web/20240101000000/https://www.nytimes.com/2024/01/01/us/story.html"
        );
        assert_eq!(normalize_url(&key), key);

        let redirect = normalize_url("https://example.com/redirect/https://other.com/x");
        assert_eq!(redirect, "example.com/redirect/https://other.com/x");
        assert_eq!(normalize_url(&redirect), redirect);
    }

    #[test]
    fn test_normalize_without_host_is_empty() {
        assert_eq!(normalize_url("https://www./a/b"), "");
        assert_eq!(normalize_url("file:///etc/passwd"), "");
        assert_eq!(normalize_url("/a/b"), "");
        assert_eq!(normalize_url("?q=1"), "");
    }

    #[test]
    fn test_normalize_other_schemes_keep_host_and_path() {
        assert_eq!(normalize_url("ftp://Example.com/pub/"), "example.com/pub");
        assert_eq!(normalize_url("https://example.com:443/a"), "example.com/a");
    }

    #[test]
    fn test_registrable_domain() {
        assert_eq!(
            registrable_domain("https://www.washingtonpost.com/politics/x").as_deref(),
            Some("washingtonpost.com")
        );
        assert_eq!(
            registrable_domain("https://news.bbc.co.uk/a").as_deref(),
            Some("bbc.co.uk")
        );
        assert_eq!(
            registrable_domain("http://127.0.0.1:9000/a").as_deref(),
            Some("127.0.0.1")
        );
        assert_eq!(registrable_domain("").as_deref(), None);
    }

    #[test]
    fn test_domain_token() {
        assert_eq!(
            domain_token("https://apnews.com/article/abc").as_deref(),
            Some("apnews")
        );
        assert_eq!(
            domain_token("https://www.ft.com/content/123").as_deref(),
            Some("ft")
        );
        assert_eq!(
            domain_token("https://www.smh.com.au/world").as_deref(),
            Some("smh")
        );
    }

    #[test]
    fn test_validate_url() {
        assert!(validators::validate_url("https://example.com/story").is_ok());
        assert!(validators::validate_url("  ").is_err());
        assert!(validators::validate_url("example.com/story").is_err());
        assert!(validators::validate_url("ftp://example.com/file").is_err());
    }
}
