use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT,
};

/// Build browser-like request headers for publisher sites
///
/// Many news sites block clients that do not look like a desktop browser.
/// Values that are not valid header text are skipped. Accept-Encoding is
/// left to the client so compressed bodies are decoded transparently.
///
/// # Arguments
///
/// * `user_agent` - User agent string (typically a modern browser UA)
/// * `accept_language` - Accept-Language value, e.g. `en-US,en;q=0.9`
///
/// # Examples
///
/// ```
/// use newsdesk::crawler::headers::build_browser_headers;
///
/// let headers = build_browser_headers(
///     "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
///     "en-US,en;q=0.9",
/// );
/// assert!(headers.contains_key("user-agent"));
/// ```
pub fn build_browser_headers(user_agent: &str, accept_language: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();

    if let Ok(value) = HeaderValue::from_str(user_agent) {
        headers.insert(USER_AGENT, value);
    }
    if let Ok(value) = HeaderValue::from_str(accept_language) {
        headers.insert(ACCEPT_LANGUAGE, value);
    }
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );

    // Sec-Fetch headers for modern browser compatibility
    headers.insert(
        HeaderName::from_static("sec-fetch-dest"),
        HeaderValue::from_static("document"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-mode"),
        HeaderValue::from_static("navigate"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-site"),
        HeaderValue::from_static("none"),
    );
    headers.insert(
        HeaderName::from_static("upgrade-insecure-requests"),
        HeaderValue::from_static("1"),
    );

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_browser_headers() {
        let headers = build_browser_headers("Mozilla/5.0 Test", "en-US,en;q=0.9");

        assert_eq!(headers.get(USER_AGENT).unwrap(), "Mozilla/5.0 Test");
        assert_eq!(headers.get(ACCEPT_LANGUAGE).unwrap(), "en-US,en;q=0.9");
        assert!(headers.contains_key(ACCEPT));
        assert!(headers.contains_key("sec-fetch-mode"));
    }

    #[test]
    fn test_invalid_values_are_skipped() {
        let headers = build_browser_headers("bad\nagent", "en");
        assert!(!headers.contains_key(USER_AGENT));
        assert!(headers.contains_key(ACCEPT_LANGUAGE));
    }
}
