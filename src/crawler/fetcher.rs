//! HTTP fetcher with cache-mirror fallback and charset detection
//!
//! This module retrieves publisher pages with browser-like headers:
//! - User-Agent rotation (unless a fixed UA is configured)
//! - One retry against a public cache mirror after access-denied or
//!   not-found responses
//! - Charset detection from the Content-Type header or the page's meta tag

use encoding_rs::{Encoding, UTF_8};
use rand::seq::SliceRandom;
use reqwest::{header::CONTENT_TYPE, Client, Response};

use crate::config::FetcherConfig;
use crate::crawler::headers::build_browser_headers;
use crate::crawler::url::validators;
use crate::utils::error::{FetchError, StatusReason};

/// Pool of realistic User-Agent strings for rotation
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:123.0) Gecko/20100101 Firefox/123.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.3 Safari/605.1.15",
];

/// How many leading bytes to scan for a `<meta charset>` declaration
const META_SNIFF_LEN: usize = 2048;

/// A successfully retrieved page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// URL the caller asked for
    pub url: String,

    /// URL that actually produced the markup (after redirects, or the mirror URL)
    pub final_url: String,

    /// Decoded markup
    pub html: String,

    /// Whether the markup came from the cache mirror
    pub via_cache: bool,
}

/// Fetcher for publisher article pages
pub struct ArticleFetcher {
    /// HTTP client with configured timeout, compression and cookie store
    client: Client,

    /// Fixed User-Agent; rotated from the pool when `None`
    user_agent: Option<String>,

    accept_language: String,

    /// Prefix the original URL is appended to for the fallback attempt
    cache_mirror_prefix: String,
}

impl ArticleFetcher {
    /// Create a fetcher from configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Transport` if the HTTP client cannot be created
    pub fn new(config: &FetcherConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .gzip(true)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
            accept_language: config.accept_language.clone(),
            cache_mirror_prefix: config.cache_mirror_prefix.clone(),
        })
    }

    /// Replace the cache mirror prefix (used to point at a mock server in tests)
    #[must_use]
    pub fn with_cache_mirror(mut self, prefix: impl Into<String>) -> Self {
        self.cache_mirror_prefix = prefix.into();
        self
    }

    /// URL of the cache mirror copy of `url`
    pub fn cache_url(&self, url: &str) -> String {
        format!("{}{url}", self.cache_mirror_prefix)
    }

    /// Fetch a page, falling back to the cache mirror once
    ///
    /// The mirror is tried only when the live attempt failed with an
    /// access-denied or not-found status. Other failures are returned as-is.
    ///
    /// # Errors
    ///
    /// * `FetchError::InvalidUrl` for empty or non-http(s) input
    /// * `FetchError::BothAttemptsFailed` when live and mirror both fail
    /// * any single-attempt `FetchError` when no fallback applies
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let url = url.trim();
        validators::validate_url(url).map_err(FetchError::InvalidUrl)?;

        match self.fetch_once(url).await {
            Ok((final_url, html)) => {
                tracing::debug!(url = %url, bytes = html.len(), "Fetched live page");
                Ok(FetchedPage {
                    url: url.to_string(),
                    final_url,
                    html,
                    via_cache: false,
                })
            }
            Err(live) if live.allows_cache_fallback() => {
                let cache_url = self.cache_url(url);
                tracing::warn!(url = %url, error = %live, "Live fetch refused, trying cache mirror");

                match self.fetch_once(&cache_url).await {
                    Ok((final_url, html)) => {
                        tracing::info!(url = %url, "Recovered page from cache mirror");
                        Ok(FetchedPage {
                            url: url.to_string(),
                            final_url,
                            html,
                            via_cache: true,
                        })
                    }
                    Err(cache) => Err(FetchError::BothAttemptsFailed {
                        live: Box::new(live),
                        cache: Box::new(cache),
                    }),
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Single GET; returns the final URL and decoded body
    async fn fetch_once(&self, url: &str) -> Result<(String, String), FetchError> {
        let headers = build_browser_headers(self.pick_user_agent(), &self.accept_language);

        let response = self
            .client
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let code = status.as_u16();
            return Err(FetchError::Status {
                code,
                reason: StatusReason::from_status(code),
            });
        }

        let final_url = response.url().to_string();
        let html = Self::decode_response(response).await?;

        if html.trim().is_empty() {
            return Err(FetchError::EmptyBody);
        }

        Ok((final_url, html))
    }

    async fn decode_response(response: Response) -> Result<String, FetchError> {
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap_or_default();

        let bytes = response.bytes().await.map_err(map_transport_error)?;

        Ok(Self::decode_bytes(&bytes, &content_type))
    }

    /// Decode bytes to a string, honoring the declared charset
    ///
    /// Strategy, in order:
    /// 1. `charset=` parameter of the Content-Type header
    /// 2. `<meta charset>` or `http-equiv` declaration near the top of the page
    /// 3. UTF-8
    ///
    /// A byte-order mark overrides all of the above. Malformed sequences are
    /// replaced rather than rejected.
    pub fn decode_bytes(bytes: &[u8], content_type: &str) -> String {
        let encoding = charset_param(content_type)
            .and_then(|label| Encoding::for_label(label.as_bytes()))
            .or_else(|| sniff_meta_charset(bytes))
            .unwrap_or(UTF_8);

        let (text, _used, had_errors) = encoding.decode(bytes);
        if had_errors {
            tracing::debug!(encoding = encoding.name(), "Replaced malformed byte sequences");
        }
        text.into_owned()
    }

    fn pick_user_agent(&self) -> &str {
        match &self.user_agent {
            Some(ua) => ua,
            None => random_user_agent(),
        }
    }
}

/// Get a random user agent from the pool
fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS.choose(&mut rng).copied().unwrap_or(USER_AGENTS[0])
}

fn map_transport_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Transport(e)
    }
}

/// Extract the `charset` parameter from a Content-Type value
fn charset_param(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if name.trim().eq_ignore_ascii_case("charset") {
            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
            (!value.is_empty()).then(|| value.to_string())
        } else {
            None
        }
    })
}

/// Look for `charset=` in the first bytes of the document
fn sniff_meta_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(META_SNIFF_LEN)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();

    let start = head.find("charset=")? + "charset=".len();
    let label: String = head[start..]
        .trim_start_matches(['"', '\''])
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
        .collect();

    Encoding::for_label(label.as_bytes())
}
