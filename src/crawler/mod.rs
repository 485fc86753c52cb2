//! URL-to-article pipeline
//!
//! This module fetches a publisher page, extracts its content, rejects pages
//! that do not read like an article, and assembles a formatted [`Article`].
//! Steps run strictly one after another.

pub mod fetcher;
pub mod headers;
pub mod url;

use crate::classifier::ContentShapeClassifier;
use crate::config::Config;
use crate::models::{AddOutcome, Article, MANUAL_KEYWORD};
use crate::parser::authors::normalize_authors;
use crate::parser::format::{source_name, title_case};
use crate::parser::html::ContentExtractor;
use crate::storage::CollectionStore;
use crate::utils::error::{ExtractError, FetchError, ScrapeError};

use self::fetcher::ArticleFetcher;
use self::url::domain_token;

/// Scrape pipeline: fetch, extract, classify, assemble
pub struct Scraper {
    fetcher: ArticleFetcher,
    extractor: ContentExtractor,
    shape: ContentShapeClassifier,
}

impl Scraper {
    /// Create a scraper from configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Transport` if the HTTP client cannot be created
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        Ok(Self {
            fetcher: ArticleFetcher::new(&config.fetcher)?,
            extractor: ContentExtractor::new(),
            shape: ContentShapeClassifier::new(config.classifier.content.clone()),
        })
    }

    /// Turn a URL into a formatted article
    ///
    /// `keyword` records the search term that led to the URL; manual entry
    /// passes `None`.
    ///
    /// # Errors
    ///
    /// * `ScrapeError::Fetch` when the page cannot be retrieved
    /// * `ScrapeError::Extract` when no body text or no title is found
    /// * `ScrapeError::NonArticleContent` when the content is listing- or
    ///   graphic-shaped
    /// * `ScrapeError::Invalid` when a required field ends up empty
    #[tracing::instrument(skip(self), fields(url = %url))]
    pub async fn scrape(&self, url: &str, keyword: Option<&str>) -> Result<Article, ScrapeError> {
        let page = self.fetcher.fetch(url).await?;
        let document = self.extractor.extract(&page.html, &page.url)?;

        let report = self.shape.classify(&document);
        if !report.is_article_shaped() {
            tracing::warn!(score = report.score, flags = ?report.flags, "Rejected non-article content");
            return Err(ScrapeError::NonArticleContent(report));
        }

        if document.title.trim().is_empty() {
            return Err(ExtractError::NoTitle.into());
        }

        let authors = normalize_authors(&document.bylines);
        let source = domain_token(&page.url)
            .map(|token| source_name(&token))
            .unwrap_or_else(|| source_name(&document.domain));

        let article = Article::new(title_case(&document.title), document.text, source)
            .with_url(page.url.clone())
            .with_authors(authors)
            .with_keyword(keyword.unwrap_or(MANUAL_KEYWORD));

        article.validate()?;

        tracing::info!(
            title = %article.title,
            source = %article.source,
            via_cache = page.via_cache,
            "Scraped article"
        );
        Ok(article)
    }

    /// Scrape a URL and offer the result to the store
    ///
    /// # Errors
    ///
    /// Same as [`Scraper::scrape`]
    pub async fn scrape_into(
        &self,
        store: &mut CollectionStore,
        url: &str,
        keyword: Option<&str>,
    ) -> Result<AddOutcome, ScrapeError> {
        let article = self.scrape(url, keyword).await?;
        Ok(store.insert(article)?)
    }
}
