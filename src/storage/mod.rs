//! Ordered, deduplicated article collection
//!
//! [`CollectionStore`] owns the curated articles in display order together
//! with two identity indices used for duplicate detection:
//! - normalized URLs of articles that have a URL
//! - normalized titles of articles without one
//!
//! The indices are derived from the article list and rebuilt whenever
//! membership changes. Persistence goes through [`table`]; failures there
//! are logged and reported as `false`, never raised.

pub mod events;
pub mod table;

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::crawler::url::normalize_url;
use crate::models::{AddOutcome, Article};
use crate::parser::format::format_article;
use crate::utils::error::ValidationError;

pub use events::{CollectionEvent, CollectionListener, EventBus, SubscriptionId};

/// The key an article is deduplicated by
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentityKey {
    /// Normalized URL
    Url(String),
    /// Normalized title, for articles without a URL
    Title(String),
}

impl IdentityKey {
    pub fn of(article: &Article) -> Self {
        match article.url().map(normalize_url).filter(|u| !u.is_empty()) {
            Some(url) => Self::Url(url),
            None => Self::Title(normalize_title(&article.title)),
        }
    }
}

/// Case- and whitespace-insensitive title key
pub fn normalize_title(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// In-memory article collection backed by a CSV file
#[derive(Debug)]
pub struct CollectionStore {
    path: PathBuf,
    articles: Vec<Article>,
    url_index: HashSet<String>,
    title_index: HashSet<String>,
    events: EventBus,
}

impl CollectionStore {
    /// Create an empty store persisting to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            articles: Vec::new(),
            url_index: HashSet::new(),
            title_index: HashSet::new(),
            events: EventBus::new(),
        }
    }

    /// Create a store and load whatever is persisted at `path`
    ///
    /// A file that cannot be read leaves the store empty; the failure is
    /// logged.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = Self::new(path);
        store.load();
        store
    }

    /// Replace the collection with the contents of the file
    ///
    /// A missing or blank file loads as an empty collection and counts as
    /// success. An unreadable or corrupt file also leaves the collection
    /// empty but returns `false`. Rows that are invalid or repeat an earlier
    /// row are skipped.
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&mut self) -> bool {
        self.articles.clear();
        self.rebuild_indices();

        let ok = match table::read_file(&self.path) {
            Ok(rows) => {
                let total = rows.len();
                for row in rows {
                    let article = row.into_article();
                    let title = article.title.clone();
                    match self.admit(article) {
                        Ok(AddOutcome::Added(_)) => {}
                        Ok(AddOutcome::Duplicate(_)) => {
                            tracing::warn!(title = %title, "Skipping duplicate row");
                        }
                        Err(e) => {
                            tracing::warn!(title = %title, error = %e, "Skipping invalid row");
                        }
                    }
                }
                tracing::info!(loaded = self.articles.len(), rows = total, "Loaded collection");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read collection file");
                self.articles.clear();
                false
            }
        };

        self.rebuild_indices();
        self.notify_changed();
        ok
    }

    /// Add an article; `false` if it is invalid or a duplicate
    pub fn add(&mut self, article: Article) -> bool {
        match self.insert(article) {
            Ok(outcome) => outcome.was_added(),
            Err(e) => {
                tracing::warn!(error = %e, "Rejected invalid article");
                false
            }
        }
    }

    /// Add an article, reporting which outcome occurred
    ///
    /// Title and source are formatted first. Duplicate detection uses the
    /// normalized URL when there is one, otherwise the normalized title.
    /// A duplicate is returned unchanged inside `AddOutcome::Duplicate` and
    /// the collection is not modified.
    ///
    /// # Errors
    ///
    /// Returns the validation failure for an article missing a required field
    pub fn insert(&mut self, article: Article) -> Result<AddOutcome, ValidationError> {
        let outcome = self.admit(article)?;
        match &outcome {
            AddOutcome::Added(a) => {
                tracing::info!(id = %a.id(), title = %a.title, "Added article");
                self.rebuild_indices();
                self.notify_changed();
            }
            AddOutcome::Duplicate(a) => {
                tracing::info!(title = %a.title, "Duplicate article found");
            }
        }
        Ok(outcome)
    }

    /// Format, validate and append unless duplicate; keeps indices current
    fn admit(&mut self, mut article: Article) -> Result<AddOutcome, ValidationError> {
        format_article(&mut article);
        article.validate()?;

        let key = IdentityKey::of(&article);
        if self.contains_key(&key) {
            return Ok(AddOutcome::Duplicate(article));
        }

        match key {
            IdentityKey::Url(url) => self.url_index.insert(url),
            IdentityKey::Title(title) => self.title_index.insert(title),
        };
        self.articles.push(article.clone());
        Ok(AddOutcome::Added(article))
    }

    fn contains_key(&self, key: &IdentityKey) -> bool {
        match key {
            IdentityKey::Url(url) => self.url_index.contains(url),
            IdentityKey::Title(title) => self.title_index.contains(title),
        }
    }

    pub fn get(&self, id: Uuid) -> Option<&Article> {
        self.articles.iter().find(|a| a.id() == id)
    }

    pub fn get_at(&self, index: usize) -> Option<&Article> {
        self.articles.get(index)
    }

    /// Position of the article with `id`
    pub fn position(&self, id: Uuid) -> Option<usize> {
        self.articles.iter().position(|a| a.id() == id)
    }

    /// Articles in display order
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the stored article with the same id, keeping its position
    ///
    /// Returns `false` if no article has that id, if the edited article is
    /// invalid, or if its identity key now matches a different article.
    pub fn edit(&mut self, mut article: Article) -> bool {
        let id = article.id();
        let Some(index) = self.position(id) else {
            tracing::warn!(id = %id, "Edit of unknown article");
            return false;
        };

        format_article(&mut article);
        if let Err(e) = article.validate() {
            tracing::warn!(id = %id, error = %e, "Rejected invalid edit");
            return false;
        }

        let key = IdentityKey::of(&article);
        if self
            .articles
            .iter()
            .any(|a| a.id() != id && IdentityKey::of(a) == key)
        {
            tracing::warn!(id = %id, "Edit would duplicate another article");
            return false;
        }

        self.articles[index] = article;
        self.rebuild_indices();
        tracing::info!(id = %id, index, "Updated article");
        self.events.emit(CollectionEvent::ItemUpdated { id, index });
        true
    }

    /// Remove the article with `id`; `false` if absent
    pub fn delete(&mut self, id: Uuid) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };

        let removed = self.articles.remove(index);
        self.rebuild_indices();
        tracing::info!(id = %id, title = %removed.title, "Deleted article");
        self.notify_changed();
        true
    }

    /// Reorder the collection to match `new_order`
    ///
    /// `new_order` must list every current id exactly once; anything else
    /// returns `false` and leaves the order unchanged.
    pub fn reorder(&mut self, new_order: &[Uuid]) -> bool {
        if new_order.len() != self.articles.len() {
            tracing::warn!(
                expected = self.articles.len(),
                got = new_order.len(),
                "Reorder length mismatch"
            );
            return false;
        }

        let requested: HashSet<Uuid> = new_order.iter().copied().collect();
        if requested.len() != new_order.len()
            || self.articles.iter().any(|a| !requested.contains(&a.id()))
        {
            tracing::warn!("Reorder is not a permutation of the collection");
            return false;
        }

        let mut by_id: HashMap<Uuid, Article> =
            self.articles.drain(..).map(|a| (a.id(), a)).collect();
        self.articles = new_order.iter().filter_map(|id| by_id.remove(id)).collect();

        self.notify_changed();
        true
    }

    /// Write the collection to its file
    ///
    /// An empty collection is not written and returns `false`. I/O failures
    /// (missing directory, permissions) are logged and return `false`.
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    pub fn save(&self) -> bool {
        if self.articles.is_empty() {
            tracing::info!("No articles to save");
            return false;
        }

        match table::write_file(&self.path, &self.articles) {
            Ok(()) => {
                tracing::info!(count = self.articles.len(), "Saved collection");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to save collection");
                false
            }
        }
    }

    /// Register a change listener
    pub fn subscribe(&mut self, listener: impl CollectionListener + 'static) -> SubscriptionId {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    fn rebuild_indices(&mut self) {
        self.url_index.clear();
        self.title_index.clear();
        for article in &self.articles {
            match IdentityKey::of(article) {
                IdentityKey::Url(url) => self.url_index.insert(url),
                IdentityKey::Title(title) => self.title_index.insert(title),
            };
        }
    }

    fn notify_changed(&self) {
        self.events.emit(CollectionEvent::CollectionChanged {
            len: self.articles.len(),
        });
    }
}
