use anyhow::{Context, Result};

use newsdesk::config::Config;
use newsdesk::crawler::Scraper;
use newsdesk::error::{Error, NewsdeskErrorTrait};
use newsdesk::models::{AddOutcome, Article};
use newsdesk::parser::sanitize::truncate;
use newsdesk::storage::CollectionStore;
use newsdesk::utils::ArticleRef;

/// Fields for a hand-entered article
pub struct ManualEntry {
    pub title: String,
    pub content: String,
    pub source: String,
    pub lead: Option<String>,
    pub authors: Vec<String>,
    pub url: Option<String>,
}

/// Replacement values for `edit`; `None` keeps the current value
pub struct EditFields {
    pub title: Option<String>,
    pub lead: Option<String>,
    pub content: Option<String>,
    pub source: Option<String>,
    pub url: Option<String>,
}

pub async fn add(
    config: &Config,
    store: &mut CollectionStore,
    url: &str,
    keyword: Option<&str>,
) -> Result<()> {
    let scraper = Scraper::new(config).context("Failed to create scraper")?;

    match scraper.scrape_into(store, url, keyword).await {
        Ok(AddOutcome::Added(article)) => {
            println!("Added: {} ({})", article.title, article.source);
            persist(store);
            Ok(())
        }
        Ok(AddOutcome::Duplicate(article)) => {
            println!("Already in collection: {}", article.title);
            Ok(())
        }
        Err(e) => {
            let err = Error::from(e);
            report(&err);
            Err(err).with_context(|| format!("Could not add {url}"))
        }
    }
}

pub fn manual(store: &mut CollectionStore, entry: ManualEntry) -> Result<()> {
    let mut article = Article::new(entry.title, entry.content, entry.source)
        .with_authors(entry.authors);
    if let Some(lead) = entry.lead {
        article = article.with_lead(lead);
    }
    if let Some(url) = entry.url {
        article = article.with_url(url);
    }

    let outcome = store.insert(article).map_err(|e| {
        let err = Error::from(e);
        report(&err);
        err
    })?;

    match outcome {
        AddOutcome::Added(article) => {
            println!("Added: {}", article.title);
            persist(store);
        }
        AddOutcome::Duplicate(article) => {
            println!("Already in collection: {}", article.title);
        }
    }
    Ok(())
}

pub fn list(store: &CollectionStore, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(store.articles())?);
        return Ok(());
    }

    if store.is_empty() {
        println!("No articles in {}", store.path().display());
        return Ok(());
    }

    for (i, article) in store.articles().iter().enumerate() {
        println!(
            "{:>3}. {} [{}] ({})",
            i + 1,
            truncate(&article.title, 80),
            article.source,
            article.keyword
        );
    }
    Ok(())
}

pub fn show(store: &CollectionStore, reference: ArticleRef, json: bool) -> Result<()> {
    let article = resolve(store, reference)?;

    if json {
        println!("{}", serde_json::to_string_pretty(article)?);
        return Ok(());
    }

    println!("Title:   {}", article.title);
    println!("Source:  {}", article.source);
    if let Some(url) = article.url() {
        println!("URL:     {url}");
    }
    if !article.authors.is_empty() {
        println!("Authors: {}", article.authors.join(", "));
    }
    println!("Keyword: {}", article.keyword);
    if let Some(lead) = &article.lead {
        println!("Lead:    {lead}");
    }
    println!();
    println!("{}", article.content);
    Ok(())
}

pub fn edit(store: &mut CollectionStore, reference: ArticleRef, fields: EditFields) -> Result<()> {
    let mut article = resolve(store, reference)?.clone();

    if let Some(title) = fields.title {
        article.title = title;
    }
    if let Some(lead) = fields.lead {
        article.lead = Some(lead);
    }
    if let Some(content) = fields.content {
        article.content = content;
    }
    if let Some(source) = fields.source {
        article.source = source;
    }
    if let Some(url) = fields.url {
        article.url = Some(url);
    }

    if !store.edit(article) {
        anyhow::bail!("Edit of {reference} rejected: a required field is empty or it duplicates another article");
    }
    println!("Updated {reference}");
    persist(store);
    Ok(())
}

pub fn remove(store: &mut CollectionStore, reference: ArticleRef) -> Result<()> {
    let article = resolve(store, reference)?;
    let (id, title) = (article.id(), article.title.clone());

    if !store.delete(id) {
        anyhow::bail!("Article {reference} not found");
    }
    println!("Removed: {title}");
    persist(store);
    Ok(())
}

pub fn reorder(store: &mut CollectionStore, order: &[ArticleRef]) -> Result<()> {
    let ids = order
        .iter()
        .map(|r| resolve(store, *r).map(Article::id))
        .collect::<Result<Vec<_>>>()?;

    if !store.reorder(&ids) {
        anyhow::bail!(
            "New order must list each of the {} articles exactly once",
            store.len()
        );
    }
    println!("Reordered {} articles", store.len());
    persist(store);
    Ok(())
}

/// Print a failure with its category and the suggested next step
fn report(err: &Error) {
    eprintln!("{}: {err}", err.category().label());
    let hint = err.remediation();
    if !hint.is_empty() {
        eprintln!("{hint}");
    }
}

fn resolve(store: &CollectionStore, reference: ArticleRef) -> Result<&Article> {
    let found = match reference {
        ArticleRef::Id(id) => store.get(id),
        ArticleRef::Position(_) => reference.index().and_then(|i| store.get_at(i)),
    };
    found.with_context(|| format!("Article {reference} not found"))
}

/// Save after a mutation
///
/// An emptied collection is not written, so the file keeps its last
/// non-empty contents; say so rather than failing.
fn persist(store: &CollectionStore) {
    if store.is_empty() {
        println!(
            "Collection is now empty; {} was left unchanged",
            store.path().display()
        );
    } else if !store.save() {
        eprintln!("Warning: could not write {}", store.path().display());
    }
}
