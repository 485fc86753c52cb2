//! Tabular file format for the persisted collection
//!
//! One CSV row per article with the header
//! `title,lead,content,source,url,author,keyword`. The `author` cell holds a
//! bracketed list literal. Files written by older tools may name that
//! column `authors` and may carry `nan`/`None` placeholders in empty cells.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::{Article, MANUAL_KEYWORD};
use crate::parser::authors::{parse_list_literal, to_list_literal};
use crate::utils::error::StorageError;

/// Cell values that mean "no value"
const MISSING_MARKERS: &[&str] = &["nan", "NaN", "None", "null"];

/// One persisted row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleRow {
    pub title: String,
    pub lead: String,
    pub content: String,
    pub source: String,
    pub url: String,
    #[serde(alias = "authors")]
    pub author: String,
    pub keyword: String,
}

impl From<&Article> for ArticleRow {
    fn from(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            lead: article.lead.clone().unwrap_or_default(),
            content: article.content.clone(),
            source: article.source.clone(),
            url: article.url.clone().unwrap_or_default(),
            author: to_list_literal(&article.authors),
            keyword: article.keyword.clone(),
        }
    }
}

impl ArticleRow {
    /// Build an article with a fresh id; placeholders become absent values
    pub fn into_article(self) -> Article {
        let keyword = present(&self.keyword).unwrap_or_else(|| MANUAL_KEYWORD.to_string());
        let authors = present(&self.author)
            .map(|a| parse_list_literal(&a))
            .unwrap_or_default();

        let mut article = Article::new(self.title, self.content, self.source)
            .with_authors(authors)
            .with_keyword(keyword);
        article.lead = present(&self.lead);
        article.url = present(&self.url);
        article
    }
}

fn present(cell: &str) -> Option<String> {
    let trimmed = cell.trim();
    if trimmed.is_empty() || MISSING_MARKERS.contains(&trimmed) {
        None
    } else {
        Some(cell.to_string())
    }
}

/// Parse rows from CSV text
pub fn read_rows<R: io::Read>(reader: R) -> Result<Vec<ArticleRow>, StorageError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in csv_reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}

/// Read a collection file
///
/// A missing or blank file yields no rows.
pub fn read_file(path: &Path) -> Result<Vec<ArticleRow>, StorageError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "Collection file not found, starting empty");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    read_rows(content.trim_start_matches('\u{FEFF}').as_bytes())
}

/// Serialize articles as CSV with a header row
pub fn write_rows<W: io::Write>(writer: W, articles: &[Article]) -> Result<(), StorageError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for article in articles {
        csv_writer.serialize(ArticleRow::from(article))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write articles to `path` through a sibling temp file and rename
///
/// The target directory must already exist.
pub fn write_file(path: &Path, articles: &[Article]) -> Result<(), StorageError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "collection.csv".to_string());
    let tmp_path = path.with_file_name(format!(".{file_name}.tmp"));

    let result = fs::File::create(&tmp_path)
        .map_err(StorageError::from)
        .and_then(|file| write_rows(io::BufWriter::new(file), articles))
        .and_then(|()| fs::rename(&tmp_path, path).map_err(StorageError::from));

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_order() {
        let article = Article::new("T", "C", "S");
        let mut buf = Vec::new();
        write_rows(&mut buf, &[article]).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("title,lead,content,source,url,author,keyword\n"));
    }

    #[test]
    fn test_placeholders_become_none() {
        let csv = "title,lead,content,source,url,author,keyword\n\
                   T,nan,C,S,None,,\n";
        let rows = read_rows(csv.as_bytes()).unwrap();
        let article = rows.into_iter().next().unwrap().into_article();

        assert!(article.lead.is_none());
        assert!(article.url.is_none());
        assert!(article.authors.is_empty());
        assert_eq!(article.keyword, MANUAL_KEYWORD);
    }

    #[test]
    fn test_legacy_authors_column_and_missing_lead() {
        let csv = "title,content,source,url,authors,keyword\n\
                   T,C,S,https://example.com/a,\"['Jane Doe', 'John Roe']\",tariffs\n";
        let rows = read_rows(csv.as_bytes()).unwrap();
        let article = rows.into_iter().next().unwrap().into_article();

        assert_eq!(article.authors, vec!["Jane Doe", "John Roe"]);
        assert_eq!(article.keyword, "tariffs");
        assert!(article.lead.is_none());
    }

    #[test]
    fn test_multiline_content_survives() {
        let article = Article::new("T", "Line one, with comma.\n\n\"Quoted\" line two.", "S")
            .with_authors(vec!["Pat O'Brien".to_string()]);
        let mut buf = Vec::new();
        write_rows(&mut buf, std::slice::from_ref(&article)).unwrap();

        let back = read_rows(buf.as_slice()).unwrap().remove(0).into_article();
        assert_eq!(back.content, article.content);
        assert_eq!(back.authors, article.authors);
    }

    #[test]
    fn test_ragged_rows_are_an_error() {
        let csv = "title,lead,content,source,url,author,keyword\nonly,two\n";
        assert!(read_rows(csv.as_bytes()).is_err());
    }
}
