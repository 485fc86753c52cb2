//! Article classification heuristics
//!
//! Two independent, pure filters:
//! - [`search_result`]: is a search hit (URL + title) likely an article?
//! - [`content_shape`]: does extracted content read like prose?

pub mod content_shape;
pub mod search_result;

pub use content_shape::{
    is_likely_article_content, ContentShapeClassifier, ContentShapeThresholds, ShapeFlag,
    ShapeReport,
};
pub use search_result::{
    is_article, screen_results, Rejection, Screening, SearchFilterThresholds, SearchResultFilter,
    Verdict,
};
