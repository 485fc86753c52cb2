//! CSS selectors for generic news article pages
//!
//! Publisher markup varies widely, so each field is located through an
//! ordered list of selectors; the first one with usable content wins.

use lazy_static::lazy_static;
use scraper::Selector;

// Helper macro to parse selectors safely at compile time
macro_rules! parse_selector {
    ($s:expr) => {
        Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s))
    };
}

lazy_static! {
    static ref TITLE: Vec<Selector> = vec![
        parse_selector!("meta[property='og:title']"),
        parse_selector!("h1"),
        parse_selector!("title"),
    ];

    static ref BODY: Vec<Selector> = vec![
        parse_selector!("[itemprop='articleBody']"),
        parse_selector!("article"),
        parse_selector!("main"),
        parse_selector!(".article-body"),
        parse_selector!(".story-body"),
        parse_selector!("#content"),
    ];

    static ref BODY_FALLBACK: Selector = parse_selector!("body");

    static ref BLOCKS: Selector =
        parse_selector!("p, h2, h3, h4, h5, h6, li, blockquote, pre");

    // One group so matches come back in document order
    static ref BYLINES: Selector = parse_selector!(
        "meta[name='author'], meta[property='article:author'], [rel='author'], \
         [itemprop='author'], .byline, .author"
    );

    static ref PARAGRAPHS: Selector = parse_selector!("p");

    static ref LIST_ITEMS: Selector = parse_selector!("li");

    // Noise selectors - elements stripped from the body before text extraction
    static ref NOISE_ELEMENTS: Vec<Selector> = {
        let selectors = vec![
            "nav",
            "header",
            "footer",
            "aside",
            "script",
            "style",
            "noscript",
            "iframe",
            "form",
            "table",
            "figure",
            "svg",
            "button",
            ".ad",
            ".ads",
            ".advertisement",
            "[class*='advert']",
            "[id*='advert']",
            "[class*='share']",           // Share bars
            "[class*='social']",
            "[class*='newsletter']",      // Newsletter sign-up promos
            "[class*='related']",         // Related-story rails
            "[class*='promo']",
        ];

        selectors
            .iter()
            .filter_map(|s| Selector::parse(s).ok())
            .collect()
    };
}

/// Block-level tags whose text forms one line group of the article body
pub const BLOCK_TAGS: &[&str] = &["p", "h2", "h3", "h4", "h5", "h6", "li", "blockquote", "pre"];

/// Selectors for the fields of a generic article page
pub struct PageSelectors {
    pub title: &'static [Selector],
    pub body: &'static [Selector],
    pub body_fallback: &'static Selector,
    pub blocks: &'static Selector,
    pub bylines: &'static Selector,
}

impl PageSelectors {
    pub fn new() -> Self {
        Self {
            title: &TITLE,
            body: &BODY,
            body_fallback: &BODY_FALLBACK,
            blocks: &BLOCKS,
            bylines: &BYLINES,
        }
    }
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self::new()
    }
}

/// Selectors for noise elements to remove
pub struct NoiseSelectors {
    pub elements: &'static [Selector],
}

impl NoiseSelectors {
    pub fn new() -> Self {
        Self {
            elements: &NOISE_ELEMENTS,
        }
    }
}

impl Default for NoiseSelectors {
    fn default() -> Self {
        Self::new()
    }
}

/// Selectors used to measure the shape of cleaned body markup
pub struct ShapeSelectors {
    pub paragraphs: &'static Selector,
    pub list_items: &'static Selector,
}

impl ShapeSelectors {
    pub fn new() -> Self {
        Self {
            paragraphs: &PARAGRAPHS,
            list_items: &LIST_ITEMS,
        }
    }
}

impl Default for ShapeSelectors {
    fn default() -> Self {
        Self::new()
    }
}
