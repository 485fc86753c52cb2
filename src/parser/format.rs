//! Display formatting for article metadata
//!
//! Headline-style title casing and publisher display names.

use crate::models::Article;

/// Words kept lowercase inside a title
const SMALL_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "but", "by", "en", "for", "if", "in", "of", "on", "or", "the",
    "to", "v", "vs", "via",
];

/// Display names for publishers whose domain token is not their name
const SOURCE_NAMES: &[(&str, &str)] = &[
    ("apnews", "Associated Press"),
    ("nytimes", "New York Times"),
    ("wsj", "Wall Street Journal"),
    ("politico", "POLITICO"),
    ("ft", "Financial Times"),
    ("cnbc", "CNBC"),
    ("scmp", "South China Morning Post"),
    ("foxnews", "Fox News"),
    ("washingtonpost", "Washington Post"),
    ("cnn", "CNN"),
    ("bloomberglaw", "Bloomberg"),
];

/// Headline-style title case
///
/// Capitalizes the first letter of each word; small words stay lowercase
/// unless they start or end the title or follow a colon. Words with an
/// interior capital (acronyms, `iPhone`) are left untouched, except in a
/// title written entirely in capitals, which is lowercased first. Each part
/// of a hyphenated word is capitalized.
///
/// # Examples
///
/// ```
/// use newsdesk::parser::format::title_case;
///
/// assert_eq!(
///     title_case("the fall of the house of usher"),
///     "The Fall of the House of Usher"
/// );
/// assert_eq!(title_case("NATO allies weigh new iPhone rules"), "NATO Allies Weigh New iPhone Rules");
/// assert_eq!(title_case("what to look out for"), "What to Look Out For");
/// assert_eq!(title_case("SENATE PASSES THE BUDGET"), "Senate Passes the Budget");
/// ```
pub fn title_case(text: &str) -> String {
    let lowered;
    let text = if is_all_caps(text) {
        lowered = text.to_lowercase();
        lowered.as_str()
    } else {
        text
    };

    let words: Vec<&str> = text.split(' ').collect();
    let first = words.iter().position(|w| !w.is_empty());
    let last = words.iter().rposition(|w| !w.is_empty());

    let mut after_colon = false;
    let mut out = Vec::with_capacity(words.len());

    for (i, word) in words.iter().enumerate() {
        if word.is_empty() {
            out.push(String::new());
            continue;
        }

        let edge = Some(i) == first || Some(i) == last || after_colon;
        out.push(case_word(word, edge));
        after_colon = word.ends_with(':');
    }

    out.join(" ")
}

fn case_word(word: &str, edge: bool) -> String {
    if has_interior_capital(word) {
        return word.to_string();
    }

    let core: String = word
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    if !edge && SMALL_WORDS.contains(&core.as_str()) {
        return word.to_lowercase();
    }

    word.split('-')
        .map(capitalize_first_letter)
        .collect::<Vec<_>>()
        .join("-")
}

fn is_all_caps(text: &str) -> bool {
    let mut letters = text.chars().filter(|c| c.is_alphabetic()).peekable();
    letters.peek().is_some() && letters.all(char::is_uppercase)
}

fn has_interior_capital(word: &str) -> bool {
    word.chars()
        .skip_while(|c| !c.is_alphabetic())
        .skip(1)
        .any(char::is_uppercase)
}

fn capitalize_first_letter(part: &str) -> String {
    let mut out = String::with_capacity(part.len());
    let mut done = false;
    for c in part.chars() {
        if !done && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            done = true;
        } else {
            out.push(c);
        }
    }
    out
}

/// Display name for a publisher domain token (`nytimes` → New York Times)
///
/// Unknown tokens fall back to the title-cased token itself.
///
/// # Examples
///
/// ```
/// use newsdesk::parser::format::source_name;
///
/// assert_eq!(source_name("wsj"), "Wall Street Journal");
/// assert_eq!(source_name("reuters"), "Reuters");
/// ```
pub fn source_name(domain_token: &str) -> String {
    let token = domain_token.trim().to_lowercase();
    SOURCE_NAMES
        .iter()
        .find(|(key, _)| *key == token)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| title_case(&token))
}

/// Normalize an article's display fields in place
///
/// Title and source are trimmed and title-cased; blank optional fields
/// become `None`.
pub fn format_article(article: &mut Article) {
    article.title = title_case(article.title.trim());
    article.source = title_case(article.source.trim());
    article.content = article.content.trim().to_string();
    article.keyword = article.keyword.trim().to_string();

    article.lead = article
        .lead
        .take()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty());
    article.url = article
        .url
        .take()
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty());
}
