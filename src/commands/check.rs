use anyhow::Result;

use newsdesk::classifier::SearchResultFilter;
use newsdesk::config::Config;

/// Print the search-result filter's verdict for a URL and title
pub fn check(config: &Config, url: &str, title: &str, json: bool) -> Result<()> {
    let filter = SearchResultFilter::new(config.classifier.search.clone());
    let verdict = filter.is_article(url, title);

    if json {
        println!("{}", serde_json::to_string_pretty(&verdict)?);
    } else if verdict.accepted {
        println!("Article: {url}");
    } else {
        println!("Not an article ({}): {url}", verdict.reason);
    }
    Ok(())
}
