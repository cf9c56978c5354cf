// Feed table: which RSS feeds to poll and the category each one implies.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    pub url: String,
    /// Category stored on every record from this feed (None leaves it NULL).
    #[serde(default)]
    pub category: Option<String>,
}

impl FeedSource {
    fn new(url: &str, category: &str) -> Self {
        Self {
            url: url.to_string(),
            category: Some(category.to_string()),
        }
    }
}

/// The built-in feed table.
pub fn default_feeds() -> Vec<FeedSource> {
    vec![
        FeedSource::new("http://feeds.bbci.co.uk/news/world/rss.xml", "Conflict"),
        FeedSource::new("https://feeds.reuters.com/reuters/worldNews", "Conflict"),
        FeedSource::new("http://rss.cnn.com/rss/edition_world.rss", "Conflict"),
        FeedSource::new("https://www.aljazeera.com/xml/rss/all.xml", "Conflict"),
        FeedSource::new("http://feeds.bbci.co.uk/news/business/rss.xml", "Economy"),
        FeedSource::new("https://feeds.reuters.com/reuters/businessNews", "Economy"),
        FeedSource::new("http://feeds.bbci.co.uk/news/technology/rss.xml", "Technology"),
        FeedSource::new("https://feeds.arstechnica.com/arstechnica/index/", "Technology"),
        FeedSource::new("https://www.theguardian.com/environment/rss", "Environment"),
        FeedSource::new(
            "https://rss.nytimes.com/services/xml/rss/nyt/Climate.xml",
            "Environment",
        ),
    ]
}

/// Load a feed table from a JSON array of `{url, category}` objects.
pub fn load_feeds(path: &Path) -> Result<Vec<FeedSource>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading feed list from {}", path.display()))?;
    parse_feeds(&content).with_context(|| format!("parsing feed list {}", path.display()))
}

fn parse_feeds(content: &str) -> Result<Vec<FeedSource>> {
    let feeds: Vec<FeedSource> = serde_json::from_str(content)?;
    Ok(feeds
        .into_iter()
        .filter(|f| !f.url.trim().is_empty())
        .collect())
}
