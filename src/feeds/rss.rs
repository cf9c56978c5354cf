// RSS 2.0 parsing: only the `channel/item` title and link are kept.

use anyhow::{Context, Result};
use quick_xml::de::from_str;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
}

/// One usable feed item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
}

/// Parse RSS XML into entries, in document order. Items without a link
/// are dropped; a missing title becomes an empty headline.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>> {
    let rss: Rss = from_str(xml).context("parsing rss xml")?;

    Ok(rss
        .channel
        .items
        .into_iter()
        .filter_map(|item| {
            let link = item.link.map(|l| l.trim().to_string())?;
            if link.is_empty() {
                return None;
            }
            Some(FeedEntry {
                title: item.title.map(|t| t.trim().to_string()).unwrap_or_default(),
                link,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>World News</title>
    <link>https://example.com</link>
    <item>
      <title>Storm batters coast</title>
      <link>https://example.com/storm</link>
      <pubDate>Mon, 10 Jun 2024 08:00:00 GMT</pubDate>
    </item>
    <item>
      <title>No link here</title>
    </item>
    <item>
      <link> https://example.com/untitled </link>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn keeps_linked_items_in_order() {
        let entries = parse_feed(SAMPLE).unwrap();
        assert_eq!(
            entries,
            vec![
                FeedEntry {
                    title: "Storm batters coast".to_string(),
                    link: "https://example.com/storm".to_string(),
                },
                FeedEntry {
                    title: String::new(),
                    link: "https://example.com/untitled".to_string(),
                },
            ]
        );
    }

    #[test]
    fn empty_channel_is_ok() {
        let xml = r#"<rss version="2.0"><channel><title>x</title></channel></rss>"#;
        assert!(parse_feed(xml).unwrap().is_empty());
    }

    #[test]
    fn malformed_xml_is_an_error() {
        assert!(parse_feed("<rss><channel>").is_err());
    }
}
