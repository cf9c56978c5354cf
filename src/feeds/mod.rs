// RSS ingestion: the feed table, the XML parser, and the collector loop
// that writes new headlines into the store.

pub mod collector;
pub mod rss;
pub mod sources;

pub use collector::{collect_once, run_periodic, CollectSummary, FeedFetcher, HttpFetcher};
pub use rss::{parse_feed, FeedEntry};
pub use sources::{default_feeds, load_feeds, FeedSource};
