// Feed collection: fetch every RSS feed, keep the first N items of each,
// and insert the ones the store hasn't seen.
//
// Fetches run concurrently. Inserts run sequentially afterwards, since
// the store serializes writes anyway. A failing feed is logged and counted
// without stopping the rest of the cycle.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use super::rss::{parse_feed, FeedEntry};
use super::sources::FeedSource;
use crate::db::models::NewRecord;
use crate::db::RecordStore;
use crate::scoring::now_local;

/// Collector state key for the time of the last finished cycle.
pub const LAST_COLLECT_KEY: &str = "last_collect_at";

/// Feeds fetched at once.
const FETCH_CONCURRENCY: usize = 4;

const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

/// Source of raw feed XML. The HTTP implementation is `HttpFetcher`.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// reqwest-backed fetcher.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("threatlens/0.1 (news collector)")
            .timeout(FETCH_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!(url, "Fetching feed");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Feed request failed: {url}"))?;

        if !response.status().is_success() {
            anyhow::bail!("Feed {url} returned {}", response.status());
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read feed body: {url}"))
    }
}

/// Outcome of one collection cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectSummary {
    pub feeds_ok: usize,
    pub feeds_failed: usize,
    pub inserted: usize,
    /// Items dropped because their link was already stored.
    pub skipped: usize,
}

async fn fetch_entries<'a>(
    fetcher: &'a dyn FeedFetcher,
    feed: &'a FeedSource,
) -> (&'a FeedSource, Result<Vec<FeedEntry>>) {
    let entries = match fetcher.fetch(&feed.url).await {
        Ok(xml) => parse_feed(&xml),
        Err(e) => Err(e),
    };
    (feed, entries)
}

/// Run one collection cycle over `feeds`.
///
/// Only store errors abort the cycle. Fetch and parse failures are
/// counted in `feeds_failed`.
pub async fn collect_once(
    store: &dyn RecordStore,
    fetcher: &dyn FeedFetcher,
    feeds: &[FeedSource],
    entries_per_feed: usize,
) -> Result<CollectSummary> {
    // Boxed so the cycle's future stays Send when spawned onto the runtime
    let fetches: Vec<BoxFuture<'_, (&FeedSource, Result<Vec<FeedEntry>>)>> = feeds
        .iter()
        .map(|feed| fetch_entries(fetcher, feed).boxed())
        .collect();
    let results: Vec<(&FeedSource, Result<Vec<FeedEntry>>)> = stream::iter(fetches)
        .buffer_unordered(FETCH_CONCURRENCY)
        .collect()
        .await;

    let mut summary = CollectSummary::default();
    for (feed, entries) in results {
        let entries = match entries {
            Ok(entries) => entries,
            Err(e) => {
                warn!(url = %feed.url, error = %e, "Feed failed, skipping");
                summary.feeds_failed += 1;
                continue;
            }
        };
        summary.feeds_ok += 1;

        // All items from one cycle share a timestamp.
        let timestamp = now_local().format("%Y-%m-%d %H:%M:%S").to_string();
        for entry in entries.into_iter().take(entries_per_feed) {
            let record = NewRecord {
                source: entry.link,
                headline: entry.title,
                timestamp: timestamp.clone(),
                category: feed.category.clone(),
                bias: None,
            };
            if store.insert_if_absent(&record).await? {
                summary.inserted += 1;
            } else {
                summary.skipped += 1;
            }
        }
    }

    let finished = now_local().format("%Y-%m-%d %H:%M:%S").to_string();
    store.set_state(LAST_COLLECT_KEY, &finished).await?;

    info!(
        feeds_ok = summary.feeds_ok,
        feeds_failed = summary.feeds_failed,
        inserted = summary.inserted,
        skipped = summary.skipped,
        "Collection cycle complete"
    );
    Ok(summary)
}

/// Collect forever, once per `interval`. The first cycle starts immediately.
/// A failed cycle is logged and the loop carries on.
pub async fn run_periodic(
    store: Arc<dyn RecordStore>,
    fetcher: Arc<dyn FeedFetcher>,
    feeds: Vec<FeedSource>,
    entries_per_feed: usize,
    interval: Duration,
) {
    info!(
        feeds = feeds.len(),
        interval_secs = interval.as_secs(),
        "Starting periodic collector"
    );
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        if let Err(e) =
            collect_once(store.as_ref(), fetcher.as_ref(), &feeds, entries_per_feed).await
        {
            warn!(error = %e, "Collection cycle failed");
        }
    }
}
