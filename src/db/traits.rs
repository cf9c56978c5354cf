// RecordStore trait: the async interface the pipeline and web layer use.
//
// Mirrors the free functions in queries.rs one-to-one. SqliteStore is the
// only implementor today; tests use it against an in-memory connection.

use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;

use super::models::{NewRecord, RawRecord};

#[async_trait]
pub trait RecordStore: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    // --- Records ---

    /// Insert a record keyed by its source URL. Returns false if that URL
    /// was already stored.
    async fn insert_if_absent(&self, record: &NewRecord) -> Result<bool>;

    /// All records, newest first, optionally restricted to one `YYYY-MM-DD` day.
    async fn list_records(&self, date: Option<&str>) -> Result<Vec<RawRecord>>;

    /// A page of raw records, newest first.
    async fn list_news(&self, date: Option<&str>, limit: u32, offset: u32)
        -> Result<Vec<RawRecord>>;

    async fn get_record(&self, id: i64) -> Result<Option<RawRecord>>;

    /// Classification write path. Returns false when the id is unknown.
    async fn update_fields(
        &self,
        id: i64,
        category: Option<&str>,
        bias: Option<&str>,
    ) -> Result<bool>;

    async fn list_dates(&self) -> Result<Vec<String>>;

    async fn record_count(&self) -> Result<i64>;

    // --- Grouped counts ---

    async fn category_counts(&self) -> Result<BTreeMap<String, i64>>;

    async fn bias_counts(&self) -> Result<BTreeMap<String, i64>>;

    // --- Collector state ---

    /// Get a collector state value by key (e.g., "last_collect_at").
    async fn get_state(&self, key: &str) -> Result<Option<String>>;

    /// Set a collector state value (upsert).
    async fn set_state(&self, key: &str, value: &str) -> Result<()>;
}
