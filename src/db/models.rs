// Data models: Rust structs that map to database rows.
//
// Kept separate from the queries so the scoring and pipeline modules can
// work with records without depending on rusqlite directly.

use serde::{Deserialize, Serialize};

/// One ingested news item as stored in the `news` table.
///
/// `source` is the article URL and doubles as the dedup key. `category`
/// and `bias` stay NULL until the collector or a classification write
/// fills them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: i64,
    pub headline: String,
    pub source: String,
    /// Naive local time, `YYYY-MM-DD HH:MM[:SS]`.
    pub timestamp: String,
    pub category: Option<String>,
    pub bias: Option<String>,
}

/// A record about to be inserted. The store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub source: String,
    pub headline: String,
    pub timestamp: String,
    pub category: Option<String>,
    pub bias: Option<String>,
}

/// Label used for NULL category/bias values in grouped counts.
pub const UNCLASSIFIED: &str = "Unclassified";
