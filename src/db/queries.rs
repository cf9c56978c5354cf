// Database queries: every SQL statement the crate runs lives here.
//
// The rest of the app only sees `RawRecord` and plain Rust values.

use std::collections::BTreeMap;

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::models::{NewRecord, RawRecord, UNCLASSIFIED};

const RECORD_COLUMNS: &str = "id, headline, source, timestamp, category, bias";

/// Map a `news` row onto a RawRecord. NULL text columns become empty
/// strings; category and bias keep their NULL-ness.
fn record_from_row(row: &Row<'_>) -> rusqlite::Result<RawRecord> {
    Ok(RawRecord {
        id: row.get(0)?,
        headline: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        source: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        timestamp: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        category: row.get(4)?,
        bias: row.get(5)?,
    })
}

// --- Records ---

/// Insert a record unless one with the same source URL already exists.
/// Returns true when a row was written.
pub fn insert_if_absent(conn: &Connection, record: &NewRecord) -> Result<bool> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO news (headline, source, timestamp, category, bias)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            record.headline,
            record.source,
            record.timestamp,
            record.category,
            record.bias,
        ],
    )?;
    Ok(changed > 0)
}

/// All records, newest timestamp first. `date` (`YYYY-MM-DD`) restricts
/// the result to a single calendar day.
pub fn list_records(conn: &Connection, date: Option<&str>) -> Result<Vec<RawRecord>> {
    let sql = format!(
        "SELECT {RECORD_COLUMNS} FROM news
         WHERE (?1 IS NULL OR date(timestamp) = ?1)
         ORDER BY timestamp DESC, id DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![date], record_from_row)?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}

/// One page of raw records, newest first.
pub fn list_news(
    conn: &Connection,
    date: Option<&str>,
    limit: u32,
    offset: u32,
) -> Result<Vec<RawRecord>> {
    let sql = format!(
        "SELECT {RECORD_COLUMNS} FROM news
         WHERE (?1 IS NULL OR date(timestamp) = ?1)
         ORDER BY timestamp DESC, id DESC
         LIMIT ?2 OFFSET ?3"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![date, limit, offset], record_from_row)?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}

/// Look up a single record by id.
pub fn get_record(conn: &Connection, id: i64) -> Result<Option<RawRecord>> {
    let sql = format!("SELECT {RECORD_COLUMNS} FROM news WHERE id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let record = stmt.query_row(params![id], record_from_row).optional()?;
    Ok(record)
}

/// Overwrite category and bias for a record. Absent values are stored as
/// NULL. Returns false when no record has that id.
pub fn update_fields(
    conn: &Connection,
    id: i64,
    category: Option<&str>,
    bias: Option<&str>,
) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE news SET category = ?1, bias = ?2 WHERE id = ?3",
        params![category, bias, id],
    )?;
    Ok(changed > 0)
}

/// Distinct calendar days that have at least one record, newest first.
pub fn list_dates(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT date(timestamp) AS d FROM news
         WHERE date(timestamp) IS NOT NULL
         ORDER BY d DESC",
    )?;
    let rows = stmt.query_map([], |row| row.get(0))?;

    let mut dates = Vec::new();
    for row in rows {
        dates.push(row?);
    }
    Ok(dates)
}

pub fn record_count(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM news", [], |row| row.get(0))?;
    Ok(count)
}

// --- Grouped counts ---

/// Record counts per category, NULL reported as "Unclassified".
pub fn category_counts(conn: &Connection) -> Result<BTreeMap<String, i64>> {
    grouped_counts(conn, "category")
}

/// Record counts per bias tag, NULL reported as "Unclassified".
pub fn bias_counts(conn: &Connection) -> Result<BTreeMap<String, i64>> {
    grouped_counts(conn, "bias")
}

// `column` is always one of our own literals, never user input.
fn grouped_counts(conn: &Connection, column: &str) -> Result<BTreeMap<String, i64>> {
    let sql = format!("SELECT {column}, COUNT(*) FROM news GROUP BY {column}");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, Option<String>>(0)?, row.get::<_, i64>(1)?))
    })?;

    let mut counts = BTreeMap::new();
    for row in rows {
        let (key, count) = row?;
        let key = key.unwrap_or_else(|| UNCLASSIFIED.to_string());
        *counts.entry(key).or_insert(0) += count;
    }
    Ok(counts)
}

// --- Collector state ---

pub fn get_state(conn: &Connection, key: &str) -> Result<Option<String>> {
    let mut stmt = conn.prepare("SELECT value FROM collector_state WHERE key = ?1")?;
    let result = stmt.query_row(params![key], |row| row.get(0)).optional()?;
    Ok(result)
}

/// Set a collector state value (upsert).
pub fn set_state(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO collector_state (key, value, updated_at)
         VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
        params![key, value],
    )?;
    Ok(())
}
