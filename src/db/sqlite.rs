// SqliteStore: rusqlite backend implementing the RecordStore trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is !Sync.
// Trait methods lock the mutex, do synchronous rusqlite work, and return.
// The lock is never held across .await points.

use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::{NewRecord, RawRecord};
use super::traits::RecordStore;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn insert_if_absent(&self, record: &NewRecord) -> Result<bool> {
        let conn = self.conn.lock().await;
        super::queries::insert_if_absent(&conn, record)
    }

    async fn list_records(&self, date: Option<&str>) -> Result<Vec<RawRecord>> {
        let conn = self.conn.lock().await;
        super::queries::list_records(&conn, date)
    }

    async fn list_news(
        &self,
        date: Option<&str>,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<RawRecord>> {
        let conn = self.conn.lock().await;
        super::queries::list_news(&conn, date, limit, offset)
    }

    async fn get_record(&self, id: i64) -> Result<Option<RawRecord>> {
        let conn = self.conn.lock().await;
        super::queries::get_record(&conn, id)
    }

    async fn update_fields(
        &self,
        id: i64,
        category: Option<&str>,
        bias: Option<&str>,
    ) -> Result<bool> {
        let conn = self.conn.lock().await;
        super::queries::update_fields(&conn, id, category, bias)
    }

    async fn list_dates(&self) -> Result<Vec<String>> {
        let conn = self.conn.lock().await;
        super::queries::list_dates(&conn)
    }

    async fn record_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::record_count(&conn)
    }

    async fn category_counts(&self) -> Result<BTreeMap<String, i64>> {
        let conn = self.conn.lock().await;
        super::queries::category_counts(&conn)
    }

    async fn bias_counts(&self) -> Result<BTreeMap<String, i64>> {
        let conn = self.conn.lock().await;
        super::queries::bias_counts(&conn)
    }

    async fn get_state(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().await;
        super::queries::get_state(&conn, key)
    }

    async fn set_state(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().await;
        super::queries::set_state(&conn, key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;

    fn test_store() -> SqliteStore {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        SqliteStore::new(conn)
    }

    fn new_record(source: &str, ts: &str) -> NewRecord {
        NewRecord {
            source: source.to_string(),
            headline: "Storm batters coast".to_string(),
            timestamp: ts.to_string(),
            category: Some("Environment".to_string()),
            bias: None,
        }
    }

    #[tokio::test]
    async fn test_trait_insert_and_get() {
        let store = test_store();
        assert!(store
            .insert_if_absent(&new_record("https://bbc.co.uk/1", "2024-05-01 08:00:00"))
            .await
            .unwrap());
        let all = store.list_records(None).await.unwrap();
        assert_eq!(all.len(), 1);

        let fetched = store.get_record(all[0].id).await.unwrap().unwrap();
        assert_eq!(fetched.headline, "Storm batters coast");
        assert_eq!(fetched.category.as_deref(), Some("Environment"));
        assert!(store.get_record(all[0].id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_trait_insert_is_idempotent_per_source() {
        let store = test_store();
        let r = new_record("https://bbc.co.uk/1", "2024-05-01 08:00:00");
        assert!(store.insert_if_absent(&r).await.unwrap());
        assert!(!store.insert_if_absent(&r).await.unwrap());
        assert_eq!(store.record_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_trait_update_fields() {
        let store = test_store();
        store
            .insert_if_absent(&new_record("https://bbc.co.uk/1", "2024-05-01 08:00:00"))
            .await
            .unwrap();
        let id = store.list_records(None).await.unwrap()[0].id;
        assert!(store
            .update_fields(id, Some("Climate"), Some("Potential Bias"))
            .await
            .unwrap());
        let bias = store.bias_counts().await.unwrap();
        assert_eq!(bias.get("Potential Bias"), Some(&1));
    }

    #[tokio::test]
    async fn test_trait_state_roundtrip() {
        let store = test_store();
        assert_eq!(store.get_state("last_collect_at").await.unwrap(), None);
        store.set_state("last_collect_at", "2024-05-01 08:00:00").await.unwrap();
        assert_eq!(
            store.get_state("last_collect_at").await.unwrap(),
            Some("2024-05-01 08:00:00".to_string())
        );
    }

    #[tokio::test]
    async fn test_trait_table_count() {
        let store = test_store();
        assert_eq!(store.table_count().await.unwrap(), 3);
    }
}
