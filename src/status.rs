// System status display: database size, record count, newest date,
// last collection time.

use anyhow::Result;
use std::path::Path;

use crate::db::{self, RecordStore};
use crate::feeds::collector::LAST_COLLECT_KEY;

/// Display system status to the terminal.
pub async fn show(db_path: &str) -> Result<()> {
    if !Path::new(db_path).exists() {
        println!("Database: not initialized");
        println!("\nRun `threatlens init` to set up the database.");
        return Ok(());
    }

    let file_size = std::fs::metadata(db_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {} ({})", db_path, file_size);

    let store = db::open_store(db_path)?;
    print_store_summary(store.as_ref()).await
}

async fn print_store_summary(store: &dyn RecordStore) -> Result<()> {
    let total = store.record_count().await?;
    println!("Headlines: {}", total);

    match store.list_dates().await?.first() {
        Some(newest) => println!("Newest date: {}", newest),
        None => {
            println!("Newest date: none");
            println!("  Run `threatlens collect` to fetch headlines");
        }
    }

    match store.get_state(LAST_COLLECT_KEY).await? {
        Some(at) => println!("Last collection: {}", at),
        None => println!("Last collection: never"),
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
