use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::feeds::{default_feeds, load_feeds, FeedSource};

const DEFAULT_DB_PATH: &str = "./threatlens.db";
const DEFAULT_FETCH_INTERVAL_MINS: u64 = 10;
const DEFAULT_ENTRIES_PER_FEED: usize = 10;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    /// Minutes between collection cycles in `collect --watch` and `serve --collect`.
    pub fetch_interval_mins: u64,
    /// Items taken from the top of each feed per cycle.
    pub entries_per_feed: usize,
    /// JSON feed list replacing the built-in table.
    pub feeds_file: Option<PathBuf>,
    /// Built frontend served for non-API paths.
    #[cfg(feature = "web")]
    pub static_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.to_string(),
            fetch_interval_mins: DEFAULT_FETCH_INTERVAL_MINS,
            entries_per_feed: DEFAULT_ENTRIES_PER_FEED,
            feeds_file: None,
            #[cfg(feature = "web")]
            static_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default. A numeric variable that is set but doesn't
    /// parse is an error rather than a silent fallback.
    pub fn load() -> Result<Self> {
        Ok(Self {
            db_path: env::var("THREATLENS_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string()),
            fetch_interval_mins: parse_var(
                "THREATLENS_FETCH_INTERVAL_MINS",
                DEFAULT_FETCH_INTERVAL_MINS,
            )?,
            entries_per_feed: parse_var("THREATLENS_ENTRIES_PER_FEED", DEFAULT_ENTRIES_PER_FEED)?,
            feeds_file: non_empty_var("THREATLENS_FEEDS_FILE").map(PathBuf::from),
            #[cfg(feature = "web")]
            static_dir: non_empty_var("THREATLENS_STATIC_DIR").map(PathBuf::from),
        })
    }

    pub fn fetch_interval(&self) -> Duration {
        // A zero interval would spin; one minute is the floor
        Duration::from_secs(self.fetch_interval_mins.max(1) * 60)
    }

    /// The feed table: the configured file when set, otherwise the built-in list.
    pub fn feeds(&self) -> Result<Vec<FeedSource>> {
        match &self.feeds_file {
            Some(path) => load_feeds(path),
            None => Ok(default_feeds()),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match non_empty_var(name) {
        Some(raw) => parse_value(name, &raw),
        None => Ok(default),
    }
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("{name} must be a non-negative integer, got {raw:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_value_accepts_padded_numbers() {
        let v: u64 = parse_value("X", " 15 ").unwrap();
        assert_eq!(v, 15);
    }

    #[test]
    fn parse_value_error_names_the_variable() {
        let err = parse_value::<u64>("THREATLENS_FETCH_INTERVAL_MINS", "ten").unwrap_err();
        assert!(err.to_string().contains("THREATLENS_FETCH_INTERVAL_MINS"));
    }

    #[test]
    fn zero_interval_is_floored_to_one_minute() {
        let config = Config {
            fetch_interval_mins: 0,
            ..Config::default()
        };
        assert_eq!(config.fetch_interval(), Duration::from_secs(60));
    }

    #[test]
    fn default_config_uses_builtin_feeds() {
        let feeds = Config::default().feeds().unwrap();
        assert_eq!(feeds.len(), default_feeds().len());
    }
}
