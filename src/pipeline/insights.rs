// Aggregate counts and the one-line situation summary built from them.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::db::RecordStore;
use crate::error::PipelineError;

/// More than this many records in a category raises an alert line.
const CATEGORY_ALERT_THRESHOLD: i64 = 5;

const STABLE_MESSAGE: &str = "Situation stable. No critical alerts today.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub categories: BTreeMap<String, i64>,
    /// Counts per bias tag, reported under the dashboard's "severity" key.
    pub severity: BTreeMap<String, i64>,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    pub insights: String,
}

pub async fn compute_stats(store: &dyn RecordStore) -> Result<Stats, PipelineError> {
    Ok(Stats {
        categories: store.category_counts().await?,
        severity: store.bias_counts().await?,
        total: store.record_count().await?,
    })
}

/// Summary lines from the category and bias counts, joined by spaces.
pub fn summarize(categories: &BTreeMap<String, i64>, bias: &BTreeMap<String, i64>) -> String {
    let count = |map: &BTreeMap<String, i64>, key: &str| map.get(key).copied().unwrap_or(0);

    let mut lines = Vec::new();
    if count(categories, "Conflict") > CATEGORY_ALERT_THRESHOLD {
        lines.push("Rising number of conflict-related news.");
    }
    if count(categories, "Economy") > CATEGORY_ALERT_THRESHOLD {
        lines.push("Economic risks are increasing.");
    }
    if count(bias, "Potential Bias") > 0 {
        lines.push("Some articles flagged as biased.");
    }
    if lines.is_empty() {
        lines.push(STABLE_MESSAGE);
    }
    lines.join(" ")
}

pub async fn compute_insights(store: &dyn RecordStore) -> Result<Insights, PipelineError> {
    let categories = store.category_counts().await?;
    let bias = store.bias_counts().await?;
    Ok(Insights {
        insights: summarize(&categories, &bias),
    })
}
