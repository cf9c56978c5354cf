// Threat list view: one derived ThreatItem per stored record, filtered
// and paginated.
//
// Items are recomputed on every request so keyword and threshold changes
// take effect without any cache invalidation.

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::debug;

use crate::db::models::RawRecord;
use crate::db::RecordStore;
use crate::error::PipelineError;
use crate::scoring::{
    derive_emergency, derive_maturity_at, infer_location, map_category, now_local,
    score_severity, Emergency, LocationScope, Maturity,
};

pub const DEFAULT_LIMIT: usize = 50;
pub const DEFAULT_OFFSET: usize = 0;

/// Derived summary of one record for list views.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatItem {
    pub id: i64,
    pub title: String,
    pub threat_type: String,
    pub location_scope: LocationScope,
    pub location_name: String,
    pub emergency: Emergency,
    pub maturity: Maturity,
    pub severity: u8,
    /// Always exactly the record's own source URL.
    pub sources: Vec<String>,
    pub time: String,
    /// Coarse sparkline: severity-5, severity, severity+3, clamped to 0-100.
    pub trend: [u8; 3],
}

/// Exact-match predicates over ThreatItem fields. A missing or empty
/// value places no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThreatFilter {
    pub threat_type: Option<String>,
    pub location_scope: Option<String>,
    pub location_name: Option<String>,
    pub emergency: Option<String>,
    pub maturity: Option<String>,
}

impl ThreatFilter {
    pub fn matches(&self, item: &ThreatItem) -> bool {
        fn passes(wanted: &Option<String>, actual: &str) -> bool {
            match wanted.as_deref() {
                None | Some("") => true,
                Some(w) => w == actual,
            }
        }

        passes(&self.threat_type, &item.threat_type)
            && passes(&self.location_scope, item.location_scope.as_str())
            && passes(&self.location_name, &item.location_name)
            && passes(&self.emergency, item.emergency.as_str())
            && passes(&self.maturity, item.maturity.as_str())
    }
}

/// A filtered page. `total` counts every match before pagination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreatPage {
    pub total: usize,
    pub items: Vec<ThreatItem>,
}

fn trend_for(severity: u8) -> [u8; 3] {
    [
        severity.saturating_sub(5),
        severity,
        severity.saturating_add(3).min(100),
    ]
}

/// Derive the ThreatItem for one record, ageing it against `now`.
pub fn build_threat_item(record: &RawRecord, now: NaiveDateTime) -> ThreatItem {
    let category = record.category.as_deref();
    let bias = record.bias.as_deref();

    let severity = score_severity(&record.headline, category, bias);
    let (location_scope, location_name) = infer_location(&record.headline, &record.source);

    ThreatItem {
        id: record.id,
        title: record.headline.clone(),
        threat_type: map_category(category),
        location_scope,
        location_name,
        emergency: derive_emergency(severity),
        maturity: derive_maturity_at(severity, &record.timestamp, now),
        severity,
        sources: vec![record.source.clone()],
        time: record.timestamp.clone(),
        trend: trend_for(severity),
    }
}

/// Derive, filter and paginate. Input order (newest first) is preserved.
pub fn derive_threats(
    records: &[RawRecord],
    filter: &ThreatFilter,
    limit: usize,
    offset: usize,
    now: NaiveDateTime,
) -> ThreatPage {
    let matching: Vec<ThreatItem> = records
        .iter()
        .map(|record| build_threat_item(record, now))
        .filter(|item| filter.matches(item))
        .collect();

    let total = matching.len();
    let items = matching.into_iter().skip(offset).take(limit).collect();

    ThreatPage { total, items }
}

/// Threat list over the whole store, aged against the local clock.
pub async fn compute_threats(
    store: &dyn RecordStore,
    filter: &ThreatFilter,
    limit: usize,
    offset: usize,
) -> Result<ThreatPage, PipelineError> {
    let records = store.list_records(None).await?;
    let page = derive_threats(&records, filter, limit, offset, now_local());

    debug!(
        records = records.len(),
        total = page.total,
        returned = page.items.len(),
        "Derived threat page"
    );
    Ok(page)
}
