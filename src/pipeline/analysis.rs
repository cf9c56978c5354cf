// Single-record deep dive: threat type, regions touched, and the
// estimated human and political cost.

use serde::Serialize;
use tracing::debug;

use crate::db::models::RawRecord;
use crate::db::RecordStore;
use crate::error::PipelineError;
use crate::scoring::{detect_regions, estimate_impact, map_category, score_analysis_severity};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub id: i64,
    #[serde(rename = "type")]
    pub threat_type: String,
    pub citizens_affected: u64,
    /// Never empty; "Global" when nothing more specific matched.
    pub regions: Vec<String>,
    pub political_capital_lost_pct: f64,
}

pub fn build_analysis(record: &RawRecord) -> AnalysisResult {
    let category = record.category.as_deref();
    let severity = score_analysis_severity(&record.headline, category, record.bias.as_deref());
    let threat_type = map_category(category);
    let regions = detect_regions(&record.headline, &record.source);
    let impact = estimate_impact(&regions, severity, &threat_type);

    AnalysisResult {
        id: record.id,
        threat_type,
        citizens_affected: impact.citizens_affected,
        regions,
        political_capital_lost_pct: impact.political_loss_pct,
    }
}

/// Analysis for one stored record. A missing id is `PipelineError::NotFound`.
pub async fn compute_analysis(
    store: &dyn RecordStore,
    id: i64,
) -> Result<AnalysisResult, PipelineError> {
    let record = store
        .get_record(id)
        .await?
        .ok_or(PipelineError::NotFound { id })?;

    let analysis = build_analysis(&record);
    debug!(
        id,
        regions = ?analysis.regions,
        citizens_affected = analysis.citizens_affected,
        "Built analysis"
    );
    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(headline: &str, source: &str, category: Option<&str>, bias: Option<&str>) -> RawRecord {
        RawRecord {
            id: 3,
            headline: headline.to_string(),
            source: source.to_string(),
            timestamp: "2024-06-10 12:00:00".to_string(),
            category: category.map(str::to_string),
            bias: bias.map(str::to_string),
        }
    }

    #[test]
    fn washington_protest() {
        // "protest" → 60, regions → ["US"]
        let r = record("Protest in Washington turns tense", "https://example.com/a", None, None);
        let a = build_analysis(&r);
        assert_eq!(a.regions, vec!["US"]);
        assert_eq!(a.threat_type, "Unknown");
        assert_eq!(a.citizens_affected, 49_632_000);
        assert!((a.political_capital_lost_pct - 3.1).abs() < 1e-9);
    }

    #[test]
    fn conflict_bonus_applies_to_mapped_type() {
        let r = record("Troops massacre villagers", "https://example.com/a", Some("Conflict"), None);
        let a = build_analysis(&r);
        assert_eq!(a.threat_type, "Armed Conflict");
        // 0.1 + 4.0 + 1.0
        assert!((a.political_capital_lost_pct - 5.1).abs() < 1e-9);
    }

    #[test]
    fn falls_back_to_global() {
        let r = record("Quiet day", "https://example.org/x", None, None);
        let a = build_analysis(&r);
        assert_eq!(a.regions, vec!["Global"]);
        // 8e9 * 0.1%
        assert_eq!(a.citizens_affected, 8_000_000);
    }

    #[test]
    fn json_uses_type_key() {
        let r = record("Quiet day", "https://example.org/x", Some("Health"), None);
        let json = serde_json::to_value(build_analysis(&r)).unwrap();
        assert_eq!(json["type"], "Pandemic & Health");
        assert_eq!(json["id"], 3);
        assert!(json.get("threat_type").is_none());
    }

    #[test]
    fn bias_bonus_not_applied() {
        let with_bias = record("Quiet day", "https://example.org/x", None, Some("Potential Bias"));
        let a = build_analysis(&with_bias);
        assert_eq!(a.citizens_affected, 8_000_000);
    }
}
