// GET /api/threats: filtered, paginated threat list.
//
// limit/offset arrive as raw strings so a malformed value falls back to
// the default instead of rejecting the request.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use super::parse_or;
use crate::pipeline::{compute_threats, ThreatFilter, DEFAULT_LIMIT, DEFAULT_OFFSET};
use crate::web::{pipeline_error, AppState};

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ThreatsQuery {
    pub threat_type: Option<String>,
    pub location_scope: Option<String>,
    pub location_name: Option<String>,
    pub emergency: Option<String>,
    pub maturity: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

pub async fn list_threats(
    State(state): State<AppState>,
    Query(params): Query<ThreatsQuery>,
) -> Response {
    let limit = parse_or(params.limit.as_deref(), DEFAULT_LIMIT);
    let offset = parse_or(params.offset.as_deref(), DEFAULT_OFFSET);
    let filter = ThreatFilter {
        threat_type: params.threat_type,
        location_scope: params.location_scope,
        location_name: params.location_name,
        emergency: params.emergency,
        maturity: params.maturity,
    };

    match compute_threats(state.store.as_ref(), &filter, limit, offset).await {
        Ok(page) => Json(page).into_response(),
        Err(e) => pipeline_error(e, "listing threats"),
    }
}
