// Raw record handlers.
//
// GET  /api/news?date&limit&offset  paged raw headlines (defaults 10/0)
// GET  /api/dates                   distinct days, newest first
// POST /api/classify/{id}           overwrite category and bias; no body clears both

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use super::{non_empty, parse_or};
use crate::pipeline::classify_record;
use crate::web::{api_error, pipeline_error, AppState};

const DEFAULT_NEWS_LIMIT: u32 = 10;

#[derive(Deserialize, Default)]
pub struct NewsQuery {
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct ClassifyBody {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub bias: Option<String>,
}

pub async fn list_news(State(state): State<AppState>, Query(params): Query<NewsQuery>) -> Response {
    let limit = parse_or(params.limit.as_deref(), DEFAULT_NEWS_LIMIT);
    let offset = parse_or(params.offset.as_deref(), 0u32);
    let date = non_empty(params.date);

    match state.store.list_news(date.as_deref(), limit, offset).await {
        Ok(records) => Json(records).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "DB error listing news");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}

pub async fn list_dates(State(state): State<AppState>) -> Response {
    match state.store.list_dates().await {
        Ok(dates) => Json(dates).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "DB error listing dates");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}

impl ClassifyBody {
    /// An empty or whitespace-only body is the same as `{}`.
    fn parse(raw: &[u8]) -> serde_json::Result<Self> {
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(raw)
    }
}

pub async fn classify(
    State(state): State<AppState>,
    Path(id): Path<String>,
    raw: Bytes,
) -> Response {
    let Ok(id) = id.parse::<i64>() else {
        return api_error(StatusCode::NOT_FOUND, "not found");
    };
    let body = match ClassifyBody::parse(&raw) {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!(error = %e, "Rejecting classify body");
            return api_error(StatusCode::BAD_REQUEST, "invalid body");
        }
    };

    match classify_record(
        state.store.as_ref(),
        id,
        body.category.as_deref(),
        body.bias.as_deref(),
    )
    .await
    {
        Ok(()) => Json(serde_json::json!({ "ok": true })).into_response(),
        Err(e) => pipeline_error(e, "classifying record"),
    }
}
