// GET /api/stats and GET /api/insights: aggregate views.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::pipeline::{compute_insights, compute_stats};
use crate::web::{pipeline_error, AppState};

pub async fn get_stats(State(state): State<AppState>) -> Response {
    match compute_stats(state.store.as_ref()).await {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => pipeline_error(e, "computing stats"),
    }
}

pub async fn get_insights(State(state): State<AppState>) -> Response {
    match compute_insights(state.store.as_ref()).await {
        Ok(insights) => Json(insights).into_response(),
        Err(e) => pipeline_error(e, "computing insights"),
    }
}
