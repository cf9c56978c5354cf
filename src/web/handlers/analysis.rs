// GET /api/analysis/{id}: deep dive for one record.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::pipeline::compute_analysis;
use crate::web::{api_error, pipeline_error, AppState};

pub async fn get_analysis(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    // A non-numeric id can't name a record
    let Ok(id) = id.parse::<i64>() else {
        return api_error(StatusCode::NOT_FOUND, "not found");
    };

    match compute_analysis(state.store.as_ref(), id).await {
        Ok(analysis) => Json(analysis).into_response(),
        Err(e) => pipeline_error(e, "building analysis"),
    }
}
