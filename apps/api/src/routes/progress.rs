use axum::{extract::rejection::JsonRejection, Json};
use serde_json::{json, Value};
use tracing::debug;

use crate::errors::AppError;

/// POST /api/v1/progress
/// Acknowledges a progress snapshot. Nothing is stored.
pub async fn handle_save_progress(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(progress) = payload?;
    debug!(
        fields = progress.as_object().map_or(0, |o| o.len()),
        "progress acknowledged"
    );
    Ok(Json(json!({
        "success": true,
        "message": "Progress saved!"
    })))
}
