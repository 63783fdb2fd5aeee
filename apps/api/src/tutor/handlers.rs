//! Axum route handler for the tutor chat.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;
use crate::tutor::Difficulty;

#[derive(Debug, Deserialize)]
pub struct TutorChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub difficulty: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TutorChatResponse {
    pub reply: String,
}

/// POST /api/v1/tutor/chat
pub async fn handle_tutor_chat(
    State(state): State<AppState>,
    payload: Result<Json<TutorChatRequest>, JsonRejection>,
) -> Result<Json<TutorChatResponse>, AppError> {
    let Json(request) = payload?;
    let difficulty = request
        .difficulty
        .as_deref()
        .map(Difficulty::from_label)
        .unwrap_or_default();

    let reply = state
        .retry
        .run("Tutor chat", || state.tutor.ask(&request.message, difficulty))
        .await?;
    Ok(Json(TutorChatResponse { reply }))
}
