//! Handler functions for quiz play.
//!
//! The client holds the whole quiz session and resends it on every call, so the
//! server keeps nothing between requests.

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::api::{AppState, Success};
use crate::errors::ApiError;
use crate::services::trivia::{QuizQuestion, QuizRequest};

/// `POST /quizzes`
pub async fn play_quiz(
    State(service): State<AppState>,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> Result<Json<Success<QuizQuestion>>, ApiError> {
    let Json(request) = payload.map_err(|err| {
        tracing::debug!(error = %err, "rejected quiz payload");
        ApiError::Unprocessable
    })?;
    Ok(Success::json(service.next_quiz_question(request).await?))
}
