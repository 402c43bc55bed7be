//! HTTP routes for quiz play.

use axum::{routing::post, Router};

use super::handlers::play_quiz;
use crate::api::AppState;

pub fn quizzes_router() -> Router<AppState> {
    Router::new().route("/quizzes", post(play_quiz))
}
