//! HTTP routes for questions.

use axum::{
    routing::{delete, get},
    Router,
};

use super::handlers::{create_question, delete_question, list_questions, search_questions};
use crate::api::AppState;

pub fn questions_router() -> Router<AppState> {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/:question_id", delete(delete_question))
        .route("/search", get(search_questions).post(search_questions))
}
