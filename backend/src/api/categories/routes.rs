//! HTTP routes for categories.

use axum::{routing::get, Router};

use super::handlers::{category_questions, list_categories};
use crate::api::AppState;

pub fn categories_router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/:category_id/questions", get(category_questions))
}
