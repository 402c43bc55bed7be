//! Central module for organizing the application's API endpoints.
//!
//! Each domain (categories, questions, quizzes) owns its handlers and a router
//! fragment. `build_router` stitches them together around one shared
//! `TriviaService` and applies the cross-cutting layers.

pub mod categories;
pub mod questions;
pub mod quizzes;

use std::sync::Arc;

use axum::{Json, Router};
use serde::Serialize;

use crate::errors;
use crate::middleware;
use crate::services::trivia::TriviaService;

pub type AppState = Arc<TriviaService>;

/// Success envelope: the payload's fields plus `"success": true`.
#[derive(Debug, Serialize)]
pub struct Success<T> {
    success: bool,
    #[serde(flatten)]
    body: T,
}

impl<T: Serialize> Success<T> {
    pub fn json(body: T) -> Json<Self> {
        Json(Self {
            success: true,
            body,
        })
    }
}

pub fn build_router(service: AppState) -> Router {
    Router::new()
        .merge(categories::routes::categories_router())
        .merge(questions::routes::questions_router())
        .merge(quizzes::routes::quizzes_router())
        .fallback(errors::not_found)
        .layer(middleware::cors())
        .layer(middleware::trace())
        .with_state(service)
}
