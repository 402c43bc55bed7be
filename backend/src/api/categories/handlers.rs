//! Handler functions for the category endpoints.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};

use crate::api::{AppState, Success};
use crate::errors::ApiError;
use crate::services::trivia::{CategoryList, CategoryQuestions};

/// `GET /categories`
pub async fn list_categories(
    State(service): State<AppState>,
) -> Result<Json<Success<CategoryList>>, ApiError> {
    Ok(Success::json(service.categories().await?))
}

/// `GET /categories/:category_id/questions`
pub async fn category_questions(
    State(service): State<AppState>,
    category_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Success<CategoryQuestions>>, ApiError> {
    let Path(category_id) = category_id.map_err(|_| ApiError::NotFound)?;
    Ok(Success::json(service.questions_in_category(category_id).await?))
}
