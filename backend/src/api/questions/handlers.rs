//! Handler functions for the question endpoints.
//!
//! Malformed input is mapped to whichever error kind the endpoint reports, so
//! clients only ever see the uniform error body.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::Deserialize;

use crate::api::{AppState, Success};
use crate::errors::ApiError;
use crate::services::trivia::{
    CreateQuestionRequest, CreatedQuestion, DeletedQuestion, QuestionPage, SearchResults,
};

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    /// Requested page; anything missing or non-numeric means page 1.
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(1)
    }
}

fn page_of(query: Result<Query<PageQuery>, QueryRejection>) -> i64 {
    query.map(|Query(q)| q.page()).unwrap_or(1)
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}

/// `GET /questions?page=N`
pub async fn list_questions(
    State(service): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Success<QuestionPage>>, ApiError> {
    Ok(Success::json(service.list_questions(page_of(query)).await?))
}

/// `POST /questions`
pub async fn create_question(
    State(service): State<AppState>,
    payload: Result<Json<CreateQuestionRequest>, JsonRejection>,
) -> Result<Json<Success<CreatedQuestion>>, ApiError> {
    let Json(request) = payload.map_err(|err| {
        tracing::debug!(error = %err, "rejected question payload");
        ApiError::Unprocessable
    })?;
    Ok(Success::json(service.create_question(request).await?))
}

/// `DELETE /questions/:question_id`
pub async fn delete_question(
    State(service): State<AppState>,
    question_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Success<DeletedQuestion>>, ApiError> {
    let Path(question_id) = question_id.map_err(|_| ApiError::NotFound)?;
    Ok(Success::json(service.delete_question(question_id).await?))
}

/// `POST /search` (also accepted as `GET` with a JSON body)
pub async fn search_questions(
    State(service): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<Success<SearchResults>>, ApiError> {
    let request = payload.map(|Json(r)| r).unwrap_or_default();
    let results = service
        .search(request.search_term.as_deref(), page_of(query))
        .await?;
    Ok(Success::json(results))
}
