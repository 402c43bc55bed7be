//! Endpoint-level operations over the question store.
//!
//! `TriviaService` loads rows, hands them to the retrieval functions, and decides
//! which of the two error kinds a failure becomes. Handlers only translate between
//! HTTP and these calls.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use trivia_store::{NewQuestion, Question, QuestionStore, StoreError};

use super::random::RandomSource;
use super::retrieval::{self, QUESTIONS_PER_PAGE};
use crate::errors::ApiError;
use crate::utils;

/// Quiz category `type` the client sends for "all categories".
pub const ALL_CATEGORIES_TYPE: &str = "click";

#[derive(Debug, Default, Deserialize)]
pub struct CreateQuestionRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "utils::deserialize_opt_int")]
    pub category: Option<i64>,
    #[serde(default, deserialize_with = "utils::deserialize_opt_int")]
    pub difficulty: Option<i64>,
}

impl CreateQuestionRequest {
    fn validate(self) -> Result<NewQuestion, ApiError> {
        let text = |field: Option<String>| {
            field
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .ok_or(ApiError::Unprocessable)
        };
        Ok(NewQuestion {
            question: text(self.question)?,
            answer: text(self.answer)?,
            category: self.category.ok_or(ApiError::Unprocessable)?,
            difficulty: self.difficulty.ok_or(ApiError::Unprocessable)?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct QuizCategory {
    #[serde(default, deserialize_with = "utils::deserialize_opt_int")]
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl QuizCategory {
    /// The category to draw from, or `None` for every category. Any category
    /// other than the "all" sentinels must carry an id.
    pub fn filter(&self) -> Result<Option<i64>, ApiError> {
        if self.kind.as_deref() == Some(ALL_CATEGORIES_TYPE) {
            return Ok(None);
        }
        match self.id {
            Some(0) => Ok(None),
            Some(id) => Ok(Some(id)),
            None => Err(ApiError::Unprocessable),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct QuizRequest {
    pub quiz_category: Option<QuizCategory>,
    pub previous_questions: Option<Vec<i64>>,
}

#[derive(Debug, Serialize)]
pub struct CategoryList {
    pub categories: BTreeMap<i64, String>,
}

#[derive(Debug, Serialize)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: BTreeMap<i64, String>,
    pub current_category: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CreatedQuestion {
    pub created: i64,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

#[derive(Debug, Serialize)]
pub struct DeletedQuestion {
    pub deleted: i64,
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

#[derive(Debug, Serialize)]
pub struct CategoryQuestions {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: i64,
}

#[derive(Debug, Serialize)]
pub struct QuizQuestion {
    pub question: Option<Question>,
}

pub struct TriviaService {
    store: Arc<dyn QuestionStore>,
    rng: Mutex<Box<dyn RandomSource + Send>>,
}

/// Read failures surface as NotFound.
fn read_failed(err: StoreError) -> ApiError {
    tracing::warn!(error = %err, "store read failed");
    ApiError::NotFound
}

/// Write and quiz failures surface as Unprocessable.
fn write_failed(err: StoreError) -> ApiError {
    tracing::warn!(error = %err, "store write failed");
    ApiError::Unprocessable
}

impl TriviaService {
    pub fn new(store: Arc<dyn QuestionStore>, rng: Box<dyn RandomSource + Send>) -> Self {
        Self {
            store,
            rng: Mutex::new(rng),
        }
    }

    pub async fn categories(&self) -> Result<CategoryList, ApiError> {
        let categories = self.store.categories().await.map_err(read_failed)?;
        Ok(CategoryList {
            categories: retrieval::category_map(&categories),
        })
    }

    /// One page of all questions. An empty page is NotFound.
    pub async fn list_questions(&self, page: i64) -> Result<QuestionPage, ApiError> {
        let all = self.store.questions().await.map_err(read_failed)?;
        let questions = retrieval::paginate(&all, page, QUESTIONS_PER_PAGE);
        if questions.is_empty() {
            tracing::debug!(page, total = all.len(), "requested page is empty");
            return Err(ApiError::NotFound);
        }
        let categories = self.store.categories().await.map_err(read_failed)?;

        Ok(QuestionPage {
            questions,
            total_questions: all.len(),
            categories: retrieval::category_map(&categories),
            current_category: None,
        })
    }

    pub async fn create_question(
        &self,
        request: CreateQuestionRequest,
    ) -> Result<CreatedQuestion, ApiError> {
        let question = request.validate()?;
        if self
            .store
            .category(question.category)
            .await
            .map_err(write_failed)?
            .is_none()
        {
            tracing::debug!(category = question.category, "create rejected: unknown category");
            return Err(ApiError::Unprocessable);
        }

        let created = self
            .store
            .insert_question(question)
            .await
            .map_err(write_failed)?;
        let all = self.store.questions().await.map_err(write_failed)?;
        let total_questions = self.store.question_count().await.map_err(write_failed)?;
        tracing::info!(question_id = created, "question created");

        Ok(CreatedQuestion {
            created,
            questions: retrieval::paginate(&all, 1, QUESTIONS_PER_PAGE),
            total_questions,
        })
    }

    /// Deletes a question. An unknown id is Unprocessable and nothing is touched.
    pub async fn delete_question(&self, id: i64) -> Result<DeletedQuestion, ApiError> {
        if self
            .store
            .question(id)
            .await
            .map_err(write_failed)?
            .is_none()
        {
            tracing::debug!(question_id = id, "delete rejected: no such question");
            return Err(ApiError::Unprocessable);
        }
        self.store.delete_question(id).await.map_err(write_failed)?;
        tracing::info!(question_id = id, "question deleted");
        Ok(DeletedQuestion { deleted: id })
    }

    /// Case-insensitive substring search. A missing or blank term is NotFound,
    /// as is an empty page of matches.
    pub async fn search(&self, term: Option<&str>, page: i64) -> Result<SearchResults, ApiError> {
        let term = term
            .filter(|t| !t.trim().is_empty())
            .ok_or(ApiError::NotFound)?;

        let all = self.store.questions().await.map_err(read_failed)?;
        let matches = retrieval::search(&all, term);
        let questions = retrieval::paginate(&matches, page, QUESTIONS_PER_PAGE);
        if questions.is_empty() {
            return Err(ApiError::NotFound);
        }

        Ok(SearchResults {
            questions,
            total_questions: matches.len(),
        })
    }

    /// All questions in a category. An unknown category is NotFound; a known
    /// category with no questions is an empty success.
    pub async fn questions_in_category(
        &self,
        category_id: i64,
    ) -> Result<CategoryQuestions, ApiError> {
        self.store
            .category(category_id)
            .await
            .map_err(read_failed)?
            .ok_or(ApiError::NotFound)?;

        let all = self.store.questions().await.map_err(read_failed)?;
        let questions = retrieval::by_category(&all, category_id);

        Ok(CategoryQuestions {
            total_questions: questions.len(),
            questions,
            current_category: category_id,
        })
    }

    /// Draws an unseen question. An exhausted pool is a success with no question.
    pub async fn next_quiz_question(&self, request: QuizRequest) -> Result<QuizQuestion, ApiError> {
        let filter = request
            .quiz_category
            .ok_or(ApiError::Unprocessable)?
            .filter()?;
        let previous: HashSet<i64> = request
            .previous_questions
            .ok_or(ApiError::Unprocessable)?
            .into_iter()
            .collect();

        let all = self.store.questions().await.map_err(write_failed)?;
        let question = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            retrieval::next_question(&all, filter, &previous, rng.as_mut())
        };

        if question.is_none() {
            tracing::debug!(seen = previous.len(), "quiz pool exhausted");
        }
        Ok(QuizQuestion { question })
    }
}
