//! In-process implementation of `QuestionStore`.
//!
//! Holds everything in a `BTreeMap` keyed by id, so iteration order matches the
//! id-ascending order the SQLite store returns.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::errors::{StoreError, StoreResult};
use crate::models::{Category, NewQuestion, Question};
use crate::QuestionStore;

#[derive(Default)]
struct Tables {
    categories: BTreeMap<i64, Category>,
    questions: BTreeMap<i64, Question>,
    next_id: i64,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-populated with `categories` and `questions`.
    ///
    /// New ids continue after the largest question id given.
    pub fn with_data(categories: Vec<Category>, questions: Vec<Question>) -> Self {
        let next_id = questions.iter().map(|q| q.id).max().unwrap_or(0) + 1;
        let tables = Tables {
            categories: categories.into_iter().map(|c| (c.id, c)).collect(),
            questions: questions.into_iter().map(|q| (q.id, q)).collect(),
            next_id,
        };
        Self {
            tables: Mutex::new(tables),
        }
    }

    /// Inserts `categories` only if none exist yet. Returns the number written.
    pub async fn seed_categories(&self, categories: &[(i64, &str)]) -> StoreResult<usize> {
        let mut tables = self.tables.lock().await;
        if !tables.categories.is_empty() {
            return Ok(0);
        }
        for (id, kind) in categories {
            tables.categories.insert(
                *id,
                Category {
                    id: *id,
                    kind: kind.to_string(),
                },
            );
        }
        Ok(categories.len())
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.tables.lock().await.categories.values().cloned().collect())
    }

    async fn category(&self, id: i64) -> StoreResult<Option<Category>> {
        Ok(self.tables.lock().await.categories.get(&id).cloned())
    }

    async fn questions(&self) -> StoreResult<Vec<Question>> {
        Ok(self.tables.lock().await.questions.values().cloned().collect())
    }

    async fn question(&self, id: i64) -> StoreResult<Option<Question>> {
        Ok(self.tables.lock().await.questions.get(&id).cloned())
    }

    async fn question_count(&self) -> StoreResult<usize> {
        Ok(self.tables.lock().await.questions.len())
    }

    async fn insert_question(&self, question: NewQuestion) -> StoreResult<i64> {
        let mut tables = self.tables.lock().await;
        if !tables.categories.contains_key(&question.category) {
            return Err(StoreError::Invalid(format!(
                "category {} does not exist",
                question.category
            )));
        }
        let id = tables.next_id.max(1);
        tables.next_id = id + 1;
        tables.questions.insert(id, question.into_question(id));
        log::debug!("inserted question {}", id);
        Ok(id)
    }

    async fn delete_question(&self, id: i64) -> StoreResult<()> {
        match self.tables.lock().await.questions.remove(&id) {
            Some(_) => {
                log::debug!("deleted question {}", id);
                Ok(())
            }
            None => Err(StoreError::NotFound(id)),
        }
    }
}
