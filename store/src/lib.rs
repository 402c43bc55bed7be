//! Persistence layer for trivia questions and categories.
//!
//! This crate defines the `QuestionStore` trait, which outlines the operations the
//! backend needs from a relational store, and provides two concrete
//! implementations: a SQLite-backed store and an in-process store for tests and
//! throwaway runs.

pub mod errors;
pub mod memory;
pub mod models;
pub mod sqlite;

use async_trait::async_trait;

pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use models::{Category, NewQuestion, Question, DEFAULT_CATEGORIES};
pub use sqlite::SqliteStore;

/// Query, insert and delete over question and category records.
///
/// Each call is atomic on its own. Nothing here spans more than one row write.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// All categories, ordered by id.
    async fn categories(&self) -> StoreResult<Vec<Category>>;

    async fn category(&self, id: i64) -> StoreResult<Option<Category>>;

    /// All questions, ordered by ascending id.
    async fn questions(&self) -> StoreResult<Vec<Question>>;

    async fn question(&self, id: i64) -> StoreResult<Option<Question>>;

    async fn question_count(&self) -> StoreResult<usize>;

    /// Inserts a question and returns the id assigned to it.
    async fn insert_question(&self, question: NewQuestion) -> StoreResult<i64>;

    /// Removes a question. Fails with `StoreError::NotFound` if the id is unknown.
    async fn delete_question(&self, id: i64) -> StoreResult<()>;
}
