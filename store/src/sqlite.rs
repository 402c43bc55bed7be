//! SQLite implementation of `QuestionStore`.
//!
//! The connection is guarded by an async mutex, so each trait call runs its
//! statement with exclusive access. `AUTOINCREMENT` keeps ids from being reused
//! after a delete.

use std::path::Path;

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use tokio::sync::Mutex;

use crate::errors::{StoreError, StoreResult};
use crate::models::{Category, NewQuestion, Question};
use crate::QuestionStore;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS categories (
    id   INTEGER PRIMARY KEY,
    type TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS questions (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    question   TEXT NOT NULL,
    answer     TEXT NOT NULL,
    category   INTEGER NOT NULL REFERENCES categories(id),
    difficulty INTEGER NOT NULL
);
";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) a database file and makes sure both tables exist.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StoreError::Database(e.to_string()))?;
            }
        }
        let conn = Connection::open(path)?;
        log::debug!("opened sqlite store at {}", path.display());
        Self::init(conn)
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Inserts `categories` only if the category table is empty.
    ///
    /// Returns the number of rows written.
    pub async fn seed_categories(&self, categories: &[(i64, &str)]) -> StoreResult<usize> {
        let mut conn = self.conn.lock().await;
        let existing: i64 = conn.query_row("SELECT COUNT(*) FROM categories", [], |r| r.get(0))?;
        if existing > 0 {
            return Ok(0);
        }

        let tx = conn.transaction()?;
        for (id, kind) in categories {
            tx.execute(
                "INSERT INTO categories (id, type) VALUES (?1, ?2)",
                params![id, kind],
            )?;
        }
        tx.commit()?;
        log::debug!("seeded {} categories", categories.len());
        Ok(categories.len())
    }
}

fn row_to_question(row: &rusqlite::Row<'_>) -> rusqlite::Result<Question> {
    Ok(Question {
        id: row.get(0)?,
        question: row.get(1)?,
        answer: row.get(2)?,
        category: row.get(3)?,
        difficulty: row.get(4)?,
    })
}

#[async_trait]
impl QuestionStore for SqliteStore {
    async fn categories(&self) -> StoreResult<Vec<Category>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare("SELECT id, type FROM categories ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Category {
                id: row.get(0)?,
                kind: row.get(1)?,
            })
        })?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    async fn category(&self, id: i64) -> StoreResult<Option<Category>> {
        let conn = self.conn.lock().await;
        let category = conn
            .query_row(
                "SELECT id, type FROM categories WHERE id = ?1",
                [id],
                |row| {
                    Ok(Category {
                        id: row.get(0)?,
                        kind: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(category)
    }

    async fn questions(&self) -> StoreResult<Vec<Question>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT id, question, answer, category, difficulty FROM questions ORDER BY id",
        )?;
        let rows = stmt.query_map([], row_to_question)?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    async fn question(&self, id: i64) -> StoreResult<Option<Question>> {
        let conn = self.conn.lock().await;
        let question = conn
            .query_row(
                "SELECT id, question, answer, category, difficulty FROM questions WHERE id = ?1",
                [id],
                row_to_question,
            )
            .optional()?;
        Ok(question)
    }

    async fn question_count(&self) -> StoreResult<usize> {
        let conn = self.conn.lock().await;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM questions", [], |r| r.get(0))?;
        usize::try_from(count).map_err(|e| StoreError::Invalid(e.to_string()))
    }

    async fn insert_question(&self, question: NewQuestion) -> StoreResult<i64> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)",
            params![
                question.question,
                question.answer,
                question.category,
                question.difficulty
            ],
        )?;
        let id = conn.last_insert_rowid();
        log::debug!("inserted question {}", id);
        Ok(id)
    }

    async fn delete_question(&self, id: i64) -> StoreResult<()> {
        let conn = self.conn.lock().await;
        let removed = conn.execute("DELETE FROM questions WHERE id = ?1", [id])?;
        if removed == 0 {
            return Err(StoreError::NotFound(id));
        }
        log::debug!("deleted question {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_CATEGORIES;
    use tempfile::TempDir;

    fn new_question(text: &str, category: i64) -> NewQuestion {
        NewQuestion {
            question: text.to_string(),
            answer: "answer".to_string(),
            category,
            difficulty: 1,
        }
    }

    async fn seeded_store() -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        store.seed_categories(DEFAULT_CATEGORIES).await.unwrap();
        store
    }

    #[tokio::test]
    async fn seed_only_fills_empty_table() {
        let store = seeded_store().await;
        assert_eq!(store.seed_categories(DEFAULT_CATEGORIES).await.unwrap(), 0);

        let categories = store.categories().await.unwrap();
        assert_eq!(categories.len(), DEFAULT_CATEGORIES.len());
        assert_eq!(categories[1].kind, "Art");
    }

    #[tokio::test]
    async fn category_lookup_by_id() {
        let store = seeded_store().await;
        assert_eq!(store.category(3).await.unwrap().unwrap().kind, "Geography");
        assert!(store.category(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let store = seeded_store().await;
        let first = store.insert_question(new_question("first", 1)).await.unwrap();
        let second = store.insert_question(new_question("second", 2)).await.unwrap();
        assert!(second > first);

        let questions = store.questions().await.unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].id, first);
        assert_eq!(questions[1].category, 2);
        assert_eq!(store.question(second).await.unwrap().unwrap().question, "second");
        assert!(store.question(second + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn insert_rejects_unknown_category() {
        let store = seeded_store().await;
        let err = store.insert_question(new_question("orphan", 99)).await;
        assert!(matches!(err, Err(StoreError::Database(_))));
        assert_eq!(store.question_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let store = seeded_store().await;
        let first = store.insert_question(new_question("first", 1)).await.unwrap();
        store.delete_question(first).await.unwrap();
        let second = store.insert_question(new_question("second", 1)).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn delete_unknown_id_reports_not_found() {
        let store = seeded_store().await;
        store.insert_question(new_question("kept", 1)).await.unwrap();

        let err = store.delete_question(1234).await;
        assert!(matches!(err, Err(StoreError::NotFound(1234))));
        assert_eq!(store.question_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn file_store_persists_between_opens() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("trivia.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.seed_categories(DEFAULT_CATEGORIES).await.unwrap();
            store.insert_question(new_question("persisted", 4)).await.unwrap();
        }

        let reopened = SqliteStore::open(&path).unwrap();
        let questions = reopened.questions().await.unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "persisted");
    }
}
