//! Module for database connection setup.
//!
//! Opens the store selected by `Settings::database_url` and seeds the default
//! categories when the store starts out empty.

use std::sync::Arc;

use trivia_store::{MemoryStore, QuestionStore, SqliteStore, StoreError, DEFAULT_CATEGORIES};

use crate::config::Settings;

pub async fn connect(settings: &Settings) -> Result<Arc<dyn QuestionStore>, StoreError> {
    if settings.uses_memory_store() {
        let store = MemoryStore::new();
        if settings.seed {
            store.seed_categories(DEFAULT_CATEGORIES).await?;
        }
        tracing::info!("using in-memory question store");
        return Ok(Arc::new(store));
    }

    let store = SqliteStore::open(&settings.database_url)?;
    if settings.seed {
        let seeded = store.seed_categories(DEFAULT_CATEGORIES).await?;
        if seeded > 0 {
            tracing::info!(seeded, "seeded default categories");
        }
    }
    tracing::info!(path = %settings.database_url, "opened sqlite question store");
    Ok(Arc::new(store))
}
