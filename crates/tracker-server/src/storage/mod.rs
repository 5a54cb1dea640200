//! Storage layer
//!
//! SQLite (embedded) is the persistent store. A DashMap-backed store is
//! available for demos and tests.

pub mod db;
pub mod memory;

pub use db::Database;
pub use memory::MemoryStore;

use anyhow::Result;
use std::sync::Arc;
use tracker_core::ports::{ExerciseStore, UserStore};

/// Connection string that selects the in-memory store
pub const MEMORY_URL: &str = "memory";

/// The store opened at startup; closed on shutdown
#[derive(Clone)]
pub enum Backend {
    Sqlite(Arc<Database>),
    Memory(Arc<MemoryStore>),
}

impl Backend {
    pub async fn open(database_url: &str) -> Result<Self> {
        if database_url == MEMORY_URL {
            tracing::warn!("Using in-memory store, data will not survive a restart");
            return Ok(Backend::Memory(Arc::new(MemoryStore::new())));
        }

        let db = Database::connect(database_url).await?;
        Ok(Backend::Sqlite(Arc::new(db)))
    }

    pub fn users(&self) -> Arc<dyn UserStore> {
        match self {
            Backend::Sqlite(db) => db.clone(),
            Backend::Memory(store) => store.clone(),
        }
    }

    pub fn exercises(&self) -> Arc<dyn ExerciseStore> {
        match self {
            Backend::Sqlite(db) => db.clone(),
            Backend::Memory(store) => store.clone(),
        }
    }

    pub async fn close(&self) {
        match self {
            Backend::Sqlite(db) => db.close().await,
            Backend::Memory(_) => {}
        }
    }
}
