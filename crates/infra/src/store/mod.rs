//! Mailing-list record storage.
//!
//! `EmailStore` is the only contract the HTTP layer depends on. Two backends
//! implement it: an in-memory map for tests/dev and SQLite for persistence.

pub mod in_memory;
pub mod sqlite;
pub mod r#trait;

use std::sync::Arc;

pub use in_memory::InMemoryEmailStore;
pub use sqlite::SqliteEmailStore;
pub use r#trait::{EmailStore, SharedStore, StoreError};

use crate::config::StoreConfig;

/// Build the backend selected by configuration.
pub async fn connect(config: &StoreConfig) -> Result<SharedStore, StoreError> {
    match config {
        StoreConfig::InMemory => {
            tracing::warn!("using in-memory email store; entries are lost on restart");
            Ok(Arc::new(InMemoryEmailStore::new()))
        }
        StoreConfig::Sqlite { path } => Ok(Arc::new(SqliteEmailStore::connect(path).await?)),
    }
}
