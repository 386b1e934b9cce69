use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use mailinglist_core::{BatchQuery, DomainError, EmailEntry};

/// Storage operation error.
///
/// The HTTP layer never inspects the variant; it only renders the `Display`
/// output into the error envelope.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The input failed a domain rule (e.g. blank email).
    #[error(transparent)]
    Invalid(#[from] DomainError),

    /// `create` was called for an email that is already stored.
    #[error("email already exists: {0}")]
    AlreadyExists(String),

    /// The backend itself failed (I/O, SQL, poisoned lock).
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Mailing-list record store.
///
/// ## Semantics shared by every backend
///
/// - Blank emails are rejected with [`StoreError::Invalid`].
/// - `create` inserts an unconfirmed, opted-in entry and fails on duplicates.
/// - `get` returns `Ok(None)` when nothing matches.
/// - `update` replaces `confirmed_at`/`opt_out` for the email, inserting the
///   entry when it does not exist yet; the id of an existing entry is kept.
/// - `delete` removes the entry; deleting an unknown email is not an error.
/// - `batch` returns entries ordered by id ascending, one page at a time.
#[async_trait]
pub trait EmailStore: Send + Sync {
    async fn create(&self, email: &str) -> Result<(), StoreError>;

    async fn get(&self, email: &str) -> Result<Option<EmailEntry>, StoreError>;

    async fn update(&self, entry: &EmailEntry) -> Result<(), StoreError>;

    async fn delete(&self, email: &str) -> Result<(), StoreError>;

    async fn batch(&self, query: &BatchQuery) -> Result<Vec<EmailEntry>, StoreError>;
}

/// Store handle shared across request handlers.
pub type SharedStore = Arc<dyn EmailStore>;

#[async_trait]
impl<S> EmailStore for Arc<S>
where
    S: EmailStore + ?Sized,
{
    async fn create(&self, email: &str) -> Result<(), StoreError> {
        (**self).create(email).await
    }

    async fn get(&self, email: &str) -> Result<Option<EmailEntry>, StoreError> {
        (**self).get(email).await
    }

    async fn update(&self, entry: &EmailEntry) -> Result<(), StoreError> {
        (**self).update(entry).await
    }

    async fn delete(&self, email: &str) -> Result<(), StoreError> {
        (**self).delete(email).await
    }

    async fn batch(&self, query: &BatchQuery) -> Result<Vec<EmailEntry>, StoreError> {
        (**self).batch(query).await
    }
}
