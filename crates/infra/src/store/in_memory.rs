use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::SubsecRound;

use mailinglist_core::{BatchQuery, EmailEntry, validate_email};

use super::r#trait::{EmailStore, StoreError};

#[derive(Debug, Default)]
struct Entries {
    next_id: i64,
    by_email: HashMap<String, EmailEntry>,
}

impl Entries {
    fn assign_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory email store.
///
/// Intended for tests/dev. Ids are assigned from a monotonically increasing counter.
#[derive(Debug, Default)]
pub struct InMemoryEmailStore {
    entries: RwLock<Entries>,
}

impl InMemoryEmailStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> Result<usize, StoreError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.by_email.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

fn poisoned() -> StoreError {
    StoreError::Backend("lock poisoned".to_string())
}

#[async_trait]
impl EmailStore for InMemoryEmailStore {
    async fn create(&self, email: &str) -> Result<(), StoreError> {
        validate_email(email)?;

        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        if entries.by_email.contains_key(email) {
            return Err(StoreError::AlreadyExists(email.to_string()));
        }

        let id = entries.assign_id();
        entries.by_email.insert(
            email.to_string(),
            EmailEntry {
                id,
                ..EmailEntry::new(email)
            },
        );
        Ok(())
    }

    async fn get(&self, email: &str) -> Result<Option<EmailEntry>, StoreError> {
        validate_email(email)?;

        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.by_email.get(email).cloned())
    }

    async fn update(&self, entry: &EmailEntry) -> Result<(), StoreError> {
        validate_email(&entry.email)?;

        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        let existing = entries.by_email.get(&entry.email).map(|e| e.id);
        let id = match existing {
            Some(id) => id,
            None => entries.assign_id(),
        };

        entries.by_email.insert(
            entry.email.clone(),
            EmailEntry {
                id,
                email: entry.email.clone(),
                // Whole seconds, as the SQLite backend stores them.
                confirmed_at: entry.confirmed_at.map(|at| at.trunc_subsecs(0)),
                opt_out: entry.opt_out,
            },
        );
        Ok(())
    }

    async fn delete(&self, email: &str) -> Result<(), StoreError> {
        validate_email(email)?;

        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.by_email.remove(email);
        Ok(())
    }

    async fn batch(&self, query: &BatchQuery) -> Result<Vec<EmailEntry>, StoreError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;

        let mut all: Vec<EmailEntry> = entries.by_email.values().cloned().collect();
        all.sort_by_key(|e| e.id);

        let skip = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(query.limit()).unwrap_or(usize::MAX);
        Ok(all.into_iter().skip(skip).take(take).collect())
    }
}
