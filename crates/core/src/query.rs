//! Paged batch query over mailing-list entries.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Message returned when a batch query lacks usable paging fields.
pub const BATCH_FIELDS_REQUIRED: &str = "Page and Count fields are required";

/// One page of entries, ordered by id.
///
/// Pages are 1-based. Both fields default to `0`, which fails [`BatchQuery::validate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchQuery {
    #[serde(rename = "Page", alias = "page")]
    pub page: i64,

    #[serde(rename = "Count", alias = "count")]
    pub count: i64,
}

impl BatchQuery {
    pub fn new(page: i64, count: i64) -> Self {
        Self { page, count }
    }

    /// Both `page` and `count` must be strictly positive.
    pub fn validate(&self) -> DomainResult<()> {
        if self.count <= 0 || self.page <= 0 {
            return Err(DomainError::validation(BATCH_FIELDS_REQUIRED));
        }
        Ok(())
    }

    /// Number of entries to skip before this page starts.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).max(0).saturating_mul(self.count.max(0))
    }

    /// Maximum number of entries on this page.
    pub fn limit(&self) -> i64 {
        self.count.max(0)
    }
}
