//! `mailinglist-core`: mailing-list records and their validation rules.
//!
//! This crate contains **pure domain** types (no storage or HTTP concerns).

pub mod entry;
pub mod error;
pub mod query;

pub use entry::{EmailEntry, validate_email};
pub use error::{DomainError, DomainResult};
pub use query::{BATCH_FIELDS_REQUIRED, BatchQuery};
