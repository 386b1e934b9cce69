//! Infrastructure layer: storage backends and configuration.

pub mod config;
pub mod store;

pub use config::{AppConfig, ConfigError, StoreConfig};
pub use store::{EmailStore, SharedStore, StoreError};
