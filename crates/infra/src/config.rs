//! Process configuration, read from the environment.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `MAILINGLIST_BIND_JSON` | `127.0.0.1:8080` | JSON API listen address (`:8080` binds all interfaces) |
//! | `MAILINGLIST_STORE` | `sqlite` | `sqlite` or `memory` |
//! | `MAILINGLIST_DB` | `list.db` | SQLite database path |

use std::path::PathBuf;

use thiserror::Error;

pub const BIND_VAR: &str = "MAILINGLIST_BIND_JSON";
pub const STORE_VAR: &str = "MAILINGLIST_STORE";
pub const DB_VAR: &str = "MAILINGLIST_DB";

const DEFAULT_BIND: &str = "127.0.0.1:8080";
const DEFAULT_DB: &str = "list.db";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be `sqlite` or `memory`, got `{value}`")]
    UnknownStore { var: &'static str, value: String },

    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}

/// Which storage backend to run against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Sqlite { path: PathBuf },
    InMemory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Address handed to the TCP listener.
    pub json_bind: String,
    pub store: StoreConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let json_bind = match lookup(BIND_VAR) {
            Some(raw) => normalize_bind(&raw)?,
            None => DEFAULT_BIND.to_string(),
        };

        let store = match lookup(STORE_VAR).as_deref().map(str::trim) {
            None | Some("sqlite") => {
                let path = lookup(DB_VAR).unwrap_or_else(|| DEFAULT_DB.to_string());
                if path.trim().is_empty() {
                    return Err(ConfigError::Empty { var: DB_VAR });
                }
                StoreConfig::Sqlite { path: path.into() }
            }
            Some("memory") => StoreConfig::InMemory,
            Some(other) => {
                return Err(ConfigError::UnknownStore {
                    var: STORE_VAR,
                    value: other.to_string(),
                });
            }
        };

        Ok(Self { json_bind, store })
    }
}

/// Accept the host-less `:port` shorthand in addition to `host:port`.
fn normalize_bind(raw: &str) -> Result<String, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ConfigError::Empty { var: BIND_VAR });
    }
    if raw.starts_with(':') {
        return Ok(format!("0.0.0.0{raw}"));
    }
    Ok(raw.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.json_bind, "127.0.0.1:8080");
        assert_eq!(
            cfg.store,
            StoreConfig::Sqlite {
                path: PathBuf::from("list.db")
            }
        );
    }

    #[test]
    fn port_only_bind_listens_on_all_interfaces() {
        let cfg = config(&[(BIND_VAR, ":9090")]).unwrap();
        assert_eq!(cfg.json_bind, "0.0.0.0:9090");
    }

    #[test]
    fn memory_store_ignores_db_path() {
        let cfg = config(&[(STORE_VAR, "memory"), (DB_VAR, "")]).unwrap();
        assert_eq!(cfg.store, StoreConfig::InMemory);
    }

    #[test]
    fn custom_db_path() {
        let cfg = config(&[(DB_VAR, "/tmp/emails.db")]).unwrap();
        assert_eq!(
            cfg.store,
            StoreConfig::Sqlite {
                path: PathBuf::from("/tmp/emails.db")
            }
        );
    }

    #[test]
    fn unknown_store_is_rejected() {
        let err = config(&[(STORE_VAR, "redis")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownStore {
                var: STORE_VAR,
                value: "redis".into()
            }
        );
    }

    #[test]
    fn empty_values_are_rejected() {
        assert_eq!(
            config(&[(BIND_VAR, " ")]).unwrap_err(),
            ConfigError::Empty { var: BIND_VAR }
        );
        assert_eq!(
            config(&[(DB_VAR, "")]).unwrap_err(),
            ConfigError::Empty { var: DB_VAR }
        );
    }
}
