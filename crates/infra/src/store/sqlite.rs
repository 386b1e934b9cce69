//! SQLite-backed email store.
//!
//! Entries live in a single `emails` table keyed by a unique `email` column.
//! `confirmed_at` is stored as Unix seconds, so sub-second precision is dropped.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};

use mailinglist_core::{BatchQuery, EmailEntry, validate_email};

use super::r#trait::{EmailStore, StoreError};

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS emails (
        id           INTEGER PRIMARY KEY,
        email        TEXT UNIQUE NOT NULL,
        confirmed_at INTEGER NULL,
        opt_out      INTEGER NOT NULL DEFAULT 0
    )
"#;

/// Email store on top of a SQLx SQLite pool.
///
/// ## Thread Safety
///
/// The pool is cheap to clone and safe to share; every trait method checks a
/// connection out for the duration of one statement.
#[derive(Debug, Clone)]
pub struct SqliteEmailStore {
    pool: SqlitePool,
}

impl SqliteEmailStore {
    /// Open (or create) the database file at `path` and make sure the schema exists.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(backend)?;

        tracing::info!(path = %path.display(), "opened sqlite email store");
        Self::with_pool(pool).await
    }

    /// Private in-memory database; contents vanish with the store.
    ///
    /// Pinned to one connection that is never reaped; the database is dropped
    /// together with its last connection.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").map_err(backend)?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await
            .map_err(backend)?;

        Self::with_pool(pool).await
    }

    /// Wrap an existing pool, creating the `emails` table if needed.
    pub async fn with_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::query(SCHEMA).execute(&pool).await.map_err(backend)?;
        Ok(Self { pool })
    }
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

fn entry_from_row(row: &SqliteRow) -> Result<EmailEntry, sqlx::Error> {
    let confirmed_at: Option<i64> = row.try_get("confirmed_at")?;

    Ok(EmailEntry {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        confirmed_at: confirmed_at.and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0)),
        opt_out: row.try_get("opt_out")?,
    })
}

#[async_trait]
impl EmailStore for SqliteEmailStore {
    async fn create(&self, email: &str) -> Result<(), StoreError> {
        validate_email(email)?;

        let result = sqlx::query(
            r#"
            INSERT INTO emails (email, confirmed_at, opt_out)
            VALUES (?, NULL, 0)
            "#,
        )
        .bind(email)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StoreError::AlreadyExists(email.to_string()))
            }
            Err(e) => Err(backend(e)),
        }
    }

    async fn get(&self, email: &str) -> Result<Option<EmailEntry>, StoreError> {
        validate_email(email)?;

        let row = sqlx::query(
            r#"
            SELECT id, email, confirmed_at, opt_out
            FROM emails
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.as_ref().map(entry_from_row).transpose().map_err(backend)
    }

    async fn update(&self, entry: &EmailEntry) -> Result<(), StoreError> {
        validate_email(&entry.email)?;

        sqlx::query(
            r#"
            INSERT INTO emails (email, confirmed_at, opt_out)
            VALUES (?, ?, ?)
            ON CONFLICT (email)
            DO UPDATE SET
                confirmed_at = excluded.confirmed_at,
                opt_out = excluded.opt_out
            "#,
        )
        .bind(&entry.email)
        .bind(entry.confirmed_at.map(|t| t.timestamp()))
        .bind(entry.opt_out)
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        Ok(())
    }

    async fn delete(&self, email: &str) -> Result<(), StoreError> {
        validate_email(email)?;

        sqlx::query("DELETE FROM emails WHERE email = ?")
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(backend)?;

        Ok(())
    }

    async fn batch(&self, query: &BatchQuery) -> Result<Vec<EmailEntry>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, email, confirmed_at, opt_out
            FROM emails
            ORDER BY id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.iter()
            .map(entry_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(backend)
    }
}
