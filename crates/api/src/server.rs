//! Listener bootstrap.

use anyhow::Context;
use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;

use mailinglist_infra::{AppConfig, store};

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Open the configured store and serve the JSON API on `config.json_bind`.
pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let store = store::connect(&config.store)
        .await
        .context("failed to open email store")?;

    let app = crate::build_app(store);
    serve(app, &config.json_bind).await?;
    Ok(())
}

/// Bind `addr` and serve `app` until the listener fails.
pub async fn serve(app: Router, addr: &str) -> Result<(), ServeError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind {
            addr: addr.to_string(),
            source,
        })?;

    serve_on(listener, app).await
}

/// Serve `app` on an already bound listener.
pub async fn serve_on(listener: TcpListener, app: Router) -> Result<(), ServeError> {
    if let Ok(local) = listener.local_addr() {
        tracing::info!(addr = %local, "JSON API listening");
    }
    axum::serve(listener, app).await?;
    Ok(())
}
