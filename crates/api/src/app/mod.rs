//! HTTP API application wiring (Axum router + store wiring).
//!
//! - `envelope.rs`: uniform success/error JSON responses
//! - `decode.rs`: lenient request body decoding
//! - `routes/`: the route table and the email handlers

use axum::{Extension, Router};

use mailinglist_infra::SharedStore;

pub mod decode;
pub mod envelope;
pub mod routes;

/// Build the full HTTP router around `store` (public entrypoint used by `main.rs`).
///
/// Nothing is bound here; the router can be driven in-process or handed to
/// [`crate::server::serve`].
pub fn build_app(store: SharedStore) -> Router {
    routes::router().layer(Extension(store))
}
