//! Mailing-list entry handlers.
//!
//! Every handler follows the same shape: check the method, decode the body
//! leniently, call the store, then answer through the envelope. Mutations
//! answer with the store's own read of the entry rather than echoing input.

use axum::extract::Extension;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Router, routing::any};

use mailinglist_core::{BatchQuery, EmailEntry};
use mailinglist_infra::SharedStore;

use super::{CREATE, DELETE, GET, GET_BATCH, Route, UPDATE};
use crate::app::decode::LenientJson;
use crate::app::envelope::{return_err, return_json};

/// Requests with the wrong method are dropped without a body or explicit status.
fn method_matches(route: &Route, method: &Method) -> bool {
    if *method == route.method {
        return true;
    }
    tracing::debug!(path = route.path, %method, expected = %route.method, "request dropped");
    false
}

fn dropped() -> Response {
    ().into_response()
}

/// Email endpoints.
///
/// Paths are mounted for any method; each handler applies its own method gate
/// so a mismatch is dropped instead of answered with 405.
pub fn router() -> Router {
    Router::new()
        .route(CREATE.path, any(create_email))
        .route(GET.path, any(get_email))
        .route(GET_BATCH.path, any(get_email_batch))
        .route(UPDATE.path, any(update_email))
        .route(DELETE.path, any(delete_email))
}

pub async fn create_email(
    Extension(store): Extension<SharedStore>,
    method: Method,
    LenientJson(entry): LenientJson<EmailEntry>,
) -> Response {
    if !method_matches(&CREATE, &method) {
        return dropped();
    }

    if let Err(e) = store.create(&entry.email).await {
        return return_err(e, StatusCode::BAD_REQUEST);
    }

    tracing::info!(email = %entry.email, "JSON CreateEmail");
    return_json(store.get(&entry.email)).await
}

pub async fn get_email(
    Extension(store): Extension<SharedStore>,
    method: Method,
    LenientJson(entry): LenientJson<EmailEntry>,
) -> Response {
    if !method_matches(&GET, &method) {
        return dropped();
    }

    tracing::info!(email = %entry.email, "JSON GetEmail");
    return_json(store.get(&entry.email)).await
}

pub async fn update_email(
    Extension(store): Extension<SharedStore>,
    method: Method,
    LenientJson(entry): LenientJson<EmailEntry>,
) -> Response {
    if !method_matches(&UPDATE, &method) {
        return dropped();
    }

    if let Err(e) = store.update(&entry).await {
        return return_err(e, StatusCode::BAD_REQUEST);
    }

    tracing::info!(email = %entry.email, "JSON UpdateEmail");
    return_json(store.get(&entry.email)).await
}

pub async fn delete_email(
    Extension(store): Extension<SharedStore>,
    method: Method,
    LenientJson(entry): LenientJson<EmailEntry>,
) -> Response {
    if !method_matches(&DELETE, &method) {
        return dropped();
    }

    if let Err(e) = store.delete(&entry.email).await {
        return return_err(e, StatusCode::BAD_REQUEST);
    }

    tracing::info!(email = %entry.email, "JSON DeleteEmail");
    return_json(store.get(&entry.email)).await
}

pub async fn get_email_batch(
    Extension(store): Extension<SharedStore>,
    method: Method,
    LenientJson(query): LenientJson<BatchQuery>,
) -> Response {
    if !method_matches(&GET_BATCH, &method) {
        return dropped();
    }

    if let Err(e) = query.validate() {
        return return_err(e, StatusCode::BAD_REQUEST);
    }

    tracing::info!(page = query.page, count = query.count, "JSON GetEmailBatch");
    return_json(store.batch(&query)).await
}
