//! Lenient JSON request decoding.
//!
//! A body that cannot be read or parsed is not an error: the target keeps its
//! `Default` value and downstream validation (or the store) rejects it on its
//! own terms.
//!
//! Object keys are matched to the target's field names ignoring ASCII case and
//! underscores, so `EMAIL`, `email` and `Email` all land on the same field. A
//! field whose value has the wrong type keeps its zero value while the rest of
//! the object is still decoded.

use std::convert::Infallible;

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Parse `body` as `T`, falling back to `T::default()` field by field.
pub fn from_json<T>(body: &[u8]) -> T
where
    T: Serialize + DeserializeOwned + Default,
{
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, len = body.len(), "request body ignored");
            return T::default();
        }
    };

    let fields = match value {
        Value::Object(fields) => fields,
        other => return decode_or_default(other),
    };

    // The zero value's serialized form lists the names the target answers to.
    let known = match serde_json::to_value(T::default()) {
        Ok(Value::Object(known)) => known,
        _ => return decode_or_default(Value::Object(fields)),
    };

    let fields = fold_keys(&known, fields);
    match serde_json::from_value(Value::Object(fields.clone())) {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::debug!(error = %e, "request body partially decoded");
            recover_fields(fields)
        }
    }
}

fn decode_or_default<T>(value: Value) -> T
where
    T: DeserializeOwned + Default,
{
    serde_json::from_value(value).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "request body ignored");
        T::default()
    })
}

fn fold(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Rename incoming keys to the matching known field; unknown keys are dropped.
/// An exact spelling wins over a folded one.
fn fold_keys(known: &Map<String, Value>, fields: Map<String, Value>) -> Map<String, Value> {
    let mut folded = Map::new();
    for (key, value) in fields {
        let name = match known.get_key_value(&key) {
            Some((name, _)) => name,
            None => match known.keys().find(|name| fold(name) == fold(&key)) {
                Some(name) => name,
                None => continue,
            },
        };
        if key == *name || !folded.contains_key(name) {
            folded.insert(name.clone(), value);
        }
    }
    folded
}

/// Keep every field that decodes on its own; the rest stay at their zero value.
fn recover_fields<T>(fields: Map<String, Value>) -> T
where
    T: DeserializeOwned + Default,
{
    let mut kept = Map::new();
    for (name, value) in fields {
        kept.insert(name.clone(), value);
        if serde_json::from_value::<T>(Value::Object(kept.clone())).is_err() {
            tracing::debug!(field = %name, "request field ignored");
            kept.remove(&name);
        }
    }
    decode_or_default(Value::Object(kept))
}

/// Extractor counterpart of [`from_json`]; never rejects a request.
#[derive(Debug, Clone, Copy, Default)]
pub struct LenientJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: Serialize + DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = match Bytes::from_request(req, state).await {
            Ok(body) => body,
            Err(rejection) => {
                tracing::debug!(%rejection, "request body unreadable");
                Bytes::new()
            }
        };
        Ok(Self(from_json(&body)))
    }
}
