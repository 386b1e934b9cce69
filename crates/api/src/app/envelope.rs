//! Uniform JSON response envelope.
//!
//! Every handler answers through [`JsonWriter`]: either the raw serialized
//! payload, or `{"Err": "<message>"}`. The two shapes are never combined; the
//! status code is the only signal telling them apart.

use std::convert::Infallible;
use std::fmt::Display;
use std::future::IntoFuture;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, HeaderValue};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use serde::{Deserialize, Serialize};

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf8";

/// Error half of the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "Err")]
    pub err: String,
}

impl ErrorBody {
    pub fn new(err: impl Display) -> Self {
        Self {
            err: err.to_string(),
        }
    }
}

/// Response under construction for a single request.
///
/// Mirrors an HTTP response writer: headers are fixed up front and the status
/// line can be written once. The body is produced by [`JsonWriter::emit`] or
/// [`JsonWriter::finish`], which consume the writer.
#[derive(Debug)]
pub struct JsonWriter {
    headers: HeaderMap,
    status: Option<StatusCode>,
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonWriter {
    pub fn new() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        Self {
            headers,
            status: None,
        }
    }

    /// Set the response status. Only the first call takes effect.
    pub fn write_header(&mut self, status: StatusCode) {
        match self.status {
            None => self.status = Some(status),
            Some(current) => {
                tracing::debug!(%current, ignored = %status, "superfluous status write");
            }
        }
    }

    /// Status the response will be sent with if nothing else writes one.
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    /// Run `producer` and render its outcome.
    pub async fn emit<T, E, F>(self, producer: F) -> Response
    where
        F: IntoFuture<Output = Result<T, E>>,
        T: Serialize,
        E: Display,
    {
        let outcome = producer.await;
        self.finish(outcome)
    }

    /// Render an already computed outcome.
    ///
    /// - `Err(e)`: status 500 unless one was already written, body `{"Err": e}`.
    /// - `Ok(v)`: `v` as JSON at the current status.
    ///
    /// A value that fails to serialize is logged and answered with an empty
    /// body; there is no fallback envelope.
    pub fn finish<T, E>(mut self, outcome: Result<T, E>) -> Response
    where
        T: Serialize,
        E: Display,
    {
        match outcome {
            Err(err) => {
                self.write_header(StatusCode::INTERNAL_SERVER_ERROR);
                match serde_json::to_vec(&ErrorBody::new(err)) {
                    Ok(body) => self.into_response(Body::from(body)),
                    Err(e) => {
                        tracing::error!(error = %e, "failed to encode error envelope");
                        self.into_response(Body::empty())
                    }
                }
            }
            Ok(value) => match serde_json::to_vec(&value) {
                Ok(body) => self.into_response(Body::from(body)),
                Err(e) => {
                    tracing::error!(error = %e, "failed to encode response payload");
                    self.write_header(StatusCode::INTERNAL_SERVER_ERROR);
                    self.into_response(Body::empty())
                }
            },
        }
    }

    fn into_response(self, body: Body) -> Response {
        let status = self.status();
        let mut response = Response::new(body);
        *response.status_mut() = status;
        *response.headers_mut() = self.headers;
        response
    }
}

/// Envelope the outcome of `producer` with the default status.
pub async fn return_json<T, E, F>(producer: F) -> Response
where
    F: IntoFuture<Output = Result<T, E>>,
    T: Serialize,
    E: Display,
{
    JsonWriter::new().emit(producer).await
}

/// Answer with `{"Err": err}` at an explicit status.
///
/// The status is written before the body, so the error object travels down
/// the success path of the envelope.
pub fn return_err(err: impl Display, status: StatusCode) -> Response {
    let mut writer = JsonWriter::new();
    writer.write_header(status);
    writer.finish(Ok::<_, Infallible>(ErrorBody::new(err)))
}
