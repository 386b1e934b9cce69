//! HTTP API: routing, request decoding, and the JSON response envelope.

pub mod app;
pub mod server;

pub use app::build_app;
pub use server::{ServeError, run, serve};
