//! In-process request metrics.
//!
//! - `counter`: the request counter (total + per-endpoint), Prometheus rendering
//! - `track`: axum middleware feeding the counter once per request

pub mod counter;
pub mod track;

pub use counter::RequestCounter;
