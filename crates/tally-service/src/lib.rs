//! tally service library entry.
//!
//! Wires config, the request counter, the user repository and the HTTP
//! handlers into an axum router. Consumed by the binary (`main.rs`) and by
//! integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod obs;
pub mod ops;
pub mod router;
pub mod users;
