//! tally core: error surface and wire DTOs shared by the service crates.
//!
//! This crate carries no runtime or HTTP dependencies so the same types can be
//! used by the service, by integration tests, and by client tooling.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Every fallible path
//! surfaces as `TallyError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod model;

/// Shared result type.
pub use error::{Result, TallyError};
