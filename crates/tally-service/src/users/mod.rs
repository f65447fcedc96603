//! User storage.
//!
//! Handlers depend on the `UserRepository` trait; the binary wires the
//! in-memory implementation.

pub mod repository;

pub use repository::{InMemoryUserRepository, UserRepository};
