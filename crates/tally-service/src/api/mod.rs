//! JSON API handlers.
//!
//! - `system`: `/api/v1` info, health, echo, synthetic user profile
//! - `users`: `/api/users` CRUD over the user repository
//! - `report`: `/api/v1/metrics/requests`

pub mod report;
pub mod system;
pub mod users;

use std::time::SystemTime;

/// RFC 3339 timestamp (millisecond precision) for ad-hoc JSON bodies.
pub(crate) fn timestamp(t: SystemTime) -> String {
    humantime::format_rfc3339_millis(t).to_string()
}
