//! Wire DTOs (JSON, camelCase field names).
//!
//! - `user`: user records and create/update payloads
//! - `report`: application info and request metrics report bodies

pub mod report;
pub mod user;

pub use report::{AppInfo, RequestMetrics};
pub use user::{User, UserDraft};
