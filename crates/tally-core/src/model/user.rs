use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// Stored user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    #[serde(with = "humantime_serde")]
    pub created_at: SystemTime,
    #[serde(with = "humantime_serde")]
    pub updated_at: SystemTime,
}

impl User {
    /// Build a fresh record from a draft. Both timestamps are set to `now`.
    pub fn from_draft(id: u64, draft: UserDraft, now: SystemTime) -> Self {
        Self {
            id,
            username: draft.username,
            email: draft.email,
            first_name: draft.first_name,
            last_name: draft.last_name,
            is_active: draft.is_active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite mutable fields from a draft, keeping id and `created_at`.
    pub fn apply(&mut self, draft: UserDraft, now: SystemTime) {
        self.username = draft.username;
        self.email = draft.email;
        self.first_name = draft.first_name;
        self.last_name = draft.last_name;
        self.is_active = draft.is_active;
        self.updated_at = now;
    }

    /// Case-sensitive substring match on first or last name.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.first_name.contains(needle) || self.last_name.contains(needle)
    }
}

/// Create/update payload. An `id` sent by clients on update is ignored; the
/// path parameter wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}
