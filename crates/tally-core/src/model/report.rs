use std::collections::HashMap;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// `GET /api/v1/info` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInfo {
    pub application: String,
    pub version: String,
    #[serde(with = "humantime_serde")]
    pub timestamp: SystemTime,
    pub status: String,
    pub total_users: u64,
}

/// `GET /api/v1/metrics/requests` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMetrics {
    pub total_requests: u64,
    pub endpoint_counts: HashMap<String, u64>,
}
