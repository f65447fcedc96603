use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Map, Value};

use tally_core::model::AppInfo;

use crate::api::timestamp;
use crate::app_state::AppState;
use crate::error::ApiResult;

const PROFILE_AGE: Duration = Duration::from_secs(30 * 24 * 60 * 60);

pub async fn info(State(state): State<AppState>) -> ApiResult<Json<AppInfo>> {
    let total_users = state.users().count_active().await?;
    Ok(Json(AppInfo {
        application: state.service_name().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: SystemTime::now(),
        status: "running".into(),
        total_users,
    }))
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "UP",
        "service": state.service_name(),
        "timestamp": timestamp(SystemTime::now()),
    }))
}

pub async fn echo(
    State(state): State<AppState>,
    Json(payload): Json<Map<String, Value>>,
) -> Json<Value> {
    Json(json!({
        "received": payload,
        "timestamp": timestamp(SystemTime::now()),
        "service": state.service_name(),
    }))
}

/// Synthetic profile; does not consult the repository.
pub async fn profile(Path(id): Path<String>) -> Json<Value> {
    let created = SystemTime::now()
        .checked_sub(PROFILE_AGE)
        .unwrap_or(UNIX_EPOCH);
    Json(json!({
        "id": id,
        "name": format!("User {id}"),
        "email": format!("user{id}@example.com"),
        "createdAt": timestamp(created),
    }))
}
