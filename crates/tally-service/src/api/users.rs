use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use tally_core::error::TallyError;
use tally_core::model::{User, UserDraft};

use crate::app_state::AppState;
use crate::error::ApiResult;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub name: String,
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.users().find_all().await?))
}

pub async fn list_active(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.users().find_active().await?))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<u64>) -> ApiResult<Json<User>> {
    state
        .users()
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| TallyError::user_not_found(id).into())
}

pub async fn get_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<User>> {
    state
        .users()
        .find_by_username(&username)
        .await?
        .map(Json)
        .ok_or_else(|| TallyError::NotFound(format!("user not found: {username}")).into())
}

pub async fn get_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<Json<User>> {
    state
        .users()
        .find_by_email(&email)
        .await?
        .map(Json)
        .ok_or_else(|| TallyError::NotFound(format!("user not found: {email}")).into())
}

pub async fn search(
    State(state): State<AppState>,
    Query(q): Query<SearchQuery>,
) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.users().search_by_name(&q.name).await?))
}

pub async fn count_active(State(state): State<AppState>) -> ApiResult<Json<u64>> {
    Ok(Json(state.users().count_active().await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(draft): Json<UserDraft>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = state.users().create(draft).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(draft): Json<UserDraft>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.users().update(id, draft).await?))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<u64>) -> ApiResult<StatusCode> {
    state.users().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<StatusCode> {
    state.users().deactivate(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
