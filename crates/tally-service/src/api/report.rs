use axum::{extract::State, Json};

use tally_core::model::RequestMetrics;

use crate::app_state::AppState;

pub async fn request_metrics(State(state): State<AppState>) -> Json<RequestMetrics> {
    Json(state.counter().report())
}
