//! Axum router wiring.
//!
//! API routes sit behind the request tracker; the metrics report and the ops
//! endpoints are merged in afterwards so polling them does not move the
//! counters.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{api, app_state::AppState, obs, ops};

pub fn build_router(state: AppState) -> Router {
    let tracked = Router::new()
        .route("/api/v1/info", get(api::system::info))
        .route("/api/v1/health", get(api::system::health))
        .route("/api/v1/echo", post(api::system::echo))
        .route("/api/v1/users/:id", get(api::system::profile))
        .route("/api/users", get(api::users::list).post(api::users::create))
        .route("/api/users/active", get(api::users::list_active))
        .route("/api/users/search", get(api::users::search))
        .route("/api/users/count/active", get(api::users::count_active))
        .route("/api/users/username/:username", get(api::users::get_by_username))
        .route("/api/users/email/:email", get(api::users::get_by_email))
        .route(
            "/api/users/:id",
            get(api::users::get)
                .put(api::users::update)
                .delete(api::users::delete),
        )
        .route("/api/users/:id/deactivate", put(api::users::deactivate))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            obs::track::track_requests,
        ));

    let untracked = Router::new()
        .route("/api/v1/metrics/requests", get(api::report::request_metrics))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics));

    tracked.merge(untracked).with_state(state)
}
