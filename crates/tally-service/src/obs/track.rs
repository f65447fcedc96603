//! Request tracking middleware.
//!
//! Attached with `Router::route_layer`, so it only sees requests that matched
//! a route and the endpoint key is the route template (`/api/users/:id`), not
//! the raw path. Key cardinality is therefore bounded by the route table.

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};

use crate::app_state::AppState;

pub async fn track_requests(
    State(state): State<AppState>,
    matched: MatchedPath,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let counter = state.counter();

    let total = counter.increment_request_count();
    let hits = counter.increment_endpoint_count(matched.as_str());

    let resp = next.run(req).await;

    tracing::debug!(
        %method,
        route = matched.as_str(),
        status = resp.status().as_u16(),
        total,
        hits,
        "request tracked"
    );
    resp
}
