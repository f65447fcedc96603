//! HTTP mapping for `TallyError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use tally_core::error::TallyError;

/// Handler error. Wraps the shared error so it can implement `IntoResponse`.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub TallyError);

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            TallyError::BadRequest(_) | TallyError::UnsupportedVersion => StatusCode::BAD_REQUEST,
            TallyError::NotFound(_) => StatusCode::NOT_FOUND,
            TallyError::Conflict(_) => StatusCode::CONFLICT,
            TallyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        let body = Json(json!({
            "error": self.0.client_code().as_str(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_wrapped_error() {
        let err = ApiError::from(TallyError::user_not_found(3));
        assert_eq!(err.to_string(), "not found: user not found with id: 3");
    }

    #[test]
    fn status_follows_client_code() {
        let cases = [
            (TallyError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (TallyError::UnsupportedVersion, StatusCode::BAD_REQUEST),
            (TallyError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (TallyError::Conflict("x".into()), StatusCode::CONFLICT),
            (TallyError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).into_response().status(), status);
        }
    }
}
