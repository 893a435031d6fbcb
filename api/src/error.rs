//! # API error type
//!
//! A single enum covering every failure an endpoint can report. Converting
//! it into a response yields the status code plus a `{"detail": ...}` JSON
//! body, which is the shape every error response in this API uses —
//! validation failures report the first failed check, auth failures a fixed
//! message, and anything from the database collapses to a 500 whose detail
//! is logged rather than echoed to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal server error")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// 401 with the fixed body the login endpoint has always returned.
    pub fn user_not_found() -> Self {
        ApiError::Unauthorized("User not found".into())
    }

    /// 401 for requests without a usable `Authorization` header.
    pub fn credentials_not_provided() -> Self {
        ApiError::Unauthorized("Authentication credentials were not provided.".into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(e) => {
                error!("Database error: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Internal(e) => {
                error!("Internal error: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        let cases = [
            (ApiError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (ApiError::user_not_found(), StatusCode::UNAUTHORIZED),
            (
                ApiError::Forbidden("not yours".into()),
                StatusCode::FORBIDDEN,
            ),
            (
                ApiError::NotFound("no such campaign".into()),
                StatusCode::NOT_FOUND,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn database_errors_do_not_leak_details() {
        let err = ApiError::Database(sqlx::Error::PoolClosed);
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn fixed_messages() {
        assert_eq!(ApiError::user_not_found().to_string(), "User not found");
        assert_eq!(
            ApiError::credentials_not_provided().to_string(),
            "Authentication credentials were not provided."
        );
    }
}
