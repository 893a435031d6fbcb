//! # Auth extractor
//!
//! [`AuthUser`] turns the `Authorization: JWT <token>` header into the
//! authenticated [`User`], rejecting with a structured 401 at every failure
//! point: missing or malformed header, bad signature, expired token, or a
//! subject id with no matching row. Handlers that take an `AuthUser`
//! argument never see an unauthenticated request.

use std::sync::Arc;

use api::auth::Claims;
use api::models::User;
use api::ApiError;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::state::AppState;

/// The authenticated caller, resolved from the bearer token.
pub struct AuthUser {
    pub user: User,
    pub claims: Claims,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(ApiError::credentials_not_provided)?;

        // The original clients send "JWT <token>", not "Bearer".
        let token = header
            .strip_prefix("JWT ")
            .ok_or_else(ApiError::credentials_not_provided)?;

        let claims = state.token_keys.verify(token)?;

        let user = User::find_by_id(claims.sub, &state.pool)
            .await?
            .ok_or_else(ApiError::user_not_found)?;

        Ok(AuthUser { user, claims })
    }
}
