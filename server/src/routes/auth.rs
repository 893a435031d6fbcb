//! # Authentication endpoints
//!
//! - `POST /register` — create a user and its community profile, return a
//!   fresh token plus the serialized user. Duplicate email is a 400.
//! - `POST /login` — email + password. The lookup filters on the email
//!   field alone, and the password is verified against the stored Argon2
//!   hash; both failure cases return the same 401 body so the response
//!   doesn't reveal which half was wrong.
//! - `POST /login/jwt` — identity check. The [`AuthUser`] extractor does
//!   all the work; this handler just serializes the resolved user.

use std::sync::Arc;

use api::auth::{hash_password, verify_password};
use api::models::{IdentityInfo, NewProfile, NewUser, User, UserInfo, UserProfile};
use api::{validate, ApiError};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::extract::AuthUser;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub community_name: String,
    pub admin_name: String,
    #[serde(default)]
    pub docs_link: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Token plus serialized user, the body of both `/register` and `/login`.
#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub user: UserInfo,
}

impl RegisterRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate::email(&self.email)?;
        validate::password(&self.password)?;
        validate::required("community_name", &self.community_name)?;
        validate::required("admin_name", &self.admin_name)?;
        Ok(())
    }
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    payload.validate()?;

    let password_hash = hash_password(&payload.password)?;
    let new_user = NewUser {
        // The original app uses the email address as the username.
        username: payload.email.clone(),
        email: payload.email.clone(),
        password_hash,
        first_name: String::new(),
        last_name: String::new(),
    };
    let new_profile = NewProfile {
        community_name: payload.community_name,
        admin_name: payload.admin_name,
        docs_link: payload.docs_link,
    };

    let (user, profile) = User::register(new_user, new_profile, &state.pool).await?;
    let token = state.token_keys.issue(&user)?;

    info!("Registered user {}", user.email);
    Ok(Json(TokenResponse {
        token,
        user: user.to_info(&profile),
    }))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = User::find_by_email(&payload.email, &state.pool)
        .await?
        .ok_or_else(ApiError::user_not_found)?;

    if !verify_password(&payload.password, &user.password_hash)? {
        // Same body as the unknown-email case on purpose.
        return Err(ApiError::user_not_found());
    }

    let profile = UserProfile::for_user(user.id, &state.pool)
        .await?
        .ok_or_else(ApiError::user_not_found)?;
    let token = state.token_keys.issue(&user)?;

    info!("User {} logged in", user.email);
    Ok(Json(TokenResponse {
        token,
        user: user.to_info(&profile),
    }))
}

pub async fn login_jwt(auth: AuthUser) -> Json<IdentityInfo> {
    Json(auth.user.to_identity())
}
