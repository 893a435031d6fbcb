//! # User model and profile
//!
//! Two representations of a Donasee user:
//!
//! ## [`User`] / [`UserProfile`]
//!
//! The complete database rows. [`User`] holds the credentials (`username` is
//! the email address, `password_hash` is an Argon2 PHC string) and name
//! fields; [`UserProfile`] is the one-to-one community extension created
//! alongside it at registration, carrying the community name, admin name,
//! optional docs link, and an approval `status` that starts out `"pending"`.
//! Both derive [`sqlx::FromRow`] and expose their queries as associated
//! functions taking a [`PgPool`].
//!
//! ## [`UserInfo`] / [`UserProfileInfo`] / [`IdentityInfo`]
//!
//! Client-safe projections. They omit the password hash entirely:
//! [`UserInfo`] (user plus nested `userprofile`) is what `/register` and
//! `/login` return next to the token, [`IdentityInfo`] is the flat shape
//! `/login/jwt` returns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::ApiError;

/// Full user record from the database. Never serialized directly;
/// project through [`User::to_info`] first.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

/// One-to-one community extension of a user.
#[derive(Debug, Clone, FromRow)]
pub struct UserProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub community_name: String,
    pub admin_name: String,
    pub status: String,
    pub docs_link: Option<String>,
    pub error_message: Option<String>,
}

/// Fields needed to insert a user row.
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}

/// Fields needed to insert the accompanying profile row.
pub struct NewProfile {
    pub community_name: String,
    pub admin_name: String,
    pub docs_link: Option<String>,
}

impl User {
    /// Insert a user together with its profile. Duplicate email or username
    /// reports as a validation failure rather than a database error.
    pub async fn register(
        new_user: NewUser,
        new_profile: NewProfile,
        pool: &PgPool,
    ) -> Result<(User, UserProfile), ApiError> {
        let mut tx = pool.begin().await?;

        let user: User = sqlx::query_as(
            "INSERT INTO users (id, username, email, password_hash, first_name, last_name)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                ApiError::Validation("A user with this email already exists".into())
            } else {
                ApiError::Database(e)
            }
        })?;

        let profile: UserProfile = sqlx::query_as(
            "INSERT INTO user_profiles (id, user_id, community_name, admin_name, docs_link)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(user.id)
        .bind(&new_profile.community_name)
        .bind(&new_profile.admin_name)
        .bind(&new_profile.docs_link)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((user, profile))
    }

    pub async fn find_by_email(email: &str, pool: &PgPool) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    /// Convert to UserInfo for client consumption.
    pub fn to_info(&self, profile: &UserProfile) -> UserInfo {
        UserInfo {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            userprofile: profile.to_info(),
        }
    }

    /// Flat identity shape returned by the token-check endpoint.
    pub fn to_identity(&self) -> IdentityInfo {
        IdentityInfo {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            account: None,
        }
    }
}

impl UserProfile {
    pub async fn for_user(user_id: Uuid, pool: &PgPool) -> Result<Option<UserProfile>, ApiError> {
        let profile = sqlx::query_as("SELECT * FROM user_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
        Ok(profile)
    }

    pub fn to_info(&self) -> UserProfileInfo {
        UserProfileInfo {
            id: self.id,
            community_name: self.community_name.clone(),
            admin_name: self.admin_name.clone(),
            status: self.status.clone(),
            docs_link: self.docs_link.clone(),
            error_message: self.error_message.clone(),
            user: self.user_id,
        }
    }
}

/// User information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub userprofile: UserProfileInfo,
}

/// Profile information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfileInfo {
    pub id: Uuid,
    pub community_name: String,
    pub admin_name: String,
    pub status: String,
    pub docs_link: Option<String>,
    pub error_message: Option<String>,
    pub user: Uuid,
}

/// Response body of `POST /login/jwt`. `account` is reserved and always null.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdentityInfo {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub account: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_omits_the_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            username: "ricky@gmail.com".into(),
            email: "ricky@gmail.com".into(),
            password_hash: "$argon2id$secret".into(),
            first_name: "Ricky".into(),
            last_name: "Putra".into(),
            created_at: Utc::now(),
        };
        let profile = UserProfile {
            id: Uuid::new_v4(),
            user_id: user.id,
            community_name: "Gereja Bethel Indonesia".into(),
            admin_name: "Ricky Putra Nursalim".into(),
            status: "pending".into(),
            docs_link: Some("https://docs.google.com/".into()),
            error_message: None,
        };

        let json = serde_json::to_value(user.to_info(&profile)).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["userprofile"]["status"], "pending");
        assert_eq!(json["userprofile"]["user"], json["id"]);
    }

    #[test]
    fn identity_account_serializes_as_null() {
        let user = User {
            id: Uuid::new_v4(),
            username: "ricky@gmail.com".into(),
            email: "ricky@gmail.com".into(),
            password_hash: String::new(),
            first_name: "Ricky".into(),
            last_name: "Putra".into(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(user.to_identity()).unwrap();
        assert!(json["account"].is_null());
        assert_eq!(json["first_name"], "Ricky");
    }
}
