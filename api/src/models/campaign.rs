//! # Campaign model
//!
//! A fundraising campaign owned by exactly one user. `money_needed` is the
//! funding goal in whole currency units and is kept non-negative both by
//! request validation and by a CHECK constraint on the table. Queries follow
//! the associated-function style of the user model; ownership checks happen
//! in the handlers, which compare `user_id` against the token subject.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::ApiError;

/// Full campaign record from the database.
#[derive(Debug, Clone, FromRow)]
pub struct Campaign {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub money_needed: i64,
    pub description: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to insert or update a campaign row.
pub struct NewCampaign {
    pub title: String,
    pub money_needed: i64,
    pub description: String,
    pub image: String,
}

impl Campaign {
    pub async fn create(
        user_id: Uuid,
        new: NewCampaign,
        pool: &PgPool,
    ) -> Result<Campaign, ApiError> {
        let campaign = sqlx::query_as(
            "INSERT INTO campaigns (id, user_id, title, money_needed, description, image)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&new.title)
        .bind(new.money_needed)
        .bind(&new.description)
        .bind(&new.image)
        .fetch_one(pool)
        .await?;
        Ok(campaign)
    }

    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Campaign>, ApiError> {
        let campaign = sqlx::query_as("SELECT * FROM campaigns WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(campaign)
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<Campaign>, ApiError> {
        let campaigns = sqlx::query_as("SELECT * FROM campaigns ORDER BY created_at DESC")
            .fetch_all(pool)
            .await?;
        Ok(campaigns)
    }

    pub async fn update(&self, new: NewCampaign, pool: &PgPool) -> Result<Campaign, ApiError> {
        let campaign = sqlx::query_as(
            "UPDATE campaigns
             SET title = $2, money_needed = $3, description = $4, image = $5
             WHERE id = $1
             RETURNING *",
        )
        .bind(self.id)
        .bind(&new.title)
        .bind(new.money_needed)
        .bind(&new.description)
        .bind(&new.image)
        .fetch_one(pool)
        .await?;
        Ok(campaign)
    }

    /// Delete the campaign; its donations go with it (ON DELETE CASCADE).
    pub async fn delete(&self, pool: &PgPool) -> Result<(), ApiError> {
        sqlx::query("DELETE FROM campaigns WHERE id = $1")
            .bind(self.id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub fn to_info(&self) -> CampaignInfo {
        CampaignInfo {
            id: self.id,
            user: self.user_id,
            title: self.title.clone(),
            money_needed: self.money_needed,
            description: self.description.clone(),
            image: self.image.clone(),
            created_at: self.created_at,
        }
    }
}

/// Campaign information sent to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CampaignInfo {
    pub id: Uuid,
    pub user: Uuid,
    pub title: String,
    pub money_needed: i64,
    pub description: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
}
