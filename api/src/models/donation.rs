//! # Donation model
//!
//! A contribution tied to one campaign. The row stores the donor's social
//! security number as received, but [`DonationInfo`] never carries it — no
//! response in the API echoes that field back. Donations are removed with
//! their campaign via ON DELETE CASCADE.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::ApiError;

/// Full donation record from the database. Never serialized directly;
/// project through [`Donation::to_info`] first.
#[derive(Debug, Clone, FromRow)]
pub struct Donation {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub name: String,
    pub email: String,
    pub amount: i64,
    pub social_security_number: String,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to insert a donation row.
pub struct NewDonation {
    pub name: String,
    pub email: String,
    pub amount: i64,
    pub social_security_number: String,
}

impl Donation {
    pub async fn create(
        campaign_id: Uuid,
        new: NewDonation,
        pool: &PgPool,
    ) -> Result<Donation, ApiError> {
        let donation = sqlx::query_as(
            "INSERT INTO donations (id, campaign_id, name, email, amount, social_security_number)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(campaign_id)
        .bind(&new.name)
        .bind(&new.email)
        .bind(new.amount)
        .bind(&new.social_security_number)
        .fetch_one(pool)
        .await?;
        Ok(donation)
    }

    pub async fn for_campaign(
        campaign_id: Uuid,
        pool: &PgPool,
    ) -> Result<Vec<Donation>, ApiError> {
        let donations =
            sqlx::query_as("SELECT * FROM donations WHERE campaign_id = $1 ORDER BY created_at")
                .bind(campaign_id)
                .fetch_all(pool)
                .await?;
        Ok(donations)
    }

    pub fn to_info(&self) -> DonationInfo {
        DonationInfo {
            id: self.id,
            campaign: self.campaign_id,
            name: self.name.clone(),
            email: self.email.clone(),
            amount: self.amount,
            created_at: self.created_at,
        }
    }
}

/// Donation information sent to clients. Omits the social security number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DonationInfo {
    pub id: Uuid,
    pub campaign: Uuid,
    pub name: String,
    pub email: String,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_omits_the_social_security_number() {
        let donation = Donation {
            id: Uuid::new_v4(),
            campaign_id: Uuid::new_v4(),
            name: "Ricky".into(),
            email: String::new(),
            amount: 50,
            social_security_number: "123-45-6789".into(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(donation.to_info()).unwrap();
        assert!(json.get("social_security_number").is_none());
        assert_eq!(json["amount"], 50);
    }
}
