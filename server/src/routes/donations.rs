//! # Donation endpoints
//!
//! Anyone can donate to an existing campaign; only the campaign owner can
//! list what came in. Responses never include the donor's social security
//! number, even though the row stores it.

use std::sync::Arc;

use api::models::{Campaign, Donation, DonationInfo, NewDonation};
use api::{validate, ApiError};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::extract::AuthUser;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct DonationRequest {
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub amount: i64,
    pub social_security_number: String,
}

impl DonationRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate::required("name", &self.name)?;
        validate::non_negative("amount", self.amount)?;
        validate::required("social_security_number", &self.social_security_number)?;
        Ok(())
    }
}

async fn load_campaign(id: Uuid, state: &AppState) -> Result<Campaign, ApiError> {
    Campaign::find_by_id(id, &state.pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("Campaign not found".into()))
}

pub async fn create_donation(
    State(state): State<Arc<AppState>>,
    Path(campaign_id): Path<Uuid>,
    Json(payload): Json<DonationRequest>,
) -> Result<Json<DonationInfo>, ApiError> {
    payload.validate()?;
    let campaign = load_campaign(campaign_id, &state).await?;

    let donation = Donation::create(
        campaign.id,
        NewDonation {
            name: payload.name,
            email: payload.email,
            amount: payload.amount,
            social_security_number: payload.social_security_number,
        },
        &state.pool,
    )
    .await?;

    info!("Donation of {} to campaign {}", donation.amount, campaign.id);
    Ok(Json(donation.to_info()))
}

pub async fn list_donations(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<Vec<DonationInfo>>, ApiError> {
    let campaign = load_campaign(campaign_id, &state).await?;
    if campaign.user_id != auth.user.id {
        return Err(ApiError::Forbidden(
            "You do not have permission to view these donations".into(),
        ));
    }

    let donations = Donation::for_campaign(campaign.id, &state.pool).await?;
    Ok(Json(donations.iter().map(Donation::to_info).collect()))
}
