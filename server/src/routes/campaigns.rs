//! # Campaign endpoints
//!
//! Reading is public; creating requires a token, and updating or deleting
//! additionally requires owning the campaign.

use std::sync::Arc;

use api::models::{Campaign, CampaignInfo, NewCampaign};
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
pub struct CampaignRequest {
    pub title: String,
    pub money_needed: i64,
    pub description: String,
    pub image: String,
}

impl CampaignRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate::required("title", &self.title)?;
        validate::non_negative("money_needed", self.money_needed)?;
        validate::required("description", &self.description)?;
        validate::required("image", &self.image)?;
        Ok(())
    }

    fn into_new(self) -> NewCampaign {
        NewCampaign {
            title: self.title,
            money_needed: self.money_needed,
            description: self.description,
            image: self.image,
        }
    }
}

async fn load_campaign(id: Uuid, state: &AppState) -> Result<Campaign, ApiError> {
    Campaign::find_by_id(id, &state.pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("Campaign not found".into()))
}

/// Reject callers that are not the campaign owner.
fn require_owner(campaign: &Campaign, auth: &AuthUser) -> Result<(), ApiError> {
    if campaign.user_id != auth.user.id {
        return Err(ApiError::Forbidden(
            "You do not have permission to modify this campaign".into(),
        ));
    }
    Ok(())
}

pub async fn list_campaigns(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CampaignInfo>>, ApiError> {
    let campaigns = Campaign::list_all(&state.pool).await?;
    Ok(Json(campaigns.iter().map(Campaign::to_info).collect()))
}

pub async fn get_campaign(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<CampaignInfo>, ApiError> {
    let campaign = load_campaign(id, &state).await?;
    Ok(Json(campaign.to_info()))
}

pub async fn create_campaign(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(payload): Json<CampaignRequest>,
) -> Result<Json<CampaignInfo>, ApiError> {
    payload.validate()?;
    let campaign = Campaign::create(auth.user.id, payload.into_new(), &state.pool).await?;

    info!("User {} created campaign {}", auth.user.email, campaign.id);
    Ok(Json(campaign.to_info()))
}

pub async fn update_campaign(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CampaignRequest>,
) -> Result<Json<CampaignInfo>, ApiError> {
    payload.validate()?;
    let campaign = load_campaign(id, &state).await?;
    require_owner(&campaign, &auth)?;

    let updated = campaign.update(payload.into_new(), &state.pool).await?;
    Ok(Json(updated.to_info()))
}

pub async fn delete_campaign(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let campaign = load_campaign(id, &state).await?;
    require_owner(&campaign, &auth)?;

    campaign.delete(&state.pool).await?;
    info!("User {} deleted campaign {}", auth.user.email, id);
    Ok(Json(serde_json::json!({ "detail": "Campaign deleted" })))
}
