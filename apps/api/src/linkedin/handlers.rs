//! Axum route handler for the raw profile-data lookup.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProfileDataRequest {
    pub profile_url: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileDataResponse {
    pub data: Value,
}

/// POST /linkedin_profile_data
///
/// Proxies the provider's profile-detail response without transformation.
pub async fn handle_profile_data(
    State(state): State<AppState>,
    Json(request): Json<ProfileDataRequest>,
) -> Result<Json<ProfileDataResponse>, AppError> {
    info!("profile data lookup for {}", request.profile_url);
    let data = state.linkedin.fetch_profile_data(&request.profile_url).await?;
    Ok(Json(ProfileDataResponse { data }))
}
