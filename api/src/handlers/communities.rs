//! Community handlers

use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use serde_json::json;

use crate::domain::entities::{Entity, IdentityPayload};
use crate::error::AppError;
use crate::handlers::DataResponse;
use crate::AppState;

/// Request body for community creation
#[derive(Debug, Deserialize)]
pub struct CreateCommunityRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// POST /user/createCommunity
///
/// Create the named community, or join it if it already exists.
pub async fn create_community(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityPayload>,
    Json(request): Json<CreateCommunityRequest>,
) -> Result<Json<DataResponse>, AppError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }

    let community = state
        .models
        .get(Entity::Community)
        .ops()
        .find_one_and_update(
            json!({ "name": name }),
            json!({
                "name": name,
                "description": request.description,
                "users": [identity.id],
            }),
        )
        .await?;

    Ok(Json(DataResponse::new(community)))
}

/// POST /user/getCommunity
pub async fn get_communities(
    State(state): State<AppState>,
) -> Result<Json<DataResponse>, AppError> {
    let communities = state
        .models
        .get(Entity::Community)
        .ops()
        .find(json!({}))
        .await?;

    Ok(Json(DataResponse::list(communities)))
}
