//! Chat handlers
//!
//! Group creation, one-to-one chat access and chat listing.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::entities::{Entity, IdentityPayload};
use crate::error::AppError;
use crate::handlers::{id_of, DataResponse};
use crate::harness::behavior::truthy;
use crate::AppState;

/// Other members a group needs besides its creator
const MIN_GROUP_MEMBERS: usize = 2;

/// Request body for group creation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub user_ids: Vec<String>,
    pub chat_name: String,
    #[serde(default)]
    pub chat_desc: Option<String>,
    #[serde(default)]
    pub chat_type: Option<String>,
}

/// POST /user/crtgroup
///
/// Create a group chat administered by the caller.
pub async fn create_group(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityPayload>,
    Json(request): Json<CreateGroupRequest>,
) -> Result<Json<Value>, AppError> {
    if request.chat_name.trim().is_empty() {
        return Err(AppError::BadRequest("chatName is required".to_string()));
    }
    if request.user_ids.len() < MIN_GROUP_MEMBERS {
        return Err(AppError::BadRequest(format!(
            "A group needs at least {} other members",
            MIN_GROUP_MEMBERS
        )));
    }

    let mut users = request.user_ids;
    users.push(identity.id.clone());

    let chat = state
        .models
        .get(Entity::Chat)
        .ops()
        .create(json!({
            "chatName": request.chat_name,
            "chatDesc": request.chat_desc,
            "chatType": request.chat_type.unwrap_or_else(|| "group".to_string()),
            "isGroupChat": true,
            "users": users,
            "groupAdmin": identity.id,
        }))
        .await?;

    Ok(Json(chat))
}

/// POST /user/accessChat/:id
///
/// Return the one-to-one chat between the caller and `id`, creating it
/// when none exists yet.
pub async fn access_chat(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityPayload>,
    Path(other): Path<String>,
) -> Result<Json<Value>, AppError> {
    if other.trim().is_empty() {
        return Err(AppError::BadRequest("user id is required".to_string()));
    }

    let chats = state.models.get(Entity::Chat).ops();
    let members = json!([identity.id, other]);

    let existing = chats
        .find_one(json!({ "isGroupChat": false, "users": { "$all": members } }))
        .populate("users")
        .populate("latestMessage")
        .await?;
    if truthy(&existing) {
        return Ok(Json(existing));
    }

    let created = chats
        .create(json!({ "chatName": "sender", "isGroupChat": false, "users": members }))
        .await?;
    let id = id_of(&created)
        .ok_or_else(|| AppError::Internal("created chat has no _id".to_string()))?;

    let chat = chats.find_by_id(id).populate("users").await?;
    Ok(Json(chat))
}

/// GET /user/fetchChat
///
/// Every chat the caller belongs to, most recently updated first.
pub async fn fetch_chats(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityPayload>,
) -> Result<Json<DataResponse>, AppError> {
    let chats = state
        .models
        .get(Entity::Chat)
        .ops()
        .find(json!({ "users": { "$elemMatch": { "$eq": identity.id } } }))
        .populate("users")
        .populate("groupAdmin")
        .populate("latestMessage")
        .sort(json!({ "updatedAt": -1 }))
        .exec()
        .await?;

    Ok(Json(DataResponse::list(chats)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_create_group_request() {
        let json = r#"{
            "userIds": ["mockUserId2", "mockUserId3"],
            "chatName": "Test Group",
            "chatDesc": "desc",
            "chatType": "group"
        }"#;
        let request: CreateGroupRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.user_ids.len(), 2);
        assert_eq!(request.chat_name, "Test Group");
        assert_eq!(request.chat_type.as_deref(), Some("group"));
    }

    #[test]
    fn parse_create_group_request_missing_members() {
        let result: Result<CreateGroupRequest, _> =
            serde_json::from_str(r#"{"chatName": "Test Group"}"#);
        assert!(result.is_err());
    }
}
