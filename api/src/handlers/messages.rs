//! Message handlers

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::domain::entities::{Entity, IdentityPayload};
use crate::error::AppError;
use crate::handlers::{id_of, DataResponse};
use crate::AppState;

/// Request body for sending a message
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub content: String,
    pub chat_id: String,
}

/// POST /user/sendMessage
///
/// Store a message, attach its sender and mark it as the chat's latest.
pub async fn send_message(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityPayload>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<DataResponse>, AppError> {
    if request.content.trim().is_empty() || request.chat_id.trim().is_empty() {
        return Err(AppError::BadRequest(
            "content and chatId are required".to_string(),
        ));
    }

    let message = state
        .models
        .get(Entity::Message)
        .ops()
        .create(json!({
            "sender": identity.id,
            "content": request.content,
            "chat": request.chat_id,
        }))
        .await?;

    let message = state
        .models
        .get(Entity::User)
        .ops()
        .populate(
            message,
            json!({ "path": "sender", "select": "userName profilePicture" }),
        )
        .await?;

    state
        .models
        .get(Entity::Chat)
        .ops()
        .find_by_id_and_update(
            request.chat_id.as_str(),
            json!({ "latestMessage": id_of(&message) }),
        )
        .await?;

    Ok(Json(DataResponse::new(message)))
}

/// GET /user/messages/:chat_id
pub async fn list_messages(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
) -> Result<Json<DataResponse>, AppError> {
    let messages = state
        .models
        .get(Entity::Message)
        .ops()
        .find(json!({ "chat": chat_id }))
        .populate("sender")
        .populate("chat")
        .await?;

    Ok(Json(DataResponse::list(messages)))
}
