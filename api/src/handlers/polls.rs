//! Poll handlers

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::entities::{Entity, IdentityPayload};
use crate::error::AppError;
use crate::handlers::DataResponse;
use crate::AppState;

const MIN_OPTIONS: usize = 2;

/// Request body for poll creation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePollRequest {
    /// The question being asked
    pub context: String,
    pub community_id: String,
    pub options: Vec<String>,
}

/// POST /user/createPolls
///
/// Create a poll in a community. Every option starts with zero votes.
pub async fn create_poll(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityPayload>,
    Json(request): Json<CreatePollRequest>,
) -> Result<(StatusCode, Json<DataResponse>), AppError> {
    if request.context.trim().is_empty() {
        return Err(AppError::BadRequest("context is required".to_string()));
    }

    let options: Vec<Value> = request
        .options
        .iter()
        .map(|option| option.trim())
        .filter(|option| !option.is_empty())
        .map(|option| json!({ "text": option, "votes": 0 }))
        .collect();
    if options.len() < MIN_OPTIONS {
        return Err(AppError::BadRequest(format!(
            "A poll needs at least {} options",
            MIN_OPTIONS
        )));
    }

    let poll = state
        .models
        .get(Entity::Poll)
        .build(json!({
            "context": request.context,
            "community": request.community_id,
            "createdBy": identity.id,
            "options": options,
        }))
        .save()
        .await?;

    Ok((StatusCode::CREATED, Json(DataResponse::new(poll))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_create_poll_request() {
        let json = r#"{"context": "Favorite language?", "communityId": "comm1", "options": ["JS", "C++"]}"#;
        let request: CreatePollRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.community_id, "comm1");
        assert_eq!(request.options, vec!["JS", "C++"]);
    }
}
