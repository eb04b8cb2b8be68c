//! Account handlers
//!
//! Sign-up, login and profile endpoints.

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::entities::{Entity, IdentityPayload};
use crate::error::AppError;
use crate::handlers::{id_of, DataResponse};
use crate::harness::behavior::truthy;
use crate::AppState;

/// Digits in a sign-up passcode
const OTP_LENGTH: usize = 4;

/// Request body for sign-up
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(rename = "fName")]
    pub first_name: String,
    #[serde(rename = "lName")]
    pub last_name: String,
    pub mail: String,
    pub phone: String,
    pub password: String,
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    /// Department
    #[serde(default)]
    pub e1: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub message: String,
    pub user_name: String,
    /// Identifier of the pending phone verification
    pub temp_id: Option<String>,
}

/// POST /user/signUp
///
/// Register a user and issue a passcode for their phone number.
pub async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<SignupResponse>, AppError> {
    if request.user_name.trim().is_empty() || request.password.is_empty() {
        return Err(AppError::BadRequest(
            "userName and password are required".to_string(),
        ));
    }

    let users = state.models.get(Entity::User);
    let existing = users
        .ops()
        .find_one(json!({ "userName": request.user_name }))
        .await?;
    if !existing.is_null() {
        return Err(AppError::BadRequest("User already exists".to_string()));
    }

    users
        .build(json!({
            "firstName": request.first_name,
            "lastName": request.last_name,
            "email": request.mail,
            "phone": request.phone,
            "password": request.password,
            "userName": request.user_name,
            "dob": request.dob,
            "gender": request.gender,
            "department": request.e1,
        }))
        .save()
        .await?;

    // Only the latest passcode per phone number stays valid
    state
        .models
        .get(Entity::Otp)
        .ops()
        .delete_many(json!({ "phone": request.phone }))
        .await?;

    let code = state.otp.generate(OTP_LENGTH);
    let temp = state
        .models
        .get(Entity::TempNumber)
        .build(json!({ "phone": request.phone, "otp": code }))
        .save()
        .await?;

    tracing::debug!(user_name = %request.user_name, "Sign-up passcode issued");

    Ok(Json(SignupResponse {
        message: "OTP sent to your phone number".to_string(),
        user_name: request.user_name,
        temp_id: id_of(&temp),
    }))
}

/// Request body for login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "userName")]
    pub user_name: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// The stored user, without its password
    pub user: Value,
}

/// POST /user/login
///
/// Check credentials and sign a token for the user.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let mut user = state
        .models
        .get(Entity::User)
        .ops()
        .find_one(json!({ "userName": request.user_name }))
        .await?;

    let password_matches =
        user.get("password").and_then(Value::as_str) == Some(request.password.as_str());
    if user.is_null() || !password_matches {
        return Err(AppError::BadRequest("Invalid credentials".to_string()));
    }

    let id = id_of(&user)
        .ok_or_else(|| AppError::Internal("stored user has no _id".to_string()))?;
    let identity = match user.get("isAdmin") {
        Some(flag) if truthy(flag) => IdentityPayload::admin(id),
        _ => IdentityPayload::user(id),
    };
    let token = state.verifier.sign(&identity);

    if let Value::Object(fields) = &mut user {
        fields.remove("password");
    }

    Ok(Json(LoginResponse { token, user }))
}

/// GET /user/profile
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityPayload>,
) -> Result<Json<DataResponse>, AppError> {
    let profile = state
        .models
        .get(Entity::User)
        .ops()
        .find_by_id(identity.id.as_str())
        .select("-password")
        .lean()
        .await?;

    if profile.is_null() {
        return Err(AppError::NotFound(format!("User {}", identity.id)));
    }

    Ok(Json(DataResponse::new(profile)))
}
