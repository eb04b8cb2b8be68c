//! Store reports
//!
//! Any authenticated caller may pull these; the identity is only logged.

use axum::{extract::State, Extension, Json};
use serde_json::json;

use crate::domain::entities::{Entity, IdentityPayload};
use crate::error::AppError;
use crate::handlers::DataResponse;
use crate::AppState;

/// Every stored document of `entity`
async fn report(
    state: &AppState,
    identity: &IdentityPayload,
    entity: Entity,
) -> Result<Json<DataResponse>, AppError> {
    let rows = state.models.get(entity).ops().find(json!({})).lean().await?;
    tracing::debug!(
        report = %entity,
        caller = %identity.id,
        admin = identity.is_admin(),
        "Report generated"
    );

    Ok(Json(DataResponse::list(rows)))
}

/// POST /user/productReports
pub async fn product_reports(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityPayload>,
) -> Result<Json<DataResponse>, AppError> {
    report(&state, &identity, Entity::Product).await
}

/// POST /user/orderReports
pub async fn order_reports(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityPayload>,
) -> Result<Json<DataResponse>, AppError> {
    report(&state, &identity, Entity::Cart).await
}
