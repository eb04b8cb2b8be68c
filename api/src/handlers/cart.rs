//! Shop cart handlers

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::entities::{Entity, IdentityPayload};
use crate::error::AppError;
use crate::handlers::{id_of, DataResponse};
use crate::AppState;

/// Request body for adding a product to the cart
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: String,
    /// Quantity, sent either as a number or as a numeric string
    #[serde(default)]
    pub p_count: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub message: String,
    pub data: Value,
}

/// Parse a positive quantity; absent means one
fn parse_count(raw: Option<&Value>) -> Option<u64> {
    let count = match raw {
        None | Some(Value::Null) => return Some(1),
        Some(Value::Number(n)) => n.as_u64()?,
        Some(Value::String(s)) => s.trim().parse().ok()?,
        Some(_) => return None,
    };
    (count > 0).then_some(count)
}

/// Add `count` of `product_id` to `items`, bumping an existing line
///
/// `None` when the bumped count would overflow.
fn add_item(items: &Value, product_id: &str, count: u64) -> Option<Value> {
    let mut lines = items.as_array().cloned().unwrap_or_default();

    let existing = lines
        .iter_mut()
        .find(|line| line.get("productId").and_then(Value::as_str) == Some(product_id));
    match existing {
        Some(line) => {
            let current = line.get("count").and_then(Value::as_u64).unwrap_or(0);
            line["count"] = json!(current.checked_add(count)?);
        }
        None => lines.push(json!({ "productId": product_id, "count": count })),
    }

    Some(Value::Array(lines))
}

/// POST /user/addToCart
pub async fn add_to_cart(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityPayload>,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartResponse>, AppError> {
    let count = parse_count(request.p_count.as_ref())
        .ok_or_else(|| AppError::BadRequest("pCount must be a positive integer".to_string()))?;

    let product = state
        .models
        .get(Entity::Product)
        .ops()
        .find_by_id(request.product_id.as_str())
        .await?;
    if product.is_null() {
        return Err(AppError::NotFound(format!(
            "Product {}",
            request.product_id
        )));
    }

    let carts = state.models.get(Entity::Cart).ops();
    let cart = carts.find_one(json!({ "user": identity.id })).await?;

    let (message, data) = match id_of(&cart) {
        None => {
            let created = carts
                .create(json!({
                    "user": identity.id,
                    "items": [{ "productId": request.product_id, "count": count }],
                }))
                .await?;
            ("Cart created", created)
        }
        Some(cart_id) => {
            let items = add_item(&cart["items"], &request.product_id, count)
                .ok_or_else(|| AppError::BadRequest("pCount is too large".to_string()))?;
            let updated = carts
                .find_by_id_and_update(cart_id, json!({ "items": items }))
                .await?;
            ("Cart updated", updated)
        }
    };

    Ok(Json(CartResponse {
        message: message.to_string(),
        data,
    }))
}

/// POST /user/viewCart
pub async fn view_cart(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityPayload>,
) -> Result<Json<DataResponse>, AppError> {
    let cart = state
        .models
        .get(Entity::Cart)
        .ops()
        .find_one(json!({ "user": identity.id }))
        .populate("items.productId")
        .await?;

    if cart.is_null() {
        return Err(AppError::BadRequest("Cart is empty".to_string()));
    }

    Ok(Json(DataResponse::new(cart)))
}
