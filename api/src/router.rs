//! Route table

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::auth;
use crate::handlers;
use crate::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the application router on top of `state`
pub fn build_router(state: AppState) -> Router {
    // Sign-up and login each sit behind their stage guard
    let signup_routes = Router::new()
        .route("/user/signUp", post(handlers::sign_up))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::signup_stage,
        ));

    let login_routes = Router::new()
        .route("/user/login", post(handlers::login))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::login_stage,
        ));

    // Protected routes
    let protected_routes = Router::new()
        .route("/user/profile", get(handlers::get_profile))
        // Chats
        .route("/user/crtgroup", post(handlers::create_group))
        .route("/user/accessChat/:id", post(handlers::access_chat))
        .route("/user/fetchChat", get(handlers::fetch_chats))
        // Messages
        .route("/user/sendMessage", post(handlers::send_message))
        .route("/user/messages/:chat_id", get(handlers::list_messages))
        // Communities
        .route("/user/createCommunity", post(handlers::create_community))
        .route("/user/getCommunity", post(handlers::get_communities))
        // Shop
        .route("/user/addToCart", post(handlers::add_to_cart))
        .route("/user/viewCart", post(handlers::view_cart))
        // Polls
        .route("/user/createPolls", post(handlers::create_poll))
        // Admin reports
        .route("/user/productReports", post(handlers::product_reports))
        .route("/user/orderReports", post(handlers::order_reports))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(health))
        .merge(signup_routes)
        .merge(login_routes)
        .merge(protected_routes)
        .with_state(state)
}
