//! Sign-up and login stage middleware
//!
//! Each stage delegates the admission decision to the guard installed in
//! [`AppState`].

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};

use crate::error::AppError;
use crate::AppState;

pub async fn signup_stage(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let headers = request.headers();
    state.signup_guard.admit(headers).await?;
    Ok(next.run(request).await)
}

pub async fn login_stage(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let headers = request.headers();
    state.login_guard.admit(headers).await?;
    Ok(next.run(request).await)
}
