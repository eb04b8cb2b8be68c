//! Authentication stage guard port
//!
//! The sign-up and login routes each sit behind a stage guard that decides
//! whether the request may reach the handler.

use async_trait::async_trait;
use axum::http::HeaderMap;

use crate::error::AppError;

/// The authentication stage a guard protects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthStage {
    Signup,
    Login,
}

impl std::fmt::Display for AuthStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthStage::Signup => write!(f, "signup"),
            AuthStage::Login => write!(f, "login"),
        }
    }
}

/// Admission check run before a stage's handler
#[async_trait]
pub trait StageGuard: Send + Sync {
    /// The stage this guard protects
    fn stage(&self) -> AuthStage;

    /// Admit or reject the request based on its headers
    async fn admit(&self, headers: &HeaderMap) -> Result<(), AppError>;
}
