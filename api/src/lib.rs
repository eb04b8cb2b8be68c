//! Agora API
//!
//! Chat, community, shop and poll endpoints for a campus community app,
//! together with the harness that stands in for their document store, token
//! signer and OTP source. Handlers reach every external dependency through
//! [`AppState`], which [`harness::Harness::install`] fills with harness
//! objects.

use std::sync::Arc;

pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod harness;
pub mod router;

#[cfg(test)]
mod test_utils;


use domain::ports::{OtpGenerator, StageGuard, TokenVerifier};
use harness::ModelRegistry;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// One persistence handle per entity
    pub models: Arc<ModelRegistry>,
    pub verifier: Arc<dyn TokenVerifier>,
    pub otp: Arc<dyn OtpGenerator>,
    pub signup_guard: Arc<dyn StageGuard>,
    pub login_guard: Arc<dyn StageGuard>,
}
