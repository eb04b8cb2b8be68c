//! Dependency interception
//!
//! Builds the application's dependency bundle with every seam bound to a
//! harness object. The router built from the returned state never sees a
//! real persistence client, signer or OTP source.

use std::sync::Arc;

use crate::domain::ports::{AuthStage, OtpGenerator, StageGuard, TokenVerifier};
use crate::harness::guards::PassThroughGuard;
use crate::harness::Harness;
use crate::AppState;

/// Bind every application dependency to `harness`
pub fn install(harness: &Harness) -> AppState {
    let verifier: Arc<dyn TokenVerifier> = harness.identity_handle();
    let otp: Arc<dyn OtpGenerator> = harness.otp_handle();
    let signup_guard: Arc<dyn StageGuard> = Arc::new(PassThroughGuard::new(AuthStage::Signup));
    let login_guard: Arc<dyn StageGuard> = Arc::new(PassThroughGuard::new(AuthStage::Login));

    tracing::debug!("harness dependencies installed");

    AppState {
        models: harness.models_handle(),
        verifier,
        otp,
        signup_guard,
        login_guard,
    }
}
