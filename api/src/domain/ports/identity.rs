//! Token verification port
//!
//! Abstracts the token signing/verification dependency used by the bearer
//! middleware and the login handler.

use crate::domain::entities::IdentityPayload;
use crate::error::HarnessError;

/// Signs identities into bearer tokens and verifies them back
pub trait TokenVerifier: Send + Sync {
    /// Decode a token into its identity
    ///
    /// Fails with [`HarnessError::InvalidToken`] for unrecognized tokens.
    fn verify(&self, token: &str) -> Result<IdentityPayload, HarnessError>;

    /// Issue a token for an identity
    fn sign(&self, payload: &IdentityPayload) -> String;
}
