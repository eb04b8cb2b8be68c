//! Token verification stand-in
//!
//! Accepts a fixed vocabulary of literal tokens and signs every identity
//! into the same literal. A one-shot override can take over the next
//! verification, for identities only known once a test has run a sign-up.

use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::entities::IdentityPayload;
use crate::domain::ports::TokenVerifier;
use crate::error::HarnessError;
use crate::harness::defaults::{MOCK_ADMIN_OBJECT_ID, MOCK_TEMP_ID, MOCK_USER_OBJECT_ID};

pub const USER_TOKEN: &str = "valid-user-token";
pub const TEMP_TOKEN: &str = "valid-temp-token";
pub const ADMIN_TOKEN: &str = "valid-admin-token";
pub const GENERIC_TOKEN: &str = "valid-token";

/// The literal every `sign` call returns
pub const SIGNED_TOKEN: &str = "signed-test-token";

/// Accepted literals, in no particular order
pub const ACCEPTED_TOKENS: [&str; 4] = [USER_TOKEN, TEMP_TOKEN, ADMIN_TOKEN, GENERIC_TOKEN];

type VerifyOverride = Box<dyn FnOnce(&str) -> Result<IdentityPayload, HarnessError> + Send>;

/// Deterministic [`TokenVerifier`] with call history
#[derive(Default)]
pub struct IdentityStub {
    verify_calls: Mutex<Vec<String>>,
    sign_calls: Mutex<Vec<IdentityPayload>>,
    next_verify: Mutex<Option<VerifyOverride>>,
}

impl IdentityStub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// The fixed token vocabulary
    pub fn decode(token: &str) -> Result<IdentityPayload, HarnessError> {
        match token {
            USER_TOKEN | GENERIC_TOKEN => Ok(IdentityPayload::user(MOCK_USER_OBJECT_ID)),
            TEMP_TOKEN => Ok(IdentityPayload::user(MOCK_TEMP_ID)),
            ADMIN_TOKEN => Ok(IdentityPayload::admin(MOCK_ADMIN_OBJECT_ID)),
            other => Err(HarnessError::InvalidToken(other.to_string())),
        }
    }

    /// Handle the next `verify` call with `f` instead of the fixed vocabulary
    ///
    /// Replaces any override that has not been consumed yet.
    pub fn verify_once<F>(&self, f: F)
    where
        F: FnOnce(&str) -> Result<IdentityPayload, HarnessError> + Send + 'static,
    {
        let mut next = self
            .next_verify
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *next = Some(Box::new(f));
    }

    pub fn has_pending_override(&self) -> bool {
        self.next_verify
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Tokens passed to `verify`, oldest first
    pub fn verify_calls(&self) -> Vec<String> {
        self.verify_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Payloads passed to `sign`, oldest first
    pub fn sign_calls(&self) -> Vec<IdentityPayload> {
        self.sign_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Clear both call histories; a pending override survives
    pub fn clear_calls(&self) {
        self.verify_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.sign_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl TokenVerifier for IdentityStub {
    fn verify(&self, token: &str) -> Result<IdentityPayload, HarnessError> {
        self.verify_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(token.to_string());

        let one_shot = self
            .next_verify
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        let result = match one_shot {
            Some(f) => f(token),
            None => Self::decode(token),
        };
        if let Err(e) = &result {
            tracing::debug!(error = %e, "token rejected");
        }
        result
    }

    fn sign(&self, payload: &IdentityPayload) -> String {
        self.sign_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(payload.clone());
        SIGNED_TOKEN.to_string()
    }
}

impl std::fmt::Debug for IdentityStub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityStub")
            .field("verify_calls", &self.verify_calls())
            .field("sign_calls", &self.sign_calls())
            .field("pending_override", &self.has_pending_override())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_fixed_vocabulary() {
        let stub = IdentityStub::new();

        assert_eq!(
            stub.verify(USER_TOKEN),
            Ok(IdentityPayload::user(MOCK_USER_OBJECT_ID))
        );
        assert_eq!(
            stub.verify(GENERIC_TOKEN),
            Ok(IdentityPayload::user(MOCK_USER_OBJECT_ID))
        );
        assert_eq!(
            stub.verify(TEMP_TOKEN),
            Ok(IdentityPayload::user(MOCK_TEMP_ID))
        );
    }

    #[test]
    fn admin_token_carries_elevated_marker() {
        let payload = IdentityStub::new().verify(ADMIN_TOKEN).unwrap();

        assert_eq!(payload.id, MOCK_ADMIN_OBJECT_ID);
        assert_eq!(payload.is_admin, Some(true));
    }

    #[test]
    fn rejects_everything_else() {
        let stub = IdentityStub::new();

        for token in ["garbage", "", "VALID-USER-TOKEN", "valid-user-token ", SIGNED_TOKEN] {
            assert_eq!(
                stub.verify(token),
                Err(HarnessError::InvalidToken(token.to_string()))
            );
        }
    }

    #[test]
    fn verify_is_pure_over_vocabulary() {
        let stub = IdentityStub::new();

        for token in ACCEPTED_TOKENS {
            assert_eq!(stub.verify(token), stub.verify(token));
            assert_eq!(stub.verify(token), IdentityStub::decode(token));
        }
    }

    #[test]
    fn sign_always_returns_the_same_literal() {
        let stub = IdentityStub::new();

        assert_eq!(stub.sign(&IdentityPayload::user("a")), SIGNED_TOKEN);
        assert_eq!(stub.sign(&IdentityPayload::admin("b")), SIGNED_TOKEN);
        assert_eq!(stub.sign_calls().len(), 2);
    }

    #[test]
    fn override_applies_to_exactly_one_call() {
        let stub = IdentityStub::new();
        stub.verify_once(|_| Ok(IdentityPayload::user("mockUserId")));

        assert!(stub.has_pending_override());
        assert_eq!(
            stub.verify(USER_TOKEN),
            Ok(IdentityPayload::user("mockUserId"))
        );
        assert!(!stub.has_pending_override());
        assert_eq!(
            stub.verify(USER_TOKEN),
            Ok(IdentityPayload::user(MOCK_USER_OBJECT_ID))
        );
    }

    #[test]
    fn override_can_reject() {
        let stub = IdentityStub::new();
        stub.verify_once(|token| Err(HarnessError::InvalidToken(token.to_string())));

        assert!(stub.verify(ADMIN_TOKEN).is_err());
        assert!(stub.verify(ADMIN_TOKEN).is_ok());
    }

    #[test]
    fn clear_calls_keeps_pending_override() {
        let stub = IdentityStub::new();
        stub.verify(USER_TOKEN).unwrap();
        stub.sign(&IdentityPayload::user("a"));
        stub.verify_once(|_| Ok(IdentityPayload::user("x")));

        stub.clear_calls();

        assert!(stub.verify_calls().is_empty());
        assert!(stub.sign_calls().is_empty());
        assert!(stub.has_pending_override());
    }

    #[test]
    fn records_every_verification() {
        let stub = IdentityStub::new();
        let _ = stub.verify(USER_TOKEN);
        let _ = stub.verify("garbage");

        assert_eq!(stub.verify_calls(), vec![USER_TOKEN, "garbage"]);
    }
}
