//! Persistence and identity harness
//!
//! Stand-ins for the document store, the token signer and the OTP source,
//! so the HTTP application can be exercised without a database or real
//! signing.
//!
//! A [`Harness`] owns one model per entity plus the identity stub. It is
//! injected into the application with [`Harness::install`] and cleared
//! between test cases with [`Harness::reset`]. Reset clears call histories
//! only: overridden behaviors stay in place until reassigned.

pub mod behavior;
pub mod defaults;
pub mod guards;
pub mod identity;
pub mod intercept;
pub mod model;
pub mod otp;
pub mod query;
pub mod record;
pub mod registry;

use std::sync::Arc;

pub use behavior::{Behavior, InstanceBehavior, Reply};
pub use identity::IdentityStub;
pub use model::{CallRecord, Invocation, Model, Operations};
pub use otp::FixedOtp;
pub use query::Query;
pub use record::Record;
pub use registry::ModelRegistry;

use crate::domain::entities::Entity;
use crate::AppState;

/// Shared handle on every harness object
#[derive(Clone, Debug)]
pub struct Harness {
    models: Arc<ModelRegistry>,
    identity: Arc<IdentityStub>,
    otp: Arc<FixedOtp>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_otp(FixedOtp::default())
    }

    pub fn with_otp_code(code: impl Into<String>) -> Self {
        Self::with_otp(FixedOtp::new(code))
    }

    fn with_otp(otp: FixedOtp) -> Self {
        Self {
            models: Arc::new(ModelRegistry::with_defaults()),
            identity: IdentityStub::shared(),
            otp: Arc::new(otp),
        }
    }

    pub fn model(&self, entity: Entity) -> &Model {
        self.models.get(entity)
    }

    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }

    pub fn identity(&self) -> &IdentityStub {
        &self.identity
    }

    pub fn otp(&self) -> &FixedOtp {
        &self.otp
    }

    pub(crate) fn models_handle(&self) -> Arc<ModelRegistry> {
        Arc::clone(&self.models)
    }

    pub(crate) fn identity_handle(&self) -> Arc<IdentityStub> {
        Arc::clone(&self.identity)
    }

    pub(crate) fn otp_handle(&self) -> Arc<FixedOtp> {
        Arc::clone(&self.otp)
    }

    /// Replace one static operation's behavior, returning the previous one
    pub fn override_op(
        &self,
        entity: Entity,
        operation: &str,
        behavior: Behavior,
    ) -> Option<Behavior> {
        self.model(entity).ops().set(operation, behavior)
    }

    /// Clear the call history of every model operation and of the identity stub
    ///
    /// Overridden behaviors and a pending one-shot verify override are kept.
    pub fn reset(&self) {
        self.models.clear_calls();
        self.identity.clear_calls();
        tracing::debug!("harness call history cleared");
    }

    /// Build the application's dependencies on top of this harness
    pub fn install(&self) -> AppState {
        intercept::install(self)
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
