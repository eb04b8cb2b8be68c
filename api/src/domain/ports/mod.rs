//! Domain ports (traits)
//!
//! Port traits define interfaces that the application requires.
//! The harness provides the implementations the application is built with.

pub mod guard;
pub mod identity;
pub mod otp;

pub use guard::{AuthStage, StageGuard};
pub use identity::TokenVerifier;
pub use otp::OtpGenerator;
