//! Authentication middleware

pub mod bearer;
pub mod stage;

pub use bearer::auth_middleware;
pub use stage::{login_stage, signup_stage};
