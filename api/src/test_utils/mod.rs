//! Test utilities
//!
//! Fixtures and an HTTP driver for exercising the router on top of a fresh
//! harness. Requests go through `tower::ServiceExt::oneshot`, so no socket
//! is ever bound.

pub mod app;
pub mod fixtures;

pub use app::*;
pub use fixtures::*;
