//! Domain layer
//!
//! Contains the types and seams the application depends on.
//! - `entities`: Entity descriptors and the authenticated identity
//! - `ports`: Trait definitions for external dependencies

pub mod entities;
pub mod ports;
