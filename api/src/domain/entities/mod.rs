//! Domain entities
//!
//! The entity descriptors the application persists and the identity it
//! authenticates. Documents themselves are schemaless JSON records.

pub mod entity;
pub mod identity;

pub use entity::Entity;
pub use identity::IdentityPayload;
