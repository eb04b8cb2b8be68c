//! Identity payload domain entity
//!
//! The decoded identity carried by a bearer token.

use serde::{Deserialize, Serialize};

/// Decoded identity associated with a verified token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityPayload {
    pub id: String,
    /// Elevated-privilege marker, absent for regular users
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

impl IdentityPayload {
    pub fn user(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_admin: None,
        }
    }

    pub fn admin(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_admin: Some(true),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin.unwrap_or(false)
    }
}
