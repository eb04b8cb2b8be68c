//! HTTP handlers
//!
//! Axum request handlers for the API endpoints. Every handler reaches
//! persistence through the models in [`crate::AppState`].

pub mod cart;
pub mod chats;
pub mod communities;
pub mod messages;
pub mod polls;
pub mod reports;
pub mod users;

use serde::Serialize;
use serde_json::Value;

pub use cart::{add_to_cart, view_cart};
pub use chats::{access_chat, create_group, fetch_chats};
pub use communities::{create_community, get_communities};
pub use messages::{list_messages, send_message};
pub use polls::create_poll;
pub use reports::{order_reports, product_reports};
pub use users::{get_profile, login, sign_up};

/// Envelope for single-document and list responses
#[derive(Debug, Serialize)]
pub struct DataResponse {
    pub data: Value,
}

impl DataResponse {
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    /// A list response; an absent result becomes an empty list
    pub fn list(data: Value) -> Self {
        match data {
            Value::Null => Self::new(Value::Array(Vec::new())),
            other => Self::new(other),
        }
    }
}

/// The `_id` of a document, as a string
pub(crate) fn id_of(doc: &Value) -> Option<String> {
    match doc.get("_id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_normalizes_absent_result() {
        assert_eq!(DataResponse::list(Value::Null).data, json!([]));
        assert_eq!(DataResponse::list(json!([1])).data, json!([1]));
    }

    #[test]
    fn id_of_reads_string_and_numeric_ids() {
        assert_eq!(id_of(&json!({ "_id": "comm1" })), Some("comm1".to_string()));
        assert_eq!(id_of(&json!({ "_id": 7 })), Some("7".to_string()));
        assert_eq!(id_of(&json!({ "name": "x" })), None);
        assert_eq!(id_of(&Value::Null), None);
    }
}
