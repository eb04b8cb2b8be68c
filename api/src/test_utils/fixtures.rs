//! Test fixtures
//!
//! Request bodies and stored documents with sensible defaults. Each fixture
//! can be customized by overlaying fields.

use serde_json::{json, Value};

use crate::harness::behavior::merge;

/// Identifier the login fixture stores its user under
pub const FIXTURE_USER_ID: &str = "mockUserId";

/// Sign-up request body, with `overrides` laid over the defaults
pub fn signup_payload(overrides: Value) -> Value {
    merge(
        json!({
            "fName": "Test",
            "lName": "User",
            "mail": "test.user@example.com",
            "phone": "9999999990",
            "password": "password",
            "userName": "testuser",
            "dob": "1990-01-01",
            "gender": "Other",
            "e1": "CSE"
        }),
        &overrides,
    )
}

/// The user document a successful sign-up of `payload` would have stored
pub fn stored_user(payload: &Value) -> Value {
    json!({
        "_id": FIXTURE_USER_ID,
        "userName": payload["userName"],
        "password": payload["password"],
        "profilePicture": "1",
        "firstName": payload["fName"],
        "lastName": payload["lName"],
        "email": payload["mail"]
    })
}

/// A stored cart holding one line of `prod1`
pub fn test_cart(user: &str) -> Value {
    json!({
        "_id": "mockCartId",
        "user": user,
        "items": [{ "productId": "prod1", "count": 1 }]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_payload_overrides_single_fields() {
        let payload = signup_payload(json!({ "userName": "groupuser" }));

        assert_eq!(payload["userName"], json!("groupuser"));
        assert_eq!(payload["fName"], json!("Test"));
    }

    #[test]
    fn stored_user_carries_login_credentials() {
        let user = stored_user(&signup_payload(json!({})));

        assert_eq!(user["_id"], json!(FIXTURE_USER_ID));
        assert_eq!(user["password"], json!("password"));
        assert_eq!(user["email"], json!("test.user@example.com"));
    }
}
