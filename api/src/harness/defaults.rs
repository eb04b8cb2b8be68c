//! Default behaviors per entity
//!
//! Every model ships a deterministic answer for each operation it exposes.
//! Tests override individual operations when a scenario needs a different
//! answer.

use serde_json::{json, Value};

use crate::domain::entities::Entity;
use crate::harness::behavior::{arg, merge, truthy, Behavior, InstanceBehavior};
use crate::harness::model::{
    Model, CREATE, DELETE_MANY, FIND, FIND_BY_ID, FIND_BY_ID_AND_UPDATE, FIND_ONE,
    FIND_ONE_AND_UPDATE, POPULATE,
};

/// Identifier of the regular test user; shaped like a document-store object id
pub const MOCK_USER_OBJECT_ID: &str = "60b8d5a5f8a0c201d4a0b2c1";
/// Identifier of the administrator
pub const MOCK_ADMIN_OBJECT_ID: &str = "60b8d5a5f8a0c201d4a0b2c2";
/// Identifier assigned to temporary phone-number records
pub const MOCK_TEMP_ID: &str = "mockTempId";

pub const CREATED_CHAT_ID: &str = "createdChatId";
pub const COMMUNITY_ID: &str = "comm1";
pub const CART_ID: &str = "cart1";
pub const POLL_ID: &str = "poll1";
pub const CREATED_MESSAGE_ID: &str = "createdMsgId";

/// The model for `entity`, configured with its defaults
pub fn model_for(entity: Entity) -> Model {
    match entity {
        Entity::User => user(),
        Entity::Chat => chat(),
        Entity::Community => community(),
        Entity::Otp => otp(),
        Entity::TempNumber => temp_number(),
        Entity::Cart => cart(),
        Entity::Product => product(),
        Entity::Poll => poll(),
        Entity::Login => login(),
        Entity::Message => message(),
    }
}

/// `{ _id: <first argument> }` overlaid with `extra`
fn by_id(extra: Value) -> Behavior {
    Behavior::deferred(move |args| {
        let doc = merge(json!({ "_id": arg(&args, 0) }), &extra);
        async move { Ok(doc) }
    })
}

/// `{ _id: <first argument>, ...<second argument> }`
fn update_by_id() -> Behavior {
    Behavior::deferred(|args| async move {
        Ok(merge(json!({ "_id": arg(&args, 0) }), &arg(&args, 1)))
    })
}

/// `{ _id: id, ...<argument at index> }`
fn with_fixed_id(id: &'static str, index: usize) -> Behavior {
    Behavior::deferred(move |args| async move { Ok(merge(json!({ "_id": id }), &arg(&args, index))) })
}

fn user() -> Model {
    Model::builder(Entity::User)
        .operation(FIND_ONE, Behavior::returns(Value::Null))
        .operation(
            FIND_BY_ID,
            by_id(json!({ "firstName": "Mock", "profilePicture": "1" })),
        )
        .operation(FIND_BY_ID_AND_UPDATE, update_by_id())
        .operation(CREATE, with_fixed_id(MOCK_USER_OBJECT_ID, 0))
        .operation(
            POPULATE,
            Behavior::deferred(|args| async move { Ok(arg(&args, 0)) }),
        )
        .instance("save", InstanceBehavior::save_unchanged())
        .build()
}

fn chat() -> Model {
    Model::builder(Entity::Chat)
        .operation(FIND, Behavior::returns(json!([])))
        .operation(
            FIND_ONE,
            Behavior::returns(json!({
                "_id": CREATED_CHAT_ID,
                "isGroupChat": true,
                "users": [MOCK_USER_OBJECT_ID],
            })),
        )
        .operation(
            CREATE,
            Behavior::deferred(|args| async move {
                let data = arg(&args, 0);
                let mut chat = merge(json!({ "_id": CREATED_CHAT_ID }), &data);
                chat["isGroupChat"] = group_chat_marker(&data);
                Ok(chat)
            }),
        )
        .operation(FIND_BY_ID_AND_UPDATE, update_by_id())
        .operation(FIND_BY_ID, by_id(json!({})))
        .build()
}

/// An explicit truthy `isGroupChat` wins; otherwise whether `chatType` is `group`
fn group_chat_marker(data: &Value) -> Value {
    match data.get("isGroupChat") {
        Some(flag) if truthy(flag) => flag.clone(),
        _ => Value::Bool(data.get("chatType").and_then(Value::as_str) == Some("group")),
    }
}

fn community() -> Model {
    Model::builder(Entity::Community)
        .operation(FIND, Behavior::returns(json!([])))
        .operation(FIND_BY_ID, by_id(json!({ "users": [] })))
        .operation(FIND_ONE_AND_UPDATE, with_fixed_id(COMMUNITY_ID, 1))
        .build()
}

fn otp() -> Model {
    Model::builder(Entity::Otp)
        .operation(FIND, Behavior::resolves(json!([])))
        .operation(DELETE_MANY, Behavior::resolves(json!({})))
        .build()
}

fn temp_number() -> Model {
    Model::builder(Entity::TempNumber)
        .instance(
            "save",
            InstanceBehavior::save_over(json!({ "_id": MOCK_TEMP_ID })),
        )
        .build()
}

fn cart() -> Model {
    Model::builder(Entity::Cart)
        .operation(FIND_ONE, Behavior::returns(Value::Null))
        .operation(CREATE, with_fixed_id(CART_ID, 0))
        .operation(FIND_BY_ID, by_id(json!({})))
        .operation(FIND, Behavior::returns(json!([])))
        .build()
}

fn product() -> Model {
    Model::builder(Entity::Product)
        .operation(
            FIND_BY_ID,
            by_id(json!({ "productName": "Mock Product" })),
        )
        .operation(FIND, Behavior::resolves(json!([])))
        .build()
}

fn poll() -> Model {
    Model::builder(Entity::Poll)
        .operation(CREATE, with_fixed_id(POLL_ID, 0))
        .operation(FIND, Behavior::returns(json!([])))
        .operation(FIND_BY_ID_AND_UPDATE, update_by_id())
        .instance("save", InstanceBehavior::save_unchanged())
        .build()
}

fn login() -> Model {
    Model::builder(Entity::Login)
        .operation(FIND_ONE, Behavior::returns(Value::Null))
        .build()
}

fn message() -> Model {
    Model::builder(Entity::Message)
        .operation(CREATE, with_fixed_id(CREATED_MESSAGE_ID, 0))
        .operation(FIND, Behavior::returns(json!([])))
        .build()
}
