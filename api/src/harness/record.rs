//! Emulated documents
//!
//! A [`Record`] is what a model's construction entry point produces: a plain
//! mutable map of fields plus the instance behaviors of its entity.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::domain::entities::Entity;
use crate::error::HarnessError;
use crate::harness::behavior::{InstanceBehavior, Reply};

pub type InstanceTable = BTreeMap<String, InstanceBehavior>;

/// One emulated document
#[derive(Clone)]
pub struct Record {
    entity: Entity,
    fields: Map<String, Value>,
    behaviors: Arc<InstanceTable>,
}

impl Record {
    /// Copy the fields of `data` onto a fresh record
    ///
    /// Never fails: data that is not an object contributes no fields.
    pub(crate) fn new(entity: Entity, data: Value, behaviors: Arc<InstanceTable>) -> Self {
        let fields = match data {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            entity,
            fields,
            behaviors,
        }
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Shallow copy of the record's own fields
    pub fn to_plain_object(&self) -> Map<String, Value> {
        self.fields.clone()
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.to_plain_object())
    }

    pub fn has_behavior(&self, name: &str) -> bool {
        self.behaviors.contains_key(name)
    }

    pub fn behavior_names(&self) -> impl Iterator<Item = &str> {
        self.behaviors.keys().map(String::as_str)
    }

    /// Invoke an instance behavior bound to this record
    pub fn call(&self, name: &str) -> Reply {
        match self.behaviors.get(name) {
            Some(behavior) => Reply::Pending(behavior.call(self)),
            None => Reply::Ready(Err(HarnessError::UnconfiguredBehavior {
                entity: self.entity,
                operation: name.to_string(),
            })),
        }
    }

    /// Persist the record through its `save` behavior
    pub async fn save(&self) -> Result<Value, HarnessError> {
        self.call("save").await
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl std::fmt::Debug for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Record")
            .field("entity", &self.entity)
            .field("fields", &self.fields)
            .field("behaviors", &self.behaviors.keys().collect::<Vec<_>>())
            .finish()
    }
}
