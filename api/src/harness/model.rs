//! Dual-mode models
//!
//! A [`Model`] stands in for one collection of the document store. It has
//! two entry points:
//! - construction (`build`, `new_record`) producing a [`Record`]
//! - an operations table (`ops()`) of named static operations
//!
//! Find-family operations answer with a chainable [`Query`]; every other
//! operation answers with a [`Reply`]. Every invocation is recorded in the
//! operation's call history before its behavior runs.

use std::collections::BTreeMap;
use std::future::IntoFuture;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use futures::future::{BoxFuture, FutureExt};
use serde::Serialize;
use serde_json::Value;

use crate::domain::entities::Entity;
use crate::error::HarnessError;
use crate::harness::behavior::{Behavior, InstanceBehavior, Reply};
use crate::harness::query::Query;
use crate::harness::record::{InstanceTable, Record};

pub const FIND: &str = "find";
pub const FIND_ONE: &str = "findOne";
pub const FIND_BY_ID: &str = "findById";
pub const FIND_BY_ID_AND_UPDATE: &str = "findByIdAndUpdate";
pub const FIND_ONE_AND_UPDATE: &str = "findOneAndUpdate";
pub const CREATE: &str = "create";
pub const DELETE_MANY: &str = "deleteMany";
pub const POPULATE: &str = "populate";

/// Operations whose callers expect a chainable query back
pub const QUERY_OPERATIONS: [&str; 4] = [FIND, FIND_ONE, FIND_BY_ID, FIND_BY_ID_AND_UPDATE];

pub fn is_query_operation(name: &str) -> bool {
    QUERY_OPERATIONS.contains(&name)
}

/// One recorded invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallRecord {
    pub args: Vec<Value>,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Default)]
struct Slot {
    behavior: Option<Behavior>,
    calls: Vec<CallRecord>,
}

/// Result of [`Operations::invoke`], shaped by the operation name
#[derive(Debug)]
pub enum Invocation {
    Query(Query),
    Reply(Reply),
}

impl IntoFuture for Invocation {
    type Output = Result<Value, HarnessError>;
    type IntoFuture = BoxFuture<'static, Result<Value, HarnessError>>;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            Invocation::Query(query) => query.into_future().boxed(),
            Invocation::Reply(reply) => reply.into_future(),
        }
    }
}

/// Named static operations of one model, with their call histories
pub struct Operations {
    entity: Entity,
    slots: RwLock<BTreeMap<String, Slot>>,
}

impl Operations {
    fn new(entity: Entity, behaviors: BTreeMap<String, Behavior>) -> Self {
        let slots = behaviors
            .into_iter()
            .map(|(name, behavior)| {
                let slot = Slot {
                    behavior: Some(behavior),
                    calls: Vec::new(),
                };
                (name, slot)
            })
            .collect();
        Self {
            entity,
            slots: RwLock::new(slots),
        }
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Invoke an operation by name
    ///
    /// The call is recorded first, then the configured behavior runs. An
    /// operation with no behavior fails with
    /// [`HarnessError::UnconfiguredBehavior`].
    pub fn invoke(&self, name: &str, args: Vec<Value>) -> Invocation {
        let reply = self.dispatch(name, args);
        if is_query_operation(name) {
            Invocation::Query(Query::from_reply(reply))
        } else {
            Invocation::Reply(reply)
        }
    }

    fn dispatch(&self, name: &str, args: Vec<Value>) -> Reply {
        let behavior = {
            let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
            let slot = slots.entry(name.to_string()).or_default();
            slot.calls.push(CallRecord {
                args: args.clone(),
                recorded_at: Utc::now(),
            });
            slot.behavior.clone()
        };

        tracing::trace!(entity = %self.entity, operation = name, "static operation invoked");

        match behavior {
            Some(behavior) => behavior.run(args),
            None => Reply::Ready(Err(HarnessError::UnconfiguredBehavior {
                entity: self.entity,
                operation: name.to_string(),
            })),
        }
    }

    fn query(&self, name: &str, args: Vec<Value>) -> Query {
        Query::from_reply(self.dispatch(name, args))
    }

    pub fn find(&self, filter: Value) -> Query {
        self.query(FIND, vec![filter])
    }

    pub fn find_one(&self, filter: Value) -> Query {
        self.query(FIND_ONE, vec![filter])
    }

    pub fn find_by_id(&self, id: impl Into<Value>) -> Query {
        self.query(FIND_BY_ID, vec![id.into()])
    }

    pub fn find_by_id_and_update(&self, id: impl Into<Value>, update: Value) -> Query {
        self.query(FIND_BY_ID_AND_UPDATE, vec![id.into(), update])
    }

    pub fn find_one_and_update(&self, filter: Value, update: Value) -> Reply {
        self.dispatch(FIND_ONE_AND_UPDATE, vec![filter, update])
    }

    pub fn create(&self, data: Value) -> Reply {
        self.dispatch(CREATE, vec![data])
    }

    pub fn delete_many(&self, filter: Value) -> Reply {
        self.dispatch(DELETE_MANY, vec![filter])
    }

    /// Populate references on an already loaded document
    pub fn populate(&self, document: Value, options: Value) -> Reply {
        self.dispatch(POPULATE, vec![document, options])
    }

    /// Replace the behavior of an operation, returning the previous one
    ///
    /// The call history of the operation is kept.
    pub fn set(&self, name: &str, behavior: Behavior) -> Option<Behavior> {
        tracing::debug!(entity = %self.entity, operation = name, "behavior overridden");
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        slots
            .entry(name.to_string())
            .or_default()
            .behavior
            .replace(behavior)
    }

    pub fn behavior(&self, name: &str) -> Option<Behavior> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots.get(name).and_then(|slot| slot.behavior.clone())
    }

    /// Names of operations with a configured behavior
    pub fn names(&self) -> Vec<String> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots
            .iter()
            .filter(|(_, slot)| slot.behavior.is_some())
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn calls(&self, name: &str) -> Vec<CallRecord> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots
            .get(name)
            .map(|slot| slot.calls.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self, name: &str) -> usize {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots.get(name).map_or(0, |slot| slot.calls.len())
    }

    pub fn last_call(&self, name: &str) -> Option<CallRecord> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots.get(name).and_then(|slot| slot.calls.last().cloned())
    }

    /// Clear every call history, keeping behaviors
    pub fn clear_calls(&self) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        for slot in slots.values_mut() {
            slot.calls.clear();
        }
    }
}

/// A collection stand-in: record constructor plus static operations
pub struct Model {
    entity: Entity,
    ops: Operations,
    instance: Arc<InstanceTable>,
}

impl Model {
    pub fn builder(entity: Entity) -> ModelBuilder {
        ModelBuilder {
            entity,
            statics: BTreeMap::new(),
            instance: InstanceTable::new(),
        }
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    pub fn ops(&self) -> &Operations {
        &self.ops
    }

    /// Construct a record, as `new Model(data)` would
    pub fn new_record(&self, data: Value) -> Record {
        Record::new(self.entity, data, Arc::clone(&self.instance))
    }

    /// Construct a record, as the unqualified call `Model(data)` would
    ///
    /// Callers construct records both with and without `new`, and both forms
    /// must produce the same record.
    pub fn build(&self, data: Value) -> Record {
        self.new_record(data)
    }

    /// Construct a record with no data
    pub fn build_empty(&self) -> Record {
        self.new_record(Value::Object(serde_json::Map::new()))
    }

    /// Names of the instance behaviors records carry
    pub fn instance_behaviors(&self) -> impl Iterator<Item = &str> {
        self.instance.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("entity", &self.entity)
            .field("operations", &self.ops.names())
            .field("instance", &self.instance.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for a [`Model`]
pub struct ModelBuilder {
    entity: Entity,
    statics: BTreeMap<String, Behavior>,
    instance: InstanceTable,
}

impl ModelBuilder {
    pub fn operation(mut self, name: &str, behavior: Behavior) -> Self {
        self.statics.insert(name.to_string(), behavior);
        self
    }

    pub fn instance(mut self, name: &str, behavior: InstanceBehavior) -> Self {
        self.instance.insert(name.to_string(), behavior);
        self
    }

    pub fn build(self) -> Model {
        Model {
            entity: self.entity,
            ops: Operations::new(self.entity, self.statics),
            instance: Arc::new(self.instance),
        }
    }
}
