//! Configurable behaviors
//!
//! A static operation or instance behavior is backed by a closure. Static
//! behaviors come in two kinds: immediate (answered synchronously) and
//! deferred (answered by a future). The kind decides whether a non-query
//! operation replies with a value or with a pending future.

use std::future::{Future, IntoFuture};
use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};
use serde_json::Value;

use crate::error::HarnessError;
use crate::harness::record::Record;

/// Future every deferred behavior resolves through
pub type BehaviorFuture = BoxFuture<'static, Result<Value, HarnessError>>;

type ImmediateFn = dyn Fn(&[Value]) -> Result<Value, HarnessError> + Send + Sync;
type DeferredFn = dyn Fn(Vec<Value>) -> BehaviorFuture + Send + Sync;
type InstanceFn = dyn Fn(&Record) -> BehaviorFuture + Send + Sync;

/// Behavior backing a static operation
#[derive(Clone)]
pub enum Behavior {
    Immediate(Arc<ImmediateFn>),
    Deferred(Arc<DeferredFn>),
}

impl Behavior {
    pub fn immediate<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, HarnessError> + Send + Sync + 'static,
    {
        Behavior::Immediate(Arc::new(f))
    }

    pub fn deferred<F, Fut>(f: F) -> Self
    where
        F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, HarnessError>> + Send + 'static,
    {
        Behavior::Deferred(Arc::new(move |args: Vec<Value>| f(args).boxed()))
    }

    /// Always answer `value` immediately
    pub fn returns(value: Value) -> Self {
        Behavior::immediate(move |_| Ok(value.clone()))
    }

    /// Always resolve to `value` through a future
    pub fn resolves(value: Value) -> Self {
        Behavior::deferred(move |_| future::ready(Ok(value.clone())))
    }

    /// Always fail through a future
    pub fn rejects(error: HarnessError) -> Self {
        Behavior::deferred(move |_| future::ready(Err(error.clone())))
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Behavior::Deferred(_))
    }

    /// Run the behavior, keeping its kind
    pub(crate) fn run(&self, args: Vec<Value>) -> Reply {
        match self {
            Behavior::Immediate(f) => Reply::Ready(f(&args)),
            Behavior::Deferred(f) => Reply::Pending(f(args)),
        }
    }
}

impl std::fmt::Debug for Behavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Behavior::Immediate(_) => write!(f, "Behavior::Immediate"),
            Behavior::Deferred(_) => write!(f, "Behavior::Deferred"),
        }
    }
}

/// Behavior bound to a constructed record
#[derive(Clone)]
pub struct InstanceBehavior(Arc<InstanceFn>);

impl InstanceBehavior {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(&Record) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, HarnessError>> + Send + 'static,
    {
        InstanceBehavior(Arc::new(move |record: &Record| f(record).boxed()))
    }

    /// Resolve to the record's own fields, unchanged
    pub fn save_unchanged() -> Self {
        InstanceBehavior::new(|record| future::ready(Ok(record.to_value())))
    }

    /// Resolve to `base` overlaid with the record's own fields
    pub fn save_over(base: Value) -> Self {
        InstanceBehavior::new(move |record| {
            future::ready(Ok(merge(base.clone(), &record.to_value())))
        })
    }

    pub(crate) fn call(&self, record: &Record) -> BehaviorFuture {
        (self.0)(record)
    }
}

impl std::fmt::Debug for InstanceBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "InstanceBehavior")
    }
}

/// Result of a non-query operation
///
/// Immediate behaviors reply with a value, deferred behaviors with a pending
/// future. Both are awaited the same way.
pub enum Reply {
    Ready(Result<Value, HarnessError>),
    Pending(BehaviorFuture),
}

impl Reply {
    pub fn is_pending(&self) -> bool {
        matches!(self, Reply::Pending(_))
    }

    /// The value, if it was answered immediately
    pub fn into_ready(self) -> Option<Result<Value, HarnessError>> {
        match self {
            Reply::Ready(result) => Some(result),
            Reply::Pending(_) => None,
        }
    }
}

impl IntoFuture for Reply {
    type Output = Result<Value, HarnessError>;
    type IntoFuture = BehaviorFuture;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            Reply::Ready(result) => future::ready(result).boxed(),
            Reply::Pending(fut) => fut,
        }
    }
}

impl std::fmt::Debug for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reply::Ready(result) => f.debug_tuple("Reply::Ready").field(result).finish(),
            Reply::Pending(_) => write!(f, "Reply::Pending"),
        }
    }
}

/// Overlay the object fields of `overlay` onto `base`
///
/// Non-object overlays contribute nothing; a non-object base is replaced by
/// an empty object first.
pub fn merge(base: Value, overlay: &Value) -> Value {
    let mut fields = match base {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    if let Value::Object(extra) = overlay {
        for (key, value) in extra {
            fields.insert(key.clone(), value.clone());
        }
    }
    Value::Object(fields)
}

/// Argument at `index`, or `null` when the caller passed fewer
pub fn arg(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or(Value::Null)
}

/// Loose truthiness of a JSON value, as persistence client callers test flags
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
