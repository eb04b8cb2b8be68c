//! Chainable query handle
//!
//! Stands in for the lazy query object a document store returns from its
//! find-family operations. Chain calls (`populate`, `select`, `sort`, `lean`)
//! are accepted and ignored, and the handle resolves to its fixed result
//! either through [`Query::exec`] or by awaiting it directly.

use std::future::IntoFuture;

use futures::future::{self, FutureExt, Shared};
use serde_json::Value;

use crate::error::HarnessError;
use crate::harness::behavior::{BehaviorFuture, Reply};

/// Future returned by [`Query::exec`]
pub type QueryFuture = Shared<BehaviorFuture>;

/// A chainable, awaitable handle around a fixed result
///
/// The result is a record object, an array of records, or `null`. Clones
/// share the same underlying result.
#[derive(Clone)]
pub struct Query {
    result: QueryFuture,
}

impl Query {
    /// Wrap a value that is already known
    pub fn ready(value: Value) -> Self {
        Self::resolved(Ok(value))
    }

    /// Wrap a failure; every awaiter observes it
    pub fn failed(error: HarnessError) -> Self {
        Self::resolved(Err(error))
    }

    /// Wrap a result that is produced later
    pub fn deferred(result: BehaviorFuture) -> Self {
        Self {
            result: result.shared(),
        }
    }

    fn resolved(result: Result<Value, HarnessError>) -> Self {
        Self::deferred(future::ready(result).boxed())
    }

    pub(crate) fn from_reply(reply: Reply) -> Self {
        match reply {
            Reply::Ready(result) => Self::resolved(result),
            Reply::Pending(fut) => Self::deferred(fut),
        }
    }

    pub fn populate(self, _path: impl Into<Value>) -> Self {
        self
    }

    pub fn select(self, _fields: impl Into<Value>) -> Self {
        self
    }

    pub fn sort(self, _order: impl Into<Value>) -> Self {
        self
    }

    pub fn lean(self) -> Self {
        self
    }

    /// Resolve to the wrapped result
    ///
    /// May be called any number of times; every returned future resolves to
    /// the same result.
    pub fn exec(&self) -> QueryFuture {
        self.result.clone()
    }

    /// The result, if some awaiter has already resolved it
    pub fn peek(&self) -> Option<Result<Value, HarnessError>> {
        self.result.peek().cloned()
    }
}

impl IntoFuture for Query {
    type Output = Result<Value, HarnessError>;
    type IntoFuture = QueryFuture;

    fn into_future(self) -> Self::IntoFuture {
        self.result
    }
}

impl std::fmt::Debug for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Query")
            .field("result", &self.peek())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio_test::{assert_ready, task};

    fn chats() -> Value {
        json!([{ "_id": "c2", "updatedAt": 1 }, { "_id": "c1", "updatedAt": 2 }])
    }

    #[tokio::test]
    async fn awaiting_directly_matches_exec() {
        let query = Query::ready(chats());

        let via_exec = query.exec().await;
        let via_await = query.await;

        assert_eq!(via_exec, via_await);
        assert_eq!(via_await, Ok(chats()));
    }

    #[tokio::test]
    async fn chaining_never_changes_the_result() {
        let chained = Query::ready(chats())
            .populate("users")
            .select("-password")
            .sort(json!({ "updatedAt": -1 }))
            .lean()
            .populate(json!({ "path": "latestMessage" }))
            .sort("updatedAt");

        // sort is a no-op: the original order survives
        assert_eq!(chained.await, Ok(chats()));
    }

    #[tokio::test]
    async fn exec_can_be_called_repeatedly() {
        let query = Query::ready(json!({ "_id": "cart1" })).lean();

        assert_eq!(query.exec().await, Ok(json!({ "_id": "cart1" })));
        assert_eq!(query.exec().await, Ok(json!({ "_id": "cart1" })));
        assert_eq!(query.peek(), Some(Ok(json!({ "_id": "cart1" }))));
    }

    #[test]
    fn ready_query_resolves_on_first_poll() {
        let query = Query::ready(Value::Null).populate("items.productId");
        let mut exec = task::spawn(query.exec());

        let result = assert_ready!(exec.poll());
        assert_eq!(result, Ok(Value::Null));
    }

    #[tokio::test]
    async fn deferred_result_is_shared_between_clones() {
        let query = Query::deferred(async { Ok(json!({ "_id": "p1" })) }.boxed());
        let copy = query.clone().select("name");

        assert_eq!(query.await, Ok(json!({ "_id": "p1" })));
        assert_eq!(copy.peek(), Some(Ok(json!({ "_id": "p1" }))));
    }

    #[tokio::test]
    async fn failing_future_propagates_unchanged() {
        let query = Query::deferred(async { Err(HarnessError::rejected("timeout")) }.boxed());

        assert_eq!(
            query.populate("users").await,
            Err(HarnessError::rejected("timeout"))
        );
    }

    #[tokio::test]
    async fn failed_query_rejects_every_awaiter() {
        let query = Query::failed(HarnessError::rejected("down"));

        assert!(query.exec().await.is_err());
        assert!(query.await.is_err());
    }
}
