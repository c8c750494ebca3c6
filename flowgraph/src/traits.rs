//! Step traits: the opaque user code a graph or flow drives.
//!
//! Each trait has one async method and a blanket impl for closures of the matching
//! shape, so builders accept either a struct implementing the trait or a plain
//! `|value, ctx| async move { ... }` closure. The context is shared as `Arc<C>`.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::BoxError;
use crate::pending::Pending;

/// One processing step: value in, value out.
///
/// Used by `Graph::register`, `Cursor::continued_by` and `Flow::continued_by`.
/// A failure aborts a graph run with `FlowError::Execution` and turns a direct-chain
/// outcome into `Outcome::Errored`.
#[async_trait]
pub trait Process<V, C>: Send + Sync {
    async fn process(&self, input: V, ctx: Arc<C>) -> Result<V, BoxError>;
}

#[async_trait]
impl<V, C, F, Fut> Process<V, C> for F
where
    F: Fn(V, Arc<C>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<V, BoxError>> + Send + 'static,
    V: Send + 'static,
    C: Send + Sync + 'static,
{
    async fn process(&self, input: V, ctx: Arc<C>) -> Result<V, BoxError> {
        (self)(input, ctx).await
    }
}

/// Routing decision: names the next node (or flow label) for a value.
///
/// `None` (or an empty key) means "no decision": switching nodes fall back to their
/// default successor and `based_on` criteria fall through.
#[async_trait]
pub trait Decider<V, C>: Send + Sync {
    async fn decide(&self, output: V, ctx: Arc<C>) -> Result<Option<String>, BoxError>;
}

#[async_trait]
impl<V, C, F, Fut> Decider<V, C> for F
where
    F: Fn(V, Arc<C>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Option<String>, BoxError>> + Send + 'static,
    V: Send + 'static,
    C: Send + Sync + 'static,
{
    async fn decide(&self, output: V, ctx: Arc<C>) -> Result<Option<String>, BoxError> {
        (self)(output, ctx).await
    }
}

/// Boolean guard used by alter, stop and `when` combinators.
#[async_trait]
pub trait Checker<V, C>: Send + Sync {
    async fn check(&self, output: V, ctx: Arc<C>) -> Result<bool, BoxError>;
}

#[async_trait]
impl<V, C, F, Fut> Checker<V, C> for F
where
    F: Fn(V, Arc<C>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<bool, BoxError>> + Send + 'static,
    V: Send + 'static,
    C: Send + Sync + 'static,
{
    async fn check(&self, output: V, ctx: Arc<C>) -> Result<bool, BoxError> {
        (self)(output, ctx).await
    }
}

/// Fan-in for fork/merge and `splitted_into`.
///
/// Receives one `Pending` per branch label; every branch has already been started.
/// The implementation picks the join policy (await all, first ready, partial).
#[async_trait]
pub trait Merge<V, C>: Send + Sync {
    async fn merge(&self, pending: HashMap<String, Pending<V>>, ctx: Arc<C>)
        -> Result<V, BoxError>;
}

#[async_trait]
impl<V, C, F, Fut> Merge<V, C> for F
where
    F: Fn(HashMap<String, Pending<V>>, Arc<C>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<V, BoxError>> + Send + 'static,
    V: Send + 'static,
    C: Send + Sync + 'static,
{
    async fn merge(
        &self,
        pending: HashMap<String, Pending<V>>,
        ctx: Arc<C>,
    ) -> Result<V, BoxError> {
        (self)(pending, ctx).await
    }
}
