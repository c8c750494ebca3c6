//! Direct-chain builder: composes steps through closures, no named nodes.
//!
//! Each combinator wraps the previous flow and inspects its `Outcome`; only `Continued`
//! moves on, everything else is forwarded. Nothing throws until `start_with`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::error::{BoxError, FlowError};
use crate::pending::Pending;
use crate::traits::{Checker, Decider, Merge, Process};

use super::outcome::Outcome;

type StepFn<V, C> = dyn Fn(V, Arc<C>) -> BoxFuture<'static, Outcome<V>> + Send + Sync;

type Conclude<T, V, C> =
    Arc<dyn Fn(T, V, Arc<C>) -> BoxFuture<'static, Outcome<V>> + Send + Sync>;

fn conclude<T, V, C, F>(f: F) -> Conclude<T, V, C>
where
    F: Fn(T, V, Arc<C>) -> BoxFuture<'static, Outcome<V>> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A composed chain of steps, started with `start_with` or `evaluate`.
///
/// Cheap to clone; flows are reusable and may be nested as alternatives or branches
/// of other flows.
pub struct Flow<V, C> {
    step: Arc<StepFn<V, C>>,
}

impl<V, C> Clone for Flow<V, C> {
    fn clone(&self) -> Self {
        Self {
            step: self.step.clone(),
        }
    }
}

impl<V, C> fmt::Debug for Flow<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Flow")
    }
}

/// Identity flow: `start_with(x)` returns `x`.
pub fn generate_flow<V, C>() -> Flow<V, C>
where
    V: Clone + Send + Sync + 'static,
    C: Send + Sync + 'static,
{
    Flow::new()
}

impl<V, C> Default for Flow<V, C>
where
    V: Clone + Send + Sync + 'static,
    C: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, C> Flow<V, C>
where
    V: Clone + Send + Sync + 'static,
    C: Send + Sync + 'static,
{
    /// Identity flow.
    pub fn new() -> Self {
        Self::from_fn(|start, _ctx| Box::pin(async move { Outcome::Continued(start) }))
    }

    fn from_fn<F>(f: F) -> Self
    where
        F: Fn(V, Arc<C>) -> BoxFuture<'static, Outcome<V>> + Send + Sync + 'static,
    {
        Self { step: Arc::new(f) }
    }

    /// Runs `process` on a `Continued` value; a failure becomes `Errored`.
    pub fn continued_by(self, process: impl Process<V, C> + 'static) -> Self {
        let prev = self.step;
        let process: Arc<dyn Process<V, C>> = Arc::new(process);
        Self::from_fn(move |start, ctx: Arc<C>| {
            let prev = prev.clone();
            let process = process.clone();
            Box::pin(async move {
                match prev(start, ctx.clone()).await {
                    Outcome::Continued(v) => match process.process(v, ctx).await {
                        Ok(next) => Outcome::Continued(next),
                        Err(e) => Outcome::Errored(FlowError::failed(e)),
                    },
                    other => other,
                }
            })
        })
    }

    /// Stops when the checker given to `when` returns true.
    pub fn stopped(self) -> When<V, C> {
        PostEvaluation::new(
            self,
            conclude(|met: bool, v: V, _ctx: Arc<C>| {
                Box::pin(async move {
                    if met {
                        Outcome::Stopped
                    } else {
                        Outcome::Continued(v)
                    }
                })
            }),
        )
    }

    /// Continues only while the checker given to `when` returns true; stops otherwise.
    pub fn continued(self) -> When<V, C> {
        PostEvaluation::new(
            self,
            conclude(|met: bool, v: V, _ctx: Arc<C>| {
                Box::pin(async move {
                    if met {
                        Outcome::Continued(v)
                    } else {
                        Outcome::Stopped
                    }
                })
            }),
        )
    }

    /// When the checker holds, runs `flow` to completion and yields `Altered` with its result.
    ///
    /// A stop or error inside `flow` becomes `Errored`.
    pub fn altered_to(self, flow: Flow<V, C>) -> When<V, C> {
        PostEvaluation::new(
            self,
            conclude(move |met: bool, v: V, ctx: Arc<C>| {
                let flow = flow.clone();
                Box::pin(async move {
                    if !met {
                        return Outcome::Continued(v);
                    }
                    altered(&flow, v, ctx).await
                })
            }),
        )
    }

    /// Like `altered_to`, picking the alternative by the label the criteria returns.
    ///
    /// Unknown or absent labels fall through with the value unchanged.
    pub fn altered_to_any_of<K>(
        self,
        flows: impl IntoIterator<Item = (K, Flow<V, C>)>,
    ) -> Options<V, C>
    where
        K: Into<String>,
    {
        let flows = labelled(flows);
        PostEvaluation::new(
            self,
            conclude(move |criteria: Option<String>, v: V, ctx: Arc<C>| {
                let target = criteria.and_then(|label| flows.get(&label).cloned());
                Box::pin(async move {
                    match target {
                        Some(flow) => altered(&flow, v, ctx).await,
                        None => Outcome::Continued(v),
                    }
                })
            }),
        )
    }

    /// When the checker holds, continues inside `flow`: its outcome (including a stop)
    /// becomes this flow's outcome.
    pub fn stepping_into(self, flow: Flow<V, C>) -> When<V, C> {
        PostEvaluation::new(
            self,
            conclude(move |met: bool, v: V, ctx: Arc<C>| {
                let flow = flow.clone();
                Box::pin(async move {
                    if met {
                        flow.evaluate(v, ctx).await
                    } else {
                        Outcome::Continued(v)
                    }
                })
            }),
        )
    }

    /// Like `stepping_into`, picking the sub-flow by the label the criteria returns.
    pub fn stepping_into_any_of<K>(
        self,
        flows: impl IntoIterator<Item = (K, Flow<V, C>)>,
    ) -> Options<V, C>
    where
        K: Into<String>,
    {
        let flows = labelled(flows);
        PostEvaluation::new(
            self,
            conclude(move |criteria: Option<String>, v: V, ctx: Arc<C>| {
                let target = criteria.and_then(|label| flows.get(&label).cloned());
                Box::pin(async move {
                    match target {
                        Some(flow) => flow.evaluate(v, ctx).await,
                        None => Outcome::Continued(v),
                    }
                })
            }),
        )
    }

    /// Fans the value out to every branch flow; finish with `on_merge`.
    ///
    /// Like graph forks, suspended branches are spawned on the tokio runtime.
    pub fn splitted_into<K>(
        self,
        flows: impl IntoIterator<Item = (K, Flow<V, C>)>,
    ) -> Mergeable<V, C>
    where
        K: Into<String>,
    {
        Mergeable {
            flow: self,
            branches: flows
                .into_iter()
                .map(|(label, flow)| (label.into(), flow))
                .collect(),
        }
    }

    /// Runs the chain and returns the raw outcome.
    pub async fn evaluate(&self, start: V, ctx: Arc<C>) -> Outcome<V> {
        (self.step)(start, ctx).await
    }

    /// Runs the chain: `Continued`/`Altered` return the value, `Errored` its error,
    /// `Stopped` fails with `FlowError::FlowStopped`.
    pub async fn start_with(&self, start: V, ctx: Arc<C>) -> Result<V, FlowError> {
        let outcome = self.evaluate(start, ctx).await;
        if outcome.is_stopped() {
            tracing::debug!("Flow stopped");
        }
        outcome.into_result()
    }
}

fn labelled<K, V, C>(
    flows: impl IntoIterator<Item = (K, Flow<V, C>)>,
) -> HashMap<String, Flow<V, C>>
where
    K: Into<String>,
{
    flows
        .into_iter()
        .map(|(label, flow)| (label.into(), flow))
        .filter(|(label, _)| !label.is_empty())
        .collect()
}

async fn altered<V, C>(flow: &Flow<V, C>, v: V, ctx: Arc<C>) -> Outcome<V>
where
    V: Clone + Send + Sync + 'static,
    C: Send + Sync + 'static,
{
    match flow.start_with(v, ctx).await {
        Ok(result) => Outcome::Altered(result),
        Err(e) => Outcome::Errored(e),
    }
}

/// A flow waiting for its evaluation function (`when` / `based_on`).
///
/// The evaluation runs only on `Continued`; its result `T` and the value decide the outcome.
pub struct PostEvaluation<T, V, C> {
    flow: Flow<V, C>,
    conclude: Conclude<T, V, C>,
}

/// Boolean post-evaluation, finished with `when`.
pub type When<V, C> = PostEvaluation<bool, V, C>;

/// Label-valued post-evaluation, finished with `based_on`.
pub type Options<V, C> = PostEvaluation<Option<String>, V, C>;

impl<T, V, C> PostEvaluation<T, V, C>
where
    T: Send + 'static,
    V: Clone + Send + Sync + 'static,
    C: Send + Sync + 'static,
{
    fn new(flow: Flow<V, C>, conclude: Conclude<T, V, C>) -> Self {
        Self { flow, conclude }
    }

    fn evaluated_by<E>(self, evaluate: E) -> Flow<V, C>
    where
        E: Fn(V, Arc<C>) -> BoxFuture<'static, Result<T, BoxError>> + Send + Sync + 'static,
    {
        let prev = self.flow.step;
        let conclude = self.conclude;
        let evaluate = Arc::new(evaluate);
        Flow::<V, C>::from_fn(move |start, ctx: Arc<C>| {
            let prev = prev.clone();
            let conclude = conclude.clone();
            let evaluate = evaluate.clone();
            Box::pin(async move {
                match prev(start, ctx.clone()).await {
                    Outcome::Continued(v) => match evaluate(v.clone(), ctx.clone()).await {
                        Ok(t) => conclude(t, v, ctx).await,
                        Err(e) => Outcome::Errored(FlowError::failed(e)),
                    },
                    other => other,
                }
            })
        })
    }
}

impl<V, C> PostEvaluation<bool, V, C>
where
    V: Clone + Send + Sync + 'static,
    C: Send + Sync + 'static,
{
    /// Supplies the boolean condition.
    pub fn when(self, checker: impl Checker<V, C> + 'static) -> Flow<V, C> {
        let checker = Arc::new(checker);
        self.evaluated_by(move |v, ctx| {
            let checker = checker.clone();
            Box::pin(async move { checker.check(v, ctx).await })
        })
    }
}

impl<V, C> PostEvaluation<Option<String>, V, C>
where
    V: Clone + Send + Sync + 'static,
    C: Send + Sync + 'static,
{
    /// Supplies the criteria returning a label.
    pub fn based_on(self, criteria: impl Decider<V, C> + 'static) -> Flow<V, C> {
        let criteria = Arc::new(criteria);
        self.evaluated_by(move |v, ctx| {
            let criteria = criteria.clone();
            Box::pin(async move { criteria.decide(v, ctx).await })
        })
    }
}

/// A split flow waiting for its merge, see `Flow::splitted_into`.
pub struct Mergeable<V, C> {
    flow: Flow<V, C>,
    branches: Vec<(String, Flow<V, C>)>,
}

impl<V, C> Mergeable<V, C>
where
    V: Clone + Send + Sync + 'static,
    C: Send + Sync + 'static,
{
    /// Starts every branch with the current value, then hands the pending results to
    /// `merge`; its value continues the chain.
    pub fn on_merge(self, merge: impl Merge<V, C> + 'static) -> Flow<V, C> {
        let prev = self.flow.step;
        let branches = Arc::new(self.branches);
        let merge: Arc<dyn Merge<V, C>> = Arc::new(merge);
        Flow::<V, C>::from_fn(move |start, ctx: Arc<C>| {
            let prev = prev.clone();
            let branches = branches.clone();
            let merge = merge.clone();
            Box::pin(async move {
                let v = match prev(start, ctx.clone()).await {
                    Outcome::Continued(v) => v,
                    other => return other,
                };
                let mut pending = HashMap::with_capacity(branches.len());
                for (label, branch) in branches.iter() {
                    let branch = branch.clone();
                    let (input, branch_ctx) = (v.clone(), ctx.clone());
                    let run: BoxFuture<'static, Result<V, FlowError>> =
                        Box::pin(async move { branch.start_with(input, branch_ctx).await });
                    pending.insert(label.clone(), Pending::start(label.clone(), run).await);
                }
                match merge.merge(pending, ctx).await {
                    Ok(result) => Outcome::Continued(result),
                    Err(e) => Outcome::Errored(FlowError::failed(e)),
                }
            })
        })
    }
}
