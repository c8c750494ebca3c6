//! Graph node: one step plus its routing rule.
//!
//! Receives value `V`, returns the updated `V`; the route then names the next node.
//! Nodes are stored by key in `Graph` and cloned out on lookup (all parts are shared).

use std::fmt;
use std::sync::Arc;

use crate::error::FlowError;
use crate::traits::{Checker, Decider, Process};

use super::fork::ForkStep;
use super::route::Route;
use super::Graph;

/// What a node does with its input.
pub(crate) enum Step<V, C> {
    /// Passes the value through (switch, alter and stop nodes).
    Identity,
    /// Runs a user process.
    Process(Arc<dyn Process<V, C>>),
    /// Starts branch streams and merges them.
    Fork(Arc<ForkStep<V, C>>),
}

impl<V, C> Clone for Step<V, C> {
    fn clone(&self) -> Self {
        match self {
            Step::Identity => Step::Identity,
            Step::Process(p) => Step::Process(p.clone()),
            Step::Fork(f) => Step::Fork(f.clone()),
        }
    }
}

impl<V, C> Step<V, C>
where
    V: Clone + Send + Sync + 'static,
    C: Send + Sync + 'static,
{
    /// Runs the step for `node`; process failures become `FlowError::Execution`.
    pub(crate) async fn run(
        &self,
        node: &str,
        input: V,
        ctx: &Arc<C>,
        graph: &Graph<V, C>,
    ) -> Result<V, FlowError> {
        match self {
            Step::Identity => Ok(input),
            Step::Process(process) => process
                .process(input, ctx.clone())
                .await
                .map_err(|e| FlowError::execution(node, e)),
            Step::Fork(fork) => fork.run(node, input, ctx, graph).await,
        }
    }
}

/// One step in a graph: a step to run and a rule for the next node id.
///
/// The default successor is wired by the builder right after registration and can
/// be rewired with `Graph::connect`.
pub struct Node<V, C> {
    pub(crate) step: Step<V, C>,
    pub(crate) route: Route<V, C>,
    pub(crate) default_key: Option<String>,
}

impl<V, C> Clone for Node<V, C> {
    fn clone(&self) -> Self {
        Self {
            step: self.step.clone(),
            route: self.route.clone(),
            default_key: self.default_key.clone(),
        }
    }
}

impl<V, C> fmt::Debug for Node<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind())
            .field("route", &self.route)
            .field("default_key", &self.default_key)
            .finish()
    }
}

impl<V, C> Node<V, C> {
    /// Short name of the node variant: `process`, `switch`, `alter`, `stop` or `fork`.
    pub fn kind(&self) -> &'static str {
        match (&self.step, &self.route) {
            (Step::Fork(_), _) => "fork",
            (_, Route::Switch(_)) => "switch",
            (_, Route::Alter { .. }) => "alter",
            (_, Route::Stop(_)) => "stop",
            _ => "process",
        }
    }

    /// Default successor, if wired.
    pub fn default_key(&self) -> Option<&str> {
        self.default_key.as_deref()
    }

    /// Sets the default successor.
    pub fn set_default_key(&mut self, key: impl Into<String>) {
        self.default_key = Some(key.into());
    }
}

impl<V, C> Node<V, C>
where
    V: Clone + Send + Sync + 'static,
    C: Send + Sync + 'static,
{
    /// Plain node: runs `process`, then continues to the default successor.
    pub fn new(process: impl Process<V, C> + 'static) -> Self {
        Self::with_parts(Step::Process(Arc::new(process)), Route::Continue)
    }

    /// Switching node: identity step; routes to the decider's key or the default.
    pub fn switching(decider: impl Decider<V, C> + 'static) -> Self {
        Self::with_parts(Step::Identity, Route::Switch(Arc::new(decider)))
    }

    /// Altering node: identity step; routes to `alternative` when the checker holds.
    pub fn altering(
        alternative: impl Into<String>,
        checker: impl Checker<V, C> + 'static,
    ) -> Self {
        Self::with_parts(
            Step::Identity,
            Route::Alter {
                alternative: alternative.into(),
                checker: Arc::new(checker),
            },
        )
    }

    /// Stopping node: identity step; fails the walk when the checker holds.
    pub fn stopping(checker: impl Checker<V, C> + 'static) -> Self {
        Self::with_parts(Step::Identity, Route::Stop(Arc::new(checker)))
    }

    pub(crate) fn forking(fork: ForkStep<V, C>) -> Self {
        Self::with_parts(Step::Fork(Arc::new(fork)), Route::Continue)
    }

    fn with_parts(step: Step<V, C>, route: Route<V, C>) -> Self {
        Self {
            step,
            route,
            default_key: None,
        }
    }

    /// Next node id for `output` produced by this node (registered as `key`).
    pub async fn next_key(
        &self,
        key: &str,
        output: V,
        ctx: &Arc<C>,
    ) -> Result<Option<String>, FlowError> {
        self.route
            .decide(key, output, ctx, self.default_key.as_deref())
            .await
    }
}
