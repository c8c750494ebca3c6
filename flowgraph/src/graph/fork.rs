//! Fork/merge step: fan a value out to branch streams, then fan in with a merge.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::FlowError;
use crate::pending::Pending;
use crate::traits::Merge;

use super::stream::{Stream, StreamConfig};
use super::Graph;

/// One branch of a fork, stored as a key range rather than a `Stream`.
///
/// `graph` is `None` when the branch runs over the same graph as the fork node, so a
/// graph never holds a handle to itself.
pub(crate) struct Branch<V, C> {
    pub(crate) label: String,
    pub(crate) from_key: String,
    pub(crate) to_key: String,
    pub(crate) config: StreamConfig,
    pub(crate) graph: Option<Graph<V, C>>,
}

impl<V, C> Branch<V, C> {
    /// Captures `stream` as a branch of a fork registered on `owner`.
    pub(crate) fn from_stream(label: String, stream: Stream<V, C>, owner: &Graph<V, C>) -> Self {
        let graph = (!stream.graph().same_as(owner)).then(|| stream.graph().clone());
        Self {
            label,
            from_key: stream.from_key().to_string(),
            to_key: stream.to_key().to_string(),
            config: *stream.config(),
            graph,
        }
    }
}

/// Step of a fork node.
pub(crate) struct ForkStep<V, C> {
    pub(crate) branches: Vec<Branch<V, C>>,
    pub(crate) merge: Arc<dyn Merge<V, C>>,
}

impl<V, C> ForkStep<V, C>
where
    V: Clone + Send + Sync + 'static,
    C: Send + Sync + 'static,
{
    /// Starts every branch with `input` and the shared context, then awaits the merge.
    ///
    /// All branches are started before the merge is called; none is awaited here.
    pub(crate) async fn run(
        &self,
        node: &str,
        input: V,
        ctx: &Arc<C>,
        graph: &Graph<V, C>,
    ) -> Result<V, FlowError> {
        let mut pending = HashMap::with_capacity(self.branches.len());
        for branch in &self.branches {
            let stream = Stream::new(
                branch.graph.clone().unwrap_or_else(|| graph.clone()),
                branch.from_key.clone(),
                branch.to_key.clone(),
            )
            .with_config(branch.config);
            tracing::debug!(node = node, branch = %branch.label, "Starting fork branch");
            let started =
                Pending::start(branch.label.clone(), stream.run(input.clone(), ctx.clone())).await;
            pending.insert(branch.label.clone(), started);
        }
        self.merge
            .merge(pending, ctx.clone())
            .await
            .map_err(|e| FlowError::execution(node, e))
    }
}
