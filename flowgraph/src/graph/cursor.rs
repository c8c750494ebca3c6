//! Cursor: fluent builder positioned at the most recently appended node.
//!
//! Each builder call registers a node, points the current node's default successor at
//! it and returns a new cursor at the new node, so a call chain wires the graph as it goes.

use std::sync::Arc;

use crate::error::FlowError;
use crate::traits::{Checker, Decider, Merge, Process};

use super::fork::{Branch, ForkStep};
use super::node::Node;
use super::stream::Stream;
use super::Graph;

/// Builder view over a `Graph`, positioned at a registered node.
///
/// Obtained from `Graph::register` or `Graph::from`. Consumed by every builder call.
pub struct Cursor<V, C> {
    graph: Graph<V, C>,
    key: String,
}

impl<V, C> Cursor<V, C>
where
    V: Clone + Send + Sync + 'static,
    C: Send + Sync + 'static,
{
    pub(crate) fn new(graph: Graph<V, C>, key: String) -> Self {
        Self { graph, key }
    }

    /// Key of the node this cursor is positioned at.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The graph being built.
    pub fn graph(&self) -> &Graph<V, C> {
        &self.graph
    }

    /// Registers `node` under `next_key`, makes it the current node's default successor
    /// and moves the cursor there.
    fn append(self, next_key: String, node: Node<V, C>) -> Self {
        self.graph.register_all([(next_key.clone(), node)]);
        self.graph.set_default_key(&self.key, &next_key);
        Self {
            graph: self.graph,
            key: next_key,
        }
    }

    /// Plain linear step.
    pub fn continued_by(
        self,
        next_key: impl Into<String>,
        process: impl Process<V, C> + 'static,
    ) -> Self {
        self.append(next_key.into(), Node::new(process))
    }

    /// Joins the current node into an already registered continuation node.
    pub fn continued_to(self, key: impl Into<String>) -> Result<Graph<V, C>, FlowError> {
        self.graph.connect(&self.key, key)?;
        Ok(self.graph)
    }

    /// Dispatch point: installs a switching node and ends the chain.
    ///
    /// Branch targets are attached separately (`Graph::register`, `Graph::from`,
    /// `Graph::connect`); when the decider returns `None` the walk follows the switching
    /// node's default successor, or ends there if it has none.
    pub fn switches(
        self,
        next_key: impl Into<String>,
        decider: impl Decider<V, C> + 'static,
    ) -> Graph<V, C> {
        self.append(next_key.into(), Node::switching(decider)).graph
    }

    /// Like `switches`, but keeps building from the switching node.
    pub fn try_switching_to(
        self,
        key: impl Into<String>,
        decider: impl Decider<V, C> + 'static,
    ) -> Self {
        self.append(key.into(), Node::switching(decider))
    }

    /// Starts an altering node that jumps to `alternative_key`; finish with `when`.
    pub fn try_altering_to(self, alternative_key: impl Into<String>) -> Alteration<V, C> {
        Alteration {
            cursor: self,
            alternative_key: alternative_key.into(),
        }
    }

    /// Starts a stopping node; finish with `when`.
    pub fn stopped(self) -> Stopper<V, C> {
        Stopper { cursor: self }
    }

    /// Starts a fork node under `key` over labelled branch streams; finish with `merge`.
    ///
    /// Branches that suspend run as tokio tasks, so streams through this node need a
    /// tokio runtime.
    pub fn fork<L>(
        self,
        key: impl Into<String>,
        branches: impl IntoIterator<Item = (L, Stream<V, C>)>,
    ) -> Fork<V, C>
    where
        L: Into<String>,
    {
        let branches = branches
            .into_iter()
            .map(|(label, stream)| Branch::from_stream(label.into(), stream, &self.graph))
            .collect();
        Fork {
            cursor: self,
            key: key.into(),
            branches,
        }
    }

    /// Stream from `from_key` to this cursor's node.
    pub fn generate_stream(&self, from_key: impl Into<String>) -> Stream<V, C> {
        self.graph.generate_stream(from_key, self.key.clone())
    }

    /// Stream from `from_key` to `to_key`.
    pub fn generate_stream_to(
        &self,
        from_key: impl Into<String>,
        to_key: impl Into<String>,
    ) -> Stream<V, C> {
        self.graph.generate_stream(from_key, to_key)
    }
}

/// Pending altering node, see `Cursor::try_altering_to`.
pub struct Alteration<V, C> {
    cursor: Cursor<V, C>,
    alternative_key: String,
}

impl<V, C> Alteration<V, C>
where
    V: Clone + Send + Sync + 'static,
    C: Send + Sync + 'static,
{
    /// Registers the altering node under `next_key`: routes to the alternative while
    /// `checker` returns true, else falls through to whatever is appended next.
    pub fn when(
        self,
        next_key: impl Into<String>,
        checker: impl Checker<V, C> + 'static,
    ) -> Cursor<V, C> {
        let node = Node::altering(self.alternative_key, checker);
        self.cursor.append(next_key.into(), node)
    }
}

/// Pending stopping node, see `Cursor::stopped`.
pub struct Stopper<V, C> {
    cursor: Cursor<V, C>,
}

impl<V, C> Stopper<V, C>
where
    V: Clone + Send + Sync + 'static,
    C: Send + Sync + 'static,
{
    /// Registers the stopping node under `next_key`: the walk fails with
    /// `FlowError::Stopped` when `checker` returns true.
    pub fn when(
        self,
        next_key: impl Into<String>,
        checker: impl Checker<V, C> + 'static,
    ) -> Cursor<V, C> {
        self.cursor.append(next_key.into(), Node::stopping(checker))
    }
}

/// Pending fork node, see `Cursor::fork`.
pub struct Fork<V, C> {
    cursor: Cursor<V, C>,
    key: String,
    branches: Vec<Branch<V, C>>,
}

impl<V, C> Fork<V, C>
where
    V: Clone + Send + Sync + 'static,
    C: Send + Sync + 'static,
{
    /// Registers the fork node; `on_merge` gets one `Pending` per branch label.
    pub fn merge(self, on_merge: impl Merge<V, C> + 'static) -> Cursor<V, C> {
        let step = ForkStep {
            branches: self.branches,
            merge: Arc::new(on_merge),
        };
        self.cursor.append(self.key, Node::forking(step))
    }
}
