//! Graph: shared registry of nodes by key.
//!
//! Register nodes with `register` (or prebuilt ones with `register_all`), wire them with
//! the `Cursor` returned from each call, then take a `Stream` over a key range and `run` it.

use std::sync::Arc;

use dashmap::DashMap;

use crate::error::FlowError;
use crate::traits::Process;

use super::cursor::Cursor;
use super::node::Node;
use super::stream::Stream;

/// Node registry for one flow definition.
///
/// A cheap, shareable handle: clones see the same nodes, so streams taken early still
/// observe nodes registered later. Keys are unique; registering a key again replaces the
/// node (last write wins). Nodes are never removed.
///
/// **Interaction**: builder calls go through `Cursor`; execution through `Stream::run`.
pub struct Graph<V, C> {
    nodes: Arc<DashMap<String, Node<V, C>>>,
}

impl<V, C> Clone for Graph<V, C> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
        }
    }
}

impl<V, C> Default for Graph<V, C>
where
    V: Clone + Send + Sync + 'static,
    C: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, C> std::fmt::Debug for Graph<V, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("nodes", &self.nodes.len())
            .finish()
    }
}

impl<V, C> Graph<V, C>
where
    V: Clone + Send + Sync + 'static,
    C: Send + Sync + 'static,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: Arc::new(DashMap::new()),
        }
    }

    /// Registers a plain node under `key` and returns a cursor positioned at it.
    pub fn register(
        &self,
        key: impl Into<String>,
        process: impl Process<V, C> + 'static,
    ) -> Cursor<V, C> {
        let key = key.into();
        self.nodes.insert(key.clone(), Node::new(process));
        Cursor::new(self.clone(), key)
    }

    /// Installs prebuilt nodes (switching, altering, stopping, forking) as-is.
    pub fn register_all<K>(&self, nodes: impl IntoIterator<Item = (K, Node<V, C>)>)
    where
        K: Into<String>,
    {
        for (key, node) in nodes {
            self.nodes.insert(key.into(), node);
        }
    }

    /// Sets `from_key`'s default successor to `to_key` without going through a cursor.
    ///
    /// Used to join a branch back into a shared continuation node. Fails with
    /// `NotFound` if `from_key` is not registered; `to_key` is resolved at run time.
    pub fn connect(&self, from_key: &str, to_key: impl Into<String>) -> Result<(), FlowError> {
        match self.nodes.get_mut(from_key) {
            Some(mut node) => {
                node.set_default_key(to_key);
                Ok(())
            }
            None => Err(FlowError::NotFound(from_key.to_string())),
        }
    }

    /// Returns (a shared clone of) the node for `key`.
    pub fn get(&self, key: &str) -> Result<Node<V, C>, FlowError> {
        self.nodes
            .get(key)
            .map(|node| node.value().clone())
            .ok_or_else(|| FlowError::NotFound(key.to_string()))
    }

    /// Returns a cursor at an already registered node, to attach more steps to it.
    pub fn from(&self, key: impl Into<String>) -> Result<Cursor<V, C>, FlowError> {
        let key = key.into();
        if !self.nodes.contains_key(&key) {
            return Err(FlowError::NotFound(key));
        }
        Ok(Cursor::new(self.clone(), key))
    }

    /// Execution plan from `from_key` to `to_key` (inclusive). Nothing runs yet.
    pub fn generate_stream(
        &self,
        from_key: impl Into<String>,
        to_key: impl Into<String>,
    ) -> Stream<V, C> {
        Stream::new(self.clone(), from_key.into(), to_key.into())
    }

    /// True when `key` is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.nodes.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Wires `key`'s default successor. Cursors only point at registered nodes.
    pub(crate) fn set_default_key(&self, key: &str, next_key: &str) {
        if let Some(mut node) = self.nodes.get_mut(key) {
            node.set_default_key(next_key);
        }
    }
}

impl<V, C> Graph<V, C> {
    /// True when both handles share one registry.
    pub(crate) fn same_as(&self, other: &Graph<V, C>) -> bool {
        Arc::ptr_eq(&self.nodes, &other.nodes)
    }
}
