//! Stream: a reusable execution plan over a key range of a graph.
//!
//! `run` walks from `from_key` to `to_key` (inclusive), threading the value and the
//! shared context through each node. Streams hold no per-run state.

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::error::FlowError;

use super::logging::{
    log_node_complete, log_node_start, log_stream_complete, log_stream_error, log_stream_start,
};
use super::Graph;

/// Per-stream run limits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamConfig {
    /// Maximum number of node executions in one run; `None` means unbounded.
    ///
    /// Guards against loops whose alter condition never turns false.
    pub max_steps: Option<usize>,
}

/// Execution plan from `from_key` to `to_key` over a graph.
///
/// Created by `Graph::generate_stream` or `Cursor::generate_stream`. Stateless: the same
/// stream can be run many times, concurrently, with different inputs and contexts.
pub struct Stream<V, C> {
    graph: Graph<V, C>,
    from_key: String,
    to_key: String,
    config: StreamConfig,
}

impl<V, C> Clone for Stream<V, C> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph.clone(),
            from_key: self.from_key.clone(),
            to_key: self.to_key.clone(),
            config: self.config,
        }
    }
}

impl<V, C> fmt::Debug for Stream<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("from_key", &self.from_key)
            .field("to_key", &self.to_key)
            .field("config", &self.config)
            .finish()
    }
}

impl<V, C> Stream<V, C> {
    pub fn from_key(&self) -> &str {
        &self.from_key
    }

    pub fn to_key(&self) -> &str {
        &self.to_key
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    pub(crate) fn graph(&self) -> &Graph<V, C> {
        &self.graph
    }
}

impl<V, C> Stream<V, C>
where
    V: Clone + Send + Sync + 'static,
    C: Send + Sync + 'static,
{
    pub(crate) fn new(graph: Graph<V, C>, from_key: String, to_key: String) -> Self {
        Self {
            graph,
            from_key,
            to_key,
            config: StreamConfig::default(),
        }
    }

    /// Returns the same plan with `config` applied.
    pub fn with_config(self, config: StreamConfig) -> Self {
        Self { config, ..self }
    }

    /// Returns the same plan limited to `max_steps` node executions per run.
    pub fn with_max_steps(self, max_steps: usize) -> Self {
        self.with_config(StreamConfig {
            max_steps: Some(max_steps),
        })
    }

    /// Runs the plan with `input` and the shared context.
    ///
    /// After each node's step, that node's route picks the next key from the step's
    /// output. The walk ends early (returning the current value) when a route names no
    /// next key; otherwise it ends after running `to_key`'s node once.
    ///
    /// - Unknown key: `FlowError::NotFound`.
    /// - Failing step, decider or checker: `FlowError::Execution`.
    /// - Stop guard fired: `FlowError::Stopped`.
    ///
    /// Must be polled inside a tokio runtime when the graph has fork nodes: a branch that
    /// suspends is moved to `tokio::spawn`.
    pub fn run(&self, input: V, ctx: Arc<C>) -> BoxFuture<'static, Result<V, FlowError>> {
        let stream = self.clone();
        Box::pin(async move {
            log_stream_start(&stream.from_key, &stream.to_key);
            let result = stream.walk(input, &ctx).await;
            match &result {
                Ok(_) => log_stream_complete(&stream.from_key, &stream.to_key),
                Err(e) => log_stream_error(e),
            }
            result
        })
    }

    async fn walk(&self, input: V, ctx: &Arc<C>) -> Result<V, FlowError> {
        let mut value = input;
        let mut current = self.from_key.clone();
        let mut steps = 0usize;
        loop {
            if let Some(limit) = self.config.max_steps {
                if steps >= limit {
                    return Err(FlowError::StepLimitExceeded(limit));
                }
            }
            steps += 1;

            let node = self.graph.get(&current)?;
            log_node_start(&current);
            value = node.step.run(&current, value, ctx, &self.graph).await?;
            let next = node.next_key(&current, value.clone(), ctx).await?;
            log_node_complete(&current, next.as_deref());

            if current == self.to_key {
                return Ok(value);
            }
            match next {
                Some(key) => current = key,
                None => return Ok(value),
            }
        }
    }
}
