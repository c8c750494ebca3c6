//! Flow execution error types.
//!
//! Used by `Graph` lookups, `Stream::run` and the direct-chain `Flow` builder.

use thiserror::Error;

/// Error returned by user steps (process, decider, checker, merge).
///
/// Any `std::error::Error + Send + Sync` converts into it, as do `&str` and `String`,
/// so steps can write `Err("bad input".into())`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Graph and flow execution error.
///
/// Graph runs fail fast with one of these; the direct-chain builder carries it inside
/// `Outcome::Errored` and only surfaces it from `Flow::start_with`.
#[derive(Debug, Error)]
pub enum FlowError {
    /// A referenced node id is not registered in the graph.
    #[error("node not found: {0}")]
    NotFound(String),

    /// A step failed while the stream was on `node`; carries the original message.
    #[error("exception while running the stream at {node}: {message}")]
    Execution { node: String, message: String },

    /// A `stopped()` guard fired on `node`.
    #[error("process stopped at {node}")]
    Stopped { node: String },

    /// `Flow::start_with` reached a `Stopped` outcome.
    #[error("flow has been stopped")]
    FlowStopped,

    /// A direct-chain combinator failed (no node id in that builder).
    #[error("flow step failed: {0}")]
    Failed(String),

    /// A spawned fork branch panicked or was cancelled before producing a value.
    #[error("branch {label} did not complete: {message}")]
    BranchJoin { label: String, message: String },

    /// The stream executed more nodes than `StreamConfig::max_steps` allows.
    #[error("step limit of {0} exceeded")]
    StepLimitExceeded(usize),
}

impl FlowError {
    /// Wraps a step failure raised while running `node`.
    ///
    /// A `FlowError` coming back through a step (e.g. a merge returning a branch's error
    /// via `?`) is returned unchanged, so stops and missing nodes keep their kind.
    pub(crate) fn execution(node: &str, err: BoxError) -> Self {
        match err.downcast::<FlowError>() {
            Ok(inner) => *inner,
            Err(err) => FlowError::Execution {
                node: node.to_string(),
                message: err.to_string(),
            },
        }
    }

    /// Direct-chain counterpart of `execution`: wraps as `Failed` unless `err` is
    /// already a `FlowError`.
    pub(crate) fn failed(err: BoxError) -> Self {
        match err.downcast::<FlowError>() {
            Ok(inner) => *inner,
            Err(err) => FlowError::Failed(err.to_string()),
        }
    }

    /// True for both stop kinds: a graph `stopped()` guard or a stopped direct-chain flow.
    pub fn is_stop(&self) -> bool {
        matches!(self, FlowError::Stopped { .. } | FlowError::FlowStopped)
    }
}
