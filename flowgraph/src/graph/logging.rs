//! Logging utilities for stream execution.
//!
//! Structured `tracing` events for stream start/end, node execution and errors.
//! Install a subscriber (e.g. `tracing-subscriber` with `RUST_LOG`) in the host to see them.

use crate::error::FlowError;

/// Log node execution start.
pub fn log_node_start(node_id: &str) {
    tracing::debug!(node_id = node_id, "Starting node execution");
}

/// Log node execution completion with the routed next key (`None` ends the walk).
pub fn log_node_complete(node_id: &str, next: Option<&str>) {
    tracing::debug!(node_id = node_id, next = ?next, "Node execution complete");
}

/// Log stream run start.
pub fn log_stream_start(from_key: &str, to_key: &str) {
    tracing::info!(from = from_key, to = to_key, "Starting stream execution");
}

/// Log stream run completion.
pub fn log_stream_complete(from_key: &str, to_key: &str) {
    tracing::info!(from = from_key, to = to_key, "Stream execution complete");
}

/// Log stream run failure. Stops are expected control flow and logged at info.
pub fn log_stream_error(error: &FlowError) {
    if error.is_stop() {
        tracing::info!(%error, "Stream stopped");
    } else {
        tracing::error!(?error, "Stream execution error");
    }
}
