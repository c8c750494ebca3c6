//! Step graph: named nodes, cursor builder and stream execution.
//!
//! Register nodes and wire them with a `Cursor` chain, take a `Stream` over a key
//! range, then `run` it with an input and a shared context.

mod cursor;
mod fork;
mod logging;
mod node;
mod registry;
mod route;
mod stream;

pub use cursor::{Alteration, Cursor, Fork, Stopper};
pub use logging::{
    log_node_complete, log_node_start, log_stream_complete, log_stream_error, log_stream_start,
};
pub use node::Node;
pub use registry::Graph;
pub use route::Route;
pub use stream::{Stream, StreamConfig};
