//! # flowgraph
//!
//! A small embeddable engine for composing async processing steps into execution graphs:
//! linear chains, conditional branches, loops, forks/merges and early stops. One value
//! type flows through every step (**value-in, value-out**) alongside a shared context.
//!
//! ## Design Principles
//!
//! - **Named nodes in a flat table**: a `Graph` maps keys to nodes; loops are just routes
//!   back to an earlier key.
//! - **Route after the step**: each node runs its step, then its route looks at the
//!   output to name the next key (default successor, switch, alter, stop).
//! - **Stateless streams**: a `Stream` is a `(from, to)` plan; run it as often and as
//!   concurrently as needed.
//! - **Opaque steps**: processes, deciders, checkers and merges are user code behind the
//!   traits in [`traits`]; closures work directly.
//!
//! ## Main Modules
//!
//! - [`graph`]: `Graph`, `Cursor`, `Node`, `Route`, `Stream`: build and run step graphs.
//! - [`flow`]: `Flow`, `Outcome`: the direct-chain builder without named nodes.
//! - [`pending`]: `Pending` branch results and `join_all` for fork/merge.
//! - [`error`]: `FlowError`, `BoxError`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use flowgraph::{BoxError, Graph};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let graph = Graph::<i64, ()>::new();
//! let end = graph
//!     .register("DOUBLE", |x: i64, _ctx: Arc<()>| async move { Ok::<_, BoxError>(x * 2) })
//!     .continued_by("INC", |x: i64, _ctx: Arc<()>| async move { Ok::<_, BoxError>(x + 1) });
//! let stream = end.generate_stream("DOUBLE");
//! assert_eq!(stream.run(3, Arc::new(())).await.unwrap(), 7);
//! # }
//! ```
//!
//! The `flowgraph` binary in `flowgraph-cli` runs a few demo graphs.

pub mod error;
pub mod flow;
pub mod graph;
pub mod pending;
pub mod traits;

pub use error::{BoxError, FlowError};
pub use flow::{generate_flow, Flow, Mergeable, Options, Outcome, PostEvaluation, When};
pub use graph::{
    Alteration, Cursor, Fork, Graph, Node, Route, Stopper, Stream, StreamConfig,
};
pub use pending::{join_all, Pending};
pub use traits::{Checker, Decider, Merge, Process};
