//! Direct-chain flows: steps composed without named nodes.
//!
//! Same stop/alter/error semantics as the graph, signalled through `Outcome` values
//! instead of node routing.

mod builder;
mod outcome;

pub use builder::{generate_flow, Flow, Mergeable, Options, PostEvaluation, When};
pub use outcome::Outcome;
