//! Four-way step outcome for the direct-chain builder.

use crate::error::FlowError;

/// Result of evaluating a `Flow`.
///
/// Combinators only act on `Continued`; every other variant is forwarded untouched to the
/// end of the chain, so a stop or an error short-circuits the remaining steps.
#[derive(Debug)]
pub enum Outcome<V> {
    /// Normal progress with the current value.
    Continued(V),
    /// A stop condition fired; no value.
    Stopped,
    /// Control moved into an alternative flow, which produced this value.
    Altered(V),
    /// A step failed.
    Errored(FlowError),
}

impl<V> Outcome<V> {
    pub fn is_continued(&self) -> bool {
        matches!(self, Outcome::Continued(_))
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, Outcome::Stopped)
    }

    /// Unwraps into a plain result: `Continued`/`Altered` give the value, `Errored` its
    /// error and `Stopped` becomes `FlowError::FlowStopped`.
    pub fn into_result(self) -> Result<V, FlowError> {
        match self {
            Outcome::Continued(v) | Outcome::Altered(v) => Ok(v),
            Outcome::Stopped => Err(FlowError::FlowStopped),
            Outcome::Errored(e) => Err(e),
        }
    }
}
