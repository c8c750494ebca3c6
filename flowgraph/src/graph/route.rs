//! Next-node routing rules.
//!
//! A node's route looks at the node's own output and names the next node id, or
//! `None` to end the walk. Routing never runs a step itself.

use std::fmt;
use std::sync::Arc;

use crate::error::FlowError;
use crate::traits::{Checker, Decider};

/// How a node picks its successor after its step has run.
///
/// Every variant falls back to the node's default successor when it has no opinion.
pub enum Route<V, C> {
    /// Always the default successor (plain linear step).
    Continue,
    /// The decider's key if it returns one, else the default successor.
    Switch(Arc<dyn Decider<V, C>>),
    /// `alternative` when the checker returns true (loops, backtracking), else the default.
    Alter {
        alternative: String,
        checker: Arc<dyn Checker<V, C>>,
    },
    /// Fails the walk with `FlowError::Stopped` when the checker returns true, else the default.
    Stop(Arc<dyn Checker<V, C>>),
}

impl<V, C> Clone for Route<V, C> {
    fn clone(&self) -> Self {
        match self {
            Route::Continue => Route::Continue,
            Route::Switch(decider) => Route::Switch(decider.clone()),
            Route::Alter {
                alternative,
                checker,
            } => Route::Alter {
                alternative: alternative.clone(),
                checker: checker.clone(),
            },
            Route::Stop(checker) => Route::Stop(checker.clone()),
        }
    }
}

impl<V, C> fmt::Debug for Route<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Continue => f.write_str("Continue"),
            Route::Switch(_) => f.write_str("Switch"),
            Route::Alter { alternative, .. } => {
                f.debug_struct("Alter").field("alternative", alternative).finish()
            }
            Route::Stop(_) => f.write_str("Stop"),
        }
    }
}

/// Treats an empty key like no key.
fn non_empty(key: Option<String>) -> Option<String> {
    key.filter(|k| !k.is_empty())
}

impl<V, C> Route<V, C>
where
    V: Clone + Send + Sync + 'static,
    C: Send + Sync + 'static,
{
    /// Picks the next node id for `output` produced by `node`.
    ///
    /// Checker and decider failures become `FlowError::Execution` on `node`.
    pub async fn decide(
        &self,
        node: &str,
        output: V,
        ctx: &Arc<C>,
        default_key: Option<&str>,
    ) -> Result<Option<String>, FlowError> {
        let fallback = non_empty(default_key.map(str::to_string));
        match self {
            Route::Continue => Ok(fallback),
            Route::Switch(decider) => {
                let chosen = decider
                    .decide(output, ctx.clone())
                    .await
                    .map_err(|e| FlowError::execution(node, e))?;
                Ok(non_empty(chosen).or(fallback))
            }
            Route::Alter {
                alternative,
                checker,
            } => {
                let altered = checker
                    .check(output, ctx.clone())
                    .await
                    .map_err(|e| FlowError::execution(node, e))?;
                if altered {
                    Ok(Some(alternative.clone()))
                } else {
                    Ok(fallback)
                }
            }
            Route::Stop(checker) => {
                let must_stop = checker
                    .check(output, ctx.clone())
                    .await
                    .map_err(|e| FlowError::execution(node, e))?;
                if must_stop {
                    Err(FlowError::Stopped {
                        node: node.to_string(),
                    })
                } else {
                    Ok(fallback)
                }
            }
        }
    }
}
