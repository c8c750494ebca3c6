//! Pending branch results for fork/merge.
//!
//! A branch is driven inline up to its first suspension point when it is started, so
//! everything it does synchronously (e.g. pushing to a context log) has happened before
//! the merge function runs. A branch that suspends is handed to `tokio::spawn` and keeps
//! running concurrently; its `Pending` resolves when the task finishes.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::BoxFuture;
use tokio::task::JoinHandle;

use crate::error::FlowError;

/// Result of one started branch, awaitable by the merge function.
///
/// Dropping a `Pending` does not cancel a spawned branch.
pub struct Pending<V> {
    label: String,
    state: PendingState<V>,
}

enum PendingState<V> {
    Ready(Option<Result<V, FlowError>>),
    Running(JoinHandle<Result<V, FlowError>>),
}

// The value is only ever moved out, never pinned in place.
impl<V> Unpin for Pending<V> {}

impl<V> Pending<V>
where
    V: Send + 'static,
{
    /// Starts `branch`: polls it once inline and spawns it if it is not done yet.
    pub(crate) async fn start(
        label: impl Into<String>,
        mut branch: BoxFuture<'static, Result<V, FlowError>>,
    ) -> Self {
        let label = label.into();
        let state = match futures::poll!(branch.as_mut()) {
            Poll::Ready(result) => PendingState::Ready(Some(result)),
            Poll::Pending => PendingState::Running(tokio::spawn(branch)),
        };
        Self { label, state }
    }
}

impl<V> Pending<V> {
    /// Branch label this result belongs to.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// True when the branch completed during its inline start.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, PendingState::Ready(Some(_)))
    }
}

impl<V> Future for Pending<V> {
    type Output = Result<V, FlowError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = &mut *self;
        match &mut this.state {
            PendingState::Ready(slot) => Poll::Ready(slot.take().unwrap_or_else(|| {
                Err(FlowError::BranchJoin {
                    label: this.label.clone(),
                    message: "polled after completion".into(),
                })
            })),
            PendingState::Running(handle) => match Pin::new(handle).poll(cx) {
                Poll::Ready(Ok(result)) => Poll::Ready(result),
                Poll::Ready(Err(join)) => Poll::Ready(Err(FlowError::BranchJoin {
                    label: this.label.clone(),
                    message: join.to_string(),
                })),
                Poll::Pending => Poll::Pending,
            },
        }
    }
}

/// Awaits every pending branch; the first error wins.
///
/// The common "await all" merge policy.
pub async fn join_all<V>(
    pending: HashMap<String, Pending<V>>,
) -> Result<HashMap<String, V>, FlowError> {
    let (labels, futures): (Vec<_>, Vec<_>) = pending.into_iter().unzip();
    let results = futures::future::join_all(futures).await;
    let mut values = HashMap::with_capacity(labels.len());
    for (label, result) in labels.into_iter().zip(results) {
        values.insert(label, result?);
    }
    Ok(values)
}
