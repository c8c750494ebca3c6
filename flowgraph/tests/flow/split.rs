//! Split/merge over branch flows.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use flowgraph::{generate_flow, join_all, BoxError, FlowError, Pending};

use crate::common::{added_by, multiplied_by, LogContext, Slow};

/// **Scenario**: Every branch gets the current value; the merged value continues the chain.
#[tokio::test]
async fn split_then_merge_continues_with_merged_value() {
    let flow = generate_flow::<i64, LogContext>()
        .continued_by(added_by(1))
        .splitted_into([
            ("double", generate_flow::<i64, LogContext>().continued_by(multiplied_by(2))),
            (
                "slow",
                generate_flow::<i64, LogContext>().continued_by(Slow {
                    delay: Duration::from_millis(10),
                }),
            ),
        ])
        .on_merge(
            |pending: HashMap<String, Pending<i64>>, ctx: Arc<LogContext>| async move {
                ctx.push(format!("MERGING {} BRANCHES", pending.len()));
                let values = join_all(pending).await?;
                let total: i64 = values.values().sum();
                Ok::<_, BoxError>(total)
            },
        )
        .continued_by(added_by(1));
    let ctx = LogContext::new();

    let result = flow.start_with(4, ctx.clone()).await.unwrap();

    assert_eq!(result, 10 + 4 + 1);
    assert_eq!(
        ctx.entries(),
        vec![
            "ADDED BY 1, 4 becomes 5",
            "MULTIPLIED BY 2, 5 becomes 10",
            "SLOW STARTED WITH 5",
            "MERGING 2 BRANCHES",
            "SLOW FINISHED WITH 4",
            "ADDED BY 1, 14 becomes 15",
        ]
    );
}

/// **Scenario**: A stopped branch propagates through the merge as a stop.
#[tokio::test]
async fn stopped_branch_stops_the_flow() {
    let flow = generate_flow::<i64, LogContext>()
        .splitted_into([(
            "stopper",
            generate_flow::<i64, LogContext>()
                .stopped()
                .when(|_x: i64, _ctx: Arc<LogContext>| async move { Ok::<_, BoxError>(true) }),
        )])
        .on_merge(
            |pending: HashMap<String, Pending<i64>>, _ctx: Arc<LogContext>| async move {
                let values = join_all(pending).await?;
                let total: i64 = values.values().sum();
                Ok::<_, BoxError>(total)
            },
        );

    let err = flow.start_with(1, LogContext::new()).await.unwrap_err();

    assert!(err.is_stop());
    assert!(matches!(err, FlowError::FlowStopped));
}

/// **Scenario**: A stop before the split skips branches and merge.
#[tokio::test]
async fn stop_before_split_skips_merge() {
    let flow = generate_flow::<i64, LogContext>()
        .stopped()
        .when(|_x: i64, _ctx: Arc<LogContext>| async move { Ok::<_, BoxError>(true) })
        .splitted_into([("any", generate_flow::<i64, LogContext>().continued_by(added_by(1)))])
        .on_merge(
            |_pending: HashMap<String, Pending<i64>>, ctx: Arc<LogContext>| async move {
                ctx.push("MERGED");
                Ok::<_, BoxError>(0)
            },
        );
    let ctx = LogContext::new();

    assert!(flow.evaluate(1, ctx.clone()).await.is_stopped());
    assert!(ctx.entries().is_empty());
}
