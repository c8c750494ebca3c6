//! Failure paths: unknown keys, failing steps, the step limit.

use std::sync::Arc;

use flowgraph::{BoxError, FlowError, Graph};

use crate::common::{added_by, multiplied_by, Failing, LogContext};

/// **Scenario**: An unknown start key fails with NotFound.
#[tokio::test]
async fn unknown_start_key_is_not_found() {
    let graph = Graph::<i64, LogContext>::new();
    graph.register("A", added_by(1));

    let err = graph
        .generate_stream("MISSING", "A")
        .run(0, LogContext::new())
        .await
        .unwrap_err();

    assert!(matches!(err, FlowError::NotFound(key) if key == "MISSING"));
}

/// **Scenario**: A decider naming an unregistered key fails with NotFound for that key.
#[tokio::test]
async fn switch_to_unknown_key_is_not_found() {
    let graph = Graph::<i64, LogContext>::new();
    graph
        .register("A", added_by(1))
        .try_switching_to("SWITCH", |_x: i64, _ctx: Arc<LogContext>| async move {
            Ok::<_, BoxError>(Some("NOWHERE".to_string()))
        })
        .continued_by("B", added_by(1));

    let err = graph
        .generate_stream("A", "B")
        .run(0, LogContext::new())
        .await
        .unwrap_err();

    assert!(matches!(err, FlowError::NotFound(key) if key == "NOWHERE"));
}

/// **Scenario**: A failing step aborts the walk with its node and message; later steps never run.
#[tokio::test]
async fn failing_step_aborts_with_execution_error() {
    let graph = Graph::<i64, LogContext>::new();
    let end = graph
        .register("A", added_by(1))
        .continued_by("B", Failing("division by zero"))
        .continued_by("C", multiplied_by(2));
    let ctx = LogContext::new();

    let err = end
        .generate_stream("A")
        .run(0, ctx.clone())
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "exception while running the stream at B: division by zero"
    );
    assert_eq!(
        ctx.entries(),
        vec!["ADDED BY 1, 0 becomes 1", "FAILING: division by zero"]
    );
}

/// **Scenario**: An endless alter loop is cut by max_steps.
#[tokio::test]
async fn endless_loop_hits_step_limit() {
    let graph = Graph::<i64, LogContext>::new();
    let end = graph
        .register("A", added_by(1))
        .try_altering_to("A")
        .when("LOOP", |_x: i64, _ctx: Arc<LogContext>| async move {
            Ok::<_, BoxError>(true)
        })
        .continued_by("END", added_by(0));
    let ctx = LogContext::new();

    let err = end
        .generate_stream("A")
        .with_max_steps(10)
        .run(0, ctx.clone())
        .await
        .unwrap_err();

    assert!(matches!(err, FlowError::StepLimitExceeded(10)));
    assert_eq!(ctx.entries().len(), 5);
}

/// **Scenario**: A bounded loop finishing within the limit is unaffected.
#[tokio::test]
async fn loop_within_limit_completes() {
    let graph = Graph::<i64, LogContext>::new();
    let end = graph
        .register("A", added_by(1))
        .try_altering_to("A")
        .when("LOOP", |x: i64, _ctx: Arc<LogContext>| async move {
            Ok::<_, BoxError>(x < 3)
        })
        .continued_by("END", added_by(0));

    let result = end
        .generate_stream("A")
        .with_max_steps(7)
        .run(0, LogContext::new())
        .await
        .unwrap();

    assert_eq!(result, 3);
}

/// **Scenario**: connect and from refuse an unknown source; targets resolve at run time.
#[test]
fn wiring_unknown_source_is_not_found() {
    let graph = Graph::<i64, LogContext>::new();
    graph.register("A", added_by(1));

    assert!(matches!(graph.connect("Z", "A"), Err(FlowError::NotFound(k)) if k == "Z"));
    assert!(graph.connect("A", "LATER").is_ok());
    assert!(graph.from("Z").is_err());
    assert!(graph.from("A").is_ok());
}
