//! Loops via try_altering_to and branches via try_switching_to joined with continued_to.

use std::sync::Arc;

use flowgraph::{BoxError, Graph};

use crate::common::{added_by, multiplied_by, subtracted_by, LogContext};

/// **Scenario**: The alter node sends the value back to STEP1 until it reaches 30.
#[tokio::test]
async fn simple_circular_flow() {
    let graph = Graph::<i64, LogContext>::new();
    graph
        .register("STEP1", added_by(2))
        .continued_by("STEP2", subtracted_by(1))
        .continued_by("STEP3", multiplied_by(2))
        .try_altering_to("STEP1")
        .when("ALTER_A", |out: i64, ctx: Arc<LogContext>| async move {
            let altered = out < 30;
            if altered {
                ctx.push("RETURN BACK TO STEP1");
            }
            Ok::<_, BoxError>(altered)
        })
        .continued_by("STEP4", added_by(1))
        .continued_by("STEP5", subtracted_by(2));
    let ctx = LogContext::new();

    let result = graph
        .generate_stream("STEP1", "STEP5")
        .run(3, ctx.clone())
        .await
        .unwrap();

    assert_eq!(result, 37);
    assert_eq!(
        ctx.entries(),
        vec![
            "ADDED BY 2, 3 becomes 5",
            "SUBTRACTED BY 1, 5 becomes 4",
            "MULTIPLIED BY 2, 4 becomes 8",
            "RETURN BACK TO STEP1",
            "ADDED BY 2, 8 becomes 10",
            "SUBTRACTED BY 1, 10 becomes 9",
            "MULTIPLIED BY 2, 9 becomes 18",
            "RETURN BACK TO STEP1",
            "ADDED BY 2, 18 becomes 20",
            "SUBTRACTED BY 1, 20 becomes 19",
            "MULTIPLIED BY 2, 19 becomes 38",
            "ADDED BY 1, 38 becomes 39",
            "SUBTRACTED BY 2, 39 becomes 37",
        ]
    );
}

fn branching_graph() -> Graph<i64, LogContext> {
    let graph = Graph::<i64, LogContext>::new();
    graph
        .register("STEP1", added_by(2))
        .try_switching_to("SWITCH", |out: i64, ctx: Arc<LogContext>| async move {
            let path = if out < 6 {
                None
            } else {
                let path = format!("PATH{}", 1 + out % 3);
                ctx.push(format!("SWITCH TO {}", path));
                Some(path)
            };
            Ok::<_, BoxError>(path)
        })
        .continued_by("STEP5", subtracted_by(2));

    graph
        .register("PATH1", multiplied_by(2))
        .continued_by("PATH1-2", multiplied_by(2))
        .continued_to("STEP5")
        .unwrap();
    graph
        .register("PATH2", subtracted_by(1))
        .continued_by("PATH2-2", subtracted_by(1))
        .continued_to("STEP5")
        .unwrap();
    graph
        .register("PATH3", added_by(2))
        .continued_by("PATH3-2", added_by(2))
        .continued_to("STEP5")
        .unwrap();
    graph
}

/// **Scenario**: The decider picks PATH1..PATH3 by `out % 3`; below 6 it falls through to STEP5.
#[tokio::test]
async fn branch_circular_flow() {
    let stream = branching_graph().generate_stream("STEP1", "STEP5");

    let cases: Vec<(i64, i64, Vec<&str>)> = vec![
        (
            3,
            3,
            vec!["ADDED BY 2, 3 becomes 5", "SUBTRACTED BY 2, 5 becomes 3"],
        ),
        (
            10,
            46,
            vec![
                "ADDED BY 2, 10 becomes 12",
                "SWITCH TO PATH1",
                "MULTIPLIED BY 2, 12 becomes 24",
                "MULTIPLIED BY 2, 24 becomes 48",
                "SUBTRACTED BY 2, 48 becomes 46",
            ],
        ),
        (
            11,
            9,
            vec![
                "ADDED BY 2, 11 becomes 13",
                "SWITCH TO PATH2",
                "SUBTRACTED BY 1, 13 becomes 12",
                "SUBTRACTED BY 1, 12 becomes 11",
                "SUBTRACTED BY 2, 11 becomes 9",
            ],
        ),
        (
            12,
            16,
            vec![
                "ADDED BY 2, 12 becomes 14",
                "SWITCH TO PATH3",
                "ADDED BY 2, 14 becomes 16",
                "ADDED BY 2, 16 becomes 18",
                "SUBTRACTED BY 2, 18 becomes 16",
            ],
        ),
    ];

    for (input, expected, log) in cases {
        let ctx = LogContext::new();
        let result = stream.run(input, ctx.clone()).await.unwrap();
        assert_eq!(result, expected, "input {}", input);
        assert_eq!(ctx.entries(), log, "input {}", input);
    }
}

/// **Scenario**: A switch ending the chain with no default and no decision ends the walk.
#[tokio::test]
async fn switch_without_decision_or_default_ends_walk() {
    let graph = Graph::<i64, LogContext>::new();
    graph.register("START", added_by(1)).switches(
        "DISPATCH",
        |_x: i64, _ctx: Arc<LogContext>| async move { Ok::<Option<String>, BoxError>(None) },
    );
    graph.register("NEVER", multiplied_by(100));

    let result = graph
        .generate_stream("START", "NEVER")
        .run(1, LogContext::new())
        .await
        .unwrap();

    assert_eq!(result, 2);
}

/// **Scenario**: An empty decision counts as no decision and takes the default successor.
#[tokio::test]
async fn empty_decision_takes_default() {
    let graph = Graph::<i64, LogContext>::new();
    graph
        .register("START", added_by(1))
        .try_switching_to("DISPATCH", |_x: i64, _ctx: Arc<LogContext>| async move {
            Ok::<_, BoxError>(Some(String::new()))
        })
        .continued_by("DEFAULT", multiplied_by(3));

    let result = graph
        .generate_stream("START", "DEFAULT")
        .run(1, LogContext::new())
        .await
        .unwrap();

    assert_eq!(result, 6);
}
