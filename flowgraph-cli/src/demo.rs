//! Demo graphs: arithmetic steps over `i64` that log into a shared [`DemoLog`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use flowgraph::{
    generate_flow, join_all, BoxError, Checker, Decider, Flow, FlowError, Graph, Pending, Process,
    Stream,
};

/// Context shared by every step of a demo run; collects one line per step.
#[derive(Debug, Default)]
pub struct DemoLog {
    entries: Mutex<Vec<String>>,
}

impl DemoLog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, entry: impl Into<String>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.into());
    }

    /// Snapshot of the lines logged so far.
    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn add(n: i64) -> impl Process<i64, DemoLog> {
    move |x: i64, log: Arc<DemoLog>| async move {
        let out = x.checked_add(n).ok_or("integer overflow")?;
        log.push(format!("ADDED BY {}, {} becomes {}", n, x, out));
        Ok::<_, BoxError>(out)
    }
}

fn subtract(n: i64) -> impl Process<i64, DemoLog> {
    move |x: i64, log: Arc<DemoLog>| async move {
        let out = x.checked_sub(n).ok_or("integer overflow")?;
        log.push(format!("SUBTRACTED BY {}, {} becomes {}", n, x, out));
        Ok::<_, BoxError>(out)
    }
}

fn multiply(n: i64) -> impl Process<i64, DemoLog> {
    move |x: i64, log: Arc<DemoLog>| async move {
        let out = x.checked_mul(n).ok_or("integer overflow")?;
        log.push(format!("MULTIPLIED BY {}, {} becomes {}", n, x, out));
        Ok::<_, BoxError>(out)
    }
}

fn square() -> impl Process<i64, DemoLog> {
    |x: i64, log: Arc<DemoLog>| async move {
        let out = x.checked_mul(x).ok_or("integer overflow")?;
        log.push(format!("SQUARED, {} becomes {}", x, out));
        Ok::<_, BoxError>(out)
    }
}

/// Stop guard logging its verdict, e.g. "STOPPED!: 17 is greater than 10".
fn stop_if(label: &'static str, stop: fn(i64) -> bool) -> impl Checker<i64, DemoLog> {
    move |x: i64, log: Arc<DemoLog>| async move {
        let stopped = stop(x);
        if stopped {
            log.push(format!("STOPPED!: {} {}", x, label));
        } else {
            let unmet = label.trim_start_matches("is ");
            log.push(format!("NOT STOPPED!: {} is NOT {}", x, unmet));
        }
        Ok::<_, BoxError>(stopped)
    }
}

/// STEP1..STEP4 with two stop guards.
pub(crate) fn checker() -> Stream<i64, DemoLog> {
    let graph = Graph::<i64, DemoLog>::new();
    graph
        .register("STEP1", multiply(3))
        .continued_by("STEP2", add(2))
        .stopped()
        .when("CHECK_A", stop_if("is greater than 10", |x| x > 10))
        .continued_by("STEP3", add(10))
        .stopped()
        .when("CHECK_B", stop_if("is divisible by 5", |x| x % 5 == 0))
        .continued_by("STEP4", add(2));
    graph.generate_stream("STEP1", "STEP4")
}

/// STEP1..STEP3 repeated while the value is below 30, then STEP4, STEP5.
pub(crate) fn looping() -> Stream<i64, DemoLog> {
    let graph = Graph::<i64, DemoLog>::new();
    graph
        .register("STEP1", add(2))
        .continued_by("STEP2", subtract(1))
        .continued_by("STEP3", multiply(2))
        .try_altering_to("STEP1")
        .when("ALTER_A", |x: i64, log: Arc<DemoLog>| async move {
            let again = x < 30;
            if again {
                log.push("RETURN BACK TO STEP1");
            }
            Ok::<_, BoxError>(again)
        })
        .continued_by("STEP4", add(1))
        .continued_by("STEP5", subtract(2));
    graph.generate_stream("STEP1", "STEP5")
}

fn pick_path() -> impl Decider<i64, DemoLog> {
    |x: i64, log: Arc<DemoLog>| async move {
        let path = if x < 6 {
            None
        } else {
            let path = format!("PATH{}", 1 + x.rem_euclid(3));
            log.push(format!("SWITCH TO {}", path));
            Some(path)
        };
        Ok::<_, BoxError>(path)
    }
}

/// STEP1, a switch over PATH1..PATH3 (two steps each), all rejoining at STEP5.
pub(crate) fn branch() -> Result<Stream<i64, DemoLog>, FlowError> {
    let graph = Graph::<i64, DemoLog>::new();
    graph
        .register("STEP1", add(2))
        .try_switching_to("SWITCH", pick_path())
        .continued_by("STEP5", subtract(2));
    graph
        .register("PATH1", multiply(2))
        .continued_by("PATH1-2", multiply(2))
        .continued_to("STEP5")?;
    graph
        .register("PATH2", subtract(1))
        .continued_by("PATH2-2", subtract(1))
        .continued_to("STEP5")?;
    graph
        .register("PATH3", add(2))
        .continued_by("PATH3-2", add(2))
        .continued_to("STEP5")?;
    Ok(graph.generate_stream("STEP1", "STEP5"))
}

async fn sum_branches(
    pending: HashMap<String, Pending<i64>>,
    log: Arc<DemoLog>,
) -> Result<i64, BoxError> {
    let mut labels: Vec<String> = pending.keys().cloned().collect();
    labels.sort_unstable();
    log.push(format!("MERGING {}", labels.join(", ")));
    let values = join_all(pending).await?;
    Ok(values.values().sum())
}

/// IN, a fork over three single-node branches merged by summing, then OUT.
pub(crate) fn fork() -> Stream<i64, DemoLog> {
    let graph = Graph::<i64, DemoLog>::new();
    graph.register("DOUBLE", multiply(2));
    graph.register("PLUS10", add(10));
    graph.register("SQUARE", square());
    let branches = [
        ("double", graph.generate_stream("DOUBLE", "DOUBLE")),
        ("plus10", graph.generate_stream("PLUS10", "PLUS10")),
        ("square", graph.generate_stream("SQUARE", "SQUARE")),
    ];
    graph
        .register("IN", add(0))
        .fork("FORK", branches)
        .merge(sum_branches)
        .continued_by("OUT", add(1));
    graph.generate_stream("IN", "OUT")
}

/// Direct chain: x2, then either the -1 detour (ends the chain) or +1.
pub(crate) fn chain() -> Flow<i64, DemoLog> {
    let detour = generate_flow::<i64, DemoLog>().continued_by(subtract(1));
    generate_flow::<i64, DemoLog>()
        .continued_by(multiply(2))
        .altered_to(detour)
        .when(|x: i64, log: Arc<DemoLog>| async move {
            let detour = x > 50;
            if detour {
                log.push(format!("DETOUR: {} is greater than 50", x));
            }
            Ok::<_, BoxError>(detour)
        })
        .continued_by(add(1))
}
