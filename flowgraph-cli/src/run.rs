//! Run entry point: builds the selected demo, runs it once, collects the log.

use flowgraph::FlowError;

use crate::config::{Demo, RunOptions};
use crate::demo::{self, DemoLog};

/// Outcome of one demo run: the step log and the final value or error.
#[derive(Debug)]
pub struct DemoReport {
    pub demo: Demo,
    pub input: i64,
    /// One line per executed step or guard, in execution order.
    pub log: Vec<String>,
    pub result: Result<i64, FlowError>,
}

impl DemoReport {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Runs `demo` with `input`, applying `options` to every graph stream.
///
/// Never fails by itself: build and run errors are reported in `DemoReport::result`
/// together with whatever was logged before the failure.
pub async fn run_demo(demo: Demo, input: i64, options: &RunOptions) -> DemoReport {
    tracing::info!(demo = demo.name(), input, "Running demo");
    let log = DemoLog::new();
    let config = options.stream_config();

    let result = match demo {
        Demo::Checker => demo::checker().with_config(config).run(input, log.clone()).await,
        Demo::Loop => demo::looping().with_config(config).run(input, log.clone()).await,
        Demo::Branch => match demo::branch() {
            Ok(stream) => stream.with_config(config).run(input, log.clone()).await,
            Err(e) => Err(e),
        },
        Demo::Fork => demo::fork().with_config(config).run(input, log.clone()).await,
        Demo::Chain => demo::chain().start_with(input, log.clone()).await,
    };

    match &result {
        Ok(value) => tracing::info!(demo = demo.name(), value, "Demo finished"),
        Err(e) if e.is_stop() => tracing::info!(demo = demo.name(), error = %e, "Demo stopped"),
        Err(e) => tracing::warn!(demo = demo.name(), error = %e, "Demo failed"),
    }

    DemoReport {
        demo,
        input,
        log: log.entries(),
        result,
    }
}
