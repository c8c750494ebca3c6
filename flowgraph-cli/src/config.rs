//! Run configuration: which demo to run and per-run limits.

use clap::ValueEnum;
use flowgraph::StreamConfig;

/// Demo graph selected on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Demo {
    /// x3, +2, stop if > 10, +10, stop if divisible by 5, +2
    Checker,
    /// +2, -1, x2, loop back while < 30, then +1, -2
    Loop,
    /// +2, switch to one of three paths by value mod 3, rejoin at -2
    Branch,
    /// fork into x2, +10 and square, merge by summing, +1
    Fork,
    /// direct chain: x2, detour through -1 when > 50, else +1
    Chain,
}

impl Demo {
    /// Name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Demo::Checker => "checker",
            Demo::Loop => "loop",
            Demo::Branch => "branch",
            Demo::Fork => "fork",
            Demo::Chain => "chain",
        }
    }
}

/// Optional overrides for a demo run (CLI args or programmatic).
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Limit on node executions per graph run. Not applied to the `chain` demo, which
    /// has no named nodes.
    pub max_steps: Option<usize>,
}

impl RunOptions {
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Stream limits derived from these options.
    pub fn stream_config(&self) -> StreamConfig {
        StreamConfig {
            max_steps: self.max_steps,
        }
    }
}
