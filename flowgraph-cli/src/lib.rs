//! flowgraph-cli library: the demo graphs behind the `flowgraph` binary.
//!
//! Each demo builds a small graph (or direct-chain flow) of arithmetic steps over `i64`
//! that record what they did in a [`DemoLog`], runs it once and reports the log and result.
//!
//! ## Usage
//!
//! ```rust,no_run,ignore
//! let report = flowgraph_cli::run_demo(Demo::Loop, 3, &RunOptions::default()).await;
//! for line in &report.log {
//!     println!("{}", line);
//! }
//! ```

mod config;
mod demo;
mod run;

pub use config::{Demo, RunOptions};
pub use demo::DemoLog;
pub use run::{run_demo, DemoReport};
