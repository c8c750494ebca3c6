//! flowgraph binary: runs one demo step graph and prints its step log and result.

mod logging;

use clap::Parser;
use flowgraph_cli::{run_demo, Demo, RunOptions};

#[derive(Parser, Debug)]
#[command(name = "flowgraph")]
#[command(about = "flowgraph: run a demo step graph over an integer input")]
struct Args {
    /// Demo graph to run
    #[arg(value_enum)]
    demo: Demo,

    /// Integer input fed to the first step
    #[arg(allow_negative_numbers = true)]
    input: i64,

    /// Maximum node executions per run (guards against endless loops)
    #[arg(long, value_name = "N", env = "FLOWGRAPH_MAX_STEPS")]
    max_steps: Option<usize>,

    /// Verbose: log node start/complete and stream execution to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    let options = RunOptions {
        max_steps: args.max_steps,
    };
    let report = run_demo(args.demo, args.input, &options).await;

    println!("Demo: {} ({})", report.demo.name(), report.input);
    println!("---");
    for line in &report.log {
        println!("{}", line);
    }
    println!("---");
    match report.result {
        Ok(value) => println!("Result: {}", value),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
