//! Logging initialization for the `flowgraph` binary.
//!
//! Tracing events go to stderr so stdout carries only the step log and the result.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;

/// Installs a stderr `fmt` layer filtered by `RUST_LOG`.
///
/// Without `RUST_LOG` the filter is `warn`, or `flowgraph=debug,flowgraph_cli=debug`
/// when `verbose` is set (node start/complete events).
pub fn init(verbose: bool) {
    let fallback = if verbose {
        "flowgraph=debug,flowgraph_cli=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .with_filter(filter),
        )
        .try_init();
}
