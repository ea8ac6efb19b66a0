//! tandem-sim: compress text with Huffman coding, protect it with Hamming(7,4),
//! push it through a noisy channel and try to get it back.

mod config;
mod pipeline;
mod report;
mod text;

use clap::Parser;
use config::{Args, Config};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber. `RUST_LOG` wins over `-v` flags.
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let config = Config::from_args(Args::parse());
    init_logging(config.verbosity);

    if config.print_config {
        config.print();
    }
    tracing::info!(
        seed = config.channel.seed,
        errors = config.channel.error_count,
        "starting run"
    );

    match pipeline::run(&config) {
        Ok(metrics) => {
            if config.print_metrics {
                metrics.print_summary();
            }
            metrics.print_result();
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(%err, "run aborted");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
