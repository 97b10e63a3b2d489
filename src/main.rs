//! Preflight CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use preflight::checks::PREFLIGHT_FAILURE_EXIT_CODE;
use preflight::cli::Cli;
use preflight::delegate::process_exit_code;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr; stdout carries the check report.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("preflight=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("preflight=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not failures
            return if e.use_stderr() {
                ExitCode::from(process_exit_code(PREFLIGHT_FAILURE_EXIT_CODE))
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_tracing(cli.debug);

    tracing::debug!("Preflight starting with args: {:?}", cli);

    match preflight::cli::run(&cli) {
        Ok(code) => ExitCode::from(process_exit_code(code)),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(process_exit_code(PREFLIGHT_FAILURE_EXIT_CODE))
        }
    }
}
