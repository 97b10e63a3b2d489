//! Wiring from parsed arguments to a finished run.

use crate::checks::{InterpreterLocator, Preflight, SystemProbe};
use crate::config::{load_config, Settings};
use crate::error::Result;
use crate::ui::{PreflightTheme, Reporter};

use super::args::Cli;

/// Load settings, run the checks and the diagnostic routine, and return the
/// exit code for the process.
///
/// # Errors
///
/// Only configuration problems are errors; a failed check is reported on
/// stdout and returned as a non-zero exit code.
pub fn run(cli: &Cli) -> Result<i32> {
    let project_root = match &cli.project {
        Some(path) => path.clone(),
        None => std::env::current_dir()?,
    };

    let config = load_config(&project_root, cli.config.as_deref())?;
    let settings = Settings::resolve(config, &cli.overrides(), &project_root)?;
    tracing::debug!("Resolved settings: {:?}", settings);

    let probe = SystemProbe::new(
        InterpreterLocator::from_env(settings.candidates),
        settings.version_timeout,
    );
    let mut preflight = Preflight::new(
        probe,
        settings.diagnostic,
        settings.minimum,
        settings.runtime,
    );
    let mut reporter = Reporter::stdout(PreflightTheme::detect(cli.no_color));

    let state = preflight.run(&cli.args, &mut reporter);
    Ok(state.exit_code())
}
