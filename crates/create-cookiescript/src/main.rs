//! create-cookiescript - bootstrap a cloned CookieScript template
//!
//! This is the main entry point for the command-line interface.

mod cli;
mod commands;
mod exit;
mod output;

use std::process::ExitCode;

use clap::Parser;
use cookiescript_bootstrap::Error as BootstrapError;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;
use commands::create::CreateArgs;
use exit::ExitPolicy;

fn main() -> ExitCode {
    // Unknown flags are tolerated rather than rejected
    let lenient = cli::retain_known_flags(std::env::args_os());
    let cli = match Cli::try_parse_from(lenient.args) {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version go to stdout and succeed; anything else is a usage error
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(exit::USAGE)
            } else {
                ExitCode::from(exit::SUCCESS)
            };
        }
    };

    init_tracing(cli.verbose, cli.quiet);
    for flag in &lenient.ignored {
        debug!("Ignoring unknown option: {}", flag);
    }
    for arg in &cli.extra_args {
        debug!("Ignoring extra argument: {}", arg);
    }

    let Some(directory) = cli.project_directory.clone() else {
        output::usage_error("create-cookiescript");
        return ExitCode::from(exit::USAGE);
    };

    let policy = ExitPolicy::from_legacy_flag(cli.legacy_exit_codes);
    let args = CreateArgs {
        directory,
        use_alternate_package_manager: cli.use_alternate_package_manager(),
        engines: cli.engines.clone(),
    };

    match commands::create::run(&args) {
        Ok(()) => ExitCode::from(exit::SUCCESS),
        Err(err) => {
            match err.downcast_ref::<BootstrapError>() {
                Some(bootstrap_err) => output::failure(bootstrap_err),
                None => output::error(&format!("{:#}", err)),
            }
            let code = policy.code_for_error(&err);
            debug!("Exiting with code {}", code);
            ExitCode::from(code)
        }
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            // Progress is rendered by `output`; logs are for diagnostics
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
