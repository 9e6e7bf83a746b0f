//! # jsv CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Standard output carries only the command's result; logs go to standard
//! error.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jsv_cli::validate::{run_validate, ValidateArgs, EXIT_ERROR};
use jsv_cli::version::{run_version, VERSION};

/// Validate JSON or YAML configuration files against a JSON Schema.
///
/// Draft 4 is assumed unless the schema declares another `$schema`. The
/// `cidr` and `semver` string formats are available in addition to the
/// standard ones.
#[derive(Parser, Debug)]
#[command(name = "jsv", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit log lines as JSON objects.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a config file against a schema and print the result as JSON.
    Validate(ValidateArgs),

    /// Print version, commit hash, OS and architecture.
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    tracing::debug!("jsv v{VERSION} starting");

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args),
        Commands::Version => run_version(),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Install the stderr subscriber. Without `-v`, `RUST_LOG` is honored when
/// set and the level defaults to `warn`.
fn init_tracing(verbose: u8, json: bool) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
