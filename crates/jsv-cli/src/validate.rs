//! # Validate Subcommand
//!
//! Validates one config file against one schema file and prints the
//! [`ValidationResult`] as JSON on standard output.
//!
//! ## Exit Codes
//!
//! - `0`: the pipeline completed, whether or not the config is valid.
//! - `1`: the config is invalid and `--fail-on-invalid` was given.
//! - `2`: the pipeline aborted (missing file, directory, unreadable or
//!   unparseable content). A fallback result whose single exception carries
//!   the error is still printed, so standard output is always JSON.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use jsv_schema::{Draft, SchemaValidator, ValidationResult, ValidatorOptions};

/// Exit code for a completed pipeline.
pub const EXIT_OK: u8 = 0;
/// Exit code for an invalid config under `--fail-on-invalid`.
pub const EXIT_INVALID: u8 = 1;
/// Exit code for an aborted pipeline.
pub const EXIT_ERROR: u8 = 2;

/// Arguments for the `jsv validate` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Schema file to validate against (JSON or YAML).
    #[arg(short, long, value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Config file to be validated (JSON or YAML).
    #[arg(short, long, value_name = "CONFIG")]
    pub config: PathBuf,

    /// Evaluate under this draft instead of the schema's `$schema`
    /// (which defaults to draft 4).
    #[arg(long, value_enum)]
    pub draft: Option<DraftArg>,

    /// Skip `format` assertions, including cidr and semver.
    #[arg(long)]
    pub no_formats: bool,

    /// Report formats with no registered checker as violations.
    #[arg(long)]
    pub strict_formats: bool,

    /// Pretty-print the JSON result.
    #[arg(long)]
    pub pretty: bool,

    /// Exit with status 1 when the config is invalid.
    #[arg(long)]
    pub fail_on_invalid: bool,
}

/// JSON Schema drafts selectable on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftArg {
    /// Draft 4.
    #[value(name = "4")]
    Draft4,
    /// Draft 6.
    #[value(name = "6")]
    Draft6,
    /// Draft 7.
    #[value(name = "7")]
    Draft7,
    /// Draft 2019-09.
    #[value(name = "2019-09")]
    Draft201909,
    /// Draft 2020-12.
    #[value(name = "2020-12")]
    Draft202012,
}

impl From<DraftArg> for Draft {
    fn from(arg: DraftArg) -> Self {
        match arg {
            DraftArg::Draft4 => Draft::Draft4,
            DraftArg::Draft6 => Draft::Draft6,
            DraftArg::Draft7 => Draft::Draft7,
            DraftArg::Draft201909 => Draft::Draft201909,
            DraftArg::Draft202012 => Draft::Draft202012,
        }
    }
}

impl ValidateArgs {
    /// Engine settings selected by the flags.
    pub fn options(&self) -> ValidatorOptions {
        let mut options = ValidatorOptions::default()
            .with_format_validation(!self.no_formats)
            .with_unknown_formats_ignored(!self.strict_formats);
        if let Some(draft) = self.draft {
            options = options.with_draft(draft.into());
        }
        options
    }
}

/// Execute the validate subcommand, printing to standard output.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_validate_to(args, &mut out)
}

/// Execute the validate subcommand, printing the result to `out`.
///
/// Returns the process exit code. Only failures to render or write the
/// result are returned as errors.
pub fn run_validate_to(args: &ValidateArgs, out: &mut impl Write) -> Result<u8> {
    let validator = SchemaValidator::new().with_options(args.options());
    tracing::debug!(
        schema = %args.schema.display(),
        config = %args.config.display(),
        formats = ?validator.formats(),
        "validating"
    );

    let (result, code) = match validator.validate(&args.schema, &args.config) {
        Ok(result) => {
            let code = if !result.is_valid() && args.fail_on_invalid {
                EXIT_INVALID
            } else {
                EXIT_OK
            };
            (result, code)
        }
        Err(e) => {
            tracing::error!("validation aborted: {e}");
            let fallback = ValidationResult::from_error(
                args.schema.display().to_string(),
                args.config.display().to_string(),
                &e,
            );
            (fallback, EXIT_ERROR)
        }
    };

    let rendered = if args.pretty {
        result.to_json_pretty()
    } else {
        result.to_json()
    }
    .context("failed to serialize validation result")?;

    writeln!(out, "{rendered}").context("failed to write validation result")?;
    Ok(code)
}
