//! # Version Subcommand
//!
//! Prints build and platform information.

use std::io::Write;

use anyhow::{Context, Result};

/// Crate version baked in at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Git commit the binary was built from, passed in through the `JSV_BUILD`
/// environment variable at compile time.
pub fn commit_hash() -> &'static str {
    option_env!("JSV_BUILD").unwrap_or("unknown")
}

/// Execute the version subcommand, printing to standard output.
pub fn run_version() -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_version_to(&mut out)
}

/// Execute the version subcommand, printing to `out`.
pub fn run_version_to(out: &mut impl Write) -> Result<u8> {
    writeln!(out, "Version: {VERSION}")
        .and_then(|()| writeln!(out, "Git commit hash: {}", commit_hash()))
        .and_then(|()| writeln!(out, "OS: {}", std::env::consts::OS))
        .and_then(|()| writeln!(out, "Arch: {}", std::env::consts::ARCH))
        .context("failed to write version information")?;
    Ok(0)
}
