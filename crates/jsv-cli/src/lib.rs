//! # jsv-cli: Command Line Interface
//!
//! Subcommand handlers for the `jsv` binary. Argument types derive
//! [`clap::Args`] so they can be embedded in the top-level parser in
//! `main.rs`; handlers write to a caller-supplied writer and return the
//! process exit code, which keeps them testable without spawning a process.
//!
//! - [`validate`]: validate a config file against a schema.
//! - [`version`]: build and platform information.

pub mod validate;
pub mod version;
