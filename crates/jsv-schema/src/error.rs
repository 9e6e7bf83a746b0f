//! # Error Types
//!
//! Orchestration-level failures of the validation pipeline. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! A document that fails its schema is not an error: it is a normal
//! [`ValidationResult`](crate::ValidationResult) with `is_valid == false`.
//! Faults raised by the schema engine itself (malformed schema, unresolvable
//! `$ref`) are folded into the result as a general exception and never
//! appear here.

use thiserror::Error;

/// Error that aborts the validation pipeline before a verdict is produced.
#[derive(Error, Debug)]
pub enum ValidateError {
    /// The path exists but is a directory.
    #[error("invalid target '{path}': expected a file, found a directory")]
    InvalidTarget {
        /// Path that was probed.
        path: String,
    },

    /// The path does not exist.
    #[error("file not found: '{path}'")]
    NotFound {
        /// Path that was probed.
        path: String,
    },

    /// The file could not be probed or read.
    #[error("io error for '{path}': {source}")]
    Io {
        /// Path of the file being accessed.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The content is neither valid JSON nor valid YAML.
    #[error("content of '{path}' is neither valid JSON nor valid YAML: {reason}")]
    Format {
        /// Path of the offending document.
        path: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The schema file could not be turned into a loadable schema document.
    #[error("schema load error for '{path}': {reason}")]
    SchemaLoad {
        /// Path of the schema file.
        path: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },
}

/// Fault raised by the schema engine while compiling a schema, e.g. a
/// schema that violates its meta-schema or a `$ref` that cannot be resolved.
///
/// Never returned from [`SchemaValidator::validate`](crate::SchemaValidator::validate):
/// the orchestrator folds it into the result as a general exception.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct EngineError(pub String);

/// Convenience alias used across the crate.
pub type ValidateResult<T> = Result<T, ValidateError>;
