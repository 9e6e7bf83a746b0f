//! # Validation Results
//!
//! The structured outcome of one validation call and its JSON rendering.
//!
//! ## Output Contract
//!
//! ```json
//! {
//!   "is_valid": false,
//!   "exception": [{"error_string": "\"bogus\" is not a \"cidr\"", "path": "/net"}],
//!   "config": "config.yaml",
//!   "schema": "schema.json"
//! }
//! ```
//!
//! Field names and their order are stable. `exception` lists problems in the
//! order they were discovered.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Path recorded for an orchestration error folded into a result.
pub const PATH_NOT_REPORTED: &str = "Not Reported";

/// Path recorded when the schema engine fails as a whole rather than
/// reporting a field-level violation.
pub const PATH_GENERAL_EXCEPTION: &str =
    "a general exception occurred; probably an invalid schema";

/// One reported problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionDetail {
    /// Human-readable description.
    #[serde(rename = "error_string")]
    pub message: String,
    /// JSON Pointer to the offending instance location (`""` is the document
    /// root), or one of the sentinel paths.
    pub path: String,
}

impl ExceptionDetail {
    /// A detail at `path`.
    pub fn new(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: path.into(),
        }
    }

    /// Returns true if the detail carries one of the sentinel paths instead
    /// of an instance location.
    pub fn is_general(&self) -> bool {
        self.path == PATH_NOT_REPORTED || self.path == PATH_GENERAL_EXCEPTION
    }
}

impl fmt::Display for ExceptionDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Outcome of validating one config against one schema.
///
/// `is_valid` is true exactly when `exception` is empty. The constructors
/// keep the two in step, and deserialization rejects documents that don't.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ValidationResultRepr")]
pub struct ValidationResult {
    is_valid: bool,
    #[serde(rename = "exception")]
    exceptions: Vec<ExceptionDetail>,
    config: String,
    schema: String,
}

/// Wire form of [`ValidationResult`], checked before conversion.
#[derive(Deserialize)]
struct ValidationResultRepr {
    is_valid: bool,
    #[serde(rename = "exception")]
    exceptions: Vec<ExceptionDetail>,
    config: String,
    schema: String,
}

impl TryFrom<ValidationResultRepr> for ValidationResult {
    type Error = String;

    fn try_from(repr: ValidationResultRepr) -> Result<Self, Self::Error> {
        if repr.is_valid != repr.exceptions.is_empty() {
            return Err(format!(
                "is_valid is {} but exception has {} entries",
                repr.is_valid,
                repr.exceptions.len()
            ));
        }
        Ok(Self::from_exceptions(repr.schema, repr.config, repr.exceptions))
    }
}

impl ValidationResult {
    /// Build a result from the problems found. No problems means valid.
    pub fn from_exceptions(
        schema: impl Into<String>,
        config: impl Into<String>,
        exceptions: Vec<ExceptionDetail>,
    ) -> Self {
        Self {
            is_valid: exceptions.is_empty(),
            exceptions,
            config: config.into(),
            schema: schema.into(),
        }
    }

    /// A passing result.
    pub fn valid(schema: impl Into<String>, config: impl Into<String>) -> Self {
        Self::from_exceptions(schema, config, Vec::new())
    }

    /// A failing result for an engine fault, recorded at
    /// [`PATH_GENERAL_EXCEPTION`].
    pub fn general_exception(
        schema: impl Into<String>,
        config: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::from_exceptions(
            schema,
            config,
            vec![ExceptionDetail::new(message, PATH_GENERAL_EXCEPTION)],
        )
    }

    /// A failing result standing in for an orchestration error, recorded at
    /// [`PATH_NOT_REPORTED`].
    pub fn from_error(
        schema: impl Into<String>,
        config: impl Into<String>,
        error: &dyn std::error::Error,
    ) -> Self {
        Self::from_exceptions(
            schema,
            config,
            vec![ExceptionDetail::new(error.to_string(), PATH_NOT_REPORTED)],
        )
    }

    /// Whether the config satisfied the schema.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Problems in discovery order.
    pub fn exceptions(&self) -> &[ExceptionDetail] {
        &self.exceptions
    }

    /// Config path echoed from the request.
    pub fn config(&self) -> &str {
        &self.config
    }

    /// Schema path echoed from the request.
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Compact JSON rendering.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Indented JSON rendering.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
