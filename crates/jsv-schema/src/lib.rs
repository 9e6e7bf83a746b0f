//! # jsv-schema: Config Validation Pipeline
//!
//! Validates JSON or YAML configuration files against JSON Schema
//! definitions (Draft 4 unless the schema declares otherwise) and reports
//! per-field violations as a structured [`ValidationResult`].
//!
//! Schema matching itself is done by the `jsonschema` crate. This crate
//! wraps it in a single-pass pipeline:
//!
//! - [`resolve`]: existence probe that rejects directories.
//! - [`normalize`]: JSON pass-through, YAML-to-JSON conversion.
//! - [`formats`]: the `cidr` and `semver` string formats.
//! - [`schema`]: schema loading with `$ref` resolution to local files.
//! - [`validate`]: [`SchemaValidator`], which runs the pipeline.
//! - [`result`]: [`ValidationResult`] and its JSON rendering.
//!
//! ## Example
//!
//! ```no_run
//! use jsv_schema::SchemaValidator;
//!
//! let validator = SchemaValidator::new();
//! let result = validator.validate("schemas/network.json", "network.yaml")?;
//! println!("{}", result.to_json()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Crate Policy
//!
//! - A document that fails its schema is a result, never an error.
//! - Engine faults (malformed schema, unresolvable `$ref`) are folded into
//!   the result with a sentinel path so callers can always emit JSON.
//! - Schemas and everything they reference are read from the local
//!   filesystem only.

pub mod error;
pub mod formats;
pub mod normalize;
pub mod resolve;
pub mod result;
pub mod schema;
pub mod validate;

pub use error::{EngineError, ValidateError, ValidateResult};
pub use formats::{is_cidr, is_semver, FormatRegistry};
pub use jsonschema::Draft;
pub use result::{ExceptionDetail, ValidationResult};
pub use schema::{load_schema, LoadedSchema};
pub use validate::{SchemaValidator, ValidationRequest, ValidatorOptions};
