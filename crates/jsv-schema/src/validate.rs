//! # Validation Orchestration
//!
//! Composes resolution, normalization, schema loading, and the `jsonschema`
//! engine into one pass:
//!
//! 1. resolve the config path, then the schema path;
//! 2. normalize the config to JSON;
//! 3. load the schema with local `$ref` resolution;
//! 4. compile and run the engine;
//! 5. shape the verdict into a [`ValidationResult`].
//!
//! Steps 1–3 abort with a [`ValidateError`]. A compile failure in step 4 is
//! folded into the result as a general exception, and schema violations are
//! a normal invalid result, so once the inputs are readable the pipeline
//! always yields a result.
//!
//! ## Thread Safety
//!
//! `SchemaValidator` is `Send + Sync`: format predicates are `Send + Sync`
//! and each call builds its own engine, so one validator can serve many
//! threads.

use std::path::{Path, PathBuf};

use jsonschema::Draft;
use serde_json::Value;

use crate::error::{EngineError, ValidateError, ValidateResult};
use crate::formats::FormatRegistry;
use crate::normalize::normalize;
use crate::resolve::require_file;
use crate::result::{ExceptionDetail, ValidationResult};
use crate::schema::{load_schema, FileRetriever, LoadedSchema};

/// One schema/config pair to validate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRequest {
    /// Schema file.
    pub schema_path: PathBuf,
    /// Config file (JSON or YAML).
    pub config_path: PathBuf,
}

impl ValidationRequest {
    /// Pair a schema with a config.
    pub fn new(schema_path: impl Into<PathBuf>, config_path: impl Into<PathBuf>) -> Self {
        Self {
            schema_path: schema_path.into(),
            config_path: config_path.into(),
        }
    }
}

/// Engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorOptions {
    draft: Option<Draft>,
    validate_formats: bool,
    ignore_unknown_formats: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            draft: None,
            validate_formats: true,
            ignore_unknown_formats: true,
        }
    }
}

impl ValidatorOptions {
    /// Force a draft instead of reading `$schema` (which defaults to Draft 4).
    pub fn with_draft(mut self, draft: Draft) -> Self {
        self.draft = Some(draft);
        self
    }

    /// Enable or disable `format` assertions.
    pub fn with_format_validation(mut self, yes: bool) -> Self {
        self.validate_formats = yes;
        self
    }

    /// Whether formats with no registered checker pass silently (`true`) or
    /// are reported as violations (`false`).
    pub fn with_unknown_formats_ignored(mut self, yes: bool) -> Self {
        self.ignore_unknown_formats = yes;
        self
    }

    /// The forced draft, if any.
    pub fn draft(&self) -> Option<Draft> {
        self.draft
    }

    /// Whether `format` assertions run.
    pub fn validate_formats(&self) -> bool {
        self.validate_formats
    }

    /// Whether unknown formats are ignored.
    pub fn ignore_unknown_formats(&self) -> bool {
        self.ignore_unknown_formats
    }
}

/// Validates config files against schema files.
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    formats: FormatRegistry,
    options: ValidatorOptions,
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaValidator {
    /// A validator with the built-in `cidr` and `semver` formats and default
    /// options.
    pub fn new() -> Self {
        Self::with_formats(FormatRegistry::with_builtins())
    }

    /// A validator using exactly the formats in `formats`.
    pub fn with_formats(formats: FormatRegistry) -> Self {
        Self {
            formats,
            options: ValidatorOptions::default(),
        }
    }

    /// Replace the engine settings.
    pub fn with_options(mut self, options: ValidatorOptions) -> Self {
        self.options = options;
        self
    }

    /// Registered formats.
    pub fn formats(&self) -> &FormatRegistry {
        &self.formats
    }

    /// Registered formats, for adding checkers before validating.
    pub fn formats_mut(&mut self) -> &mut FormatRegistry {
        &mut self.formats
    }

    /// Engine settings.
    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Validate the config at `config_path` against the schema at
    /// `schema_path`.
    ///
    /// # Errors
    ///
    /// - `ValidateError::InvalidTarget` if either path is a directory. The
    ///   config path is probed first, and neither file is read before both
    ///   probes pass.
    /// - `ValidateError::NotFound` if either path does not exist.
    /// - `ValidateError::Io` if the config cannot be read.
    /// - `ValidateError::Format` if the config is neither JSON nor YAML.
    /// - `ValidateError::SchemaLoad` if the schema cannot be read or parsed.
    ///
    /// A document that violates the schema, or a schema the engine rejects,
    /// still yields `Ok` with `is_valid == false`.
    pub fn validate(
        &self,
        schema_path: impl AsRef<Path>,
        config_path: impl AsRef<Path>,
    ) -> ValidateResult<ValidationResult> {
        let schema_path = schema_path.as_ref();
        let config_path = config_path.as_ref();

        require_file(config_path)?;
        require_file(schema_path)?;

        let json = normalize(config_path)?;
        let instance: Value =
            serde_json::from_slice(&json).map_err(|e| ValidateError::Format {
                path: config_path.display().to_string(),
                reason: format!("normalized content is not JSON: {e}"),
            })?;

        self.run(schema_path, config_path.display().to_string(), &instance)
    }

    /// Validate the pair described by `request`.
    pub fn validate_request(&self, request: &ValidationRequest) -> ValidateResult<ValidationResult> {
        self.validate(&request.schema_path, &request.config_path)
    }

    /// Validate an already-parsed document against the schema at
    /// `schema_path`. `config_label` is echoed as the result's `config`.
    ///
    /// # Errors
    ///
    /// Same as [`validate`](Self::validate), minus the config-side errors.
    pub fn validate_value(
        &self,
        schema_path: impl AsRef<Path>,
        config_label: impl Into<String>,
        instance: &Value,
    ) -> ValidateResult<ValidationResult> {
        let schema_path = schema_path.as_ref();
        require_file(schema_path)?;
        self.run(schema_path, config_label.into(), instance)
    }

    /// Compile `schema` into an engine validator.
    ///
    /// # Errors
    ///
    /// Returns `EngineError` if the schema violates its meta-schema or one of
    /// its references cannot be resolved.
    pub fn compile(&self, schema: &LoadedSchema) -> Result<jsonschema::Validator, EngineError> {
        self.build_options(schema.draft)
            .build(&schema.document)
            .map_err(|e| EngineError(e.to_string()))
    }

    /// Run the engine and collect one [`ExceptionDetail`] per violation, in
    /// the order the engine reports them.
    ///
    /// # Errors
    ///
    /// Returns `EngineError` if the schema cannot be compiled.
    pub fn evaluate(
        &self,
        schema: &LoadedSchema,
        instance: &Value,
    ) -> Result<Vec<ExceptionDetail>, EngineError> {
        let validator = self.compile(schema)?;
        Ok(validator
            .iter_errors(instance)
            .map(|e| ExceptionDetail::new(e.to_string(), e.instance_path.to_string()))
            .collect())
    }

    fn run(
        &self,
        schema_path: &Path,
        config_label: String,
        instance: &Value,
    ) -> ValidateResult<ValidationResult> {
        let schema = load_schema(schema_path, self.options.draft)?;
        let schema_label = schema_path.display().to_string();

        let result = match self.evaluate(&schema, instance) {
            Ok(exceptions) => {
                ValidationResult::from_exceptions(schema_label, config_label, exceptions)
            }
            Err(e) => {
                tracing::warn!(
                    schema = %schema_path.display(),
                    error = %e,
                    "schema engine failed; reporting general exception"
                );
                ValidationResult::general_exception(schema_label, config_label, e.to_string())
            }
        };

        tracing::info!(
            schema = result.schema(),
            config = result.config(),
            is_valid = result.is_valid(),
            exceptions = result.exceptions().len(),
            "validation complete"
        );
        Ok(result)
    }

    /// Engine options: draft, format settings, every registered format, and
    /// the local file retriever.
    fn build_options(&self, draft: Draft) -> jsonschema::ValidationOptions {
        let mut opts = jsonschema::options();
        opts.with_draft(draft)
            .should_validate_formats(self.options.validate_formats)
            .should_ignore_unknown_formats(self.options.ignore_unknown_formats)
            .with_retriever(FileRetriever);
        self.formats.install(&mut opts);
        opts
    }
}
