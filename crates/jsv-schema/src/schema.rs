//! # Schema Loading
//!
//! Loads a schema file for the engine and makes its `$ref`s resolvable
//! from the local filesystem.
//!
//! ## Schema Resolution
//!
//! The schema's canonical path is turned into a `file://` URL. The root
//! identifier (`id` under Draft 4, `$id` under later drafts) is anchored to
//! that URL: a missing one is injected, a relative one such as
//! `"network.json"` is joined onto it, and an absolute one is left alone.
//! A relative reference such as `definitions.json#/definitions/port` then
//! resolves against the schema's own directory.
//!
//! Cross-file references are served by `FileRetriever`, which only knows
//! `file://` URIs. Network references are not supported.

use std::path::{Path, PathBuf};

use jsonschema::{Draft, Retrieve, Uri};
use serde_json::Value;
use url::Url;

use crate::error::{ValidateError, ValidateResult};
use crate::normalize;

/// A schema document ready to be compiled by the engine.
#[derive(Debug, Clone)]
pub struct LoadedSchema {
    /// Path the schema was loaded from, as given by the caller.
    pub path: PathBuf,
    /// `file://` URL of the canonical schema path.
    pub base_uri: Url,
    /// Draft the schema is evaluated under.
    pub draft: Draft,
    /// The schema document, with its root identifier anchored to `base_uri`.
    pub document: Value,
}

/// Load the schema at `path`.
///
/// JSON and YAML schema files are both accepted. When `draft` is `None` the
/// draft is taken from the schema's `$schema` keyword, falling back to
/// Draft 4.
///
/// # Errors
///
/// Returns `ValidateError::SchemaLoad` if the file cannot be read, is
/// neither JSON nor YAML, or its path cannot be expressed as a `file://` URL.
pub fn load_schema(path: &Path, draft: Option<Draft>) -> ValidateResult<LoadedSchema> {
    let schema_load_error = |reason: String| ValidateError::SchemaLoad {
        path: path.display().to_string(),
        reason,
    };

    let mut document = normalize::read_value(path).map_err(|e| match e {
        ValidateError::Io { source, .. } => schema_load_error(format!("cannot read file: {source}")),
        ValidateError::Format { reason, .. } => schema_load_error(reason),
        other => other,
    })?;

    let canonical = std::fs::canonicalize(path)
        .map_err(|e| schema_load_error(format!("cannot canonicalize path: {e}")))?;
    let base_uri = Url::from_file_path(&canonical).map_err(|()| {
        schema_load_error(format!(
            "cannot express '{}' as a file URL",
            canonical.display()
        ))
    })?;

    let draft = draft
        .or_else(|| detect_draft(&document))
        .unwrap_or(Draft::Draft4);

    anchor_identifier(&mut document, draft, &base_uri);

    tracing::debug!(
        path = %path.display(),
        base_uri = %base_uri,
        ?draft,
        "loaded schema"
    );

    Ok(LoadedSchema {
        path: path.to_path_buf(),
        base_uri,
        draft,
        document,
    })
}

/// Identify the draft declared by a schema's `$schema` keyword.
pub fn detect_draft(schema: &Value) -> Option<Draft> {
    let uri = schema.get("$schema")?.as_str()?;
    let uri = uri.trim_end_matches('#');
    let uri = uri
        .strip_prefix("https://")
        .or_else(|| uri.strip_prefix("http://"))
        .unwrap_or(uri);
    match uri {
        "json-schema.org/draft-04/schema" => Some(Draft::Draft4),
        "json-schema.org/draft-06/schema" => Some(Draft::Draft6),
        "json-schema.org/draft-07/schema" => Some(Draft::Draft7),
        "json-schema.org/draft/2019-09/schema" => Some(Draft::Draft201909),
        "json-schema.org/draft/2020-12/schema" => Some(Draft::Draft202012),
        _ => None,
    }
}

/// Make the root identifier absolute against `base_uri`.
///
/// Only the keyword `draft` honors is considered. A missing identifier
/// becomes `base_uri`, a relative one is joined onto it, and an absolute one
/// is kept.
fn anchor_identifier(document: &mut Value, draft: Draft, base_uri: &Url) {
    let Value::Object(map) = document else {
        return;
    };
    let keyword = id_keyword(draft);
    let anchored = match map.get(keyword) {
        None => base_uri.clone(),
        Some(Value::String(id)) => match Url::parse(id) {
            Err(url::ParseError::RelativeUrlWithoutBase) => match base_uri.join(id) {
                Ok(joined) => joined,
                Err(e) => {
                    tracing::debug!(id = %id, error = %e, "cannot anchor schema identifier");
                    return;
                }
            },
            _ => return,
        },
        Some(_) => return,
    };
    map.insert(keyword.to_string(), Value::String(anchored.to_string()));
}

/// Keyword carrying the base URI under `draft`.
fn id_keyword(draft: Draft) -> &'static str {
    match draft {
        Draft::Draft4 => "id",
        _ => "$id",
    }
}

/// Retriever for `file://` references.
///
/// Referenced files go through the same JSON/YAML normalization as the
/// root schema. Any other scheme is refused, which keeps validation from
/// reaching out to the network.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct FileRetriever;

impl Retrieve for FileRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let url = Url::parse(uri.as_str())?;
        if url.scheme() != "file" {
            return Err(format!(
                "cannot retrieve '{url}': only local file references are supported"
            )
            .into());
        }
        let path = url
            .to_file_path()
            .map_err(|()| format!("cannot map '{url}' to a local path"))?;
        tracing::debug!(path = %path.display(), "retrieving referenced schema");
        Ok(normalize::read_value(&path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn injects_draft4_id_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, r#"{"type": "object"}"#).unwrap();

        let schema = load_schema(&path, None).unwrap();
        assert_eq!(schema.draft, Draft::Draft4);
        assert_eq!(schema.base_uri.scheme(), "file");
        assert!(schema.base_uri.path().ends_with("/schema.json"));
        assert_eq!(schema.document["id"], schema.base_uri.as_str());
        assert!(schema.document.get("$id").is_none());
    }

    #[test]
    fn injects_dollar_id_for_later_drafts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(
            &path,
            r#"{"$schema": "http://json-schema.org/draft-07/schema#", "type": "object"}"#,
        )
        .unwrap();

        let schema = load_schema(&path, None).unwrap();
        assert_eq!(schema.draft, Draft::Draft7);
        assert_eq!(schema.document["$id"], schema.base_uri.as_str());
    }

    #[test]
    fn keeps_existing_identifier() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, r#"{"id": "urn:example:net", "type": "object"}"#).unwrap();

        let schema = load_schema(&path, Some(Draft::Draft4)).unwrap();
        assert_eq!(schema.document["id"], "urn:example:net");
    }

    #[test]
    fn relative_identifier_is_joined_onto_file_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, r#"{"id": "network.json", "type": "object"}"#).unwrap();

        let schema = load_schema(&path, None).unwrap();
        let expected = schema.base_uri.join("network.json").unwrap();
        assert_eq!(schema.document["id"], expected.as_str());
    }

    #[test]
    fn draft4_ignores_dollar_id_when_anchoring() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, r#"{"$id": "urn:x", "type": "object"}"#).unwrap();

        let schema = load_schema(&path, Some(Draft::Draft4)).unwrap();
        assert_eq!(schema.document["id"], schema.base_uri.as_str());
        assert_eq!(schema.document["$id"], "urn:x");
    }

    #[test]
    fn explicit_draft_wins_over_declared_draft() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(
            &path,
            r#"{"$schema": "http://json-schema.org/draft-04/schema#"}"#,
        )
        .unwrap();
        let schema = load_schema(&path, Some(Draft::Draft202012)).unwrap();
        assert_eq!(schema.draft, Draft::Draft202012);
    }

    #[test]
    fn yaml_schema_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.yaml");
        std::fs::write(&path, "type: object\nrequired: [net]\n").unwrap();
        let schema = load_schema(&path, None).unwrap();
        assert_eq!(schema.document["required"], json!(["net"]));
    }

    #[test]
    fn unreadable_schema_is_schema_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_schema(&dir.path().join("missing.json"), None).unwrap_err();
        assert!(
            matches!(err, ValidateError::SchemaLoad { .. }),
            "Expected SchemaLoad, got: {err}"
        );
    }

    #[test]
    fn unparseable_schema_is_schema_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, "{ \"type\": [unclosed").unwrap();
        assert!(matches!(
            load_schema(&path, None).unwrap_err(),
            ValidateError::SchemaLoad { .. }
        ));
    }

    #[test]
    fn detects_known_drafts() {
        let cases = [
            ("http://json-schema.org/draft-04/schema#", Draft::Draft4),
            ("http://json-schema.org/draft-06/schema#", Draft::Draft6),
            ("http://json-schema.org/draft-07/schema", Draft::Draft7),
            ("https://json-schema.org/draft/2019-09/schema", Draft::Draft201909),
            ("https://json-schema.org/draft/2020-12/schema", Draft::Draft202012),
        ];
        for (uri, expected) in cases {
            assert_eq!(detect_draft(&json!({"$schema": uri})), Some(expected), "{uri}");
        }
        assert_eq!(detect_draft(&json!({"$schema": "urn:unknown"})), None);
        assert_eq!(detect_draft(&json!({})), None);
    }
}
