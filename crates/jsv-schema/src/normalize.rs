//! # Content Normalization
//!
//! Turns a JSON or YAML file into JSON. JSON input is passed through byte
//! for byte; anything else is parsed as YAML and converted to the equivalent
//! JSON value tree. Mapping key order survives the conversion because
//! `serde_json` is built with `preserve_order`.
//!
//! The normalizer reads the file again even when [`resolve`](crate::resolve)
//! has just reported it present, so a file that vanishes in between surfaces
//! as `ValidateError::Io`.

use std::path::Path;

use serde::de::IgnoredAny;
use serde_json::Value;

use crate::error::{ValidateError, ValidateResult};

/// Read `path` and return its content as JSON bytes.
///
/// # Errors
///
/// Returns `ValidateError::Io` if the file cannot be read and
/// `ValidateError::Format` if the content is neither JSON nor YAML.
pub fn normalize(path: &Path) -> ValidateResult<Vec<u8>> {
    let bytes = read(path)?;
    normalize_bytes(&bytes).map_err(|reason| ValidateError::Format {
        path: path.display().to_string(),
        reason,
    })
}

/// Normalize in-memory content to JSON bytes.
///
/// Returns the input unchanged when it already is JSON.
pub fn normalize_bytes(bytes: &[u8]) -> Result<Vec<u8>, String> {
    if is_json(bytes) {
        return Ok(bytes.to_vec());
    }
    let value = yaml_bytes_to_json(bytes)?;
    serde_json::to_vec(&value).map_err(|e| format!("JSON serialization failed: {e}"))
}

/// Read `path` and parse it into a JSON value, accepting JSON or YAML.
///
/// # Errors
///
/// Same as [`normalize`].
pub fn read_value(path: &Path) -> ValidateResult<Value> {
    let bytes = read(path)?;
    parse_bytes(&bytes).map_err(|reason| ValidateError::Format {
        path: path.display().to_string(),
        reason,
    })
}

/// Parse in-memory JSON or YAML content into a JSON value.
pub fn parse_bytes(bytes: &[u8]) -> Result<Value, String> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(value) => Ok(value),
        Err(_) => yaml_bytes_to_json(bytes),
    }
}

fn read(path: &Path) -> ValidateResult<Vec<u8>> {
    let bytes = std::fs::read(path).map_err(|source| ValidateError::Io {
        path: path.display().to_string(),
        source,
    })?;
    tracing::debug!(path = %path.display(), len = bytes.len(), "read document");
    Ok(bytes)
}

fn is_json(bytes: &[u8]) -> bool {
    serde_json::from_slice::<IgnoredAny>(bytes).is_ok()
}

fn yaml_bytes_to_json(bytes: &[u8]) -> Result<Value, String> {
    // An empty YAML stream is a null document.
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    let yaml: serde_yaml::Value =
        serde_yaml::from_slice(bytes).map_err(|e| format!("invalid YAML: {e}"))?;
    yaml_to_json_value(&yaml).map_err(|e| format!("YAML-to-JSON conversion failed: {e}"))
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Tags are dropped in favour of the tagged value. Scalar mapping keys are
/// stringified; sequence or mapping keys have no JSON counterpart and are
/// rejected, as are non-finite floats.
fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(yaml_to_json_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::with_capacity(map.len());
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    serde_yaml::Value::Null => "null".to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn json_is_passed_through_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        // Odd spacing on purpose: the bytes must come back untouched.
        let content = "{ \"b\" :2,\n  \"a\": [1, 2 ,3] }\n";
        let path = write(&dir, "config.json", content);
        assert_eq!(normalize(&path).unwrap(), content.as_bytes());
    }

    #[test]
    fn json_scalars_count_as_json() {
        assert_eq!(normalize_bytes(b"42").unwrap(), b"42");
        assert_eq!(normalize_bytes(b"\"text\"").unwrap(), b"\"text\"");
    }

    #[test]
    fn yaml_flow_mapping_becomes_json() {
        let out = normalize_bytes(b"{a: 1}").unwrap();
        assert_eq!(out, br#"{"a":1}"#);
    }

    #[test]
    fn yaml_block_document_matches_logical_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "config.yaml",
            "net: 10.0.0.0/8\nversion: \"1.2.3\"\ncount: 42\nratio: 0.5\nenabled: true\nitems:\n  - one\n  - two\nnothing: ~\n",
        );
        let out = normalize(&path).unwrap();
        let value: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            value,
            json!({
                "net": "10.0.0.0/8",
                "version": "1.2.3",
                "count": 42,
                "ratio": 0.5,
                "enabled": true,
                "items": ["one", "two"],
                "nothing": null
            })
        );
    }

    #[test]
    fn yaml_key_order_is_preserved() {
        let out = normalize_bytes(b"zeta: 1\nalpha: 2\nmid: 3\n").unwrap();
        assert_eq!(out, br#"{"zeta":1,"alpha":2,"mid":3}"#);
    }

    #[test]
    fn yaml_scalar_keys_are_stringified() {
        let value = parse_bytes(b"1: one\ntrue: yes\n").unwrap();
        assert_eq!(value["1"], "one");
        assert_eq!(value["true"], "yes");
    }

    #[test]
    fn yaml_tags_are_ignored() {
        let value = parse_bytes(b"name: !custom gateway\n").unwrap();
        assert_eq!(value["name"], "gateway");
    }

    #[test]
    fn empty_document_is_null() {
        assert_eq!(parse_bytes(b"").unwrap(), Value::Null);
        assert_eq!(normalize_bytes(b"  \n").unwrap(), b"null");
    }

    #[test]
    fn unbalanced_indentation_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "bad.yaml", "a: 1\n  b: 2\n");
        let err = normalize(&path).unwrap_err();
        assert!(
            matches!(err, ValidateError::Format { .. }),
            "Expected Format, got: {err}"
        );
    }

    #[test]
    fn unclosed_flow_sequence_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "bad.yaml", "net: [10.0.0.0/8\n");
        assert!(matches!(
            read_value(&path).unwrap_err(),
            ValidateError::Format { .. }
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = normalize(&dir.path().join("gone.yaml")).unwrap_err();
        assert!(matches!(err, ValidateError::Io { .. }));
    }

    #[test]
    fn read_value_parses_json_directly() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "c.json", r#"{"net": "10.0.0.0/8"}"#);
        assert_eq!(read_value(&path).unwrap(), json!({"net": "10.0.0.0/8"}));
    }

    #[test]
    fn non_finite_float_is_rejected() {
        let err = yaml_to_json_value(&serde_yaml::from_str(".inf").unwrap()).unwrap_err();
        assert!(err.contains("cannot represent float"));
    }
}
