//! # File Resolution
//!
//! Read-only existence probe used before any file is read. Missing paths are
//! reported as `Ok(false)` so callers decide whether absence is fatal;
//! directories are rejected outright.

use std::io::ErrorKind;
use std::path::Path;

use crate::error::{ValidateError, ValidateResult};

/// Probe `path`.
///
/// Returns `Ok(true)` for an existing non-directory path and `Ok(false)` when
/// nothing exists at `path`.
///
/// # Errors
///
/// Returns `ValidateError::InvalidTarget` if `path` is a directory, and
/// `ValidateError::Io` if the metadata lookup fails for any reason other
/// than non-existence (e.g. permission denied on a parent directory).
pub fn resolve(path: &Path) -> ValidateResult<bool> {
    let exists = match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => {
            return Err(ValidateError::InvalidTarget {
                path: path.display().to_string(),
            })
        }
        Ok(_) => true,
        Err(e) if e.kind() == ErrorKind::NotFound => false,
        Err(source) => {
            return Err(ValidateError::Io {
                path: path.display().to_string(),
                source,
            })
        }
    };

    tracing::debug!(path = %path.display(), exists, "resolved path");
    Ok(exists)
}

/// Like [`resolve`], but treats a missing path as `ValidateError::NotFound`.
pub fn require_file(path: &Path) -> ValidateResult<()> {
    if resolve(path)? {
        Ok(())
    } else {
        Err(ValidateError::NotFound {
            path: path.display().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_file_exists() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.json");
        std::fs::write(&file, b"{}").unwrap();
        assert!(resolve(&file).unwrap());
    }

    #[test]
    fn directory_is_invalid_target() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve(dir.path()).unwrap_err();
        assert!(
            matches!(err, ValidateError::InvalidTarget { .. }),
            "Expected InvalidTarget, got: {err}"
        );
    }

    #[test]
    fn missing_path_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!resolve(&dir.path().join("nope.yaml")).unwrap());
    }

    #[test]
    fn require_file_rejects_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = require_file(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, ValidateError::NotFound { .. }));
    }

    #[test]
    fn require_file_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = require_file(dir.path()).unwrap_err();
        assert!(matches!(err, ValidateError::InvalidTarget { .. }));
    }
}
