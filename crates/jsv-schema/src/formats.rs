//! # Custom String Formats
//!
//! Named predicates consulted by the schema engine for string values whose
//! schema declares a matching `"format"` keyword. Two formats ship with the
//! crate:
//!
//! - `cidr`: an IPv4 or IPv6 network in CIDR notation (`10.0.0.0/8`).
//! - `semver`: a semantic version (`1.2.3-beta.1+build.5`).
//!
//! A [`FormatRegistry`] is handed to the validator explicitly and installed
//! into every engine build, so there is no process-wide registry to
//! initialize. Predicates never panic and never error: a malformed input is
//! simply not a match, which the engine reports as an ordinary format
//! violation at the field's path.

use std::collections::BTreeMap;
use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

/// Name of the CIDR format.
pub const CIDR: &str = "cidr";

/// Name of the semantic-version format.
pub const SEMVER: &str = "semver";

/// A shareable format predicate.
pub type FormatPredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Mapping from format name to predicate.
///
/// Registering a name that already exists replaces the previous predicate.
/// Entries are never removed.
#[derive(Clone, Default)]
pub struct FormatRegistry {
    checkers: BTreeMap<String, FormatPredicate>,
}

impl FormatRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the `cidr` and `semver` formats.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(CIDR, is_cidr).register(SEMVER, is_semver);
        registry
    }

    /// Register `predicate` under `name`, replacing any previous entry.
    pub fn register<N, F>(&mut self, name: N, predicate: F) -> &mut Self
    where
        N: Into<String>,
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        if self.checkers.insert(name.clone(), Arc::new(predicate)).is_some() {
            tracing::debug!(format = %name, "replaced format checker");
        }
        self
    }

    /// Look up the predicate registered under `name`.
    pub fn get(&self, name: &str) -> Option<&FormatPredicate> {
        self.checkers.get(name)
    }

    /// Run the predicate registered under `name` against `input`.
    ///
    /// Returns `None` if no such format is registered.
    pub fn check(&self, name: &str, input: &str) -> Option<bool> {
        self.get(name).map(|predicate| predicate(input))
    }

    /// Registered format names in ascending order.
    pub fn names(&self) -> Vec<&str> {
        self.checkers.keys().map(String::as_str).collect()
    }

    /// Number of registered formats.
    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    /// Returns true if no format is registered.
    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }

    /// Install every registered format into `opts`.
    pub(crate) fn install(&self, opts: &mut jsonschema::ValidationOptions) {
        for (name, predicate) in &self.checkers {
            let predicate = Arc::clone(predicate);
            opts.with_format(name.clone(), move |s: &str| predicate(s));
        }
    }
}

impl fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("formats", &self.names())
            .finish()
    }
}

/// Returns true if `input` is an IP network in CIDR notation.
///
/// The address part is any IPv4 or IPv6 address; the prefix length is a
/// decimal number no larger than the address width. Host bits may be set,
/// so `10.1.2.3/8` is accepted.
pub fn is_cidr(input: &str) -> bool {
    let Some((addr, prefix)) = input.split_once('/') else {
        return false;
    };
    if prefix.is_empty() || prefix.len() > 3 || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let Ok(prefix) = prefix.parse::<u8>() else {
        return false;
    };
    match addr.parse::<IpAddr>() {
        Ok(IpAddr::V4(_)) => prefix <= 32,
        Ok(IpAddr::V6(_)) => prefix <= 128,
        Err(_) => false,
    }
}

/// Returns true if `input` is a semantic version (`MAJOR.MINOR.PATCH`,
/// optional `-PRERELEASE`, optional `+BUILD`).
///
/// Follows Semantic Versioning 2.0.0: exactly three numeric components
/// without leading zeros, dot-separated non-empty `[0-9A-Za-z-]`
/// identifiers in pre-release and build metadata, and no leading zeros in
/// numeric pre-release identifiers. There is no `v` prefix.
pub fn is_semver(input: &str) -> bool {
    let (rest, build) = match input.split_once('+') {
        Some((rest, build)) => (rest, Some(build)),
        None => (input, None),
    };
    // The core is digits and dots only, so the first hyphen starts the
    // pre-release even when the pre-release itself contains hyphens.
    let (core, pre) = match rest.split_once('-') {
        Some((core, pre)) => (core, Some(pre)),
        None => (rest, None),
    };

    let mut parts = core.split('.');
    let core_ok = (0..3).all(|_| parts.next().is_some_and(is_numeric_identifier))
        && parts.next().is_none();
    if !core_ok {
        return false;
    }

    if let Some(pre) = pre {
        if !pre.split('.').all(is_prerelease_identifier) {
            return false;
        }
    }
    match build {
        Some(build) => build.split('.').all(is_build_identifier),
        None => true,
    }
}

/// `0` or a digit string without a leading zero that fits in `u64`.
fn is_numeric_identifier(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| b.is_ascii_digit())
        && (s == "0" || !s.starts_with('0'))
        && s.parse::<u64>().is_ok()
}

fn is_prerelease_identifier(s: &str) -> bool {
    if !is_build_identifier(s) {
        return false;
    }
    // Purely numeric identifiers must not carry leading zeros.
    if s.bytes().all(|b| b.is_ascii_digit()) {
        return s == "0" || !s.starts_with('0');
    }
    true
}

fn is_build_identifier(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}
