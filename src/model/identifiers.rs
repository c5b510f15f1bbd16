//! SPDX element identifiers.
//!
//! Identifiers come in two forms:
//!
//! 1. **Deterministic** - derived only from a name, so the same name always yields
//!    the same identifier. Used for the primary package, whose identifier has to be
//!    known before the document that contains it exists.
//! 2. **Unique** - the deterministic form plus a random UUID suffix. Used for every
//!    package whose name may collide with another source's package (`foo` and `foo+`
//!    both normalize to nearby names, two package lists may both list `busybox`).

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Prefix carried by every SPDX element identifier
pub const SPDX_REF_PREFIX: &str = "SPDXRef-";

/// Identifier of the SPDX document itself
pub const DOCUMENT_ROOT_ID: &str = "SPDXRef-DOCUMENT";

/// Identifier of an SPDX element (document, package or file).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpdxId(String);

impl SpdxId {
    /// Wrap an identifier read from an existing document, unchanged.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The identifier of the document root.
    #[must_use]
    pub fn document_root() -> Self {
        Self(DOCUMENT_ROOT_ID.to_string())
    }

    /// Build an identifier from a name.
    ///
    /// Underscores become hyphens and `+` becomes `p`. With `unique` set a fresh
    /// UUID v4 is appended, so two calls never return the same identifier.
    #[must_use]
    pub fn make(name: &str, unique: bool) -> Self {
        let base = format!(
            "{SPDX_REF_PREFIX}{}",
            name.replace('_', "-").replace('+', "p")
        );
        if unique {
            Self(format!("{base}-{}", Uuid::new_v4()))
        } else {
            Self(base)
        }
    }

    /// Deterministic identifier for `name`.
    #[must_use]
    pub fn deterministic(name: &str) -> Self {
        Self::make(name, false)
    }

    /// Collision-free identifier for `name`.
    #[must_use]
    pub fn unique(name: &str) -> Self {
        Self::make(name, true)
    }

    /// Get the raw identifier string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the synthetic `SPDXRef-DOCUMENT` root
    #[must_use]
    pub fn is_document_root(&self) -> bool {
        self.0 == DOCUMENT_ROOT_ID
    }
}

impl fmt::Display for SpdxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SpdxId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SpdxId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_replaces_reserved_characters() {
        let id = SpdxId::deterministic("libstdc++_dev");
        assert_eq!(id.as_str(), "SPDXRef-libstdcpp-dev");
    }

    #[test]
    fn test_deterministic_is_stable() {
        assert_eq!(
            SpdxId::deterministic("baseos-x2-3.18.4.tar.zst"),
            SpdxId::deterministic("baseos-x2-3.18.4.tar.zst")
        );
    }

    #[test]
    fn test_unique_differs_for_colliding_names() {
        // "foo+" -> "foop", which also collides with a package literally named "foop"
        let a = SpdxId::unique("foop");
        let b = SpdxId::unique("foo+");
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("SPDXRef-foop-"));
        assert!(b.as_str().starts_with("SPDXRef-foop-"));
    }

    #[test]
    fn test_unique_suffix_is_uuid() {
        let id = SpdxId::unique("busybox");
        let suffix = id.as_str().trim_start_matches("SPDXRef-busybox-");
        assert!(Uuid::parse_str(suffix).is_ok(), "suffix was {suffix}");
    }

    #[test]
    fn test_document_root() {
        assert!(SpdxId::document_root().is_document_root());
        assert!(!SpdxId::deterministic("DOCUMENT-x").is_document_root());
    }
}
