//! Debian license shorthand to SPDX identifiers.
//!
//! `dpkg-licenses` reports the short names used in `debian/copyright`
//! (`GPL-2+`, `BSD3`, ...). This table maps them onto SPDX license list
//! identifiers. Names that are not in the table are returned unchanged.

/// `(debian name, SPDX identifier)`
pub const DEBIAN_LICENSE_RENAMES: &[(&str, &str)] = &[
    ("Apache-1", "Apache-1.0"),
    ("Apache-2", "Apache-2.0"),
    ("BSD1", "BSD-1-Clause"),
    ("BSD2", "BSD-2-Clause"),
    ("BSD3", "BSD-3-Clause"),
    ("GFDL-1.1-invariants", "GFDL-1.1-no-invariants-only"),
    ("GFDL-1.1+-invariant", "GFDL-1.1-no-invariants-or-later"),
    ("GFDL-1.1-no-invariant", "GFDL-1.1-no-invariants-only"),
    ("GFDL-1.1+-no-invariant", "GFDL-1.1-no-invariants-or-later"),
    ("GFDL-1.1", "GFDL-1.1-only"),
    ("GFDL-1.1+", "GFDL-1.1-or-later"),
    ("GFDL-1.2-invariants", "GFDL-1.2-no-invariants-only"),
    ("GFDL-1.2+-invariant", "GFDL-1.2-no-invariants-or-later"),
    ("GFDL-1.2-no-invariant", "GFDL-1.2-no-invariants-only"),
    ("GFDL-1.2+-no-invariant", "GFDL-1.2-no-invariants-or-later"),
    ("GFDL-1.2", "GFDL-1.2-only"),
    ("GFDL-1.2+", "GFDL-1.2-or-later"),
    ("GFDL-1.3-invariants", "GFDL-1.3-no-invariants-only"),
    ("GFDL-1.3+-invariant", "GFDL-1.3-no-invariants-or-later"),
    ("GFDL-1.3-no-invariant", "GFDL-1.3-no-invariants-only"),
    ("GFDL-1.3+-no-invariant", "GFDL-1.3-no-invariants-or-later"),
    ("GFDL-1.3", "GFDL-1.3-only"),
    ("GFDL-1.3+", "GFDL-1.3-or-later"),
    ("GPL-2", "GPL-2.0-only"),
    ("GPL-2+", "GPL-2.0-or-later"),
    ("GPL-3", "GPL-3.0-only"),
    ("GPL-3+", "GPL-3.0-or-later"),
    ("LGPL-2", "LGPL-2.0-only"),
    ("LGPL-2+", "LGPL-2.0-or-later"),
    ("LGPL-2.1", "LGPL-2.1-only"),
    ("LGPL-2.1+", "LGPL-2.1-or-later"),
    ("LGPL-3", "LGPL-3.0-only"),
    ("LGPL-3+", "LGPL-3.0-or-later"),
];

/// Rename a Debian license name to its SPDX identifier.
#[must_use]
pub fn debian_license_rename(license: &str) -> &str {
    DEBIAN_LICENSE_RENAMES
        .iter()
        .find(|(debian, _)| *debian == license)
        .map_or(license, |(_, spdx)| *spdx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LicenseExpression;
    use std::collections::HashSet;

    #[test]
    fn test_known_renames() {
        assert_eq!(debian_license_rename("GPL-2+"), "GPL-2.0-or-later");
        assert_eq!(debian_license_rename("BSD3"), "BSD-3-Clause");
        assert_eq!(debian_license_rename("GPL-2"), "GPL-2.0-only");
        assert_eq!(
            debian_license_rename("GFDL-1.1-invariants"),
            "GFDL-1.1-no-invariants-only"
        );
    }

    #[test]
    fn test_unmapped_is_identity() {
        assert_eq!(debian_license_rename("MIT"), "MIT");
        assert_eq!(debian_license_rename("public-domain"), "public-domain");
        assert_eq!(debian_license_rename(""), "");
    }

    #[test]
    fn test_table_has_unique_keys() {
        let keys: HashSet<_> = DEBIAN_LICENSE_RENAMES.iter().map(|(k, _)| k).collect();
        assert_eq!(keys.len(), DEBIAN_LICENSE_RENAMES.len());
    }

    #[test]
    fn test_rename_is_idempotent() {
        for (_, spdx) in DEBIAN_LICENSE_RENAMES {
            assert_eq!(debian_license_rename(spdx), *spdx);
        }
    }

    #[test]
    fn test_every_target_is_a_valid_spdx_expression() {
        for (debian, spdx) in DEBIAN_LICENSE_RENAMES {
            assert!(
                LicenseExpression::parse(spdx).is_ok(),
                "{debian} -> {spdx} is not a valid SPDX identifier"
            );
        }
    }
}
