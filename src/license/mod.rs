//! License normalization.
//!
//! Maps license tokens taken from package metadata onto SPDX license
//! expressions. Normalization never fails: a token the SPDX grammar rejects
//! becomes NOASSERTION, and the caller keeps the original text as a license
//! comment so the information is not lost.
//!
//! ```
//! use make_sbom::license::{normalize, LicenseTokens};
//! use make_sbom::model::LicenseValue;
//!
//! assert_eq!(normalize("GPL-2+").to_string(), "GPL-2.0-or-later");
//! assert_eq!(normalize("Freely redistributable"), LicenseValue::NoAssertion);
//!
//! let resolved = LicenseTokens::Multiple(vec!["MIT".into(), "Custom".into()]).resolve("pkg");
//! assert!(resolved.concluded.is_no_assertion());
//! assert!(resolved.comment.unwrap().contains("Custom"));
//! ```

mod debian;

pub use debian::{debian_license_rename, DEBIAN_LICENSE_RENAMES};

use crate::model::{LicenseExpression, LicenseParseError, LicenseValue, Package, NOASSERTION};

/// Normalize one license token.
#[must_use]
pub fn normalize(token: &str) -> LicenseValue {
    match try_normalize(token) {
        Ok(Some(expr)) => LicenseValue::Expression(expr),
        Ok(None) => LicenseValue::NoAssertion,
        Err(e) => {
            tracing::debug!("{}", e);
            LicenseValue::NoAssertion
        }
    }
}

/// Normalize one license token, reporting why it was rejected.
///
/// `Ok(None)` means the token asserted nothing (empty or NOASSERTION).
pub fn try_normalize(token: &str) -> Result<Option<LicenseExpression>, LicenseParseError> {
    let trimmed = token.trim();
    if trimmed.is_empty() || trimmed == NOASSERTION {
        return Ok(None);
    }
    let renamed = debian_license_rename(trimmed);
    LicenseExpression::parse(&uppercase_operators(renamed))
        .map(Some)
        .map_err(|e| LicenseParseError {
            token: token.to_string(),
            reason: e.reason,
        })
}

/// Package metadata writes `and`/`or`/`with` in any case; the strict grammar
/// only accepts upper-case operators.
fn uppercase_operators(expression: &str) -> String {
    expression
        .split_whitespace()
        .map(|word| {
            if ["and", "or", "with"]
                .iter()
                .any(|op| word.eq_ignore_ascii_case(op))
            {
                word.to_ascii_uppercase()
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// License information of one package as it appears in package metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseTokens {
    /// One license expression
    Single(String),
    /// Several licenses covering different parts of the package
    Multiple(Vec<String>),
}

/// Package license fields derived from [`LicenseTokens`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLicense {
    pub concluded: LicenseValue,
    pub info_from_files: Option<Vec<LicenseValue>>,
    pub comment: Option<String>,
}

impl LicenseTokens {
    /// Resolve the tokens into package license fields.
    ///
    /// A single token becomes the concluded license. Several tokens are
    /// normalized one by one into `info_from_files` and the concluded license
    /// stays NOASSERTION. Whenever a token fails to parse the comment quotes
    /// the input verbatim.
    #[must_use]
    pub fn resolve(&self, package_name: &str) -> ResolvedLicense {
        match self {
            Self::Single(token) => {
                let concluded = normalize_logged(package_name, token);
                let comment = (concluded.is_no_assertion() && !is_blank(token)).then(|| {
                    format!("The following licenses could not be estimated '{token}'")
                });
                ResolvedLicense {
                    concluded,
                    info_from_files: None,
                    comment,
                }
            }
            Self::Multiple(tokens) => {
                let values: Vec<LicenseValue> = tokens
                    .iter()
                    .map(|token| normalize_logged(package_name, token))
                    .collect();
                let comment = values
                    .iter()
                    .any(LicenseValue::is_no_assertion)
                    .then(|| {
                        format!(
                            "It was not possible to estimate all of the following licenses. '{}'",
                            tokens.join(" ")
                        )
                    });
                ResolvedLicense {
                    concluded: LicenseValue::NoAssertion,
                    info_from_files: Some(values),
                    comment,
                }
            }
        }
    }
}

impl ResolvedLicense {
    /// Write the resolved fields onto a package.
    pub fn apply_to(self, package: &mut Package) {
        package.license_concluded = self.concluded;
        package.license_info_from_files = self.info_from_files;
        package.license_comment = self.comment;
    }
}

fn normalize_logged(package_name: &str, token: &str) -> LicenseValue {
    match try_normalize(token) {
        Ok(Some(expr)) => LicenseValue::Expression(expr),
        Ok(None) => LicenseValue::NoAssertion,
        Err(e) => {
            tracing::debug!("Failed to parse {} license: {}", package_name, e.token);
            LicenseValue::NoAssertion
        }
    }
}

fn is_blank(token: &str) -> bool {
    token.trim().is_empty()
}
