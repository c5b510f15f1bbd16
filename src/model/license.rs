//! License values and SPDX expression handling.
//!
//! Uses the `spdx` crate for expression parsing. A license field is never a bare
//! string: it is either a parsed expression or one of the SPDX sentinels, so every
//! consumer has to handle the "unknown" case explicitly.

use std::fmt;
use thiserror::Error;

/// SPDX sentinel for "value intentionally left unclaimed"
pub const NOASSERTION: &str = "NOASSERTION";

/// SPDX sentinel for "explicitly no value"
pub const NONE: &str = "NONE";

/// A license token that the SPDX expression grammar rejects.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{token}' is not a valid SPDX license expression: {reason}")]
pub struct LicenseParseError {
    pub token: String,
    pub reason: String,
}

/// License expression that has been validated against the SPDX grammar.
///
/// Can only be obtained through [`LicenseExpression::parse`] or
/// [`LicenseExpression::parse_lax`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LicenseExpression {
    expression: String,
}

impl LicenseExpression {
    /// Parse with the strict SPDX grammar (known identifiers, upper-case operators).
    pub fn parse(text: &str) -> Result<Self, LicenseParseError> {
        Self::parse_mode(text, spdx::ParseMode::STRICT)
    }

    /// Parse with the lax grammar used for documents produced by other tools
    /// (imprecise names such as `Apache2`, `/` as `OR`).
    pub fn parse_lax(text: &str) -> Result<Self, LicenseParseError> {
        Self::parse_mode(text, spdx::ParseMode::LAX)
    }

    fn parse_mode(text: &str, mode: spdx::ParseMode) -> Result<Self, LicenseParseError> {
        let trimmed = text.trim();
        spdx::Expression::parse_mode(trimmed, mode)
            .map(|_| Self {
                expression: trimmed.to_string(),
            })
            .map_err(|e| LicenseParseError {
                token: text.to_string(),
                reason: e.to_string(),
            })
    }

    /// Get the expression text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.expression
    }
}

impl fmt::Display for LicenseExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

/// Value of a license field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum LicenseValue {
    /// A valid SPDX license expression
    Expression(LicenseExpression),
    /// NOASSERTION
    #[default]
    NoAssertion,
    /// NONE
    None,
}

impl LicenseValue {
    /// Read a license field from an existing document.
    ///
    /// Sentinels are recognized verbatim; anything else must parse in lax mode.
    pub fn from_document_field(text: &str) -> Result<Self, LicenseParseError> {
        match text.trim() {
            NOASSERTION => Ok(Self::NoAssertion),
            NONE => Ok(Self::None),
            other => LicenseExpression::parse_lax(other).map(Self::Expression),
        }
    }

    /// Whether this is the NOASSERTION sentinel
    #[must_use]
    pub const fn is_no_assertion(&self) -> bool {
        matches!(self, Self::NoAssertion)
    }

    /// The expression, if this value carries one
    #[must_use]
    pub const fn as_expression(&self) -> Option<&LicenseExpression> {
        match self {
            Self::Expression(expr) => Some(expr),
            _ => None,
        }
    }
}

impl From<LicenseExpression> for LicenseValue {
    fn from(expr: LicenseExpression) -> Self {
        Self::Expression(expr)
    }
}

impl fmt::Display for LicenseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression(expr) => write!(f, "{expr}"),
            Self::NoAssertion => f.write_str(NOASSERTION),
            Self::None => f.write_str(NONE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_parse_accepts_spdx_ids() {
        for token in [
            "MIT",
            "GPL-2.0-or-later",
            "Apache-2.0 OR MIT",
            "GPL-2.0-only WITH Linux-syscall-note",
            "LicenseRef-scancode-public-domain",
        ] {
            let expr = LicenseExpression::parse(token)
                .unwrap_or_else(|e| panic!("{token} should parse: {e}"));
            assert_eq!(expr.as_str(), token);
        }
    }

    #[test]
    fn test_strict_parse_rejects_vendor_shorthand() {
        let err = LicenseExpression::parse("GPL-2+ or-something-odd").unwrap_err();
        assert_eq!(err.token, "GPL-2+ or-something-odd");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let expr = LicenseExpression::parse("  MIT ").expect("parses");
        assert_eq!(expr.to_string(), "MIT");
    }

    #[test]
    fn test_document_field_sentinels() {
        assert_eq!(
            LicenseValue::from_document_field("NOASSERTION"),
            Ok(LicenseValue::NoAssertion)
        );
        assert_eq!(
            LicenseValue::from_document_field("NONE"),
            Ok(LicenseValue::None)
        );
        assert!(LicenseValue::from_document_field("BSD-3-Clause")
            .expect("parses")
            .as_expression()
            .is_some());
    }

    #[test]
    fn test_display() {
        assert_eq!(LicenseValue::NoAssertion.to_string(), "NOASSERTION");
        assert_eq!(LicenseValue::None.to_string(), "NONE");
        assert_eq!(LicenseValue::default(), LicenseValue::NoAssertion);
    }
}
