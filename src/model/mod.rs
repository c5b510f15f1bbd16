//! Data model for the assembled SBOM.
//!
//! The model mirrors SPDX 2.2: a [`Document`] owns packages, files,
//! relationships and extracted license definitions. Every "unknown" value is an
//! explicit variant ([`LicenseValue::NoAssertion`], [`TextValue::NoAssertion`],
//! [`DownloadLocation::NoAssertion`]) rather than a missing one.

mod document;
mod identifiers;
mod license;
mod package;
mod relationship;
pub mod validation;

pub use document::*;
pub use identifiers::*;
pub use license::*;
pub use package::*;
pub use relationship::{Relationship, RelationshipType};
