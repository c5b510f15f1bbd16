//! Typed, directed edges between SPDX elements.

use super::SpdxId;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Relationship types.
///
/// The assembler itself only creates `Describes`, `Contains` and `AncestorOf`;
/// the rest are carried through from scanned and embedded documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RelationshipType {
    Describes,
    DescribedBy,
    Contains,
    ContainedBy,
    DependsOn,
    DependencyOf,
    AncestorOf,
    DescendantOf,
    GeneratedFrom,
    Generates,
    StaticLink,
    DynamicLink,
    Other,
    /// Any type this crate does not name, kept verbatim
    Unknown(String),
}

impl RelationshipType {
    /// Parse the SPDX spelling (`CONTAINS`, `ANCESTOR_OF`, ...)
    #[must_use]
    pub fn from_spdx(name: &str) -> Self {
        match name {
            "DESCRIBES" => Self::Describes,
            "DESCRIBED_BY" => Self::DescribedBy,
            "CONTAINS" => Self::Contains,
            "CONTAINED_BY" => Self::ContainedBy,
            "DEPENDS_ON" => Self::DependsOn,
            "DEPENDENCY_OF" => Self::DependencyOf,
            "ANCESTOR_OF" => Self::AncestorOf,
            "DESCENDANT_OF" => Self::DescendantOf,
            "GENERATED_FROM" => Self::GeneratedFrom,
            "GENERATES" => Self::Generates,
            "STATIC_LINK" => Self::StaticLink,
            "DYNAMIC_LINK" => Self::DynamicLink,
            "OTHER" => Self::Other,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Describes => "DESCRIBES",
            Self::DescribedBy => "DESCRIBED_BY",
            Self::Contains => "CONTAINS",
            Self::ContainedBy => "CONTAINED_BY",
            Self::DependsOn => "DEPENDS_ON",
            Self::DependencyOf => "DEPENDENCY_OF",
            Self::AncestorOf => "ANCESTOR_OF",
            Self::DescendantOf => "DESCENDANT_OF",
            Self::GeneratedFrom => "GENERATED_FROM",
            Self::Generates => "GENERATES",
            Self::StaticLink => "STATIC_LINK",
            Self::DynamicLink => "DYNAMIC_LINK",
            Self::Other => "OTHER",
            Self::Unknown(name) => name,
        };
        f.write_str(name)
    }
}

/// `(element, type, related_element)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Relationship {
    pub element: SpdxId,
    pub kind: RelationshipType,
    pub related: SpdxId,
    pub comment: Option<String>,
}

impl Relationship {
    #[must_use]
    pub fn new(element: SpdxId, kind: RelationshipType, related: SpdxId) -> Self {
        Self {
            element,
            kind,
            related,
            comment: None,
        }
    }

    #[must_use]
    pub fn contains(element: SpdxId, related: SpdxId) -> Self {
        Self::new(element, RelationshipType::Contains, related)
    }

    /// Whether either end of the edge is `id`
    #[must_use]
    pub fn references(&self, id: &SpdxId) -> bool {
        &self.element == id || &self.related == id
    }

    /// Whether this is the document root's DESCRIBES edge
    #[must_use]
    pub fn is_root_describes(&self) -> bool {
        self.kind == RelationshipType::Describes && self.element.is_document_root()
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.element, self.kind, self.related)
    }
}

/// Containment edges, used to refuse CONTAINS edges that would close a cycle.
#[derive(Debug, Clone, Default)]
pub(crate) struct ContainmentGraph {
    children: HashMap<SpdxId, Vec<SpdxId>>,
}

impl ContainmentGraph {
    pub(crate) fn insert(&mut self, parent: &SpdxId, child: &SpdxId) {
        self.children
            .entry(parent.clone())
            .or_default()
            .push(child.clone());
    }

    /// Whether `to` is reachable from `from` through CONTAINS edges.
    pub(crate) fn reaches(&self, from: &SpdxId, to: &SpdxId) -> bool {
        let mut stack = vec![from];
        let mut seen: HashSet<&SpdxId> = HashSet::new();
        while let Some(node) = stack.pop() {
            if node == to {
                return true;
            }
            if !seen.insert(node) {
                continue;
            }
            if let Some(children) = self.children.get(node) {
                stack.extend(children.iter());
            }
        }
        false
    }
}
