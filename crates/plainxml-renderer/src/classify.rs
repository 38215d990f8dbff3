//! Node classification and requirement attribute checks.

use std::fmt;

use plainxml_tree::{Node, NodeKind};

/// Block style marking a sidebar as a requirement.
const REQUIREMENT_STYLE: &str = "requirement";

/// Admonition name of notes.
const NOTE_NAME: &str = "note";

/// Whether `node` is a sidebar whose first positional attribute is `requirement`.
#[must_use]
pub fn is_requirement(node: &Node) -> bool {
    node.kind == NodeKind::Sidebar && node.attributes.positional(1) == Some(REQUIREMENT_STYLE)
}

/// Whether `node` is an admonition named `note`.
#[must_use]
pub fn is_note(node: &Node) -> bool {
    node.kind == NodeKind::Admonition && node.attributes.find("name") == Some(NOTE_NAME)
}

/// Allowed values of a requirement's `keyword` attribute.
pub const REQUIREMENT_KEYWORDS: &[&str] = &["shall", "should", "may"];

/// Allowed values of a requirement's `category` attribute.
pub const REQUIREMENT_CATEGORIES: &[&str] = &["technical", "process", "documentation", "other"];

/// A requirement attribute whose value is outside its allowed set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidRequirement {
    /// Requirement id.
    pub id: String,
    /// Attribute name (`keyword` or `category`).
    pub attribute: &'static str,
    /// Offending value; empty when the attribute is missing.
    pub value: String,
    /// Values the attribute accepts.
    pub allowed: &'static [&'static str],
}

impl fmt::Display for InvalidRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "requirement '{}': {} \"{}\" is not one of {}",
            self.id,
            self.attribute,
            self.value,
            self.allowed.join(", ")
        )
    }
}

/// Check `keyword` and `category` of a requirement against their allowed
/// values. A missing attribute counts as invalid.
#[must_use]
pub fn check_requirement(node: &Node) -> Vec<InvalidRequirement> {
    [
        ("keyword", REQUIREMENT_KEYWORDS),
        ("category", REQUIREMENT_CATEGORIES),
    ]
    .into_iter()
    .filter_map(|(attribute, allowed)| {
        let value = node.attributes.get(attribute);
        (!allowed.iter().any(|&a| a == value)).then(|| InvalidRequirement {
            id: node.attributes.get("id").to_owned(),
            attribute,
            value: value.to_owned(),
            allowed,
        })
    })
    .collect()
}
