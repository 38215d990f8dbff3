//! Cross-reference table.
//!
//! Maps anchor ids to display labels. Nodes carrying both an `id` and a
//! `reftext` attribute register themselves; inline anchors look their
//! `refid` up. The table lives for exactly one render.

use std::collections::BTreeMap;

use plainxml_tree::{Attributes, Node, NodeKind};

/// Result of resolving a reference id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The id is registered with this label.
    Found(&'a str),
    /// The id is not registered (yet).
    Missing,
}

/// Mapping from anchor id to display label.
#[derive(Clone, Debug, Default)]
pub struct ReferenceTable {
    labels: BTreeMap<String, String>,
}

impl ReferenceTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id -> reftext` if both attributes are present.
    ///
    /// Returns whether an entry was registered. A later registration of the
    /// same id replaces the earlier label.
    pub fn register(&mut self, attributes: &Attributes) -> bool {
        let (Some(id), Some(reftext)) = (attributes.find("id"), attributes.find("reftext")) else {
            return false;
        };
        tracing::debug!(id = %id, label = %reftext, "Registered reference");
        self.labels.insert(id.to_owned(), reftext.to_owned());
        true
    }

    /// Look up the label registered for `id`.
    #[must_use]
    pub fn resolve(&self, id: &str) -> Resolution<'_> {
        match self.labels.get(id) {
            Some(label) => Resolution::Found(label),
            None => Resolution::Missing,
        }
    }

    /// Collect anchors of all sections and images in `root`, in document order.
    pub fn collect(&mut self, root: &Node) {
        root.walk(&mut |node| {
            if registers_reference(node) {
                self.register(&node.attributes);
            }
        });
    }

    /// Number of registered ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether no ids are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Consume the table, returning the id to label map.
    #[must_use]
    pub fn into_map(self) -> BTreeMap<String, String> {
        self.labels
    }
}

/// Whether rendering `node` registers its anchor.
pub(crate) fn registers_reference(node: &Node) -> bool {
    matches!(node.kind, NodeKind::Section { .. } | NodeKind::Image)
}
