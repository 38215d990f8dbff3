//! Document tree model for the plainxml renderer.
//!
//! The tree is produced by an external document parser and handed to
//! `plainxml-renderer` read-only. Each [`Node`] carries a closed [`NodeKind`]
//! (with per-kind payload), its [`Attributes`] and its child nodes.
//!
//! Trees are exchanged as JSON:
//!
//! ```
//! let tree = plainxml_tree::from_json_str(r#"{
//!     "kind": "document",
//!     "attributes": {"docname": "spec", "imagesdir": "img"},
//!     "children": [
//!         {"kind": "section", "title": "Intro", "index": 0,
//!          "attributes": {"id": "intro", "reftext": "Introduction"}}
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(tree.attributes.get("docname"), "spec");
//! assert_eq!(tree.children[0].kind.name(), "section");
//! ```

mod attributes;
mod node;

use std::io::Read;
use std::path::Path;

pub use attributes::Attributes;
pub use node::{Cell, ListItem, ListStyle, Node, NodeKind, Row, TableRows};

/// Error loading a document tree.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The input is not a valid tree.
    #[error("invalid document tree: {0}")]
    Json(#[from] serde_json::Error),
    /// The root node is not a document.
    #[error("root node must be a document, found {0}")]
    NotADocument(String),
}

/// Parse a tree from a JSON string.
///
/// # Errors
///
/// Returns [`TreeError::Json`] if the input is not a valid tree.
pub fn from_json_str(json: &str) -> Result<Node, TreeError> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a tree from a JSON reader.
///
/// # Errors
///
/// Returns [`TreeError::Json`] if the input is not a valid tree.
pub fn from_reader<R: Read>(reader: R) -> Result<Node, TreeError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load a document tree from a JSON file.
///
/// Unlike [`from_json_str`], the root node must be a document.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a valid tree, or its
/// root is not a document node.
pub fn load_document(path: &Path) -> Result<Node, TreeError> {
    let file = std::fs::File::open(path)?;
    let root = from_reader(std::io::BufReader::new(file))?;
    if root.kind != NodeKind::Document {
        return Err(TreeError::NotADocument(root.kind.name().to_owned()));
    }
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.json");
        std::fs::write(&path, r#"{"kind": "document", "attributes": {"docname": "x"}}"#)
            .unwrap();

        let root = load_document(&path).unwrap();
        assert_eq!(root.attributes.get("docname"), "x");
    }

    #[test]
    fn test_load_document_rejects_other_root() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.json");
        std::fs::write(&path, r#"{"kind": "paragraph"}"#).unwrap();

        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, TreeError::NotADocument(ref kind) if kind == "paragraph"));
    }

    #[test]
    fn test_load_document_missing_file() {
        let err = load_document(Path::new("/nonexistent/tree.json")).unwrap_err();
        assert!(matches!(err, TreeError::Io(_)));
    }

    #[test]
    fn test_invalid_json() {
        let err = from_json_str("{not json").unwrap_err();
        assert!(matches!(err, TreeError::Json(_)));
        assert!(err.to_string().starts_with("invalid document tree"));
    }
}
