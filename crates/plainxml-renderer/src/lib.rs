//! Node-dispatch renderer from document trees to requirements XML.
//!
//! This crate converts a parsed document tree ([`plainxml_tree::Node`]) into
//! the plain XML format consumed by requirements-interchange tooling: a
//! `document` root holding `section`, `requirement`, `image` and `table`
//! elements with XHTML paragraphs and lists inside.
//!
//! # Architecture
//!
//! - [`Renderer`] walks the tree depth-first and dispatches on the node kind.
//!   A parent's output embeds its children's already-rendered output.
//! - [`ReferenceTable`] maps anchor ids to labels. Sections and images
//!   register their `id`/`reftext` while being rendered; inline anchors
//!   resolve against whatever is registered at that point.
//! - [`is_requirement`] and [`is_note`] classify sidebars and admonitions.
//!   Notes only render as direct children of a requirement.
//! - [`check_requirement`] flags requirement `keyword`/`category` values
//!   outside their allowed sets; the renderer reports them as warnings and
//!   in [`RenderResult::invalid_requirements`].
//!
//! # Example
//!
//! ```
//! use plainxml_renderer::Renderer;
//! use plainxml_tree::Node;
//!
//! let tree = Node::document()
//!     .with_attr("docname", "spec")
//!     .with_child(
//!         Node::section("Scope", 0)
//!             .with_attr("id", "scope")
//!             .with_attr("reftext", "Scope"),
//!     )
//!     .with_child(Node::paragraph("See ").with_child(Node::anchor("scope")));
//!
//! let result = Renderer::new().render(&tree);
//! assert!(result.xml.contains("<xhtml:p>See Scope</xhtml:p>"));
//! assert!(result.warnings.is_empty());
//! ```

mod classify;
mod options;
mod references;
mod renderer;
mod xml;

pub use classify::{
    InvalidRequirement, REQUIREMENT_CATEGORIES, REQUIREMENT_KEYWORDS, check_requirement, is_note,
    is_requirement,
};
pub use options::{ListTags, ReferenceMode, RenderOptions};
pub use references::{ReferenceTable, Resolution};
pub use renderer::{RenderResult, Renderer};
pub use xml::XHTML_NAMESPACE;
