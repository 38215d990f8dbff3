//! Node-dispatch renderer.

use std::collections::BTreeMap;

use plainxml_tree::{Cell, ListItem, ListStyle, Node, NodeKind, TableRows};

use crate::classify::{InvalidRequirement, check_requirement, is_note, is_requirement};
use crate::options::{ListTags, ReferenceMode, RenderOptions};
use crate::references::{ReferenceTable, Resolution, registers_reference};
use crate::xml::{XHTML_NAMESPACE, XmlBuilder};

/// Result of rendering a document tree.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered XML (no XML declaration).
    pub xml: String,
    /// Diagnostics generated during rendering (e.g., unresolved references).
    pub warnings: Vec<String>,
    /// Reference table as it stood at the end of the render.
    pub references: BTreeMap<String, String>,
    /// Ids of rendered requirements in document order.
    pub requirements: Vec<String>,
    /// Requirements with a `keyword` or `category` outside the allowed set.
    pub invalid_requirements: Vec<InvalidRequirement>,
}

/// Renderer from document trees to requirements XML.
///
/// The renderer holds only options; every [`render`](Self::render) call
/// starts from a fresh [`ReferenceTable`], so repeated renders of the same
/// tree produce identical output.
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    options: RenderOptions,
}

/// Classification of the immediate parent of the node being rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Scope {
    Requirement,
    Other,
}

impl Renderer {
    /// Create a renderer with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with the given options.
    #[must_use]
    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Set the cross-reference collection mode.
    #[must_use]
    pub fn with_reference_mode(mut self, mode: ReferenceMode) -> Self {
        self.options.references = mode;
        self
    }

    /// Enable or disable escaping of attribute values (enabled by default).
    #[must_use]
    pub fn with_escaped_attributes(mut self, enabled: bool) -> Self {
        self.options.escape_attributes = enabled;
        self
    }

    /// Select list elements.
    #[must_use]
    pub fn with_list_tags(mut self, tags: ListTags) -> Self {
        self.options.list_tags = tags;
        self
    }

    /// Enable or disable attribute-dump comments (enabled by default).
    #[must_use]
    pub fn with_attribute_comments(mut self, enabled: bool) -> Self {
        self.options.attribute_comments = enabled;
        self
    }

    /// Options in effect.
    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render `root` and everything below it.
    ///
    /// Rendering never fails: missing attributes render as empty strings,
    /// unresolved references render as their raw id and add a warning, and
    /// node kinds without a dedicated rule use the fallback rule.
    pub fn render(&self, root: &Node) -> RenderResult {
        let mut traversal = Traversal {
            options: &self.options,
            references: ReferenceTable::new(),
            warnings: Vec::new(),
            requirements: Vec::new(),
            invalid_requirements: Vec::new(),
        };

        if self.options.references == ReferenceMode::Prescan {
            traversal.references.collect(root);
            tracing::debug!(count = traversal.references.len(), "Collected references");
        }

        let xml = traversal.node(root, Scope::Other);

        RenderResult {
            xml,
            warnings: traversal.warnings,
            references: traversal.references.into_map(),
            requirements: traversal.requirements,
            invalid_requirements: traversal.invalid_requirements,
        }
    }
}

/// State of a single render.
struct Traversal<'a> {
    options: &'a RenderOptions,
    references: ReferenceTable,
    warnings: Vec<String>,
    requirements: Vec<String>,
    invalid_requirements: Vec<InvalidRequirement>,
}

impl Traversal<'_> {
    fn builder(&self) -> XmlBuilder {
        XmlBuilder::new(self.options.escape_attributes)
    }

    /// Render one node. `scope` classifies its immediate parent.
    fn node(&mut self, node: &Node, scope: Scope) -> String {
        // Prescan mode fills the table once, before rendering.
        if self.options.references == ReferenceMode::SinglePass && registers_reference(node) {
            self.references.register(&node.attributes);
        }

        match &node.kind {
            NodeKind::Document => self.document(node),
            NodeKind::Section { title, index } => self.section(node, title, *index),
            NodeKind::Sidebar if is_requirement(node) => self.requirement(node),
            NodeKind::Sidebar => self.sidebar(node),
            NodeKind::Paragraph => self.paragraph(node),
            NodeKind::Admonition => self.admonition(node, scope),
            NodeKind::List { style, items } => self.list(*style, items),
            NodeKind::Image => self.image(node),
            NodeKind::Table { rows } => self.table(node, rows),
            NodeKind::InlineAnchor => self.inline_anchor(node),
            NodeKind::InlineQuoted { text } | NodeKind::Text { text } => text.clone(),
            NodeKind::InlineFootnote | NodeKind::Dlist | NodeKind::Literal => {
                let mut xml = self.builder();
                xml.comment(node.kind.name());
                xml.finish()
            }
            NodeKind::Other { name } => self.fallback(node, name),
        }
    }

    /// Render the children of `node`.
    ///
    /// Inline runs are concatenated; block output is joined with newlines,
    /// skipping blocks that rendered to nothing.
    fn content(&mut self, node: &Node, scope: Scope) -> String {
        let separator = if node.has_blocks() { "\n" } else { "" };
        let mut out = String::new();
        for child in &node.children {
            let rendered = self.node(child, scope);
            if rendered.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push_str(separator);
            }
            out.push_str(&rendered);
        }
        out
    }

    fn attribute_comment(&self, xml: &mut XmlBuilder, node: &Node) {
        if self.options.attribute_comments {
            xml.comment(&node.attributes.dump()).newline();
        }
    }

    fn document(&mut self, node: &Node) -> String {
        let content = self.content(node, Scope::Other);
        let a = &node.attributes;

        let mut xml = self.builder();
        xml.start(
            "document",
            &[
                ("xmlns:xhtml", XHTML_NAMESPACE),
                ("name", a.get("docname")),
                ("srcdir", a.get("docdir")),
                ("title", a.get("doctitle")),
                ("imagesdir", a.get("imagesdir")),
            ],
        )
        .newline()
        .line(&content)
        .end("document");
        xml.finish()
    }

    fn section(&mut self, node: &Node, title: &str, index: usize) -> String {
        let content = self.content(node, Scope::Other);
        let index = index.to_string();

        let mut xml = self.builder();
        xml.start("section", &[("title", title), ("index", index.as_str())])
            .newline();
        self.attribute_comment(&mut xml, node);
        xml.line(&content).end("section");
        xml.finish()
    }

    fn requirement(&mut self, node: &Node) -> String {
        let a = &node.attributes;
        self.requirements.push(a.get("id").to_owned());
        for issue in check_requirement(node) {
            tracing::warn!(
                id = %issue.id,
                attribute = issue.attribute,
                value = %issue.value,
                "Invalid requirement attribute"
            );
            self.warnings.push(issue.to_string());
            self.invalid_requirements.push(issue);
        }
        let content = self.content(node, Scope::Requirement);

        let mut xml = self.builder();
        xml.start(
            "requirement",
            &[
                ("id", a.get("id")),
                ("title", a.get("title")),
                ("keyword", a.get("keyword")),
                ("category", a.get("category")),
                ("role", a.get("sdc_role")),
            ],
        )
        .newline();
        self.attribute_comment(&mut xml, node);
        xml.line(&content).end("requirement");
        xml.finish()
    }

    fn sidebar(&mut self, node: &Node) -> String {
        let content = self.content(node, Scope::Other);
        let name = node.kind.name();

        let mut xml = self.builder();
        xml.start(name, &[]).newline();
        self.attribute_comment(&mut xml, node);
        xml.line(&content).end(name);
        xml.finish()
    }

    fn paragraph(&mut self, node: &Node) -> String {
        let content = self.content(node, Scope::Other);

        let mut xml = self.builder();
        xml.start("xhtml:p", &[]).raw(&content).end("xhtml:p");
        xml.finish()
    }

    /// Notes render only as direct children of a requirement; every other
    /// admonition is dropped.
    fn admonition(&mut self, node: &Node, scope: Scope) -> String {
        if !(is_note(node) && scope == Scope::Requirement) {
            return String::new();
        }
        let content = self.content(node, Scope::Other);

        let mut xml = self.builder();
        xml.start("note", &[]);
        if node.has_blocks() {
            xml.raw(&content);
        } else {
            xml.start("xhtml:p", &[]).raw(&content).end("xhtml:p");
        }
        xml.end("note");
        xml.finish()
    }

    fn list(&mut self, style: ListStyle, items: &[ListItem]) -> String {
        let tag = match (self.options.list_tags, style) {
            (ListTags::ByStyle, ListStyle::Unordered) => "xhtml:ul",
            _ => "xhtml:ol",
        };

        let mut xml = self.builder();
        xml.start(tag, &[]).newline();
        for item in items {
            let content = self.blocks(&item.blocks);
            xml.start("xhtml:li", &[])
                .raw(&item.text)
                .raw(&content)
                .end("xhtml:li")
                .newline();
        }
        xml.end(tag);
        xml.finish()
    }

    /// Render a block sequence that has no owning node (list item bodies).
    fn blocks(&mut self, blocks: &[Node]) -> String {
        blocks
            .iter()
            .map(|block| self.node(block, Scope::Other))
            .filter(|rendered| !rendered.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn image(&mut self, node: &Node) -> String {
        let a = &node.attributes;

        let mut xml = self.builder();
        xml.empty(
            "image",
            &[
                ("id", a.get("id")),
                ("dir", a.get("imagesdir")),
                ("src", a.get("target")),
                ("imagesdir", a.get("imagesdir")),
            ],
        );
        if self.options.attribute_comments {
            xml.newline().comment(&a.dump());
        }
        xml.finish()
    }

    fn table(&mut self, node: &Node, rows: &TableRows) -> String {
        let mut parts = self.builder();
        for (section, group) in rows.by_section() {
            let part_tag = format!("xhtml:t{section}");
            parts.start(&part_tag, &[]);
            for row in group {
                parts.start("xhtml:tr", &[]);
                for cell in &row.cells {
                    let content = self.cell(cell);
                    let colspan = cell.colspan.unwrap_or(1).to_string();
                    parts
                        .start("xhtml:td", &[("colspan", colspan.as_str())])
                        .raw(&content)
                        .end("xhtml:td");
                }
                parts.end("xhtml:tr");
            }
            parts.end(&part_tag);
        }
        let parts = parts.finish();

        let mut xml = self.builder();
        xml.start("table", &[("id", node.attributes.get("id"))])
            .newline()
            .start("xhtml:table", &[])
            .newline();
        self.attribute_comment(&mut xml, node);
        xml.line(&parts).end("xhtml:table").newline().end("table");
        xml.finish()
    }

    /// A cell holding a nested document renders that document's content
    /// (without the document element); other cells render their text.
    fn cell(&mut self, cell: &Cell) -> String {
        match &cell.inner_document {
            Some(document) => self.content(document, Scope::Other),
            None => cell.text.clone(),
        }
    }

    fn inline_anchor(&mut self, node: &Node) -> String {
        let refid = node.attributes.get("refid");
        match self.references.resolve(refid) {
            Resolution::Found(label) => label.to_owned(),
            Resolution::Missing => {
                tracing::warn!(refid = %refid, "Reference not found");
                self.warnings.push(format!("reference '{refid}' not found"));
                refid.to_owned()
            }
        }
    }

    fn fallback(&mut self, node: &Node, name: &str) -> String {
        let content = self.content(node, Scope::Other);

        let mut xml = self.builder();
        xml.comment(&format!("<{name}>"))
            .newline()
            .raw(&content)
            .newline()
            .comment(&format!("</{name}>"))
            .newline();
        xml.finish()
    }
}
