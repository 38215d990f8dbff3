//! Tree nodes.

use serde::Deserialize;

use crate::Attributes;

/// A node of the document tree.
///
/// The rendered content of a node is never stored here: it is produced by
/// rendering [`children`](Self::children) first.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Node {
    /// Node kind with its kind-specific payload.
    #[serde(flatten)]
    pub kind: NodeKind,
    /// Named and positional attributes.
    #[serde(default)]
    pub attributes: Attributes,
    /// Child nodes in document order (blocks, or inline runs for paragraphs).
    #[serde(default)]
    pub children: Vec<Node>,
}

/// Kind of a tree node.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeKind {
    Document,
    Section {
        title: String,
        #[serde(default)]
        index: usize,
    },
    Paragraph,
    Admonition,
    Sidebar,
    List {
        style: ListStyle,
        #[serde(default)]
        items: Vec<ListItem>,
    },
    Image,
    Table {
        #[serde(default)]
        rows: TableRows,
    },
    InlineAnchor,
    InlineQuoted {
        text: String,
    },
    InlineFootnote,
    Dlist,
    Literal,
    /// Raw inline text.
    Text {
        text: String,
    },
    /// Any kind without a dedicated conversion rule.
    Other {
        name: String,
    },
}

impl NodeKind {
    /// External name of the kind (`section`, `olist`, `inline_anchor`, ...).
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Document => "document",
            Self::Section { .. } => "section",
            Self::Paragraph => "paragraph",
            Self::Admonition => "admonition",
            Self::Sidebar => "sidebar",
            Self::List { style, .. } => style.name(),
            Self::Image => "image",
            Self::Table { .. } => "table",
            Self::InlineAnchor => "inline_anchor",
            Self::InlineQuoted { .. } => "inline_quoted",
            Self::InlineFootnote => "inline_footnote",
            Self::Dlist => "dlist",
            Self::Literal => "literal",
            Self::Text { .. } => "text",
            Self::Other { name } => name,
        }
    }
}

/// Bullet or numbered list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListStyle {
    #[serde(alias = "olist")]
    Ordered,
    #[serde(alias = "ulist")]
    Unordered,
}

impl ListStyle {
    /// External kind name (`olist` or `ulist`).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Ordered => "olist",
            Self::Unordered => "ulist",
        }
    }
}

/// A list item: its own text followed by nested blocks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ListItem {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub blocks: Vec<Node>,
}

/// Table rows grouped by section.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct TableRows {
    #[serde(default)]
    pub head: Vec<Row>,
    #[serde(default)]
    pub body: Vec<Row>,
    #[serde(default)]
    pub foot: Vec<Row>,
}

impl TableRows {
    /// Row groups in output order: head, body, foot.
    pub fn by_section(&self) -> [(&'static str, &[Row]); 3] {
        [
            ("head", self.head.as_slice()),
            ("body", self.body.as_slice()),
            ("foot", self.foot.as_slice()),
        ]
    }
}

/// A table row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Row {
    pub cells: Vec<Cell>,
}

/// A table cell.
///
/// A cell either holds raw text or, for AsciiDoc-style cells, a nested
/// document whose rendered content replaces the text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Cell {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub colspan: Option<u32>,
    #[serde(default)]
    pub inner_document: Option<Box<Node>>,
}

impl Cell {
    /// Create a text cell.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the column span.
    #[must_use]
    pub fn with_colspan(mut self, colspan: u32) -> Self {
        self.colspan = Some(colspan);
        self
    }

    /// Set a nested document.
    #[must_use]
    pub fn with_inner_document(mut self, document: Node) -> Self {
        self.inner_document = Some(Box::new(document));
        self
    }
}

impl Node {
    /// Create a node without attributes or children.
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    /// Create a document node.
    #[must_use]
    pub fn document() -> Self {
        Self::new(NodeKind::Document)
    }

    /// Create a section node.
    #[must_use]
    pub fn section(title: impl Into<String>, index: usize) -> Self {
        Self::new(NodeKind::Section {
            title: title.into(),
            index,
        })
    }

    /// Create a paragraph holding a single text run.
    #[must_use]
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Paragraph).with_child(Self::text(text))
    }

    /// Create a raw text run.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Text { text: text.into() })
    }

    /// Create an inline cross-reference to `refid`.
    #[must_use]
    pub fn anchor(refid: impl Into<String>) -> Self {
        Self::new(NodeKind::InlineAnchor).with_attr("refid", refid)
    }

    /// Create a list with one text-only item per entry.
    #[must_use]
    pub fn list<I, S>(style: ListStyle, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = items
            .into_iter()
            .map(|text| ListItem {
                text: text.into(),
                blocks: Vec::new(),
            })
            .collect();
        Self::new(NodeKind::List { style, items })
    }

    /// Create a sidebar classified as a requirement.
    #[must_use]
    pub fn requirement(id: impl Into<String>) -> Self {
        Self::new(NodeKind::Sidebar)
            .with_positional(1, "requirement")
            .with_attr("id", id)
    }

    /// Create a note admonition.
    #[must_use]
    pub fn note() -> Self {
        Self::new(NodeKind::Admonition).with_attr("name", "note")
    }

    /// Set a named attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name, value);
        self
    }

    /// Set a positional attribute.
    #[must_use]
    pub fn with_positional(mut self, position: usize, value: impl Into<String>) -> Self {
        self.attributes.insert_positional(position, value);
        self
    }

    /// Append a child node.
    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Append several child nodes.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Whether this node is an inline run rather than a block.
    #[must_use]
    pub fn is_inline(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Text { .. }
                | NodeKind::InlineAnchor
                | NodeKind::InlineQuoted { .. }
                | NodeKind::InlineFootnote
        )
    }

    /// Whether any child is a block (compound content).
    #[must_use]
    pub fn has_blocks(&self) -> bool {
        self.children.iter().any(|child| !child.is_inline())
    }

    /// Visit this node and all descendants in document order.
    ///
    /// Descends into children, list item blocks and nested cell documents.
    pub fn walk<F: FnMut(&Node)>(&self, f: &mut F) {
        f(self);
        match &self.kind {
            NodeKind::List { items, .. } => {
                for item in items {
                    for block in &item.blocks {
                        block.walk(f);
                    }
                }
            }
            NodeKind::Table { rows } => {
                for (_, group) in rows.by_section() {
                    for cell in group.iter().flat_map(|row| &row.cells) {
                        if let Some(document) = &cell.inner_document {
                            document.walk(f);
                        }
                    }
                }
            }
            _ => {}
        }
        for child in &self.children {
            child.walk(f);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(NodeKind::Document.name(), "document");
        assert_eq!(Node::list(ListStyle::Ordered, ["a"]).kind.name(), "olist");
        assert_eq!(Node::list(ListStyle::Unordered, ["a"]).kind.name(), "ulist");
        assert_eq!(
            NodeKind::Other {
                name: "thematic_break".to_owned()
            }
            .name(),
            "thematic_break"
        );
    }

    #[test]
    fn test_deserialize_section() {
        let node: Node = serde_json::from_str(
            r#"{"kind": "section", "title": "Scope", "index": 2,
                "attributes": {"id": "scope"},
                "children": [{"kind": "paragraph", "children": [{"kind": "text", "text": "hi"}]}]}"#,
        )
        .unwrap();

        assert_eq!(
            node.kind,
            NodeKind::Section {
                title: "Scope".to_owned(),
                index: 2
            }
        );
        assert_eq!(node.attributes.get("id"), "scope");
        assert_eq!(node.children, vec![Node::paragraph("hi")]);
    }

    #[test]
    fn test_deserialize_list() {
        let node: Node = serde_json::from_str(
            r#"{"kind": "list", "style": "ulist",
                "items": [{"text": "a"}, {"text": "b", "blocks": [{"kind": "literal"}]}]}"#,
        )
        .unwrap();

        let NodeKind::List { style, items } = node.kind else {
            panic!("expected list");
        };
        assert_eq!(style, ListStyle::Unordered);
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].blocks[0].kind, NodeKind::Literal);
    }

    #[test]
    fn test_deserialize_table() {
        let node: Node = serde_json::from_str(
            r#"{"kind": "table", "rows": {
                "head": [[{"text": "H"}]],
                "body": [[{"text": "a", "colspan": 2},
                          {"inner_document": {"kind": "document"}}]]
            }}"#,
        )
        .unwrap();

        let NodeKind::Table { rows } = node.kind else {
            panic!("expected table");
        };
        assert_eq!(rows.head[0].cells[0], Cell::text("H"));
        assert_eq!(rows.body[0].cells[0].colspan, Some(2));
        assert!(rows.body[0].cells[1].inner_document.is_some());
        assert!(rows.foot.is_empty());
    }

    #[test]
    fn test_deserialize_other() {
        let node: Node =
            serde_json::from_str(r#"{"kind": "other", "name": "thematic_break"}"#).unwrap();
        assert_eq!(node.kind.name(), "thematic_break");
    }

    #[test]
    fn test_deserialize_unknown_kind_fails() {
        let result: Result<Node, _> = serde_json::from_str(r#"{"kind": "pass"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_has_blocks() {
        let simple = Node::note().with_child(Node::text("Remember"));
        assert!(!simple.has_blocks());

        let compound = Node::note().with_child(Node::paragraph("Remember"));
        assert!(compound.has_blocks());
    }

    #[test]
    fn test_walk_document_order() {
        let tree = Node::document()
            .with_child(
                Node::section("A", 0)
                    .with_attr("id", "a")
                    .with_child(Node::new(NodeKind::Table {
                        rows: TableRows {
                            body: vec![Row {
                                cells: vec![Cell::default().with_inner_document(
                                    Node::document().with_child(Node::new(NodeKind::Image)),
                                )],
                            }],
                            ..TableRows::default()
                        },
                    })),
            )
            .with_child(Node::section("B", 1));

        let mut names = Vec::new();
        tree.walk(&mut |node| names.push(node.kind.name().to_owned()));
        assert_eq!(
            names,
            ["document", "section", "table", "document", "image", "section"]
        );
    }
}
