//! # RustKit DOM
//!
//! Arena-backed document tree for the RustKit browser engine.
//!
//! Nodes are either text or elements. Each node owns its ordered list of
//! children (as [`NodeId`]s into the [`Document`] arena) and keeps a
//! non-owning parent id, so the tree has no reference cycles. A document is
//! built once by [`Document::parse`] and is read-only afterwards.

use std::collections::HashMap;
use std::fmt::{self, Write as _};

use rustkit_html::TreeSink;
use string_cache::DefaultAtom;
use tracing::debug;

/// Interned tag or attribute name.
pub type LocalName = DefaultAtom;

/// Index of a node inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Element payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    /// Lower-cased tag name.
    pub tag_name: LocalName,
    /// Attributes keyed by lower-cased name.
    pub attributes: HashMap<LocalName, String>,
}

impl ElementData {
    /// Tag name as a string slice.
    pub fn tag(&self) -> &str {
        &self.tag_name
    }

    /// Look up an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(&LocalName::from(name))
            .map(String::as_str)
    }
}

/// Node payload: the closed set of node kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Text(String),
    Element(ElementData),
}

/// A node in the document arena.
#[derive(Debug, Clone)]
pub struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    pub data: NodeData,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(element) => Some(element),
            NodeData::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(text) => Some(text),
            NodeData::Element(_) => None,
        }
    }

    /// Tag name if this node is an element.
    pub fn tag(&self) -> Option<&str> {
        self.as_element().map(ElementData::tag)
    }
}

/// A parsed document.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Document {
    /// Parse markup into a document. Never fails.
    pub fn parse(markup: &str) -> Self {
        let (sink, root) = rustkit_html::parse_into(markup, DocumentSink::default());
        let document = Self {
            nodes: sink.nodes,
            root,
        };
        debug!(
            input_len = markup.len(),
            nodes = document.len(),
            "Parsed document"
        );
        document
    }

    /// The root `html` element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the document.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A document always has at least its root element.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Access a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this document.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).children()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent()
    }

    /// Tag name of an element node.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.node(id).tag()
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.node(id).as_element()
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id).as_text()
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|element| element.attribute(name))
    }

    /// Pre-order iterator over `id` and all of its descendants.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            document: self,
            stack: vec![id],
        }
    }

    /// First element with the given tag, in document order.
    pub fn find_element(&self, tag: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .find(|&id| self.tag(id) == Some(tag))
    }

    /// Concatenated text of a subtree, in document order.
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|node| self.text(node))
            .collect()
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, indent: usize) -> fmt::Result {
        write!(f, "{:indent$} ", "", indent = indent)?;
        match &self.node(id).data {
            NodeData::Text(text) => {
                write_quoted(f, text)?;
                writeln!(f)?;
            }
            NodeData::Element(element) => {
                write!(f, "<{}", element.tag())?;
                let mut attributes: Vec<(&str, &str)> = element
                    .attributes
                    .iter()
                    .map(|(key, value)| (&**key, value.as_str()))
                    .collect();
                attributes.sort_unstable();
                for (key, value) in attributes {
                    write!(f, " {}=\"{}\"", key, value)?;
                }
                writeln!(f, ">")?;
            }
        }
        for &child in self.children(id) {
            self.fmt_node(f, child, indent + 2)?;
        }
        Ok(())
    }
}

/// Write `text` as a quoted, escaped literal that stays on one line.
///
/// Single quotes are preferred; double quotes are used when the text
/// contains a single quote but no double quote.
fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };
    f.write_char(quote)?;
    for c in text.chars() {
        match c {
            c if c == quote => write!(f, "\\{c}")?,
            '"' | '\'' => f.write_char(c)?,
            c => write!(f, "{}", c.escape_debug())?,
        }
    }
    f.write_char(quote)
}

/// Indented tree dump, one node per line.
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, self.root, 0)
    }
}

/// Iterator returned by [`Document::descendants`].
pub struct Descendants<'a> {
    document: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.document.children(id).iter().rev().copied());
        Some(id)
    }
}

/// Tree sink that fills the document arena during parsing.
#[derive(Default)]
struct DocumentSink {
    nodes: Vec<Node>,
}

impl DocumentSink {
    fn push(&mut self, parent: Option<NodeId>, data: NodeData) -> NodeId {
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            data,
        });
        NodeId(self.nodes.len() - 1)
    }
}

impl TreeSink for DocumentSink {
    type Handle = NodeId;

    fn create_element(
        &mut self,
        name: &str,
        attributes: Vec<(String, String)>,
        parent: Option<NodeId>,
    ) -> NodeId {
        let element = ElementData {
            tag_name: LocalName::from(name),
            attributes: attributes
                .into_iter()
                .map(|(key, value)| (LocalName::from(key), value))
                .collect(),
        };
        self.push(parent, NodeData::Element(element))
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
    }

    fn append_text(&mut self, parent: NodeId, text: String) {
        let id = self.push(Some(parent), NodeData::Text(text));
        self.nodes[parent.0].children.push(id);
    }
}
