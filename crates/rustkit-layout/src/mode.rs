//! Block/inline classification of document nodes.

use rustkit_dom::{Document, NodeData, NodeId};

/// How a document subtree participates in layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Stacked vertically, one child box per document child.
    Block,
    /// Flowed as wrapped text by a single inline box.
    Inline,
}

/// Whether `tag` names a block-level element.
pub fn is_block_element(tag: &str) -> bool {
    matches!(
        tag,
        "html"
            | "body"
            | "article"
            | "section"
            | "nav"
            | "aside"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "hgroup"
            | "header"
            | "footer"
            | "address"
            | "p"
            | "hr"
            | "pre"
            | "blockquote"
            | "ol"
            | "ul"
            | "menu"
            | "li"
            | "dl"
            | "dt"
            | "dd"
            | "figure"
            | "figcaption"
            | "main"
            | "div"
            | "table"
            | "form"
            | "fieldset"
            | "legend"
            | "details"
            | "summary"
    )
}

/// Classify a node.
///
/// Text is always inline. An element is block if any element child is
/// block-level, inline if it has children but none are, and block if it has
/// no children at all so empty containers still occupy their own slot.
pub fn layout_mode(document: &Document, node: NodeId) -> LayoutMode {
    match &document.node(node).data {
        NodeData::Text(_) => LayoutMode::Inline,
        NodeData::Element(_) => {
            let children = document.children(node);
            if children
                .iter()
                .any(|&child| document.tag(child).is_some_and(is_block_element))
            {
                LayoutMode::Block
            } else if !children.is_empty() {
                LayoutMode::Inline
            } else {
                LayoutMode::Block
            }
        }
    }
}
