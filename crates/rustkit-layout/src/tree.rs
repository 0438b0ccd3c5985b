//! The layout tree: boxes with resolved geometry, stored in an arena.
//!
//! Each box refers back to the document node it was built for, to its
//! parent box and to its previous sibling box. All of these are plain ids;
//! only the `children` lists own anything.

use rustkit_dom::{Document, NodeId};
use rustkit_text::{FontCache, FontHandle};
use tracing::{debug, info_span};

use crate::{LayoutConfig, LayoutError, Rect};

/// Index of a box inside its [`LayoutTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutId(usize);

impl LayoutId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A word placed by inline layout.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedWord {
    /// Left edge.
    pub x: f32,
    /// Top edge of the glyphs (baseline minus the font's ascent).
    pub y: f32,
    pub text: String,
    pub font: FontHandle,
}

/// Type of layout box.
#[derive(Debug, Clone, PartialEq)]
pub enum BoxType {
    /// The page itself. Always the root of the tree.
    Document,
    /// Block-level box stacking its children vertically.
    Block,
    /// Inline formatting box; owns the words of its whole subtree in
    /// the order they were flushed.
    Inline { words: Vec<PositionedWord> },
}

/// A box in the layout tree.
#[derive(Debug, Clone)]
pub struct LayoutBox {
    pub box_type: BoxType,
    /// Source document node.
    pub node: NodeId,
    pub parent: Option<LayoutId>,
    /// Previous sibling, used to chain vertical position.
    pub previous: Option<LayoutId>,
    pub children: Vec<LayoutId>,
    pub(crate) x: Option<f32>,
    pub(crate) y: Option<f32>,
    pub(crate) width: Option<f32>,
    pub(crate) height: Option<f32>,
}

/// Read a geometry field that layout must already have resolved.
fn resolved(value: Option<f32>, field: &str) -> f32 {
    match value {
        Some(value) => value,
        None => panic!("layout box {field} read before it was resolved"),
    }
}

impl LayoutBox {
    pub(crate) fn new(
        box_type: BoxType,
        node: NodeId,
        parent: Option<LayoutId>,
        previous: Option<LayoutId>,
    ) -> Self {
        Self {
            box_type,
            node,
            parent,
            previous,
            children: Vec::new(),
            x: None,
            y: None,
            width: None,
            height: None,
        }
    }

    /// Left edge.
    ///
    /// # Panics
    ///
    /// Panics if called before layout resolved it.
    pub fn x(&self) -> f32 {
        resolved(self.x, "x")
    }

    pub fn y(&self) -> f32 {
        resolved(self.y, "y")
    }

    pub fn width(&self) -> f32 {
        resolved(self.width, "width")
    }

    pub fn height(&self) -> f32 {
        resolved(self.height, "height")
    }

    /// Bottom edge: `y + height`.
    pub fn bottom(&self) -> f32 {
        self.y() + self.height()
    }

    /// Whether every geometry field has been resolved.
    pub fn is_resolved(&self) -> bool {
        self.x.is_some() && self.y.is_some() && self.width.is_some() && self.height.is_some()
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x(), self.y(), self.width(), self.height())
    }

    pub fn is_inline(&self) -> bool {
        matches!(self.box_type, BoxType::Inline { .. })
    }

    /// Words placed in this box. Empty for non-inline boxes.
    pub fn words(&self) -> &[PositionedWord] {
        match &self.box_type {
            BoxType::Inline { words } => words,
            BoxType::Document | BoxType::Block => &[],
        }
    }
}

/// Shared inputs of one layout pass.
pub(crate) struct LayoutContext<'a> {
    pub(crate) document: &'a Document,
    pub(crate) fonts: &'a FontCache,
    pub(crate) config: &'a LayoutConfig,
}

/// Layout tree with resolved geometry for every box.
#[derive(Debug, Clone)]
pub struct LayoutTree {
    pub(crate) boxes: Vec<LayoutBox>,
}

impl LayoutTree {
    /// Lay out `document` for the page described by `config`.
    ///
    /// Fails only on an unusable config; layout itself cannot fail on a
    /// parsed document.
    #[tracing::instrument(skip_all, fields(viewport_width = config.viewport_width))]
    pub fn build(
        document: &Document,
        fonts: &FontCache,
        config: &LayoutConfig,
    ) -> Result<Self, LayoutError> {
        config.validate()?;

        let ctx = LayoutContext {
            document,
            fonts,
            config,
        };
        let mut tree = LayoutTree { boxes: Vec::new() };
        {
            let _span = info_span!("layout_compute").entered();
            tree.layout_document(&ctx);
        }

        debug!(
            boxes = tree.len(),
            height = tree.root_box().height(),
            fonts = fonts.len(),
            "Layout complete"
        );
        Ok(tree)
    }

    pub(crate) fn push(&mut self, layout_box: LayoutBox) -> LayoutId {
        self.boxes.push(layout_box);
        LayoutId(self.boxes.len() - 1)
    }

    pub(crate) fn get_mut(&mut self, id: LayoutId) -> &mut LayoutBox {
        &mut self.boxes[id.0]
    }

    /// The document box.
    pub fn root(&self) -> LayoutId {
        LayoutId(0)
    }

    pub fn root_box(&self) -> &LayoutBox {
        self.get(self.root())
    }

    /// Access a box.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn get(&self, id: LayoutId) -> &LayoutBox {
        &self.boxes[id.0]
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Bottom edge of the page content.
    pub fn content_bottom(&self) -> f32 {
        self.root_box().bottom()
    }

    /// Boxes in document (pre-)order.
    pub fn iter(&self) -> impl Iterator<Item = (LayoutId, &LayoutBox)> {
        let mut stack = vec![self.root()];
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            let layout_box = self.get(id);
            stack.extend(layout_box.children.iter().rev().copied());
            Some((id, layout_box))
        })
    }

    /// First box built for the document node `node`.
    pub fn box_for_node(&self, node: NodeId) -> Option<LayoutId> {
        self.iter()
            .find(|(_, layout_box)| layout_box.node == node)
            .map(|(id, _)| id)
    }
}
