//! Document and block layout.

use tracing::trace;

use crate::mode::{layout_mode, LayoutMode};
use crate::tree::{BoxType, LayoutBox, LayoutContext, LayoutId, LayoutTree};

impl LayoutTree {
    /// Lay out the page: a document box inset by the page margins holding a
    /// single box for the root element.
    pub(crate) fn layout_document(&mut self, ctx: &LayoutContext<'_>) {
        let root_node = ctx.document.root();
        let root = self.push(LayoutBox::new(BoxType::Document, root_node, None, None));
        {
            let document_box = self.get_mut(root);
            document_box.x = Some(ctx.config.h_step);
            document_box.y = Some(ctx.config.v_step);
            document_box.width = Some(ctx.config.content_width());
        }

        let child = self.push(LayoutBox::new(
            box_type_for(layout_mode(ctx.document, root_node)),
            root_node,
            Some(root),
            None,
        ));
        self.get_mut(root).children.push(child);
        self.layout_box(child, ctx);

        let height = self.get(child).height();
        self.get_mut(root).height = Some(height);
    }

    pub(crate) fn layout_box(&mut self, id: LayoutId, ctx: &LayoutContext<'_>) {
        match self.get(id).box_type {
            BoxType::Block => self.layout_block(id, ctx),
            BoxType::Inline { .. } => self.layout_inline(id, ctx),
            BoxType::Document => panic!("document box {id:?} nested inside the layout tree"),
        }
    }

    /// Inherit x and width from the parent; take y from the previous
    /// sibling's bottom edge, or the parent's top for a first child.
    pub(crate) fn resolve_position(&mut self, id: LayoutId) {
        let layout_box = self.get(id);
        let parent = match layout_box.parent {
            Some(parent) => self.get(parent),
            None => panic!("layout box {id:?} has no parent to inherit geometry from"),
        };
        let (x, width) = (parent.x(), parent.width());
        let y = match layout_box.previous {
            Some(previous) => self.get(previous).bottom(),
            None => parent.y(),
        };

        let layout_box = self.get_mut(id);
        layout_box.x = Some(x);
        layout_box.y = Some(y);
        layout_box.width = Some(width);
    }

    fn layout_block(&mut self, id: LayoutId, ctx: &LayoutContext<'_>) {
        let node = self.get(id).node;

        let mut previous = None;
        let mut children = Vec::with_capacity(ctx.document.children(node).len());
        for &child_node in ctx.document.children(node) {
            let box_type = box_type_for(layout_mode(ctx.document, child_node));
            let child = self.push(LayoutBox::new(box_type, child_node, Some(id), previous));
            children.push(child);
            previous = Some(child);
        }
        self.get_mut(id).children = children.clone();

        self.resolve_position(id);

        for &child in &children {
            self.layout_box(child, ctx);
        }

        let height: f32 = children.iter().map(|&child| self.get(child).height()).sum();
        trace!(?id, ?node, children = children.len(), height, "Block laid out");
        self.get_mut(id).height = Some(height);
    }
}

fn box_type_for(mode: LayoutMode) -> BoxType {
    match mode {
        LayoutMode::Block => BoxType::Block,
        LayoutMode::Inline => BoxType::Inline { words: Vec::new() },
    }
}
