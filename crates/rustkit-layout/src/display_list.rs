//! Painting: the layout tree flattened into draw commands.

use rustkit_dom::Document;
use rustkit_text::FontHandle;
use tracing::debug;

use crate::tree::{BoxType, LayoutBox, LayoutTree};
use crate::Rect;

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 0.0,
    };
    pub const BLACK: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 1.0,
    };
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
        a: 1.0,
    };
    /// Background behind `<pre>` blocks.
    pub const PRE_BACKGROUND: Color = Color {
        r: 190,
        g: 190,
        b: 190,
        a: 1.0,
    };

    pub fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// A paint command in absolute document coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCommand {
    /// Draw one word with its top-left corner at `(left, top)`.
    Text {
        top: f32,
        left: f32,
        text: String,
        font: FontHandle,
    },
    /// Fill a rectangle.
    Rect {
        top: f32,
        left: f32,
        bottom: f32,
        right: f32,
        color: Color,
    },
}

impl DisplayCommand {
    pub fn top(&self) -> f32 {
        match self {
            DisplayCommand::Text { top, .. } | DisplayCommand::Rect { top, .. } => *top,
        }
    }

    /// Lower edge. Text extends one line space below its top.
    pub fn bottom(&self) -> f32 {
        match self {
            DisplayCommand::Text { top, font, .. } => top + font.metrics().linespace,
            DisplayCommand::Rect { bottom, .. } => *bottom,
        }
    }

    pub fn left(&self) -> f32 {
        match self {
            DisplayCommand::Text { left, .. } | DisplayCommand::Rect { left, .. } => *left,
        }
    }

    fn fill(rect: Rect, color: Color) -> Self {
        DisplayCommand::Rect {
            top: rect.y,
            left: rect.x,
            bottom: rect.bottom(),
            right: rect.right(),
            color,
        }
    }
}

/// A display list of paint commands, in paint order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DisplayList {
    pub commands: Vec<DisplayCommand>,
}

impl DisplayList {
    /// Create an empty display list.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Paint a laid-out document.
    ///
    /// Walks the tree depth-first in document order. Only inline boxes
    /// produce commands: the `<pre>` background first, then their words in
    /// the order they were placed.
    #[tracing::instrument(skip_all, fields(boxes = tree.len()))]
    pub fn build(tree: &LayoutTree, document: &Document) -> Self {
        let mut list = DisplayList::new();
        for (_, layout_box) in tree.iter() {
            list.paint_box(layout_box, document);
        }
        debug!(commands = list.len(), "Display list built");
        list
    }

    fn paint_box(&mut self, layout_box: &LayoutBox, document: &Document) {
        let words = match &layout_box.box_type {
            BoxType::Document | BoxType::Block => return,
            BoxType::Inline { words } => words,
        };

        if document.tag(layout_box.node) == Some("pre") {
            self.push(DisplayCommand::fill(layout_box.rect(), Color::PRE_BACKGROUND));
        }

        for word in words {
            self.push(DisplayCommand::Text {
                top: word.y,
                left: word.x,
                text: word.text.clone(),
                font: word.font.clone(),
            });
        }
    }

    pub fn push(&mut self, command: DisplayCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DisplayCommand> {
        self.commands.iter()
    }
}

impl<'a> IntoIterator for &'a DisplayList {
    type Item = &'a DisplayCommand;
    type IntoIter = std::slice::Iter<'a, DisplayCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}
