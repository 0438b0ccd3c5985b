//! Inline layout: words flowed into lines.

use rustkit_dom::{Document, NodeData, NodeId};
use rustkit_text::{FontCache, FontHandle, FontSlant, FontWeight};
use tracing::trace;

use crate::tree::{BoxType, LayoutContext, LayoutId, LayoutTree, PositionedWord};
use crate::{BIG_SIZE_STEP, DEFAULT_FONT_SIZE, LINE_LEADING, SMALL_SIZE_STEP};

impl LayoutTree {
    pub(crate) fn layout_inline(&mut self, id: LayoutId, ctx: &LayoutContext<'_>) {
        self.resolve_position(id);

        let layout_box = self.get(id);
        let (x, y, width) = (layout_box.x(), layout_box.y(), layout_box.width());
        let node = layout_box.node;

        let mut formatter =
            InlineFormatter::new(ctx.document, ctx.fonts, ctx.config.v_step, x, y, width);
        formatter.recurse(node);
        formatter.flush();

        let height = formatter.cursor_y - y;
        trace!(?id, ?node, words = formatter.words.len(), height, "Inline laid out");

        let layout_box = self.get_mut(id);
        layout_box.box_type = BoxType::Inline {
            words: formatter.words,
        };
        layout_box.height = Some(height);
    }
}

/// A word waiting on the current line for its baseline.
struct LineItem {
    x: f32,
    text: String,
    font: FontHandle,
}

/// Cursor and style state of one inline box.
struct InlineFormatter<'a> {
    document: &'a Document,
    fonts: &'a FontCache,
    v_step: f32,
    left: f32,
    right: f32,
    cursor_x: f32,
    cursor_y: f32,
    weight: FontWeight,
    slant: FontSlant,
    size: i32,
    line: Vec<LineItem>,
    words: Vec<PositionedWord>,
}

impl<'a> InlineFormatter<'a> {
    fn new(
        document: &'a Document,
        fonts: &'a FontCache,
        v_step: f32,
        x: f32,
        y: f32,
        width: f32,
    ) -> Self {
        Self {
            document,
            fonts,
            v_step,
            left: x,
            right: x + width,
            cursor_x: x,
            cursor_y: y,
            weight: FontWeight::Normal,
            slant: FontSlant::Roman,
            size: DEFAULT_FONT_SIZE,
            line: Vec::new(),
            words: Vec::new(),
        }
    }

    fn recurse(&mut self, node: NodeId) {
        let document = self.document;
        match &document.node(node).data {
            NodeData::Text(text) => self.text(text),
            NodeData::Element(element) => {
                self.open_tag(element.tag());
                for &child in document.children(node) {
                    self.recurse(child);
                }
                self.close_tag(element.tag());
            }
        }
    }

    fn open_tag(&mut self, tag: &str) {
        match tag {
            "i" => self.slant = FontSlant::Italic,
            "b" => self.weight = FontWeight::Bold,
            "small" => self.size -= SMALL_SIZE_STEP,
            "big" => self.size += BIG_SIZE_STEP,
            "br" => self.flush(),
            _ => {}
        }
    }

    fn close_tag(&mut self, tag: &str) {
        match tag {
            "i" => self.slant = FontSlant::Roman,
            "b" => self.weight = FontWeight::Normal,
            "small" => self.size += SMALL_SIZE_STEP,
            "big" => self.size -= BIG_SIZE_STEP,
            "p" => {
                self.flush();
                self.cursor_y += self.v_step;
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        let font = self.fonts.get_font(self.size, self.weight, self.slant);
        let space = font.measure(" ");
        for word in text.split_whitespace() {
            let width = font.measure(word);
            if self.cursor_x + width > self.right {
                self.flush();
            }
            self.line.push(LineItem {
                x: self.cursor_x,
                text: word.to_string(),
                font: font.clone(),
            });
            self.cursor_x += width + space;
        }
    }

    /// Place the pending line on a shared baseline and move the cursor to
    /// the start of the next line.
    fn flush(&mut self) {
        if self.line.is_empty() {
            return;
        }

        let (max_ascent, max_descent) =
            self.line
                .iter()
                .fold((0.0f32, 0.0f32), |(ascent, descent), item| {
                    let metrics = item.font.metrics();
                    (ascent.max(metrics.ascent), descent.max(metrics.descent))
                });
        let baseline = self.cursor_y + LINE_LEADING * max_ascent;

        trace!(
            words = self.line.len(),
            top = self.cursor_y,
            baseline,
            "Line flushed"
        );

        for item in self.line.drain(..) {
            let y = baseline - item.font.metrics().ascent;
            self.words.push(PositionedWord {
                x: item.x,
                y,
                text: item.text,
                font: item.font,
            });
        }

        self.cursor_x = self.left;
        self.cursor_y = baseline + LINE_LEADING * max_descent;
    }
}
