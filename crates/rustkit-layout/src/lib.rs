//! # RustKit Layout
//!
//! Layout engine for the RustKit browser engine.
//! Implements block and inline layout and paints the result into a flat
//! display list.
//!
//! ## Pipeline
//!
//! 1. **Mode inference**: classify every document subtree as block or inline
//! 2. **Block layout**: stack child boxes vertically, heights summed bottom-up
//! 3. **Inline layout**: flow words left to right, breaking lines before a
//!    word that would overflow, aligning mixed font sizes on a shared baseline
//! 4. **Display list**: walk the layout tree in document order and emit text
//!    runs and background rectangles
//!
//! ```
//! use std::sync::Arc;
//! use rustkit_dom::Document;
//! use rustkit_layout::{DisplayList, LayoutConfig, LayoutTree};
//! use rustkit_text::{ApproximateFontProvider, FontCache};
//!
//! let document = Document::parse("<p>Hello <b>world</b></p>");
//! let fonts = FontCache::new(Arc::new(ApproximateFontProvider::new()));
//! let tree = LayoutTree::build(&document, &fonts, &LayoutConfig::default()).unwrap();
//! let display_list = DisplayList::build(&tree, &document);
//! assert_eq!(display_list.len(), 2);
//! ```

mod block;
pub mod display_list;
mod inline;
pub mod mode;
pub mod tree;

pub use display_list::{Color, DisplayCommand, DisplayList};
pub use mode::{is_block_element, layout_mode, LayoutMode};
pub use tree::{BoxType, LayoutBox, LayoutId, LayoutTree, PositionedWord};

use thiserror::Error;

/// Font size every inline box starts from.
pub const DEFAULT_FONT_SIZE: i32 = 16;

/// Multiplier applied to the tallest ascent and deepest descent of a line.
pub const LINE_LEADING: f32 = 1.25;

/// Size change applied by `<small>`.
pub const SMALL_SIZE_STEP: i32 = 2;

/// Size change applied by `<big>`.
pub const BIG_SIZE_STEP: i32 = 4;

/// Errors that can occur in layout.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Invalid viewport: width {width} leaves no room inside {h_step}px margins")]
    InvalidViewport { width: f32, h_step: f32 },

    #[error("Invalid spacing: {0}")]
    InvalidSpacing(String),
}

/// Page geometry used by a layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Width of the viewport in pixels.
    pub viewport_width: f32,
    /// Horizontal page margin on each side.
    pub h_step: f32,
    /// Top page margin, also the extra gap after a closing `</p>`.
    pub v_step: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            h_step: 13.0,
            v_step: 18.0,
        }
    }
}

impl LayoutConfig {
    /// Create a config for `viewport_width` with the default margins.
    pub fn with_width(viewport_width: f32) -> Self {
        Self {
            viewport_width,
            ..Self::default()
        }
    }

    /// Width available to the document box.
    pub fn content_width(&self) -> f32 {
        self.viewport_width - 2.0 * self.h_step
    }

    /// Check that the config describes a usable page.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !self.h_step.is_finite() || self.h_step < 0.0 {
            return Err(LayoutError::InvalidSpacing(format!("h_step = {}", self.h_step)));
        }
        if !self.v_step.is_finite() || self.v_step < 0.0 {
            return Err(LayoutError::InvalidSpacing(format!("v_step = {}", self.v_step)));
        }
        if !self.viewport_width.is_finite() || self.content_width() <= 0.0 {
            return Err(LayoutError::InvalidViewport {
                width: self.viewport_width,
                h_step: self.h_step,
            });
        }
        Ok(())
    }
}

/// A 2D rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.bottom(), 70.0);
        assert!(r.contains(50.0, 30.0));
        assert!(!r.contains(0.0, 0.0));
    }

    #[test]
    fn test_default_config() {
        let config = LayoutConfig::default();
        assert_eq!(config.content_width(), 774.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_narrow_viewport() {
        let config = LayoutConfig::with_width(26.0);
        assert_eq!(
            config.validate(),
            Err(LayoutError::InvalidViewport {
                width: 26.0,
                h_step: 13.0
            })
        );
        assert!(LayoutConfig::with_width(f32::NAN).validate().is_err());
    }

    #[test]
    fn test_config_rejects_negative_spacing() {
        let config = LayoutConfig {
            v_step: -1.0,
            ..LayoutConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidSpacing(_))
        ));
    }
}
