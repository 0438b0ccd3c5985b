//! # RustKit Renderer
//!
//! Display list renderer for the RustKit browser engine.
//!
//! This crate takes a `DisplayList` from `rustkit-layout` and executes it
//! against a [`DrawSurface`], the boundary to whatever actually puts pixels
//! on screen.
//!
//! ## Architecture
//!
//! ```text
//! DisplayList (document coordinates)
//!     │
//!     ▼
//! ┌─────────────────────────────────────┐
//! │           Renderer                  │
//! │   - Cull commands outside viewport  │
//! │   - Translate by scroll offset      │
//! └─────────────────────────────────────┘
//!                 │
//!                 ▼
//!     DrawSurface (screen coordinates)
//! ```

use rustkit_layout::{Color, DisplayCommand, DisplayList, Rect};
use rustkit_text::FontHandle;
use thiserror::Error;
use tracing::{debug, trace};

// ==================== Errors ====================

/// Errors that can occur during rendering.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RendererError {
    #[error("Surface error: {0}")]
    Surface(String),
}

// ==================== Viewport ====================

/// The visible window onto the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Document y shown at the top edge of the surface.
    pub scroll_y: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
        }
    }

    pub fn with_scroll(mut self, scroll_y: f32) -> Self {
        self.scroll_y = scroll_y;
        self
    }

    /// Whether any part of `command` falls inside the visible band.
    pub fn is_visible(&self, command: &DisplayCommand) -> bool {
        command.top() <= self.scroll_y + self.height && command.bottom() >= self.scroll_y
    }
}

// ==================== Surface ====================

/// Destination of draw calls, in surface coordinates.
pub trait DrawSurface {
    /// Reset the whole surface before a frame.
    fn clear(&mut self) -> Result<(), RendererError>;

    /// Draw `text` with its top-left corner at `(left, top)`.
    fn draw_text(
        &mut self,
        left: f32,
        top: f32,
        text: &str,
        font: &FontHandle,
    ) -> Result<(), RendererError>;

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), RendererError>;
}

/// A draw call captured by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Text {
        left: f32,
        top: f32,
        text: String,
        font: FontHandle,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
}

/// Surface that records every call, for headless use.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text drawn since the last clear, in call order.
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self) -> Result<(), RendererError> {
        self.calls.clear();
        self.calls.push(DrawCall::Clear);
        Ok(())
    }

    fn draw_text(
        &mut self,
        left: f32,
        top: f32,
        text: &str,
        font: &FontHandle,
    ) -> Result<(), RendererError> {
        self.calls.push(DrawCall::Text {
            left,
            top,
            text: text.to_string(),
            font: font.clone(),
        });
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), RendererError> {
        self.calls.push(DrawCall::FillRect { rect, color });
        Ok(())
    }
}

// ==================== Renderer ====================

/// The main display list renderer.
#[derive(Debug, Clone)]
pub struct Renderer {
    viewport: Viewport,
}

impl Renderer {
    /// Create a new renderer.
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Set the viewport size.
    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        self.viewport.width = width;
        self.viewport.height = height;
    }

    pub fn set_scroll(&mut self, scroll_y: f32) {
        self.viewport.scroll_y = scroll_y;
    }

    /// Execute a display list against `surface`.
    ///
    /// Returns the number of commands drawn.
    #[tracing::instrument(skip_all, fields(commands = display_list.len(), scroll_y = self.viewport.scroll_y))]
    pub fn render(
        &self,
        display_list: &DisplayList,
        surface: &mut dyn DrawSurface,
    ) -> Result<usize, RendererError> {
        surface.clear()?;

        let mut drawn = 0;
        for command in display_list {
            if !self.viewport.is_visible(command) {
                trace!(top = command.top(), "Culled");
                continue;
            }
            self.process_command(command, surface)?;
            drawn += 1;
        }

        debug!(drawn, culled = display_list.len() - drawn, "Frame rendered");
        Ok(drawn)
    }

    /// Process a single display command.
    fn process_command(
        &self,
        command: &DisplayCommand,
        surface: &mut dyn DrawSurface,
    ) -> Result<(), RendererError> {
        let scroll = self.viewport.scroll_y;
        match command {
            DisplayCommand::Text {
                top,
                left,
                text,
                font,
            } => surface.draw_text(*left, top - scroll, text, font),
            DisplayCommand::Rect {
                top,
                left,
                bottom,
                right,
                color,
            } => {
                let rect = Rect::new(*left, top - scroll, right - left, bottom - top);
                surface.fill_rect(rect, *color)
            }
        }
    }
}
