//! # RustKit Engine
//!
//! Orchestration layer that ties the RustKit components into a single
//! page engine: markup in, draw calls out.
//!
//! ## Pipeline
//!
//! 1. **Parse**: `rustkit-dom` builds the document tree
//! 2. **Layout**: `rustkit-layout` resolves box geometry and paints a
//!    display list
//! 3. **Render**: `rustkit-renderer` culls and scrolls the display list onto
//!    a [`DrawSurface`]
//!
//! Layout and the display list are rebuilt from the document whenever the
//! viewport width changes. Scrolling only moves the viewport.
//!
//! ```
//! use rustkit_engine::EngineBuilder;
//! use rustkit_renderer::RecordingSurface;
//!
//! let mut engine = EngineBuilder::new().viewport(800.0, 600.0).build().unwrap();
//! engine.load_html("<p>Hello</p>").unwrap();
//!
//! let mut surface = RecordingSurface::new();
//! assert_eq!(engine.render(&mut surface).unwrap(), 1);
//! ```

use std::sync::Arc;

use rustkit_dom::Document;
use rustkit_layout::{DisplayList, LayoutConfig, LayoutError, LayoutTree};
use rustkit_renderer::{DrawSurface, Renderer, RendererError, Viewport};
use rustkit_text::{ApproximateFontProvider, FontCache, FontMetricsProvider};
use thiserror::Error;
use tracing::{debug, info, trace};

/// Errors that can occur in the engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("No document loaded")]
    NoDocument,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Render error: {0}")]
    Render(#[from] RendererError),
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Viewport width in pixels.
    pub viewport_width: f32,
    /// Viewport height in pixels.
    pub viewport_height: f32,
    /// Horizontal page margin.
    pub h_step: f32,
    /// Top page margin and paragraph gap.
    pub v_step: f32,
    /// Distance moved by [`Engine::scroll_down`].
    pub scroll_step: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 600.0,
            h_step: 13.0,
            v_step: 18.0,
            scroll_step: 100.0,
        }
    }
}

impl EngineConfig {
    /// The part of the config consumed by layout.
    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            viewport_width: self.viewport_width,
            h_step: self.h_step,
            v_step: self.v_step,
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        self.layout_config().validate()?;
        if !self.viewport_height.is_finite() || self.viewport_height <= 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "viewport_height = {}",
                self.viewport_height
            )));
        }
        if !self.scroll_step.is_finite() {
            return Err(EngineError::InvalidConfig(format!(
                "scroll_step = {}",
                self.scroll_step
            )));
        }
        Ok(())
    }
}

/// The page engine.
///
/// Owns the font cache for its whole lifetime, so every layout pass of this
/// engine shares the same font handles.
pub struct Engine {
    config: EngineConfig,
    fonts: FontCache,
    renderer: Renderer,
    document: Option<Document>,
    layout: Option<LayoutTree>,
    display_list: Option<DisplayList>,
    scroll_offset: f32,
    max_scroll_offset: f32,
}

impl Engine {
    /// Create a new engine measuring text with `provider`.
    pub fn new(
        config: EngineConfig,
        provider: Arc<dyn FontMetricsProvider>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        info!(
            width = config.viewport_width,
            height = config.viewport_height,
            "Creating engine"
        );

        let renderer = Renderer::new(Viewport::new(config.viewport_width, config.viewport_height));
        Ok(Self {
            config,
            fonts: FontCache::new(provider),
            renderer,
            document: None,
            layout: None,
            display_list: None,
            scroll_offset: 0.0,
            max_scroll_offset: 0.0,
        })
    }

    /// Parse `html`, replace the current page with it and lay it out.
    ///
    /// The scroll offset returns to the top of the page.
    pub fn load_html(&mut self, html: &str) -> Result<(), EngineError> {
        let document = {
            let _span = tracing::info_span!("parse", bytes = html.len()).entered();
            Document::parse(html)
        };
        debug!(nodes = document.len(), "Document parsed");

        self.document = Some(document);
        self.scroll_offset = 0.0;
        self.relayout()
    }

    /// Rebuild the layout tree and display list from the current document.
    pub fn relayout(&mut self) -> Result<(), EngineError> {
        let _span = tracing::info_span!("relayout", width = self.config.viewport_width).entered();

        let document = self.document.as_ref().ok_or(EngineError::NoDocument)?;

        let layout = {
            let _build_span = tracing::info_span!("build_layout_tree").entered();
            LayoutTree::build(document, &self.fonts, &self.config.layout_config())?
        };

        let display_list = {
            let _display_list_span = tracing::info_span!("build_display_list").entered();
            DisplayList::build(&layout, document)
        };

        debug!(
            boxes = layout.len(),
            num_commands = display_list.len(),
            "Generated display list"
        );
        for (i, cmd) in display_list.iter().take(10).enumerate() {
            trace!("DisplayCmd[{}]: {:?}", i, cmd);
        }

        // Update max scroll offset based on content size
        let content_height = layout.content_bottom();
        self.max_scroll_offset = (content_height - self.config.viewport_height).max(0.0);
        self.layout = Some(layout);
        self.display_list = Some(display_list);
        self.apply_scroll(self.scroll_offset);

        Ok(())
    }

    /// Change the viewport size and lay the current document out again.
    ///
    /// The scroll offset is kept, clamped to the new content height. On
    /// error the engine keeps its previous size.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), EngineError> {
        let config = EngineConfig {
            viewport_width: width,
            viewport_height: height,
            ..self.config.clone()
        };
        config.validate()?;

        debug!(width, height, "Viewport resized");
        self.config = config;
        self.renderer.set_viewport_size(width, height);

        if self.document.is_some() {
            self.relayout()?;
        }
        Ok(())
    }

    /// Scroll down by one scroll step.
    ///
    /// Returns true if the offset changed.
    pub fn scroll_down(&mut self) -> bool {
        self.scroll_by(self.config.scroll_step)
    }

    /// Scroll by `delta_y`; positive values move down the page.
    ///
    /// Returns true if the offset changed.
    pub fn scroll_by(&mut self, delta_y: f32) -> bool {
        let old_offset = self.scroll_offset;
        self.apply_scroll(old_offset + delta_y);

        let changed = self.scroll_offset != old_offset;
        if changed {
            debug!(old_offset, new_offset = self.scroll_offset, "Scrolled");
        }
        changed
    }

    /// Set the scroll offset directly.
    pub fn set_scroll(&mut self, y: f32) {
        self.apply_scroll(y);
        debug!(offset = self.scroll_offset, "Scroll offset set");
    }

    fn apply_scroll(&mut self, y: f32) {
        self.scroll_offset = y.max(0.0).min(self.max_scroll_offset);
        self.renderer.set_scroll(self.scroll_offset);
    }

    /// Draw the visible part of the page onto `surface`.
    ///
    /// Returns the number of display commands drawn.
    pub fn render(&self, surface: &mut dyn DrawSurface) -> Result<usize, EngineError> {
        let _span = tracing::info_span!("render", scroll = self.scroll_offset).entered();
        let display_list = self.display_list.as_ref().ok_or(EngineError::NoDocument)?;
        Ok(self.renderer.render(display_list, surface)?)
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn layout_tree(&self) -> Option<&LayoutTree> {
        self.layout.as_ref()
    }

    pub fn display_list(&self) -> Option<&DisplayList> {
        self.display_list.as_ref()
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Largest reachable scroll offset for the current layout.
    pub fn max_scroll_offset(&self) -> f32 {
        self.max_scroll_offset
    }

    pub fn viewport(&self) -> Viewport {
        self.renderer.viewport()
    }

    pub fn fonts(&self) -> &FontCache {
        &self.fonts
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Builder for Engine.
pub struct EngineBuilder {
    config: EngineConfig,
    provider: Option<Arc<dyn FontMetricsProvider>>,
}

impl EngineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            provider: None,
        }
    }

    /// Set the viewport size.
    pub fn viewport(mut self, width: f32, height: f32) -> Self {
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        self
    }

    /// Set the horizontal page margin.
    pub fn h_step(mut self, h_step: f32) -> Self {
        self.config.h_step = h_step;
        self
    }

    /// Set the top margin and paragraph gap.
    pub fn v_step(mut self, v_step: f32) -> Self {
        self.config.v_step = v_step;
        self
    }

    /// Set the distance moved by one `scroll_down`.
    pub fn scroll_step(mut self, scroll_step: f32) -> Self {
        self.config.scroll_step = scroll_step;
        self
    }

    /// Measure text with `provider` instead of the approximate metrics.
    pub fn font_provider(mut self, provider: Arc<dyn FontMetricsProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Build the engine.
    pub fn build(self) -> Result<Engine, EngineError> {
        let provider = self
            .provider
            .unwrap_or_else(|| Arc::new(ApproximateFontProvider::new()));
        Engine::new(self.config, provider)
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
