//! TestEngine - headless test wrapper around the RustKit engine.

use std::sync::Arc;

use rustkit_engine::{Engine, EngineBuilder, EngineError};
use rustkit_renderer::{DrawCall, RecordingSurface};

use super::FixedWidthProvider;

/// Headless test engine wrapper.
///
/// Renders onto a [`RecordingSurface`] so tests can inspect the draw calls
/// of a frame.
pub struct TestEngine {
    pub engine: Engine,
    surface: RecordingSurface,
}

impl TestEngine {
    /// Create a new test engine with default size (800x600).
    pub fn new() -> Self {
        Self::with_size(800.0, 600.0)
    }

    /// Create a new test engine with specified size.
    pub fn with_size(width: f32, height: f32) -> Self {
        Self::from_builder(EngineBuilder::new().viewport(width, height))
    }

    /// Create a test engine measuring text with [`FixedWidthProvider`].
    pub fn fixed_width(width: f32, height: f32) -> Self {
        Self::from_builder(
            EngineBuilder::new()
                .viewport(width, height)
                .font_provider(Arc::new(FixedWidthProvider)),
        )
    }

    /// Create a test engine from a configured builder.
    pub fn from_builder(builder: EngineBuilder) -> Self {
        init_tracing();
        let engine = builder.build().expect("Failed to create test engine");
        Self {
            engine,
            surface: RecordingSurface::new(),
        }
    }

    /// Load HTML content into the engine.
    pub fn load_html(&mut self, html: &str) -> Result<(), EngineError> {
        self.engine.load_html(html)
    }

    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), EngineError> {
        self.engine.resize(width, height)
    }

    /// Render the current page and return the recorded draw calls.
    pub fn render(&mut self) -> Result<&[DrawCall], EngineError> {
        self.engine.render(&mut self.surface)?;
        Ok(self.surface.calls.as_slice())
    }

    /// Words drawn by the last frame, in draw order.
    pub fn rendered_words(&mut self) -> Vec<String> {
        self.render().expect("Should render");
        self.surface.texts().into_iter().map(str::to_string).collect()
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
