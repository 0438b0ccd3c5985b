//! Engine lifecycle integration tests
//!
//! These tests verify that the RustKit engine:
//! - Builds from config and rejects unusable viewports
//! - Replaces pages on reload
//! - Re-lays out on resize and clamps scrolling

use rustkit_engine::{EngineBuilder, EngineError};
use rustkit_layout::LayoutError;

use crate::support::{assert_layout_consistent, assert_near, TestEngine};

/// Page with one 25px line per paragraph plus an 18px gap (fixed-width
/// metrics).
fn paragraphs(count: usize) -> String {
    (0..count).map(|i| format!("<p>line{i}</p>")).collect()
}

#[test]
fn test_engine_creates_with_custom_size() {
    let engine = TestEngine::with_size(1024.0, 768.0);
    let viewport = engine.engine.viewport();
    assert_eq!(viewport.width, 1024.0);
    assert_eq!(viewport.height, 768.0);
    assert_eq!(viewport.scroll_y, 0.0);
}

#[test]
fn test_multiple_engines_have_separate_font_caches() {
    let mut first = TestEngine::new();
    let second = TestEngine::new();
    first.load_html("<p>text <b>bold</b></p>").unwrap();
    assert_eq!(first.engine.fonts().len(), 2);
    assert!(second.engine.fonts().is_empty());
}

#[test]
fn test_builder_rejects_narrow_viewport() {
    let result = EngineBuilder::new().viewport(26.0, 600.0).build();
    assert!(matches!(
        result.err(),
        Some(EngineError::Layout(LayoutError::InvalidViewport { .. }))
    ));
}

#[test]
fn test_builder_settings_reach_layout() {
    let mut engine = TestEngine::from_builder(
        EngineBuilder::new()
            .h_step(40.0)
            .v_step(10.0)
            .scroll_step(7.0),
    );
    engine.load_html(&paragraphs(1)).unwrap();
    let tree = engine.engine.layout_tree().unwrap();
    let root = tree.root_box();
    assert_eq!(root.x(), 40.0);
    assert_eq!(root.y(), 10.0);
    assert_eq!(root.width(), 720.0);
    assert_eq!(engine.engine.config().scroll_step, 7.0);
}

#[test]
fn test_reload_replaces_page() {
    let mut engine = TestEngine::new();
    engine.load_html("<p>first</p>").unwrap();
    engine.load_html("<p>second page</p>").unwrap();
    assert_eq!(engine.rendered_words(), ["second", "page"]);
    let document = engine.engine.document().unwrap();
    assert_eq!(document.text_content(document.root()), "second page");
}

#[test]
fn test_resize_relays_out() {
    let mut engine = TestEngine::fixed_width(800.0, 600.0);
    // Eight 4-character words at 16px: 80px per word with its space.
    let html = format!("<p>{}</p>", vec!["word"; 8].join(" "));
    engine.load_html(&html).unwrap();
    let wide = engine.engine.layout_tree().unwrap().content_bottom();

    engine.resize(200.0, 600.0).unwrap();
    let tree = engine.engine.layout_tree().unwrap();
    assert_layout_consistent(tree);
    // 174px of content: two words per line, four lines instead of one.
    assert_near(tree.content_bottom() - wide, 3.0 * 25.0);
    assert_eq!(engine.engine.viewport().width, 200.0);
}

#[test]
fn test_resize_keeps_clamped_scroll() {
    let mut engine = TestEngine::fixed_width(800.0, 600.0);
    engine.load_html(&paragraphs(40)).unwrap();
    // 40 * 43px + 18px top margin.
    assert_near(engine.engine.max_scroll_offset(), 1738.0 - 600.0);

    engine.engine.set_scroll(500.0);
    engine.resize(800.0, 1500.0).unwrap();
    assert_near(engine.engine.max_scroll_offset(), 238.0);
    assert_near(engine.engine.scroll_offset(), 238.0);

    engine.resize(800.0, 600.0).unwrap();
    assert_near(engine.engine.scroll_offset(), 238.0);
}

#[test]
fn test_scroll_down_steps_and_stops() {
    let mut engine = TestEngine::fixed_width(800.0, 600.0);
    engine.load_html(&paragraphs(20)).unwrap();
    // 20 * 43 + 18 = 878, so 278px of scrolling.
    assert!(engine.engine.scroll_down());
    assert!(engine.engine.scroll_down());
    assert_eq!(engine.engine.scroll_offset(), 200.0);
    assert!(engine.engine.scroll_down());
    assert_near(engine.engine.scroll_offset(), 278.0);
    assert!(!engine.engine.scroll_down());
    assert!(engine.engine.scroll_by(-1000.0));
    assert_eq!(engine.engine.scroll_offset(), 0.0);
}

#[test]
fn test_render_before_load_fails() {
    let mut engine = TestEngine::new();
    assert_eq!(engine.render().err(), Some(EngineError::NoDocument));
}
