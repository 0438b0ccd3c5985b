//! Rendering pipeline integration tests
//!
//! These tests verify the full HTML → draw call pipeline:
//! - HTML parsing → document tree with implied html/head/body
//! - Layout → block stacking and line breaking
//! - Display list → document order, `pre` backgrounds
//! - Rendering → culling and scroll translation

use rustkit_layout::{Color, DisplayCommand, Rect};
use rustkit_renderer::DrawCall;
use rustkit_text::{FontKey, FontSlant, FontWeight};

use crate::support::{assert_layout_consistent, assert_top_to_bottom, assert_word_at, TestEngine};

#[test]
fn test_simple_html_renders() {
    let mut engine = TestEngine::fixed_width(800.0, 600.0);
    engine.load_html("<p>Hello world</p>").unwrap();

    let calls = engine.render().unwrap().to_vec();
    assert_eq!(calls[0], DrawCall::Clear);
    assert_eq!(calls.len(), 3);
    // Baseline at 18 + 1.25 * 16; tops sit one ascent above it.
    assert_word_at(&calls, "Hello", 13.0, 22.0);
    assert_word_at(&calls, "world", 13.0 + 6.0 * 16.0, 22.0);
}

#[test]
fn test_full_document_structure() {
    let mut engine = TestEngine::new();
    let html = r#"<!DOCTYPE html>
        <html>
        <head>
            <title>Sample</title>
            <meta charset="utf-8">
        </head>
        <body>
            <h1>Heading</h1>
            <div class="content"><p>First paragraph.</p><p>Second one.</p></div>
            <ul><li>alpha</li><li>beta</li></ul>
        </body>
        </html>"#;
    engine.load_html(html).unwrap();

    let document = engine.engine.document().unwrap();
    let div = document.find_element("div").unwrap();
    assert_eq!(document.attribute(div, "class"), Some("content"));

    let tree = engine.engine.layout_tree().unwrap();
    assert_layout_consistent(tree);

    let commands = &engine.engine.display_list().unwrap().commands;
    assert_top_to_bottom(commands);
    assert_eq!(
        engine.rendered_words(),
        ["Sample", "Heading", "First", "paragraph.", "Second", "one.", "alpha", "beta"]
    );
}

#[test]
fn test_unclosed_tags_recover() {
    let mut engine = TestEngine::new();
    engine.load_html("<div><p>unclosed <b>bold").unwrap();
    assert_eq!(engine.rendered_words(), ["unclosed", "bold"]);

    let list = engine.engine.display_list().unwrap();
    let fonts: Vec<FontKey> = list
        .iter()
        .filter_map(|command| match command {
            DisplayCommand::Text { font, .. } => Some(font.key()),
            DisplayCommand::Rect { .. } => None,
        })
        .collect();
    assert_eq!(
        fonts,
        [
            FontKey::new(16, FontWeight::Normal, FontSlant::Roman),
            FontKey::new(16, FontWeight::Bold, FontSlant::Roman),
        ]
    );
}

#[test]
fn test_line_breaking_with_fixed_width_font() {
    // 74px of content: "aaa" is 48px wide, 64px with its space.
    let mut engine = TestEngine::fixed_width(100.0, 600.0);
    engine.load_html("<p>aaa bbb ccc</p>").unwrap();

    let calls = engine.render().unwrap().to_vec();
    assert_word_at(&calls, "aaa", 13.0, 22.0);
    assert_word_at(&calls, "bbb", 13.0, 47.0);
    assert_word_at(&calls, "ccc", 13.0, 72.0);
}

#[test]
fn test_bold_words_measure_wider() {
    let mut engine = TestEngine::fixed_width(800.0, 600.0);
    engine.load_html("<p><b>ab</b> cd</p>").unwrap();
    let calls = engine.render().unwrap().to_vec();
    // Bold "ab" plus a bold space: 3 * 32px.
    assert_word_at(&calls, "ab", 13.0, 22.0);
    assert_word_at(&calls, "cd", 13.0 + 96.0, 22.0);
}

#[test]
fn test_pre_background_rendered_under_text() {
    let mut engine = TestEngine::fixed_width(800.0, 600.0);
    engine.load_html("<pre>let x</pre>").unwrap();

    let calls = engine.render().unwrap().to_vec();
    assert_eq!(calls.len(), 4);
    assert_eq!(
        calls[1],
        DrawCall::FillRect {
            rect: Rect::new(13.0, 18.0, 774.0, 25.0),
            color: Color::PRE_BACKGROUND,
        }
    );
    assert!(matches!(calls[2], DrawCall::Text { .. }));
}

#[test]
fn test_scrolled_frame_culls_and_translates() {
    let mut engine = TestEngine::fixed_width(800.0, 100.0);
    let html: String = (0..10).map(|i| format!("<p>line{i}</p>")).collect();
    engine.load_html(&html).unwrap();
    // Paragraph i starts at 18 + 43i; its word top is 4px lower and the
    // word is 20px tall.
    engine.engine.set_scroll(150.0);

    let calls = engine.render().unwrap().to_vec();
    let words: Vec<&str> = calls
        .iter()
        .filter_map(|call| match call {
            DrawCall::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    // line2 ends at 148, above the viewport; line6 starts at 280, below it.
    assert_eq!(words, ["line3", "line4", "line5"]);
    assert_word_at(&calls, "line4", 13.0, 18.0 + 4.0 * 43.0 + 4.0 - 150.0);
}

#[test]
fn test_mixed_sizes_share_baseline_on_screen() {
    let mut engine = TestEngine::fixed_width(800.0, 600.0);
    engine.load_html("<p>a <big>b</big> <small>c</small></p>").unwrap();
    let calls = engine.render().unwrap().to_vec();
    // Tallest ascent is 20: baseline at 18 + 25 = 43.
    assert_word_at(&calls, "a", 13.0, 43.0 - 16.0);
    assert_word_at(&calls, "b", 13.0 + 32.0, 43.0 - 20.0);
    assert_word_at(&calls, "c", 13.0 + 32.0 + 40.0, 43.0 - 14.0);
}
