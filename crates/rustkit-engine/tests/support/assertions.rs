//! Custom assertions for integration tests.

use rustkit_layout::{DisplayCommand, LayoutTree};
use rustkit_renderer::DrawCall;

/// Assert that two coordinates match within floating point noise.
#[track_caller]
pub fn assert_near(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "Coordinate mismatch: expected {expected}, got {actual}"
    );
}

/// Assert that a frame drew `word` at `(left, top)` in surface coordinates.
#[track_caller]
pub fn assert_word_at(calls: &[DrawCall], word: &str, left: f32, top: f32) {
    let found = calls.iter().find_map(|call| match call {
        DrawCall::Text {
            left: l,
            top: t,
            text,
            ..
        } if text == word => Some((*l, *t)),
        _ => None,
    });
    let Some((actual_left, actual_top)) = found else {
        panic!("Word {word:?} was not drawn; calls: {calls:?}");
    };
    assert_near(actual_left, left);
    assert_near(actual_top, top);
}

/// Assert that every box in the tree has resolved geometry and that block
/// children tile their parent vertically.
#[track_caller]
pub fn assert_layout_consistent(tree: &LayoutTree) {
    for (id, layout_box) in tree.iter() {
        assert!(layout_box.is_resolved(), "Box {id:?} left unresolved");
        if layout_box.is_inline() || layout_box.children.is_empty() {
            continue;
        }
        let mut y = layout_box.y();
        for &child in &layout_box.children {
            let child = tree.get(child);
            assert_near(child.y(), y);
            assert_eq!(child.x(), layout_box.x(), "Child of {id:?} shifted");
            y = child.bottom();
        }
        assert_near(y, layout_box.bottom());
    }
}

/// Assert that display commands never move up the page.
#[track_caller]
pub fn assert_top_to_bottom(commands: &[DisplayCommand]) {
    for pair in commands.windows(2) {
        assert!(
            pair[0].top() <= pair[1].top(),
            "Display list out of order: {:?} before {:?}",
            pair[0],
            pair[1]
        );
    }
}
