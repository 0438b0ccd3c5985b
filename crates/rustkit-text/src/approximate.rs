//! Backend-free font metrics.
//!
//! Ratios follow a typical Latin system font (ascent ~0.82em,
//! descent ~0.21em) with an average advance of half an em per grapheme
//! cluster. Results are a pure function of the key, which makes this
//! provider suitable for headless runs and tests.

use unicode_segmentation::UnicodeSegmentation;

use crate::{FontFace, FontKey, FontMetrics, FontMetricsProvider, FontWeight};

const ASCENT_RATIO: f32 = 0.82;
const DESCENT_RATIO: f32 = 0.21;
const ADVANCE_RATIO: f32 = 0.5;
const BOLD_ADVANCE_SCALE: f32 = 1.1;

/// Provider producing [`ApproximateFace`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateFontProvider;

impl ApproximateFontProvider {
    pub fn new() -> Self {
        Self
    }
}

impl FontMetricsProvider for ApproximateFontProvider {
    fn load_font(&self, key: FontKey) -> Box<dyn FontFace> {
        Box::new(ApproximateFace::new(key))
    }
}

/// A face whose metrics scale linearly with its size.
#[derive(Debug, Clone, Copy)]
pub struct ApproximateFace {
    advance: f32,
    metrics: FontMetrics,
}

impl ApproximateFace {
    pub fn new(key: FontKey) -> Self {
        // Non-positive sizes render at the smallest legible size.
        let size = key.size.max(1) as f32;
        let mut advance = size * ADVANCE_RATIO;
        if key.weight == FontWeight::Bold {
            advance *= BOLD_ADVANCE_SCALE;
        }
        let ascent = size * ASCENT_RATIO;
        let descent = size * DESCENT_RATIO;
        Self {
            advance,
            metrics: FontMetrics {
                ascent,
                descent,
                linespace: ascent + descent,
            },
        }
    }
}

impl FontFace for ApproximateFace {
    fn measure(&self, text: &str) -> f32 {
        text.graphemes(true).count() as f32 * self.advance
    }

    fn metrics(&self) -> FontMetrics {
        self.metrics
    }
}
