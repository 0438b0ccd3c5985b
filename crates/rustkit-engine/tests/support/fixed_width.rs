//! Font metrics with round numbers, so expected positions can be written
//! down by hand.

use rustkit_text::{FontFace, FontKey, FontMetrics, FontMetricsProvider, FontWeight};

/// Every character advances `size` pixels (`2 * size` in bold); ascent is
/// `size` and descent `size / 4`.
#[derive(Debug, Default)]
pub struct FixedWidthProvider;

struct FixedWidthFace {
    advance: f32,
    metrics: FontMetrics,
}

impl FontMetricsProvider for FixedWidthProvider {
    fn load_font(&self, key: FontKey) -> Box<dyn FontFace> {
        let size = key.size.max(1) as f32;
        let advance = match key.weight {
            FontWeight::Normal => size,
            FontWeight::Bold => 2.0 * size,
        };
        Box::new(FixedWidthFace {
            advance,
            metrics: FontMetrics {
                ascent: size,
                descent: size / 4.0,
                linespace: size * 1.25,
            },
        })
    }
}

impl FontFace for FixedWidthFace {
    fn measure(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.advance
    }

    fn metrics(&self) -> FontMetrics {
        self.metrics
    }
}
