//! # RustKit Text
//!
//! Font access for the layout engine.
//!
//! The engine never talks to a font backend directly. It asks a
//! [`FontCache`] for a [`FontHandle`] matching a `(size, weight, slant)`
//! triple; the cache loads missing faces through an injected
//! [`FontMetricsProvider`] and hands out the same handle for every later
//! request with that key.
//!
//! ## Modules
//!
//! - [`cache`]: the synchronized font cache and the handles it returns
//! - [`approximate`]: a deterministic provider that needs no font backend

pub mod approximate;
pub mod cache;

pub use approximate::ApproximateFontProvider;
pub use cache::{FontCache, FontHandle};

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Font slant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontSlant {
    #[default]
    Roman,
    Italic,
}

/// Identity of a font face inside the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontKey {
    /// Requested size in points. May go to zero or below through repeated
    /// `<small>` nesting; providers decide how to treat that.
    pub size: i32,
    pub weight: FontWeight,
    pub slant: FontSlant,
}

impl FontKey {
    pub fn new(size: i32, weight: FontWeight, slant: FontSlant) -> Self {
        Self {
            size,
            weight,
            slant,
        }
    }
}

/// Vertical font metrics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FontMetrics {
    /// Distance from baseline to top of the tallest glyph.
    pub ascent: f32,
    /// Distance from baseline to bottom of the lowest glyph.
    pub descent: f32,
    /// Recommended distance between baselines.
    pub linespace: f32,
}

/// A loaded font face that can measure text.
///
/// Implementations must be deterministic for a fixed key.
pub trait FontFace: Send + Sync {
    /// Advance width of `text` when drawn on one line.
    fn measure(&self, text: &str) -> f32;

    /// Vertical metrics of the face.
    fn metrics(&self) -> FontMetrics;
}

/// Capability that loads font faces for the cache.
pub trait FontMetricsProvider: Send + Sync {
    fn load_font(&self, key: FontKey) -> Box<dyn FontFace>;
}
