//! Font cache keyed by `(size, weight, slant)`.
//!
//! The cache is the only shared mutable state in the engine. Lookups take a
//! read lock; a miss re-checks under the write lock before loading, so two
//! threads racing on the same key still observe one handle.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::trace;

use crate::{FontFace, FontKey, FontMetrics, FontMetricsProvider, FontSlant, FontWeight};

struct FontCacheEntry {
    key: FontKey,
    face: Box<dyn FontFace>,
    metrics: FontMetrics,
}

/// Shared handle to a cached font face.
///
/// Two handles are equal only if they came from the same cache entry.
#[derive(Clone)]
pub struct FontHandle {
    entry: Arc<FontCacheEntry>,
}

impl FontHandle {
    fn new(key: FontKey, face: Box<dyn FontFace>) -> Self {
        let metrics = face.metrics();
        Self {
            entry: Arc::new(FontCacheEntry { key, face, metrics }),
        }
    }

    /// Width of `text` in this font.
    pub fn measure(&self, text: &str) -> f32 {
        self.entry.face.measure(text)
    }

    /// Vertical metrics, read once when the face was loaded.
    pub fn metrics(&self) -> FontMetrics {
        self.entry.metrics
    }

    pub fn key(&self) -> FontKey {
        self.entry.key
    }

    pub fn size(&self) -> i32 {
        self.entry.key.size
    }

    pub fn weight(&self) -> FontWeight {
        self.entry.key.weight
    }

    pub fn slant(&self) -> FontSlant {
        self.entry.key.slant
    }
}

impl PartialEq for FontHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entry, &other.entry)
    }
}

impl Eq for FontHandle {}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontHandle")
            .field("key", &self.entry.key)
            .field("metrics", &self.entry.metrics)
            .finish()
    }
}

/// Font cache for reusing font faces.
pub struct FontCache {
    provider: Arc<dyn FontMetricsProvider>,
    fonts: RwLock<HashMap<FontKey, FontHandle>>,
}

impl FontCache {
    /// Create an empty cache that loads faces from `provider`.
    pub fn new(provider: Arc<dyn FontMetricsProvider>) -> Self {
        Self {
            provider,
            fonts: RwLock::new(HashMap::new()),
        }
    }

    /// Get the font for a given configuration, loading it on first use.
    pub fn get_font(&self, size: i32, weight: FontWeight, slant: FontSlant) -> FontHandle {
        self.get(FontKey::new(size, weight, slant))
    }

    /// Get the font for `key`, loading it on first use.
    pub fn get(&self, key: FontKey) -> FontHandle {
        {
            let fonts = self.fonts.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(handle) = fonts.get(&key) {
                return handle.clone();
            }
        }

        let mut fonts = self.fonts.write().unwrap_or_else(PoisonError::into_inner);
        fonts
            .entry(key)
            .or_insert_with(|| {
                trace!(?key, "Loading font face");
                FontHandle::new(key, self.provider.load_font(key))
            })
            .clone()
    }

    /// Number of distinct faces loaded so far.
    pub fn len(&self) -> usize {
        self.fonts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached face. Handles already handed out stay valid.
    pub fn clear(&self) {
        self.fonts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl fmt::Debug for FontCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontCache")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
