//! Integration tests for the RustKit engine.
//!
//! - `engine_lifecycle`: engine construction, reloading, resize and scroll
//! - `rendering_pipeline`: full HTML → draw call validation

mod engine_lifecycle;
mod rendering_pipeline;
