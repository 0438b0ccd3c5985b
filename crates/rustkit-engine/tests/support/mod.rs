//! Test support utilities for RustKit integration tests
//!
//! - TestEngine: engine wrapper rendering onto a recording surface
//! - FixedWidthProvider: font metrics with round numbers
//! - Assertions: custom test assertions

mod assertions;
mod fixed_width;
mod test_engine;

pub use assertions::*;
pub use fixed_width::FixedWidthProvider;
pub use test_engine::TestEngine;
