//! Font source data structures
//!
//! This module contains everything related to the SVG font being written or
//! read: metrics, code point handling and the glyph store itself.

pub mod codepoint;
pub mod glyph_store;
pub mod metrics;

// Explicit re-exports for public API
pub use glyph_store::{GlyphRecord, GlyphStore};
pub use metrics::{FontMetrics, MetricOverrides, DEFAULT_FONT_ID};
