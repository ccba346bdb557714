//! Icon font generation
//!
//! Turns a directory of SVG icons into an SVG font and back, and renders the
//! stylesheet and HTML previews that go with a font.

pub mod css;
pub mod engine;
pub mod info;
pub mod mapping;
pub mod template;

// Explicit re-exports for public API
pub use engine::{GenerateOptions, GlyphName, IconFontEngine};
pub use mapping::{IconMapping, IconSource};
