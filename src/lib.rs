//! glyphsmith
pub mod core;
pub mod data;
pub mod font_source;
pub mod geometry;
pub mod icon_font;
pub mod logging;
