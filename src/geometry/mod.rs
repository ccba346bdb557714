//! Geometric Primitives and Operations
//!
//! Path data parsing and rewriting, shape conversion and whole-document
//! flattening for SVG icons.

pub mod document;
pub mod element;
pub mod number;
pub mod path;
pub mod shapes;
pub mod transform;
pub mod viewbox;

// Re-export commonly used items
pub use document::{GeometryDocument, PathOptions};
pub use element::SvgElement;
pub use path::{Axis, CommandKind, PathCommand, PathData};
pub use transform::{Flip, PathTransform};
pub use viewbox::ViewBox;
