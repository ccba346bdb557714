//! Vector documents flattened to a single path
//!
//! A [`GeometryDocument`] wraps one parsed SVG file. It knows its view box and
//! can merge every shape below the root (entering groups) into one path,
//! optionally transformed into another coordinate frame.

use tracing::debug;

use crate::core::errors::Result;
use crate::geometry::element::SvgElement;
use crate::geometry::number::format_number;
use crate::geometry::path::PathData;
use crate::geometry::shapes::{reject_transform, shape_to_path};
use crate::geometry::transform::{Flip, PathTransform};
use crate::geometry::viewbox::ViewBox;

/// Width and height of documents built from bare path data
const DEFAULT_PATH_DOCUMENT_SIZE: f64 = 512.0;

/// Parameters of [`GeometryDocument::path`]
///
/// Offsets are in output units, i.e. applied after scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathOptions {
    pub scale: f64,
    pub round_precision: Option<u32>,
    pub flip: Flip,
    pub only_filled: bool,
    pub x_offset: f64,
    pub y_offset: f64,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            round_precision: None,
            flip: Flip::None,
            only_filled: true,
            x_offset: 0.0,
            y_offset: 0.0,
        }
    }
}

impl PathOptions {
    fn is_identity(&self) -> bool {
        self.scale == 1.0
            && self.round_precision.is_none()
            && self.flip == Flip::None
            && self.x_offset == 0.0
            && self.y_offset == 0.0
    }

    /// The operand transform, with offsets converted to source units
    pub fn transform(&self) -> PathTransform {
        PathTransform {
            scale: self.scale,
            round_precision: self.round_precision,
            flip: self.flip,
            x_offset: self.x_offset / self.scale,
            y_offset: self.y_offset / self.scale,
        }
    }
}

/// A parsed SVG document
#[derive(Debug, Clone)]
pub struct GeometryDocument {
    root: SvgElement,
}

impl GeometryDocument {
    /// Parse an SVG document from its text
    pub fn parse(svg: &str) -> Result<Self> {
        Ok(Self {
            root: SvgElement::parse(svg)?,
        })
    }

    /// A minimal document holding a single path
    ///
    /// `size` is `(width, height)` and defaults to a 512 unit square.
    pub fn from_path(data: &str, size: Option<(f64, f64)>) -> Self {
        let (width, height) =
            size.unwrap_or((DEFAULT_PATH_DOCUMENT_SIZE, DEFAULT_PATH_DOCUMENT_SIZE));
        let path = SvgElement::new("path").with_attribute("d", data);
        let mut root = SvgElement::new("svg")
            .with_attribute("xmlns", "http://www.w3.org/2000/svg")
            .with_attribute("width", format_number(width))
            .with_attribute("height", format_number(height));
        root.children.push(path);
        Self { root }
    }

    /// The document's view box, if one can be determined and has a size
    pub fn view_box(&self) -> Option<ViewBox> {
        let view_box = if let Some(value) = self.root.non_empty_attribute("viewBox") {
            ViewBox::parse(value)
        } else {
            match (
                self.root.non_empty_attribute("width"),
                self.root.non_empty_attribute("height"),
            ) {
                (Some(width), Some(height)) => ViewBox::from_dimensions(width, height),
                _ => None,
            }
        };
        view_box.filter(ViewBox::is_valid)
    }

    /// All shapes of the document merged into one path
    ///
    /// The transform is only applied when `options` differ from the identity,
    /// so untransformed output keeps the source operands verbatim.
    pub fn path(&self, options: &PathOptions) -> Result<String> {
        let flattened = flatten(&self.root, options.only_filled)?;
        if options.is_identity() {
            return Ok(flattened);
        }

        let parsed = PathData::parse(&flattened)?;
        let transformed = options.transform().apply(&parsed, self.view_box())?;
        debug!(
            "Transformed {} path commands (scale {})",
            transformed.commands.len(),
            options.scale
        );
        Ok(transformed.to_string())
    }
}

/// Convert the children of `element`, entering groups transparently
fn flatten(element: &SvgElement, only_filled: bool) -> Result<String> {
    let mut parts = Vec::new();
    for child in &element.children {
        let part = if child.name == "g" {
            reject_transform(child)?;
            flatten(child, only_filled)?
        } else {
            shape_to_path(child, only_filled)?
        };
        if !part.is_empty() {
            parts.push(part);
        }
    }
    Ok(parts.join(" "))
}
