//! View box of a vector document
//!
//! The view box comes from an explicit `viewBox` attribute or, failing that,
//! from `width`/`height` converted to pixels.

use tracing::debug;

use crate::geometry::number::{parse_leading_number, parse_number_list};

/// Pixels per unit for the absolute length units SVG editors write
const UNIT_IN_PIXELS: [(&str, f64); 6] = [
    ("px", 1.0),
    ("pt", 1.25),
    ("mm", 3.543307096633),
    ("pc", 15.0),
    ("cm", 35.43307096633),
    ("in", 90.0),
];

/// The rectangular coordinate frame a document's shapes are authored in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A box is only usable with a positive size
    pub fn is_valid(&self) -> bool {
        self.width > 0.0
            && self.height > 0.0
            && self.width.is_finite()
            && self.height.is_finite()
    }

    /// Parse a `viewBox` attribute value (exactly four numbers)
    pub fn parse(value: &str) -> Option<Self> {
        let numbers = match parse_number_list(value) {
            Ok(numbers) => numbers,
            Err(token) => {
                debug!("Ignoring viewBox with non-numeric token {:?}", token);
                return None;
            }
        };
        match numbers[..] {
            [x, y, width, height] => Some(Self::new(x, y, width, height)),
            _ => {
                debug!("Ignoring viewBox with {} values", numbers.len());
                None
            }
        }
    }

    /// Build a zero-based box from `width`/`height` attribute values
    pub fn from_dimensions(width: &str, height: &str) -> Option<Self> {
        Some(Self::new(0.0, 0.0, length_in_pixels(width)?, length_in_pixels(height)?))
    }
}

/// Convert a length such as `12mm` to pixels; unknown units count as pixels
pub fn length_in_pixels(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = parse_leading_number(value)?;
    let unit = value
        .len()
        .checked_sub(2)
        .and_then(|start| value.get(start..))
        .unwrap_or("");
    let factor = UNIT_IN_PIXELS
        .iter()
        .find(|(name, _)| *name == unit)
        .map(|(_, factor)| *factor)
        .unwrap_or(1.0);
    Some(number * factor)
}
