//! Affine rewriting of path operands
//!
//! A [`PathTransform`] applies, per operand: an optional axis flip against
//! the view box, a translation (absolute commands only), a uniform scale and
//! an optional rounding. Relative commands keep their relative meaning: they
//! are flipped by sign only and never translated.

use crate::core::errors::{Error, Result};
use crate::geometry::number::round_to;
use crate::geometry::path::{Axis, PathCommand, PathData};
use crate::geometry::viewbox::ViewBox;

/// Axis to mirror a path around
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flip {
    #[default]
    None,
    Horizontal,
    Vertical,
}

impl Flip {
    fn axis(self) -> Option<Axis> {
        match self {
            Flip::None => None,
            Flip::Horizontal => Some(Axis::X),
            Flip::Vertical => Some(Axis::Y),
        }
    }
}

/// Composed scale, flip, translate and round operation
///
/// Offsets are in source units; callers that think in output units divide by
/// `scale` first (see [`crate::geometry::document::PathOptions`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathTransform {
    pub scale: f64,
    pub round_precision: Option<u32>,
    pub flip: Flip,
    pub x_offset: f64,
    pub y_offset: f64,
}

impl Default for PathTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            round_precision: None,
            flip: Flip::None,
            x_offset: 0.0,
            y_offset: 0.0,
        }
    }
}

impl PathTransform {
    /// Apply the transform to every operand of `path`
    ///
    /// Flipping needs a valid `view_box` and fails with
    /// [`Error::MissingGeometry`] otherwise.
    pub fn apply(&self, path: &PathData, view_box: Option<ViewBox>) -> Result<PathData> {
        let flip_axis = self.flip.axis();
        let view_box = match (flip_axis, view_box) {
            (None, view_box) => view_box,
            (Some(_), Some(view_box)) if view_box.is_valid() => Some(view_box),
            (Some(_), _) => {
                return Err(Error::MissingGeometry(
                    "flipping a path requires a view box".to_string(),
                ))
            }
        };

        let commands = path
            .commands
            .iter()
            .map(|command| self.apply_command(command, flip_axis, view_box))
            .collect();
        Ok(PathData::new(commands))
    }

    fn apply_command(
        &self,
        command: &PathCommand,
        flip_axis: Option<Axis>,
        view_box: Option<ViewBox>,
    ) -> PathCommand {
        let absolute = !command.relative;
        let operands = command
            .operands
            .iter()
            .enumerate()
            .map(|(index, &operand)| {
                let Some(axis) = command.kind.axis(index) else {
                    return operand;
                };
                let mut value = operand;

                if flip_axis == Some(axis) {
                    value = -value;
                    if absolute {
                        if let Some(view_box) = view_box {
                            value += match axis {
                                Axis::X => view_box.width,
                                Axis::Y => view_box.height,
                            };
                        }
                    }
                }
                if absolute {
                    value += match axis {
                        Axis::X => self.x_offset,
                        Axis::Y => self.y_offset,
                    };
                }
                value *= self.scale;
                if let Some(precision) = self.round_precision {
                    value = round_to(value, precision);
                }
                value
            })
            .collect();

        PathCommand::new(command.kind, command.relative, operands)
    }
}
