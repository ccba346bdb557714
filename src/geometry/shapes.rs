//! Shape to path conversion
//!
//! Converts the basic SVG shapes (`rect`, `circle`, `ellipse`, `polygon`) into
//! equivalent path data and normalizes existing `path` elements. Elements that
//! produce nothing (degenerate shapes, unfilled shapes, unknown elements) yield
//! an empty string.

use tracing::debug;

use crate::core::errors::{Error, Result};
use crate::geometry::element::SvgElement;
use crate::geometry::number::{format_number, normalize_separators, parse_number_list};
use crate::geometry::viewbox::length_in_pixels;

/// Control point distance of a quarter circle, as a fraction of the radius
pub const CIRCLE_KAPPA: f64 = 0.55228475;

/// Fail if the element carries a `transform` attribute
///
/// Transforms are rejected instead of interpreted.
pub fn reject_transform(element: &SvgElement) -> Result<()> {
    match element.non_empty_attribute("transform") {
        Some(transform) => Err(Error::UnsupportedFeature(format!(
            "transform=\"{transform}\" on <{}>",
            element.name
        ))),
        None => Ok(()),
    }
}

/// Convert one shape element into path data
///
/// With `only_filled`, elements with a literal `fill="none"` are skipped.
pub fn shape_to_path(element: &SvgElement, only_filled: bool) -> Result<String> {
    reject_transform(element)?;
    if only_filled && element.attribute("fill") == Some("none") {
        debug!("Skipping unfilled <{}>", element.name);
        return Ok(String::new());
    }

    match element.name.as_str() {
        "rect" => rect_to_path(element),
        "circle" => circle_to_path(element),
        "ellipse" => ellipse_to_path(element),
        "polygon" => polygon_to_path(element),
        "path" => Ok(normalize_path(element.attribute("d").unwrap_or(""))),
        other => {
            debug!("Ignoring <{}> element", other);
            Ok(String::new())
        }
    }
}

/// Read a length attribute; missing or blank gives `None`
fn length_attribute(element: &SvgElement, name: &str) -> Result<Option<f64>> {
    match element.non_empty_attribute(name) {
        None => Ok(None),
        Some(value) => length_in_pixels(value).map(Some).ok_or_else(|| {
            Error::MalformedInput(format!(
                "<{}> attribute {name}=\"{value}\" is not a number",
                element.name
            ))
        }),
    }
}

fn rect_to_path(rect: &SvgElement) -> Result<String> {
    let width = length_attribute(rect, "width")?;
    let height = length_attribute(rect, "height")?;
    let (Some(width), Some(height)) = (width, height) else {
        return Ok(String::new());
    };
    if width <= 0.0 || height <= 0.0 {
        return Ok(String::new());
    }
    let x = length_attribute(rect, "x")?.unwrap_or(0.0);
    let y = length_attribute(rect, "y")?.unwrap_or(0.0);

    Ok(format!(
        "M{} {}l{} 0l0 {}l{} 0Z",
        format_number(x),
        format_number(y),
        format_number(width),
        format_number(height),
        format_number(-width)
    ))
}

fn circle_to_path(circle: &SvgElement) -> Result<String> {
    let cx = length_attribute(circle, "cx")?.unwrap_or(0.0);
    let cy = length_attribute(circle, "cy")?.unwrap_or(0.0);
    match length_attribute(circle, "r")? {
        Some(r) if r > 0.0 => Ok(ellipse_path(cx, cy, r, r)),
        _ => Ok(String::new()),
    }
}

fn ellipse_to_path(ellipse: &SvgElement) -> Result<String> {
    let cx = length_attribute(ellipse, "cx")?.unwrap_or(0.0);
    let cy = length_attribute(ellipse, "cy")?.unwrap_or(0.0);
    let rx = length_attribute(ellipse, "rx")?;
    let ry = length_attribute(ellipse, "ry")?;
    match (rx, ry) {
        (Some(rx), Some(ry)) if rx > 0.0 && ry > 0.0 => Ok(ellipse_path(cx, cy, rx, ry)),
        _ => Ok(String::new()),
    }
}

/// Four cubic quadrants, clockwise from the leftmost point
fn ellipse_path(cx: f64, cy: f64, rx: f64, ry: f64) -> String {
    let kx = rx * CIRCLE_KAPPA;
    let ky = ry * CIRCLE_KAPPA;
    let points: [[f64; 6]; 4] = [
        [cx - rx, cy - ky, cx - kx, cy - ry, cx, cy - ry],
        [cx + kx, cy - ry, cx + rx, cy - ky, cx + rx, cy],
        [cx + rx, cy + ky, cx + kx, cy + ry, cx, cy + ry],
        [cx - kx, cy + ry, cx - rx, cy + ky, cx - rx, cy],
    ];

    let mut path = format!("M{} {}", format_number(cx - rx), format_number(cy));
    for segment in points {
        let operands: Vec<String> = segment.iter().copied().map(format_number).collect();
        path.push('C');
        path.push_str(&operands.join(" "));
    }
    path.push('Z');
    path
}

fn polygon_to_path(polygon: &SvgElement) -> Result<String> {
    let points = parse_number_list(polygon.attribute("points").unwrap_or("")).map_err(|token| {
        Error::MalformedInput(format!("polygon point \"{token}\" is not a number"))
    })?;
    if points.is_empty() {
        return Ok(String::new());
    }
    if points.len() % 2 != 0 {
        return Err(Error::MalformedInput(format!(
            "polygon has an odd number of coordinates ({})",
            points.len()
        )));
    }

    let mut path = String::new();
    for (index, pair) in points.chunks_exact(2).enumerate() {
        path.push(if index == 0 { 'M' } else { 'L' });
        path.push_str(&format!("{} {}", format_number(pair[0]), format_number(pair[1])));
    }
    path.push('Z');
    Ok(path)
}

/// Normalize separators and make a leading relative move absolute
pub fn normalize_path(data: &str) -> String {
    let normalized = normalize_separators(data);
    match normalized.strip_prefix('m') {
        Some(rest) => format!("M{rest}"),
        None => normalized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{BezPath, Shape};

    fn assert_bounds(path: &str, expected: (f64, f64, f64, f64)) {
        let rect = BezPath::from_svg(path).unwrap().bounding_box();
        let actual = (rect.x0, rect.y0, rect.x1, rect.y1);
        let close = |a: f64, b: f64| (a - b).abs() < 1e-9;
        assert!(
            close(actual.0, expected.0)
                && close(actual.1, expected.1)
                && close(actual.2, expected.2)
                && close(actual.3, expected.3),
            "bounds of {path}: {actual:?} != {expected:?}"
        );
    }

    #[test]
    fn rect_becomes_closed_rectangle() {
        let rect = SvgElement::new("rect")
            .with_attribute("x", "2")
            .with_attribute("y", "3")
            .with_attribute("width", "10")
            .with_attribute("height", "5");
        let path = shape_to_path(&rect, true).unwrap();
        assert_eq!(path, "M2 3l10 0l0 5l-10 0Z");
        assert_bounds(&path, (2.0, 3.0, 12.0, 8.0));
    }

    #[test]
    fn rect_without_size_is_skipped() {
        let missing = SvgElement::new("rect").with_attribute("width", "10");
        assert_eq!(shape_to_path(&missing, true).unwrap(), "");
        let negative = SvgElement::new("rect")
            .with_attribute("width", "10")
            .with_attribute("height", "-1");
        assert_eq!(shape_to_path(&negative, true).unwrap(), "");
    }

    #[test]
    fn circle_extremes_are_exact() {
        let circle = SvgElement::new("circle")
            .with_attribute("cx", "50")
            .with_attribute("cy", "40")
            .with_attribute("r", "20");
        let path = shape_to_path(&circle, true).unwrap();
        assert!(path.starts_with("M30 40C"));
        assert!(path.ends_with('Z'));
        assert_eq!(path.matches('C').count(), 4);
        // segment end points: top, right, bottom, left
        for end in ["50 20C", "70 40C", "50 60C", "30 40Z"] {
            assert!(path.contains(end), "{path} should contain {end}");
        }
        assert_bounds(&path, (30.0, 20.0, 70.0, 60.0));
    }

    #[test]
    fn ellipse_uses_both_radii() {
        let ellipse = SvgElement::new("ellipse")
            .with_attribute("cx", "10")
            .with_attribute("cy", "10")
            .with_attribute("rx", "10")
            .with_attribute("ry", "5");
        let path = shape_to_path(&ellipse, true).unwrap();
        assert_bounds(&path, (0.0, 5.0, 20.0, 15.0));
    }

    #[test]
    fn polygon_is_closed() {
        let polygon = SvgElement::new("polygon").with_attribute("points", "0,0 10,0 5,8");
        assert_eq!(shape_to_path(&polygon, true).unwrap(), "M0 0L10 0L5 8Z");

        let odd = SvgElement::new("polygon").with_attribute("points", "0,0 10");
        assert!(matches!(shape_to_path(&odd, true), Err(Error::MalformedInput(_))));
    }

    #[test]
    fn polygon_rejects_non_finite_points() {
        for points in ["0,0 inf,0 1,1", "0,0 1,NaN 1,1", "0,0 1e999,0 1,1"] {
            let polygon = SvgElement::new("polygon").with_attribute("points", points);
            assert!(matches!(
                shape_to_path(&polygon, true),
                Err(Error::MalformedInput(_))
            ));
        }
    }

    #[test]
    fn path_is_normalized() {
        let path = SvgElement::new("path").with_attribute("d", "m 1,2\n l3 , 4 z");
        assert_eq!(shape_to_path(&path, true).unwrap(), "M 1 2 l3 4 z");
    }

    #[test]
    fn transform_is_rejected() {
        let rect = SvgElement::new("rect")
            .with_attribute("width", "1")
            .with_attribute("height", "1")
            .with_attribute("transform", "rotate(45)");
        assert!(matches!(
            shape_to_path(&rect, true),
            Err(Error::UnsupportedFeature(_))
        ));
    }

    #[test]
    fn unfilled_shapes_only_skip_when_requested() {
        let rect = SvgElement::new("rect")
            .with_attribute("width", "1")
            .with_attribute("height", "1")
            .with_attribute("fill", "none");
        assert_eq!(shape_to_path(&rect, true).unwrap(), "");
        assert_eq!(shape_to_path(&rect, false).unwrap(), "M0 0l1 0l0 1l-1 0Z");
    }
}
