//! Per-icon SVG documents regenerated from glyphs
//!
//! The icon is drawn in a 512 unit tall frame on top of a 16x16 guide grid
//! with a red line marking the baseline, so designers can edit the file and
//! feed it back in.

use quick_xml::events::BytesStart;

use crate::core::errors::Result;
use crate::data::xml::{XmlWriter, SVG_NAMESPACE, XLINK_NAMESPACE};
use crate::geometry::number::format_number;

/// Height of the generated frame
pub const FRAME_SIZE: f64 = 512.0;
/// Distance between grid lines
pub const GRID_PITCH: u32 = 32;
/// Position of the baseline guide from the top of the frame
pub const BASELINE_GUIDE: u32 = 448;
/// Offset that puts the font's baseline on the guide
pub const BASELINE_OFFSET: f64 = -64.0;

const GRID_COLOR: &str = "#A9CCDB";
const BASELINE_COLOR: &str = "#FF0000";

/// Build the SVG file for one glyph
///
/// `path` must already be in frame coordinates; `width` is the frame width.
pub fn glyph_svg(path: &str, width: f64) -> Result<String> {
    let width = format_number(width);
    let frame = FRAME_SIZE as u32;
    let view_box = format!("0 0 {width} {frame}");
    let frame_text = frame.to_string();

    let mut writer = XmlWriter::new();
    writer.svg_prolog(Some("utf-8"), None)?;
    writer.start(BytesStart::new("svg").with_attributes([
        ("version", "1.1"),
        ("id", "Layer_1"),
        ("xmlns", SVG_NAMESPACE),
        ("xmlns:xlink", XLINK_NAMESPACE),
        ("x", "0px"),
        ("y", "0px"),
        ("width", format!("{width}px").as_str()),
        ("height", format!("{frame}px").as_str()),
        ("viewBox", view_box.as_str()),
        ("enable-background", format!("new 0 0 {frame} {frame}").as_str()),
        ("xml:space", "preserve"),
    ]))?;

    writer.start(BytesStart::new("g").with_attributes([("id", "Grid")]))?;
    writer.empty(guide("rect", GRID_COLOR).with_attributes([
        ("x", "0"),
        ("width", frame_text.as_str()),
        ("height", frame_text.as_str()),
    ]))?;
    for offset in grid_offsets() {
        let color = if offset == BASELINE_GUIDE {
            BASELINE_COLOR
        } else {
            GRID_COLOR
        };
        let offset = offset.to_string();
        writer.empty(guide("line", color).with_attributes([
            ("x1", "0"),
            ("y1", offset.as_str()),
            ("x2", frame_text.as_str()),
            ("y2", offset.as_str()),
        ]))?;
    }
    for offset in grid_offsets() {
        let offset = offset.to_string();
        writer.empty(guide("line", GRID_COLOR).with_attributes([
            ("x1", offset.as_str()),
            ("y1", "0"),
            ("x2", offset.as_str()),
            ("y2", frame_text.as_str()),
        ]))?;
    }
    writer.end("g")?;

    writer.empty(BytesStart::new("path").with_attributes([("d", path)]))?;
    writer.end("svg")?;
    writer.finish()
}

fn grid_offsets() -> impl Iterator<Item = u32> {
    (GRID_PITCH..FRAME_SIZE as u32).step_by(GRID_PITCH as usize)
}

fn guide(name: &'static str, color: &str) -> BytesStart<'static> {
    BytesStart::new(name).with_attributes([
        ("fill", "none"),
        ("stroke", color),
        ("stroke-miterlimit", "10"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{GeometryDocument, PathOptions};

    #[test]
    fn grid_has_fifteen_lines_per_axis() {
        let svg = glyph_svg("M0 0Z", 512.0).unwrap();
        assert_eq!(svg.matches("<line").count(), 30);
        assert_eq!(svg.matches(BASELINE_COLOR).count(), 1);
        assert!(svg.contains(r#"y1="448""#));
        assert!(svg.contains(r#"viewBox="0 0 512 512""#));
        assert!(svg.contains(r#"<path d="M0 0Z"/>"#));
    }

    #[test]
    fn guides_are_ignored_when_read_back() {
        let svg = glyph_svg("M0 0L10 0L10 10Z", 384.0).unwrap();
        let document = GeometryDocument::parse(&svg).unwrap();
        assert_eq!(document.view_box().unwrap().width, 384.0);
        assert_eq!(
            document.path(&PathOptions::default()).unwrap(),
            "M0 0L10 0L10 10Z"
        );
    }
}
