//! SVG font document
//!
//! A [`GlyphStore`] is the typed form of an SVG font:
//!
//! ```text
//! svg
//! └── defs
//!     └── font            id, horiz-adv-x
//!         ├── font-face   units-per-em, ascent, descent, x-height, cap-height
//!         ├── missing-glyph
//!         └── glyph*      unicode, d, glyph-name?, horiz-adv-x?
//! ```
//!
//! Missing skeleton elements are created on load. Glyphs are append-only.

use std::borrow::Cow;

use quick_xml::events::attributes::Attribute;
use quick_xml::events::BytesStart;
use quick_xml::name::QName;
use tracing::debug;

use crate::core::errors::{Error, Result};
use crate::data::xml::{XmlWriter, SVG_NAMESPACE};
use crate::font_source::codepoint::{char_reference, to_hex};
use crate::font_source::metrics::{FontMetrics, MetricOverrides};
use crate::geometry::element::SvgElement;
use crate::geometry::number::{format_number, parse_finite};

/// One glyph as handed out by [`GlyphStore::glyphs`]
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRecord {
    pub codepoint: char,
    pub path: String,
    pub name: Option<String>,
    pub advance_width: Option<f64>,
}

/// A `glyph` element as stored, any attribute may be missing
#[derive(Debug, Clone, PartialEq, Default)]
struct GlyphEntry {
    unicode: Option<String>,
    path: Option<String>,
    name: Option<String>,
    advance_width: Option<f64>,
}

impl GlyphEntry {
    fn from_element(element: &SvgElement) -> Result<Self> {
        Ok(Self {
            unicode: element.attribute("unicode").map(str::to_string),
            path: element.attribute("d").map(str::to_string),
            name: element.attribute("glyph-name").map(str::to_string),
            advance_width: element
                .non_empty_attribute("horiz-adv-x")
                .map(|value| parse_metric("glyph horiz-adv-x", value))
                .transpose()?,
        })
    }

    /// The entry as a record, if it has a single code point and path data
    fn record(&self) -> Option<GlyphRecord> {
        let unicode = self.unicode.as_deref()?;
        let path = self.path.as_ref()?;
        let mut chars = unicode.chars();
        let (Some(codepoint), None) = (chars.next(), chars.next()) else {
            debug!("Skipping glyph with unicode {:?}", unicode);
            return None;
        };
        Some(GlyphRecord {
            codepoint,
            path: path.clone(),
            name: self.name.clone(),
            advance_width: self.advance_width,
        })
    }
}

/// Typed SVG font document
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphStore {
    metrics: FontMetrics,
    glyphs: Vec<GlyphEntry>,
}

impl Default for GlyphStore {
    fn default() -> Self {
        Self::new(&MetricOverrides::default())
    }
}

impl GlyphStore {
    /// An empty font with default metrics under `overrides`
    pub fn new(overrides: &MetricOverrides) -> Self {
        Self {
            metrics: FontMetrics::with_overrides(overrides),
            glyphs: Vec::new(),
        }
    }

    /// Load an SVG font document
    ///
    /// Metrics found in the document replace the defaults; `overrides` win
    /// over both. A non-positive units per em is MalformedInput.
    pub fn parse(svg: &str, overrides: &MetricOverrides) -> Result<Self> {
        let root = SvgElement::parse(svg)?;
        let font = root.child("defs").and_then(|defs| defs.child("font"));

        let document_metrics = match font {
            Some(font) => metrics_from_document(font)?,
            None => MetricOverrides::default(),
        };
        let glyphs = match font {
            Some(font) => font
                .children_named("glyph")
                .map(GlyphEntry::from_element)
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };
        debug!("Loaded font document with {} glyph elements", glyphs.len());

        let mut store = Self {
            metrics: FontMetrics::default(),
            glyphs,
        };
        store.set_metrics(&document_metrics.merged_with(overrides));
        store.metrics.validate()?;
        Ok(store)
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    /// Merge `overrides` onto the current metrics
    pub fn set_metrics(&mut self, overrides: &MetricOverrides) {
        self.metrics.apply(overrides);
    }

    /// Append a glyph
    ///
    /// Code point uniqueness is the caller's responsibility.
    pub fn add_glyph(
        &mut self,
        codepoint: char,
        path: impl Into<String>,
        name: Option<&str>,
        advance_width: Option<f64>,
    ) {
        self.glyphs.push(GlyphEntry {
            unicode: Some(codepoint.to_string()),
            path: Some(path.into()),
            name: name.map(str::to_string),
            advance_width,
        });
    }

    /// All glyphs with a single code point and path data, in document order
    pub fn glyphs(&self) -> Vec<GlyphRecord> {
        self.glyphs.iter().filter_map(GlyphEntry::record).collect()
    }

    /// Serialize the font as an SVG document
    pub fn to_xml(&self) -> Result<String> {
        let metrics = &self.metrics;
        let mut writer = XmlWriter::new();
        writer.svg_prolog(None, Some("no"))?;
        writer.start(BytesStart::new("svg").with_attributes([("xmlns", SVG_NAMESPACE)]))?;
        writer.start(BytesStart::new("defs"))?;

        let horiz_adv_x = format_number(metrics.horiz_adv_x);
        writer.start(BytesStart::new("font").with_attributes([
            ("id", metrics.id.as_str()),
            ("horiz-adv-x", horiz_adv_x.as_str()),
        ]))?;
        let face = [
            ("units-per-em", metrics.units_per_em),
            ("ascent", metrics.ascent),
            ("descent", metrics.descent),
            ("x-height", metrics.x_height),
            ("cap-height", metrics.cap_height),
        ]
        .map(|(name, value)| (name, format_number(value)));
        writer.empty(
            BytesStart::new("font-face")
                .with_attributes(face.iter().map(|(name, value)| (*name, value.as_str()))),
        )?;
        writer.empty(
            BytesStart::new("missing-glyph").with_attributes([("horiz-adv-x", horiz_adv_x.as_str())]),
        )?;

        for glyph in &self.glyphs {
            writer.empty(glyph_element(glyph))?;
        }

        writer.end("font")?;
        writer.end("defs")?;
        writer.end("svg")?;
        writer.finish()
    }
}

fn glyph_element(glyph: &GlyphEntry) -> BytesStart<'static> {
    let mut element = BytesStart::new("glyph");
    if let Some(unicode) = &glyph.unicode {
        let mut chars = unicode.chars();
        match (chars.next(), chars.next()) {
            // Single code points are written as character references so
            // private use glyphs stay readable
            (Some(codepoint), None) => element.push_attribute(Attribute {
                key: QName(b"unicode"),
                value: Cow::Owned(char_reference(codepoint).into_bytes()),
            }),
            _ => element.push_attribute(("unicode", unicode.as_str())),
        }
    }
    if let Some(name) = &glyph.name {
        element.push_attribute(("glyph-name", name.as_str()));
    }
    if let Some(width) = glyph.advance_width {
        element.push_attribute(("horiz-adv-x", format_number(width).as_str()));
    }
    if let Some(path) = &glyph.path {
        element.push_attribute(("d", path.as_str()));
    }
    element
}

fn parse_metric(name: &str, value: &str) -> Result<f64> {
    parse_finite(value.trim())
        .ok_or_else(|| Error::MalformedInput(format!("font metric {name}=\"{value}\" is not a number")))
}

/// Metrics present on the `font` and `font-face` elements
fn metrics_from_document(font: &SvgElement) -> Result<MetricOverrides> {
    let face = font.child("font-face");
    let face_metric = |name: &str| -> Result<Option<f64>> {
        face.and_then(|face| face.non_empty_attribute(name))
            .map(|value| parse_metric(name, value))
            .transpose()
    };

    Ok(MetricOverrides {
        id: font.attribute("id").map(str::to_string),
        horiz_adv_x: font
            .non_empty_attribute("horiz-adv-x")
            .map(|value| parse_metric("horiz-adv-x", value))
            .transpose()?,
        units_per_em: face_metric("units-per-em")?,
        ascent: face_metric("ascent")?,
        descent: face_metric("descent")?,
        x_height: face_metric("x-height")?,
        cap_height: face_metric("cap-height")?,
    })
}

/// Display label of a glyph for logs: name or hex code point
pub fn glyph_label(glyph: &GlyphRecord) -> String {
    glyph
        .name
        .clone()
        .unwrap_or_else(|| format!("U+{}", to_hex(glyph.codepoint)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_read_back() {
        let mut store = GlyphStore::default();
        store.add_glyph('\u{e001}', "M0 0L10 10Z", Some("arrow"), Some(448.0));
        let glyphs = store.glyphs();
        assert_eq!(
            glyphs,
            vec![GlyphRecord {
                codepoint: '\u{e001}',
                path: "M0 0L10 10Z".to_string(),
                name: Some("arrow".to_string()),
                advance_width: Some(448.0),
            }]
        );
    }

    #[test]
    fn serialized_font_round_trips() {
        let overrides = MetricOverrides {
            id: Some("icons".to_string()),
            ..Default::default()
        };
        let mut store = GlyphStore::new(&overrides);
        store.add_glyph('\u{e000}', "M0 0Z", Some("a&b"), None);
        store.add_glyph('A', "M1 1Z", None, Some(256.0));

        let xml = store.to_xml().unwrap();
        assert!(xml.contains(r#"unicode="&#xe000;""#));
        assert!(xml.contains(r#"<font id="icons" horiz-adv-x="512">"#));
        assert!(xml.contains(r#"units-per-em="512""#));
        assert!(xml.contains(r#"descent="-32""#));

        let loaded = GlyphStore::parse(&xml, &MetricOverrides::default()).unwrap();
        assert_eq!(loaded.metrics(), store.metrics());
        assert_eq!(loaded.glyphs(), store.glyphs());
    }

    #[test]
    fn document_metrics_sit_between_defaults_and_overrides() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><defs>
            <font id="legacy" horiz-adv-x="1000">
                <font-face units-per-em="1000" ascent="850"/>
            </font>
        </defs></svg>"#;
        let overrides = MetricOverrides {
            ascent: Some(900.0),
            ..Default::default()
        };
        let store = GlyphStore::parse(svg, &overrides).unwrap();
        let metrics = store.metrics();
        assert_eq!(metrics.id, "legacy");
        assert_eq!(metrics.units_per_em, 1000.0);
        assert_eq!(metrics.horiz_adv_x, 1000.0);
        assert_eq!(metrics.ascent, 900.0);
        assert_eq!(metrics.descent, -32.0);
    }

    #[test]
    fn incomplete_glyphs_are_excluded() {
        let svg = r#"<svg><defs><font>
            <glyph unicode="a" d="M0 0Z"/>
            <glyph unicode="b"/>
            <glyph d="M1 1Z"/>
            <glyph unicode="ff" d="M2 2Z"/>
        </font></defs></svg>"#;
        let store = GlyphStore::parse(svg, &MetricOverrides::default()).unwrap();
        let glyphs = store.glyphs();
        assert_eq!(glyphs.len(), 1);
        assert_eq!(glyphs[0].codepoint, 'a');
    }

    #[test]
    fn missing_skeleton_is_created() {
        let store = GlyphStore::parse("<svg/>", &MetricOverrides::default()).unwrap();
        assert_eq!(store.metrics(), &FontMetrics::default());
        let xml = store.to_xml().unwrap();
        assert!(xml.contains("<font-face"));
        assert!(xml.contains("<missing-glyph"));
    }

    #[test]
    fn non_numeric_metric_is_malformed() {
        let svg = r#"<svg><defs><font><font-face units-per-em="big"/></font></defs></svg>"#;
        assert!(matches!(
            GlyphStore::parse(svg, &MetricOverrides::default()),
            Err(Error::MalformedInput(_))
        ));
    }

    #[test]
    fn non_finite_metrics_are_malformed() {
        for svg in [
            r#"<svg><defs><font horiz-adv-x="inf"/></defs></svg>"#,
            r#"<svg><defs><font><font-face ascent="NaN"/></font></defs></svg>"#,
            r#"<svg><defs><font><glyph unicode="a" horiz-adv-x="infinity" d="M0 0Z"/></font></defs></svg>"#,
        ] {
            assert!(matches!(
                GlyphStore::parse(svg, &MetricOverrides::default()),
                Err(Error::MalformedInput(_))
            ));
        }
    }

    #[test]
    fn zero_units_per_em_is_malformed() {
        let svg = r#"<svg><defs><font><font-face units-per-em="0"/></font></defs></svg>"#;
        assert!(matches!(
            GlyphStore::parse(svg, &MetricOverrides::default()),
            Err(Error::MalformedInput(_))
        ));
        let overrides = MetricOverrides {
            units_per_em: Some(-1.0),
            ..Default::default()
        };
        assert!(matches!(
            GlyphStore::parse("<svg/>", &overrides),
            Err(Error::MalformedInput(_))
        ));
    }
}
