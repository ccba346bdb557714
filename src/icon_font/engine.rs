//! Conversion runs between icon directories and SVG fonts
//!
//! An [`IconFontEngine`] is created for one run, either by reading a directory
//! of icons or by loading an existing font. When it built the font itself it
//! keeps the code point mapping, so exporting copies the original icon files
//! instead of regenerating them.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::errors::{Error, Result};
use crate::font_source::codepoint::to_hex;
use crate::font_source::glyph_store::glyph_label;
use crate::font_source::{FontMetrics, GlyphRecord, GlyphStore, MetricOverrides};
use crate::geometry::transform::Flip;
use crate::geometry::{GeometryDocument, PathOptions};
use crate::icon_font::css;
use crate::icon_font::mapping::{scan_directory, IconMapping};
use crate::icon_font::template::{self, BASELINE_OFFSET, FRAME_SIZE};

/// Settings for building a font from a directory
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Metrics layered over the defaults
    pub metrics: MetricOverrides,
    /// Rename auto-allocated icons to embed their code point
    pub rename_files: bool,
}

/// Code point and optional name of one glyph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphName {
    pub codepoint: char,
    pub name: Option<String>,
}

impl GlyphName {
    /// Lowercase hex of the code point, e.g. `e000`
    pub fn hex(&self) -> String {
        to_hex(self.codepoint)
    }
}

/// Named glyphs ordered by name, then code point
pub(crate) fn sorted_by_name(names: &[GlyphName]) -> Vec<(&str, char)> {
    let mut named: Vec<(&str, char)> = names
        .iter()
        .filter_map(|glyph| glyph.name.as_deref().map(|name| (name, glyph.codepoint)))
        .collect();
    named.sort();
    named
}

/// One conversion run
#[derive(Debug, Clone)]
pub struct IconFontEngine {
    font: GlyphStore,
    mapping: IconMapping,
}

impl IconFontEngine {
    /// Build a font from every `.svg` file in `dir`
    ///
    /// The first failing icon aborts the run; its file name is attached to
    /// the error.
    pub fn from_directory(dir: &Path, options: &GenerateOptions) -> Result<Self> {
        let mut font = GlyphStore::new(&options.metrics);
        font.metrics().validate()?;

        let file_names = scan_directory(dir)?;
        debug!("Found {} icon files in {}", file_names.len(), dir.display());

        let mut mapping = IconMapping::from_file_names(dir, &file_names)?;
        if options.rename_files {
            mapping.rename_allocated()?;
        }

        for (codepoint, source) in mapping.iter() {
            let (path, advance_width) = convert_icon(&source.path, font.metrics())
                .map_err(|err| err.in_file(source.file_name()))?;
            debug!("Converted {} to U+{}", source.file_name(), to_hex(codepoint));
            font.add_glyph(codepoint, path, Some(&source.name), Some(advance_width));
        }
        info!("Built font with {} glyphs", mapping.len());

        Ok(Self { font, mapping })
    }

    /// Wrap a loaded font; exports will synthesize every icon
    pub fn from_font(font: GlyphStore) -> Self {
        Self {
            font,
            mapping: IconMapping::default(),
        }
    }

    pub fn font(&self) -> &GlyphStore {
        &self.font
    }

    pub fn mapping(&self) -> &IconMapping {
        &self.mapping
    }

    /// Code points and names in font order
    pub fn glyph_names(&self) -> Vec<GlyphName> {
        self.font
            .glyphs()
            .into_iter()
            .map(|glyph| GlyphName {
                codepoint: glyph.codepoint,
                name: glyph.name.filter(|name| !name.is_empty()),
            })
            .collect()
    }

    /// Stylesheet binding `icon-<name>` classes to the glyphs
    pub fn css(&self) -> String {
        css::stylesheet(&self.glyph_names())
    }

    /// Write one SVG file per glyph into `dir`
    ///
    /// Returns the written paths in font order.
    pub fn save_glyphs_to_dir(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(Error::io(
                dir,
                std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
            ));
        }

        let metrics = self.font.metrics();
        metrics.validate()?;
        let mut written = Vec::new();
        for glyph in self.font.glyphs() {
            let target = dir.join(export_file_name(&glyph));
            match self.mapping.get(glyph.codepoint) {
                Some(source) => copy_source(&source.path, &target)?,
                None => {
                    let svg = synthesize(&glyph, metrics)
                        .map_err(|err| err.in_file(glyph_label(&glyph)))?;
                    fs::write(&target, svg).map_err(|err| Error::io(&target, err))?;
                }
            }
            debug!("Wrote {}", target.display());
            written.push(target);
        }
        Ok(written)
    }
}

/// Path and advance width of one icon in font units
fn convert_icon(path: &Path, metrics: &FontMetrics) -> Result<(String, f64)> {
    let svg = fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
    let document = GeometryDocument::parse(&svg)?;
    let view_box = document
        .view_box()
        .ok_or_else(|| Error::MissingGeometry("icon has no usable viewBox".to_string()))?;

    let scale = metrics.units_per_em / view_box.height;
    let data = document.path(&PathOptions {
        scale,
        flip: Flip::Vertical,
        y_offset: metrics.descent,
        ..Default::default()
    })?;
    Ok((data, (view_box.width * scale).round()))
}

/// Icon file for a glyph that has no source file in this run
fn synthesize(glyph: &GlyphRecord, metrics: &FontMetrics) -> Result<String> {
    let document = GeometryDocument::from_path(
        &glyph.path,
        Some((metrics.horiz_adv_x, metrics.units_per_em)),
    );
    let data = document.path(&PathOptions {
        scale: FRAME_SIZE / metrics.units_per_em,
        flip: Flip::Vertical,
        y_offset: BASELINE_OFFSET,
        ..Default::default()
    })?;
    let width = match glyph.advance_width {
        Some(width) if width != 0.0 => width * FRAME_SIZE / metrics.units_per_em,
        _ => FRAME_SIZE,
    };
    template::glyph_svg(&data, width)
}

fn copy_source(source: &Path, target: &Path) -> Result<()> {
    // Exporting into the source directory would otherwise truncate the icon
    if let (Ok(from), Ok(to)) = (source.canonicalize(), target.canonicalize()) {
        if from == to {
            debug!("{} is already in place", target.display());
            return Ok(());
        }
    }
    fs::copy(source, target).map_err(|err| Error::io(source, err))?;
    Ok(())
}

/// `<name>-x<hex>.svg` with the name reduced to ASCII letters, digits and
/// hyphens, or `icon` for unnamed glyphs
pub fn export_file_name(glyph: &GlyphRecord) -> String {
    let stem = match glyph.name.as_deref() {
        Some(name) if !name.is_empty() => sanitize_name(name),
        _ => "icon".to_string(),
    };
    format!("{}-x{}.svg", stem, to_hex(glyph.codepoint))
}

/// CSS class of a named glyph, `icon-<name>` with the name sanitized
pub(crate) fn class_name(name: &str) -> String {
    format!("icon-{}", sanitize_name(name))
}

fn sanitize_name(name: &str) -> String {
    let mut sanitized = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            sanitized.push(c);
            in_run = false;
        } else if !in_run {
            sanitized.push('-');
            in_run = true;
        }
    }
    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: Option<&str>, codepoint: char) -> GlyphRecord {
        GlyphRecord {
            codepoint,
            path: "M0 0Z".to_string(),
            name: name.map(str::to_string),
            advance_width: None,
        }
    }

    #[test]
    fn export_names_are_sanitized() {
        assert_eq!(
            export_file_name(&record(Some("arrow left"), '\u{e000}')),
            "arrow-left-xe000.svg"
        );
        assert_eq!(
            export_file_name(&record(Some("a & b!!c"), '\u{e00a}')),
            "a-b-c-xe00a.svg"
        );
        assert_eq!(export_file_name(&record(Some("Zoom_In"), 'A')), "Zoom-In-x41.svg");
        assert_eq!(export_file_name(&record(None, '\u{e001}')), "icon-xe001.svg");
    }

    #[test]
    fn class_names_use_the_file_name_rule() {
        assert_eq!(class_name("arrow left.big"), "icon-arrow-left-big");
        assert_eq!(class_name("a{}b"), "icon-a-b");
        assert_eq!(class_name("home"), "icon-home");
    }

    #[test]
    fn converts_icon_into_font_units() {
        let dir = tempfile::tempdir().unwrap();
        let icon = dir.path().join("square-xe000.svg");
        fs::write(
            &icon,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 16 32"><path d="M0 0L16 0L16 32Z"/></svg>"#,
        )
        .unwrap();

        let (path, advance) = convert_icon(&icon, &FontMetrics::default()).unwrap();
        // scale 16, flipped against height 32, baseline moved down by 32
        assert_eq!(path, "M0 480L256 480L256 -32Z");
        assert_eq!(advance, 256.0);
    }

    #[test]
    fn synthesized_icon_returns_to_frame() {
        let metrics = FontMetrics {
            units_per_em: 1024.0,
            ..Default::default()
        };
        let glyph = GlyphRecord {
            codepoint: '\u{e000}',
            path: "M0 0L1024 0L1024 1024Z".to_string(),
            name: None,
            advance_width: Some(512.0),
        };
        let svg = synthesize(&glyph, &metrics).unwrap();
        assert!(svg.contains(r#"viewBox="0 0 256 512""#));
        assert!(svg.contains(r#"<path d="M0 448L512 448L512 -64Z"/>"#));
    }

    #[test]
    fn names_skip_empty_and_sort() {
        let names = vec![
            GlyphName {
                codepoint: '\u{e001}',
                name: Some("b".to_string()),
            },
            GlyphName {
                codepoint: '\u{e002}',
                name: None,
            },
            GlyphName {
                codepoint: '\u{e000}',
                name: Some("a".to_string()),
            },
        ];
        assert_eq!(
            sorted_by_name(&names),
            vec![("a", '\u{e000}'), ("b", '\u{e001}')]
        );
        assert_eq!(names[0].hex(), "e001");
    }

    #[test]
    fn zero_units_per_em_fails_both_directions() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("box.svg"),
            r#"<svg viewBox="0 0 10 10"><rect width="10" height="10"/></svg>"#,
        )
        .unwrap();
        let options = GenerateOptions {
            metrics: MetricOverrides {
                units_per_em: Some(0.0),
                ..Default::default()
            },
            rename_files: false,
        };
        let err = IconFontEngine::from_directory(dir.path(), &options).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));

        let mut font = GlyphStore::default();
        font.add_glyph('\u{e000}', "M0 0L1 1Z", Some("a"), None);
        font.set_metrics(&options.metrics);
        let out = tempfile::tempdir().unwrap();
        let err = IconFontEngine::from_font(font)
            .save_glyphs_to_dir(out.path())
            .unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
        assert!(fs::read_dir(out.path()).unwrap().next().is_none());
    }

    #[test]
    fn export_requires_directory() {
        let engine = IconFontEngine::from_font(GlyphStore::default());
        let err = engine
            .save_glyphs_to_dir(Path::new("/definitely/not/here"))
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
