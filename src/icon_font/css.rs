//! Icon class stylesheet

use crate::font_source::codepoint::css_escape;
use crate::icon_font::engine::{class_name, sorted_by_name, GlyphName};

/// One `.icon-<name>:before` rule per named glyph, sorted by name
///
/// Names are reduced to ASCII letters, digits and hyphens so every rule is a
/// valid selector.
pub fn stylesheet(names: &[GlyphName]) -> String {
    let mut css = String::new();
    for (name, codepoint) in sorted_by_name(names) {
        css.push_str(&format!(
            ".{}:before {{\n\tcontent: \"{}\";\n}}\n",
            class_name(name),
            css_escape(codepoint)
        ));
    }
    css
}
