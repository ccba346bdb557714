//! HTML previews of a font
//!
//! [`page`] renders a standalone document that loads the SVG font and shows
//! one card per icon with its class name and escapes. [`list`] renders a
//! bare `<ul>` for embedding into other pages.

use quick_xml::escape::escape;

use crate::font_source::codepoint::to_hex;
use crate::font_source::FontMetrics;
use crate::icon_font::engine::{class_name, sorted_by_name, GlyphName};

const PAGE_STYLE: &str = r#"
    body {
        font-family: sans-serif;
        color: #444;
        line-height: 1.5;
        font-size: 16px;
        padding: 20px;
    }
    * {
        box-sizing: border-box;
        margin: 0;
        padding: 0;
    }
    .glyph {
        display: inline-block;
        width: 120px;
        margin: 10px;
        text-align: center;
        vertical-align: top;
        background: #eee;
        border-radius: 10px;
        box-shadow: 1px 1px 5px rgba(0, 0, 0, .2);
    }
    .glyph-icon {
        padding: 10px;
        display: block;
        font-size: 64px;
        line-height: 1;
    }
    .glyph-icon:before {
        content: attr(data-icon);
    }
    .class-name {
        font-size: 12px;
    }
    .glyph > input {
        display: block;
        width: 100px;
        margin: 5px auto;
        text-align: center;
        font-size: 12px;
        cursor: text;
    }
    .glyph > input.icon-input {
        font-size: 16px;
        margin-bottom: 10px;
    }
"#;

/// Full preview document for the font stored in `font_file`
pub fn page(metrics: &FontMetrics, names: &[GlyphName], font_file: &str) -> String {
    let family = css_string(&metrics.id);
    let mut html = format!(
        "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <style>\n    @font-face {{\n        font-family: \"{family}\";\n        \
         src: url(\"{src}\") format(\"svg\");\n        font-weight: normal;\n        \
         font-style: normal;\n    }}\n    .glyph-icon, .glyph > input.icon-input {{\n        \
         font-family: \"{family}\";\n    }}{style}</style>\n</head>\n<body>\n<section id=\"glyphs\">\n",
        title = escape(metrics.id.as_str()),
        src = css_string(font_file),
        style = PAGE_STYLE,
    );

    for (name, codepoint) in sorted_by_name(names) {
        let hex = to_hex(codepoint);
        html.push_str(&format!(
            "<div class=\"glyph\">\n    \
             <div class=\"glyph-icon\" data-icon=\"&#x{hex};\"></div>\n    \
             <div class=\"class-name\">{class}</div>\n    \
             <input type=\"text\" readonly=\"readonly\" value=\"&amp;#x{hex};\" />\n    \
             <input type=\"text\" readonly=\"readonly\" value=\"\\{hex}\" />\n    \
             <input type=\"text\" readonly=\"readonly\" value=\"&#x{hex};\" class=\"icon-input\" />\n\
             </div>\n",
            class = class_name(name),
        ));
    }

    html.push_str("</section>\n</body>\n</html>\n");
    html
}

/// `<ul>` with one entry per named glyph, sorted by name
pub fn list(names: &[GlyphName]) -> String {
    let mut html = String::from("<ul>");
    for (name, codepoint) in sorted_by_name(names) {
        let name = escape(name);
        let hex = to_hex(codepoint);
        html.push_str(&format!(
            "\n\t<li data-icon=\"&#x{hex};\" title=\"{name}\">{name}</li>"
        ));
    }
    html.push_str("\n</ul>\n");
    html
}

/// Value usable inside a double quoted CSS string
fn css_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<GlyphName> {
        vec![
            GlyphName {
                codepoint: '\u{e001}',
                name: Some("b<c".to_string()),
            },
            GlyphName {
                codepoint: '\u{e000}',
                name: Some("a".to_string()),
            },
            GlyphName {
                codepoint: '\u{e002}',
                name: None,
            },
        ]
    }

    #[test]
    fn list_is_sorted_and_escaped() {
        assert_eq!(
            list(&names()),
            "<ul>\n\t<li data-icon=\"&#xe000;\" title=\"a\">a</li>\
             \n\t<li data-icon=\"&#xe001;\" title=\"b&lt;c\">b&lt;c</li>\n</ul>\n"
        );
    }

    #[test]
    fn page_links_font_and_lists_cards() {
        let metrics = FontMetrics {
            id: "My Icons".to_string(),
            ..Default::default()
        };
        let html = page(&metrics, &names(), "icons.svg");
        assert!(html.starts_with("<!doctype html>"));
        assert!(html.contains("<title>My Icons</title>"));
        assert!(html.contains(r#"src: url("icons.svg") format("svg");"#));
        assert!(html.contains(r#"font-family: "My Icons";"#));
        assert_eq!(html.matches("<div class=\"glyph\">").count(), 2);
        assert!(html.contains(r#"<div class="class-name">icon-b-c</div>"#));
        assert!(!html.contains("b<c"));
        assert!(html.contains(r#"value="\e001""#));
        let a = html.find("icon-a").unwrap();
        let b = html.find("icon-b").unwrap();
        assert!(a < b);
        assert!(html.ends_with("</html>\n"));
    }
}
