//! XML output
//!
//! Thin wrapper around `quick_xml::Writer` that produces indented SVG
//! documents and maps writer failures into the crate error type.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::core::errors::{Error, Result};

/// Doctype emitted in front of every generated SVG document
pub const SVG_DOCTYPE: &str = r#"svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd""#;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// Streaming writer for one document
pub struct XmlWriter {
    inner: Writer<Vec<u8>>,
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlWriter {
    pub fn new() -> Self {
        Self {
            inner: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    /// XML declaration followed by the SVG 1.1 doctype
    pub fn svg_prolog(&mut self, encoding: Option<&str>, standalone: Option<&str>) -> Result<()> {
        self.write(Event::Decl(BytesDecl::new("1.0", encoding, standalone)))?;
        self.write(Event::DocType(BytesText::from_escaped(SVG_DOCTYPE)))
    }

    pub fn start(&mut self, element: BytesStart<'_>) -> Result<()> {
        self.write(Event::Start(element))
    }

    pub fn end(&mut self, name: &str) -> Result<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    /// A self-closing element
    pub fn empty(&mut self, element: BytesStart<'_>) -> Result<()> {
        self.write(Event::Empty(element))
    }

    fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.inner
            .write_event(event)
            .map_err(|err| Error::Serialize(err.to_string()))
    }

    /// The finished document text
    pub fn finish(self) -> Result<String> {
        let mut text =
            String::from_utf8(self.inner.into_inner()).map_err(|err| Error::Serialize(err.to_string()))?;
        text.push('\n');
        Ok(text)
    }
}
