//! Owned SVG element tree
//!
//! Documents are parsed once with `roxmltree` and copied into a small owned
//! tree so a document can outlive the source text it was read from.

use roxmltree::{Node, ParsingOptions};

use crate::core::errors::Result;

/// An element with its attributes and child elements (text is dropped)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SvgElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<SvgElement>,
}

impl SvgElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parse an XML document and return its root element
    ///
    /// DTDs are allowed since most SVG editors emit the SVG 1.1 doctype.
    pub fn parse(text: &str) -> Result<Self> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let document = roxmltree::Document::parse_with_options(text, options)?;
        Ok(Self::from_node(document.root_element()))
    }

    fn from_node(node: Node<'_, '_>) -> Self {
        Self {
            name: node.tag_name().name().to_string(),
            attributes: node
                .attributes()
                .map(|attribute| (attribute.name().to_string(), attribute.value().to_string()))
                .collect(),
            children: node
                .children()
                .filter(|child| child.is_element())
                .map(Self::from_node)
                .collect(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Attribute value by local name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Attribute value, treating an empty or blank value as absent
    pub fn non_empty_attribute(&self, name: &str) -> Option<&str> {
        self.attribute(name).filter(|value| !value.trim().is_empty())
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    /// First child element with the given name
    pub fn child(&self, name: &str) -> Option<&SvgElement> {
        self.children.iter().find(|child| child.name == name)
    }

    /// All child elements with the given name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a SvgElement> {
        self.children.iter().filter(move |child| child.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_doctype() {
        let svg = r#"<?xml version="1.0"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16">
  text is ignored
  <g><rect width="4" height="4"/></g>
</svg>"#;
        let root = SvgElement::parse(svg).unwrap();
        assert_eq!(root.name, "svg");
        assert_eq!(root.attribute("width"), Some("16"));
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].children[0].name, "rect");
    }

    #[test]
    fn rejects_broken_xml() {
        assert!(SvgElement::parse("<svg><g></svg>").is_err());
    }

    #[test]
    fn blank_attributes_count_as_missing() {
        let element = SvgElement::new("rect").with_attribute("x", " ");
        assert_eq!(element.attribute("x"), Some(" "));
        assert_eq!(element.non_empty_attribute("x"), None);
    }
}
