//! Serialization of generated documents

pub mod xml;

pub use xml::XmlWriter;
