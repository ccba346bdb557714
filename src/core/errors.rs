//! Error types for the conversion pipeline
//!
//! Every failure is terminal for the current run. The engine attaches the
//! offending file name with [`Error::InFile`] so the CLI can report which
//! icon broke the batch.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used across the library
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting icons and fonts
#[derive(Error, Debug)]
pub enum Error {
    /// No usable view box (absent, malformed or zero-sized)
    #[error("missing geometry: {0}")]
    MissingGeometry(String),

    /// A path command the transformer cannot handle (the arc command)
    #[error("path command \"{0}\" is not supported")]
    UnsupportedCommand(char),

    /// An SVG feature that is rejected rather than interpreted
    #[error("unsupported SVG feature: {0}")]
    UnsupportedFeature(String),

    /// Two icons claim the same code point
    #[error("duplicate glyph U+{codepoint:04X} ({name})")]
    DuplicateGlyph { codepoint: u32, name: String },

    /// Input that does not follow the expected grammar
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The document is not well-formed XML
    #[error("XML parsing error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// Failure while producing XML output
    #[error("failed to write XML: {0}")]
    Serialize(String),

    /// Read, write, copy or rename failure
    #[error("IO error on \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failure while processing one input file
    #[error("{file}: {source}")]
    InFile {
        file: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap an IO error together with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach the name of the file being processed
    pub fn in_file(self, file: impl Into<String>) -> Self {
        Error::InFile {
            file: file.into(),
            source: Box::new(self),
        }
    }

    /// The underlying error with any file context stripped
    pub fn root(&self) -> &Error {
        match self {
            Error::InFile { source, .. } => source.root(),
            other => other,
        }
    }
}
