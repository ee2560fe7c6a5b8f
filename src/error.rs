//! Error types
//!
//! `ConfigError` aborts a run before any file is touched. Everything else is
//! scoped to a single input document and ends up as a `ConvertError`, which
//! the batch pipeline turns into a skipped file plus a diagnostic.

use thiserror::Error;

/// Invalid destination configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("base path cannot be empty")]
    EmptyBasePath,

    #[error("base path {0:?} cannot end with '/' or '\\'; remove the trailing separator")]
    TrailingSeparator(String),
}

/// The source document is not well-formed XML
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("XML error at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("no root element found")]
    NoRootElement,

    #[error("document ended inside <{open}>")]
    UnexpectedEof { open: String },

    #[error("content outside the root element at byte {position}")]
    OutsideRoot { position: u64 },

    #[error("invalid UTF-8 in document")]
    Utf8(#[from] std::str::Utf8Error),
}

/// The output document could not be produced
#[derive(Error, Debug)]
pub enum SerializeError {
    #[error("<{field}> contains U+{codepoint:04X}, which XML 1.0 cannot represent")]
    InvalidCharacter { field: &'static str, codepoint: u32 },

    #[error("XML write error: {0}")]
    Xml(String),
}

/// Failure converting one input document
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("serialization error: {0}")]
    Serialize(#[from] SerializeError),
}
