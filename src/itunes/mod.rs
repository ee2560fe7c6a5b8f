//! iTunes playlist export parsing
//!
//! Reads the property-list XML written by iTunes' "Export Playlist" and
//! extracts per-track metadata.

mod library;
mod tree;

pub use library::tracks_from_document;
pub use tree::{normalize_newlines, parse_document, Element};

use crate::error::ParseError;
use crate::model::TrackRecord;
use std::io::BufRead;

/// Parse an iTunes playlist export from any buffered reader
pub fn parse_tracks<R: BufRead>(source: R) -> Result<Vec<TrackRecord>, ParseError> {
    let root = parse_document(source)?;
    Ok(tracks_from_document(&root))
}
