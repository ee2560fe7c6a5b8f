//! Format-independent track data model
//!
//! Shared by the iTunes reader and the XSPF writer.

mod track;

pub use track::{TrackField, TrackRecord};
