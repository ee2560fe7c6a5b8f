//! iTunes to XSPF playlist converter
//!
//! This library converts iTunes playlist exports (property-list XML) into
//! XSPF playlists, moving every track location under a new base folder.

pub mod error;
pub mod export;
pub mod itunes;
pub mod model;
pub mod xspf;

pub use error::{ConfigError, ConvertError};
pub use export::config::{ConvertConfig, PathStyle};
pub use export::pipeline::{convert_document, BatchConverter};
