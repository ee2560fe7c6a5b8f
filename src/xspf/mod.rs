//! XSPF playlist generation

mod location;
mod writer;

pub use location::remap_location;
pub use writer::{render_playlist, XSPF_NAMESPACE, XSPF_VERSION};
