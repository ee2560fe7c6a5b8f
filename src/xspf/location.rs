//! Track location rewriting

use crate::export::ConvertConfig;

/// Prefix iTunes puts on every track location
const LOCALHOST_PREFIX: &str = "file://localhost";

/// Move a track location under the configured base path
///
/// Only the file name survives: the `file://localhost` prefix is dropped,
/// the remainder is percent-decoded, and the last path segment is joined
/// onto the destination base path. Returns `None` when there is no file name
/// to keep (empty location, or one ending in `/`).
pub fn remap_location(location: &str, config: &ConvertConfig) -> Option<String> {
    let path = location.strip_prefix(LOCALHOST_PREFIX).unwrap_or(location);

    // Invalid UTF-8 after decoding becomes U+FFFD rather than failing the track
    let decoded = urlencoding::decode_binary(path.as_bytes());
    let decoded = String::from_utf8_lossy(&decoded);

    let file_name = decoded.rsplit('/').next().unwrap_or_default();
    if file_name.is_empty() {
        log::debug!("Location {:?} has no file name, leaving it empty", location);
        return None;
    }

    let remapped = config.location_for(file_name);
    log::debug!("Location {:?} -> {:?}", location, remapped);
    Some(remapped)
}
