//! Track extraction from an iTunes playlist export
//!
//! Layout of the relevant part of the plist:
//!
//! ```text
//! <plist>
//!   <dict>                      library
//!     <key>Tracks</key>
//!     <dict>                    track container
//!       <key>1234</key>
//!       <dict>                  one track
//!         <key>Name</key><string>...</string>
//!         ...
//! ```

use super::tree::Element;
use crate::model::{TrackField, TrackRecord};

/// Collect tracks from a parsed plist document, in document order
///
/// A missing track container yields no tracks. Track dictionaries without
/// any recognized key are skipped.
pub fn tracks_from_document(root: &Element) -> Vec<TrackRecord> {
    let Some(container) = root
        .first_child("dict")
        .and_then(|library| library.first_child("dict"))
    else {
        log::debug!("No track dictionary in document");
        return Vec::new();
    };

    let mut tracks = Vec::new();

    for (index, block) in container.children_named("dict").enumerate() {
        let track = read_track_block(block, index);

        if track.is_empty() {
            log::debug!("Skipping track block {}: no recognized fields", index);
            continue;
        }

        tracks.push(track);
    }

    tracks
}

/// Read alternating key/value children of one track dictionary
fn read_track_block(block: &Element, index: usize) -> TrackRecord {
    let mut track = TrackRecord::new();

    for pair in block.children.chunks(2) {
        let [key, value] = pair else {
            log::debug!(
                "Track block {}: key {:?} has no value, stopping",
                index,
                pair[0].text()
            );
            break;
        };

        if let Some(field) = TrackField::from_itunes_key(key.text()) {
            track.set(field, value.text());
        }
    }

    track
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itunes::tree::parse_document;

    fn tracks(xml: &str) -> Vec<TrackRecord> {
        tracks_from_document(&parse_document(xml.as_bytes()).unwrap())
    }

    #[test]
    fn test_reads_recognized_fields() {
        let result = tracks(
            r#"<plist version="1.0"><dict>
<key>Major Version</key><integer>1</integer>
<key>Tracks</key>
<dict>
    <key>101</key>
    <dict>
        <key>Track ID</key><integer>101</integer>
        <key>Name</key><string>Blue in Green</string>
        <key>Artist</key><string>Miles Davis</string>
        <key>Album</key><string>Kind of Blue</string>
        <key>Genre</key><string>Jazz</string>
        <key>Total Time</key><integer>337000</integer>
        <key>Track Number</key><integer>3</integer>
        <key>Location</key><string>file://localhost/Music/Blue%20in%20Green.m4a</string>
    </dict>
</dict>
</dict></plist>"#,
        );

        assert_eq!(result.len(), 1);
        let track = &result[0];
        assert_eq!(track.name.as_deref(), Some("Blue in Green"));
        assert_eq!(track.artist.as_deref(), Some("Miles Davis"));
        assert_eq!(track.album.as_deref(), Some("Kind of Blue"));
        assert_eq!(track.total_time.as_deref(), Some("337000"));
        assert_eq!(track.track_number.as_deref(), Some("3"));
        assert_eq!(
            track.location.as_deref(),
            Some("file://localhost/Music/Blue%20in%20Green.m4a")
        );
    }

    #[test]
    fn test_missing_container_yields_nothing() {
        assert!(tracks("<plist/>").is_empty());
        assert!(tracks("<plist><dict><key>Tracks</key></dict></plist>").is_empty());
        assert!(tracks("<plist><array><dict><dict/></dict></array></plist>").is_empty());
    }

    #[test]
    fn test_blocks_without_recognized_fields_are_dropped() {
        let result = tracks(
            r#"<plist><dict><dict>
<key>1</key><dict><key>Track ID</key><integer>1</integer></dict>
<key>2</key><dict><key>Name</key><string>Kept</string></dict>
<key>3</key><dict/>
</dict></dict></plist>"#,
        );

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name.as_deref(), Some("Kept"));
    }

    #[test]
    fn test_truncated_pair_keeps_collected_fields() {
        let result = tracks(
            r#"<plist><dict><dict>
<dict>
    <key>Name</key><string>Half</string>
    <key>Artist</key><string>Someone</string>
    <key>Album</key>
</dict>
</dict></dict></plist>"#,
        );

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name.as_deref(), Some("Half"));
        assert_eq!(result[0].artist.as_deref(), Some("Someone"));
        assert_eq!(result[0].album, None);
    }

    #[test]
    fn test_order_is_preserved() {
        let result = tracks(
            r#"<plist><dict><dict>
<key>9</key><dict><key>Name</key><string>First</string></dict>
<key>1</key><dict><key>Name</key><string>Second</string></dict>
<key>5</key><dict><key>Name</key><string>Third</string></dict>
</dict></dict></plist>"#,
        );

        let names: Vec<_> = result.iter().filter_map(|t| t.name.as_deref()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_empty_value_is_kept_as_empty_field() {
        let result = tracks(
            "<plist><dict><dict><dict><key>Album</key><string/></dict></dict></dict></plist>",
        );

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].album.as_deref(), Some(""));
    }
}
