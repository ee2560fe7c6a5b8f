//! XSPF playlist writer
//!
//! Output shape:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <playlist version="1" xmlns="http://xspf.org/ns/0/">
//!     <trackList>
//!         <track>
//!             <title>...</title>
//!             ...
//!         </track>
//!     </trackList>
//! </playlist>
//! ```

use super::location::remap_location;
use crate::error::SerializeError;
use crate::itunes::normalize_newlines;
use crate::export::ConvertConfig;
use crate::model::{TrackField, TrackRecord};
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::borrow::Cow;
use std::fmt::Display;
use std::io::Write;

pub const XSPF_NAMESPACE: &str = "http://xspf.org/ns/0/";
pub const XSPF_VERSION: &str = "1";

/// Spaces per nesting level
const INDENT: usize = 4;

/// Render tracks as a complete XSPF document
///
/// Empty records are skipped. Each track's location is moved under the
/// configured base path. Lines end with `\n`, newlines inside values are
/// written as `&#10;`, and there is no trailing newline.
pub fn render_playlist(
    tracks: &[TrackRecord],
    config: &ConvertConfig,
) -> Result<String, SerializeError> {
    let mut xml = Writer::new_with_indent(Vec::new(), b' ', INDENT);

    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(write_error)?;

    let mut root = BytesStart::new("playlist");
    root.push_attribute(("version", XSPF_VERSION));
    root.push_attribute(("xmlns", XSPF_NAMESPACE));
    xml.write_event(Event::Start(root)).map_err(write_error)?;

    let mut tracks = tracks.iter().filter(|t| !t.is_empty()).peekable();

    if tracks.peek().is_none() {
        xml.write_event(Event::Empty(BytesStart::new("trackList")))
            .map_err(write_error)?;
    } else {
        xml.write_event(Event::Start(BytesStart::new("trackList")))
            .map_err(write_error)?;

        for track in tracks {
            write_track(&mut xml, track, config)?;
        }

        xml.write_event(Event::End(BytesEnd::new("trackList")))
            .map_err(write_error)?;
    }

    xml.write_event(Event::End(BytesEnd::new("playlist")))
        .map_err(write_error)?;

    String::from_utf8(xml.into_inner()).map_err(write_error)
}

/// Write a single `<track>` element
fn write_track<W: Write>(
    xml: &mut Writer<W>,
    track: &TrackRecord,
    config: &ConvertConfig,
) -> Result<(), SerializeError> {
    xml.write_event(Event::Start(BytesStart::new("track")))
        .map_err(write_error)?;

    for (field, value) in track.fields() {
        let text: Cow<str> = match field {
            TrackField::Location => {
                Cow::Owned(remap_location(value, config).unwrap_or_default())
            }
            _ => normalize_newlines(value),
        };
        check_characters(field, &text)?;

        let element = xml.create_element(field.xspf_tag());
        if text.is_empty() {
            element.write_empty().map_err(write_error)?;
        } else {
            element
                .write_text_content(BytesText::from_escaped(escape_text(&text)))
                .map_err(write_error)?;
        }
    }

    xml.write_event(Event::End(BytesEnd::new("track")))
        .map_err(write_error)?;
    Ok(())
}

/// Escape markup, and encode newlines so a value never spans output lines
fn escape_text(text: &str) -> Cow<'_, str> {
    let escaped = partial_escape(text);
    if escaped.contains('\n') {
        Cow::Owned(escaped.replace('\n', "&#10;"))
    } else {
        escaped
    }
}

/// Reject characters XML 1.0 has no representation for
fn check_characters(field: TrackField, text: &str) -> Result<(), SerializeError> {
    match text.chars().find(|c| !is_xml_char(*c)) {
        Some(c) => Err(SerializeError::InvalidCharacter {
            field: field.xspf_tag(),
            codepoint: c as u32,
        }),
        None => Ok(()),
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

fn write_error(e: impl Display) -> SerializeError {
    SerializeError::Xml(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ConvertConfig {
        ConvertConfig::new("/music").unwrap()
    }

    fn track(fields: &[(TrackField, &str)]) -> TrackRecord {
        let mut track = TrackRecord::new();
        for (field, value) in fields {
            track.set(*field, *value);
        }
        track
    }

    #[test]
    fn test_full_document_layout() {
        let tracks = vec![track(&[
            (TrackField::Location, "file://localhost/Users/x/My%20Song.mp3"),
            (TrackField::TrackNumber, "7"),
            (TrackField::Name, "My Song"),
            (TrackField::Artist, "Band"),
            (TrackField::Album, "Record"),
            (TrackField::TotalTime, "215000"),
        ])];

        let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<playlist version="1" xmlns="http://xspf.org/ns/0/">
    <trackList>
        <track>
            <title>My Song</title>
            <creator>Band</creator>
            <album>Record</album>
            <duration>215000</duration>
            <trackNum>7</trackNum>
            <location>/music/My Song.mp3</location>
        </track>
    </trackList>
</playlist>"#;

        assert_eq!(render_playlist(&tracks, &config()).unwrap(), expected);
    }

    #[test]
    fn test_no_tracks() {
        let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<playlist version="1" xmlns="http://xspf.org/ns/0/">
    <trackList/>
</playlist>"#;

        assert_eq!(render_playlist(&[], &config()).unwrap(), expected);
        assert_eq!(
            render_playlist(&[TrackRecord::new()], &config()).unwrap(),
            expected
        );
    }

    #[test]
    fn test_empty_records_are_skipped() {
        let tracks = vec![
            TrackRecord::new(),
            track(&[(TrackField::Name, "Only")]),
            TrackRecord::new(),
        ];
        let output = render_playlist(&tracks, &config()).unwrap();

        assert_eq!(output.matches("<track>").count(), 1);
        assert!(!output.contains("<track/>"));
    }

    #[test]
    fn test_escapes_markup() {
        let tracks = vec![track(&[(TrackField::Artist, "Simon & Garfunkel <live>")])];
        let output = render_playlist(&tracks, &config()).unwrap();

        assert!(output.contains("<creator>Simon &amp; Garfunkel &lt;live&gt;</creator>"));
    }

    #[test]
    fn test_empty_value_is_self_closed() {
        let tracks = vec![track(&[(TrackField::Name, "X"), (TrackField::Album, "")])];
        let output = render_playlist(&tracks, &config()).unwrap();

        assert!(output.contains("<album/>"));
    }

    #[test]
    fn test_control_character_is_rejected() {
        let tracks = vec![track(&[(TrackField::Name, "bad\u{1}name")])];

        match render_playlist(&tracks, &config()) {
            Err(SerializeError::InvalidCharacter { field, codepoint }) => {
                assert_eq!(field, "title");
                assert_eq!(codepoint, 1);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_carriage_returns_are_normalized() {
        let tracks = vec![track(&[
            (TrackField::Name, "two\r\nlines"),
            (TrackField::Album, "classic\rmac"),
        ])];
        let output = render_playlist(&tracks, &config()).unwrap();

        assert!(!output.contains('\r'));
        assert!(output.contains("<title>two&#10;lines</title>"));
        assert!(output.contains("<album>classic&#10;mac</album>"));
    }

    #[test]
    fn test_multiline_value_stays_on_one_line() {
        let tracks = vec![track(&[(TrackField::Name, "a\n\nb\n")])];
        let output = render_playlist(&tracks, &config()).unwrap();

        assert!(output.contains("<title>a&#10;&#10;b&#10;</title>"));
        assert!(output.lines().all(|line| !line.trim().is_empty()));
        assert_eq!(output.lines().count(), 8);
    }

    #[test]
    fn test_location_without_file_name_is_self_closed() {
        let tracks = vec![
            track(&[(TrackField::Name, "A"), (TrackField::Location, "")]),
            track(&[
                (TrackField::Name, "B"),
                (TrackField::Location, "file://localhost/Users/x/"),
            ]),
        ];
        let output = render_playlist(&tracks, &config()).unwrap();

        assert_eq!(output.matches("<location/>").count(), 2);
        assert!(!output.contains("/music/<"));
    }

    #[test]
    fn test_output_is_deterministic() {
        let tracks = vec![
            track(&[(TrackField::Name, "A"), (TrackField::Location, "file://localhost/a.mp3")]),
            track(&[(TrackField::Name, "B")]),
        ];

        assert_eq!(
            render_playlist(&tracks, &config()).unwrap(),
            render_playlist(&tracks, &config()).unwrap()
        );
    }
}
