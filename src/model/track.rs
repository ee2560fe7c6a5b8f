/// Metadata fields carried over from the source library, in XSPF emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackField {
    Name,
    Artist,
    Album,
    TotalTime,
    TrackNumber,
    Location,
}

impl TrackField {
    /// All fields, in the order they appear inside an output `<track>`
    pub const ALL: [TrackField; 6] = [
        TrackField::Name,
        TrackField::Artist,
        TrackField::Album,
        TrackField::TotalTime,
        TrackField::TrackNumber,
        TrackField::Location,
    ];

    /// Look up a field by its iTunes `<key>` text
    pub fn from_itunes_key(key: &str) -> Option<Self> {
        match key {
            "Name" => Some(TrackField::Name),
            "Artist" => Some(TrackField::Artist),
            "Album" => Some(TrackField::Album),
            "Total Time" => Some(TrackField::TotalTime),
            "Track Number" => Some(TrackField::TrackNumber),
            "Location" => Some(TrackField::Location),
            _ => None,
        }
    }

    pub fn itunes_key(&self) -> &'static str {
        match self {
            TrackField::Name => "Name",
            TrackField::Artist => "Artist",
            TrackField::Album => "Album",
            TrackField::TotalTime => "Total Time",
            TrackField::TrackNumber => "Track Number",
            TrackField::Location => "Location",
        }
    }

    /// Element name used in the XSPF `<track>`
    pub fn xspf_tag(&self) -> &'static str {
        match self {
            TrackField::Name => "title",
            TrackField::Artist => "creator",
            TrackField::Album => "album",
            TrackField::TotalTime => "duration",
            TrackField::TrackNumber => "trackNum",
            TrackField::Location => "location",
        }
    }
}

/// A single track as read from a playlist export
///
/// Every field is optional; values are kept as the raw source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackRecord {
    /// Display title
    pub name: Option<String>,

    pub artist: Option<String>,

    pub album: Option<String>,

    /// Duration in milliseconds, as written by iTunes
    pub total_time: Option<String>,

    pub track_number: Option<String>,

    /// `file://localhost/...` URI, percent-encoded
    pub location: Option<String>,
}

impl TrackRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: TrackField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Store a value, replacing any earlier value for the same field
    pub fn set(&mut self, field: TrackField, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    /// True when no recognized field has been collected
    pub fn is_empty(&self) -> bool {
        TrackField::ALL.iter().all(|f| self.slot(*f).is_none())
    }

    /// Fields present on this record, in emission order
    pub fn fields(&self) -> impl Iterator<Item = (TrackField, &str)> {
        TrackField::ALL
            .into_iter()
            .filter_map(move |f| self.get(f).map(|v| (f, v)))
    }

    fn slot(&self, field: TrackField) -> &Option<String> {
        match field {
            TrackField::Name => &self.name,
            TrackField::Artist => &self.artist,
            TrackField::Album => &self.album,
            TrackField::TotalTime => &self.total_time,
            TrackField::TrackNumber => &self.track_number,
            TrackField::Location => &self.location,
        }
    }

    fn slot_mut(&mut self, field: TrackField) -> &mut Option<String> {
        match field {
            TrackField::Name => &mut self.name,
            TrackField::Artist => &mut self.artist,
            TrackField::Album => &mut self.album,
            TrackField::TotalTime => &mut self.total_time,
            TrackField::TrackNumber => &mut self.track_number,
            TrackField::Location => &mut self.location,
        }
    }
}
