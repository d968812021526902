//! Container tag reading.
//!
//! The source resolver decides once which tag family the file belongs to
//! (ID3 frames for mp3, MP4 ilst atoms for everything else); reading itself
//! goes through lofty, which maps both families onto the same item keys.
//! Missing fields fall back to literal `"Unknown <field>"` placeholders,
//! except the MP4 track number which defaults to `0` (that family stores
//! the track as a numeric tuple, so absence reads as zero).

use lofty::file::TaggedFileExt;
use lofty::tag::{Accessor, ItemKey, Tag};
use std::borrow::Cow;
use std::path::Path;

/// Which container tag schema the source file carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagFamily {
    /// ID3v2 frames (mp3).
    Id3,
    /// MP4 ilst atoms (m4a and friends).
    Mp4,
}

/// The six descriptive fields prefixed to the final transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub track_number: String,
    pub genre: String,
    pub recording_date: String,
}

impl Metadata {
    /// All-placeholder record for a file with no readable tags.
    pub fn fallback(family: TagFamily) -> Self {
        Self {
            title: "Unknown title".to_string(),
            artist: "Unknown artist".to_string(),
            album: "Unknown album".to_string(),
            track_number: match family {
                TagFamily::Id3 => "Unknown track number".to_string(),
                TagFamily::Mp4 => "0".to_string(),
            },
            genre: "Unknown genre".to_string(),
            recording_date: "Unknown recording date".to_string(),
        }
    }

    /// Read the metadata record from a source file.
    ///
    /// Never fails: unreadable containers or absent tags degrade to the
    /// placeholder record, with a warning in the run log.
    pub fn read(path: &Path, family: TagFamily) -> Self {
        let tagged = match lofty::read_from_path(path) {
            Ok(tagged) => tagged,
            Err(e) => {
                log::warn!("failed to read tags from {}: {}", path.display(), e);
                return Self::fallback(family);
            }
        };

        let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
            return Self::fallback(family);
        };

        Self {
            title: string_field(tag.title(), "title"),
            artist: string_field(tag.artist(), "artist"),
            album: string_field(tag.album(), "album"),
            track_number: track_field(tag, family),
            genre: string_field(tag.genre(), "genre"),
            recording_date: date_field(tag),
        }
    }

    /// The transcript header: one `key: value` line per field in fixed
    /// order, followed by one blank line.
    pub fn header(&self) -> String {
        format!(
            "title: {}\nartist: {}\nalbum: {}\ntrack number: {}\ngenre: {}\nrecording date: {}\n\n",
            self.title, self.artist, self.album, self.track_number, self.genre, self.recording_date
        )
    }
}

fn string_field(value: Option<Cow<'_, str>>, name: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.into_owned(),
        _ => format!("Unknown {}", name),
    }
}

fn track_field(tag: &Tag, family: TagFamily) -> String {
    match (tag.track(), family) {
        (Some(track), _) => track.to_string(),
        (None, TagFamily::Id3) => "Unknown track number".to_string(),
        (None, TagFamily::Mp4) => "0".to_string(),
    }
}

fn date_field(tag: &Tag) -> String {
    tag.get_string(&ItemKey::RecordingDate)
        .map(str::to_string)
        .or_else(|| tag.year().map(|y| y.to_string()))
        .unwrap_or_else(|| "Unknown recording date".to_string())
}
