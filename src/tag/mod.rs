// Copyright (c) 2022 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Tag keys and their mapping to ID3v2.4 frames.
//!
//! See <https://id3.org/id3v2.4.0-frames> for the frame definitions.

mod id3;

pub use self::id3::build_frame;

use std::fmt;
use std::str::FromStr;

/// Frame identifier of the free-form user-defined text frame.
///
/// This frame is a text frame, but its values are never joined.
pub const FREE_FORM_FRAME_ID: &str = "TXXX";

/// Separator for multiple values in a single ID3v2.4 text frame.
pub const NULL_BYTE: char = '\0';

/// The kind of frame a tag key maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    /// A text information frame (`T???`), which carries free text.
    Text,
    /// A URL link frame (`W???`), which carries a single URI.
    Url,
    /// Any other frame, which cannot be constructed from a plain value.
    Unsupported,
}

/// A tag key describes the kind of information in a generic, format-independent way.
///
/// Several keys may share a single frame. For example, [`TagKey::TrackNumber`] and
/// [`TagKey::TotalTracks`] are both stored in `TRCK`, separated by `/` (e.g. `4/9`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TagKey {
    /// Track Title.
    Title,
    /// International Standard Recording Code.
    Isrc,
    /// Track length in milliseconds.
    Length,
    /// Release Year.
    Date,
    /// Track number on the disc.
    TrackNumber,
    /// Total tracks on this disc.
    TotalTracks,
    /// Track Title’s Sort Name.
    TitleSortOrder,
    /// Encoder Settings used.
    EncodingSettings,
    /// Used for information directly related to the contents title.
    Subtitle,
    /// Title of the disc.
    SetSubtitle,
    /// Release Date.
    ReleaseDate,
    /// Recording dates (free-form).
    RecordingDates,
    /// Official publisher webpage.
    PublisherUrl,
    /// Release Record Label Name(s).
    Publisher,
    /// Rating of the track.
    Rating,
    /// Disc number.
    DiscNumber,
    /// Movement Count.
    MovementCount,
    /// Total number of discs in this release.
    TotalDiscs,
    /// The original release date.
    OriginalReleaseDate,
    /// Performer(s) of the original recording.
    OriginalArtist,
    /// Release title of the original recording.
    OriginalAlbum,
    /// Media type.
    MediaType,
    /// Lyricist Name(s).
    Lyricist,
    /// Writer Name(s).
    Writer,
    /// Track Artist Name(s).
    Artist,
    /// Lyric language as per ISO 639-2.
    Language,
    /// 1 for Various Artist albums, otherwise 0 (compatible with iTunes).
    ItunesCompilation,
    /// Remixer Name(s).
    RemixedBy,
    /// Internet radio station owner.
    RadioStationOwner,
    /// Internet radio station name.
    RadioStation,
    /// Initial key of the track.
    InitialKey,
    /// File owner/licensee.
    Owner,
    /// Encoded by (person or organization).
    EncodedBy,
    /// Copyright message.
    Copyright,
    /// Genre Name(s) of the track.
    Genre,
    /// Content Group.
    Grouping,
    /// Conductor Name(s).
    Conductor,
    /// Composer Sort Name.
    ComposerSortOrder,
    /// Composer Name(s).
    Composer,
    /// Beats per minute of the track.
    Bpm,
    /// Artist(s) primarily credited on the release.
    AlbumArtist,
    /// Band/orchestra/accompaniment.
    Band,
    /// Track Artist Sort Name.
    ArtistSortOrder,
    /// Title of the release.
    Album,
    /// Release Title’s Sort Name.
    AlbumSortOrder,
    /// Release Artist’s Sort Name (e.g.: “Beatles, The”).
    AlbumArtistSortOrder,
    /// Time at which the file was tagged.
    TaggingTime,
    /// Official audio source webpage.
    SourceWebpageUrl,
    /// Official audio file webpage.
    FileWebpageUrl,
    /// Official internet radio station homepage.
    InternetRadioWebpageUrl,
    /// Official artist/performer webpage.
    ArtistWebpageUrl,
    /// Copyright/legal information.
    CopyrightUrl,
    /// Commercial information.
    CommercialInformationUrl,
    /// Payment.
    PaymentUrl,
    /// Movement Number.
    MovementIndex,
    /// Movement.
    MovementName,
    /// Unsynchronised lyrics.
    UnsyncedLyrics,
    /// Comment.
    Comment,
}

/// The static definition of a [`TagKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagDefinition {
    /// The key this definition belongs to.
    pub key: TagKey,
    /// Canonical name of the key, as used in raw metadata dictionaries.
    pub name: &'static str,
    /// The 4-character ID3v2.4 frame identifier.
    pub frame_id: &'static str,
    /// The kind of frame the key maps to.
    pub kind: FrameKind,
}

/// Shorthand for building the [`TAG_DEFINITIONS`] table.
const fn definition(
    key: TagKey,
    name: &'static str,
    frame_id: &'static str,
    kind: FrameKind,
) -> TagDefinition {
    TagDefinition {
        key,
        name,
        frame_id,
        kind,
    }
}

/// Definitions of all tag keys, in the declaration order of [`TagKey`].
pub const TAG_DEFINITIONS: [TagDefinition; 58] = {
    use FrameKind::{Text, Unsupported, Url};
    [
        definition(TagKey::Title, "TITLE", "TIT2", Text),
        definition(TagKey::Isrc, "ISRC", "TSRC", Text),
        definition(TagKey::Length, "LENGTH", "TLEN", Text),
        definition(TagKey::Date, "DATE", "TYER", Text),
        definition(TagKey::TrackNumber, "TRACKNUMBER", "TRCK", Text),
        definition(TagKey::TotalTracks, "TOTALTRACKS", "TRCK", Text),
        definition(TagKey::TitleSortOrder, "TITLESORTORDER", "TSOT", Text),
        definition(TagKey::EncodingSettings, "ENCODING_SETTINGS", "TSSE", Text),
        definition(TagKey::Subtitle, "SUBTITLE", "TIT3", Text),
        definition(TagKey::SetSubtitle, "SET_SUBTITLE", "TSST", Text),
        definition(TagKey::ReleaseDate, "RELEASE_DATE", "TDRL", Text),
        definition(TagKey::RecordingDates, "RECORDING_DATES", "TXXX", Text),
        definition(TagKey::PublisherUrl, "PUBLISHER_URL", "WPUB", Url),
        definition(TagKey::Publisher, "PUBLISHER", "TPUB", Text),
        definition(TagKey::Rating, "RATING", "POPM", Unsupported),
        definition(TagKey::DiscNumber, "DISCNUMBER", "TPOS", Text),
        definition(TagKey::MovementCount, "MOVEMENT_COUNT", "MVIN", Unsupported),
        definition(TagKey::TotalDiscs, "TOTALDISCS", "TPOS", Text),
        definition(TagKey::OriginalReleaseDate, "ORIGINAL_RELEASE_DATE", "TDOR", Text),
        definition(TagKey::OriginalArtist, "ORIGINAL_ARTIST", "TOPE", Text),
        definition(TagKey::OriginalAlbum, "ORIGINAL_ALBUM", "TOAL", Text),
        definition(TagKey::MediaType, "MEDIA_TYPE", "TMED", Text),
        definition(TagKey::Lyricist, "LYRICIST", "TEXT", Text),
        definition(TagKey::Writer, "WRITER", "TEXT", Text),
        definition(TagKey::Artist, "ARTIST", "TPE1", Text),
        definition(TagKey::Language, "LANGUAGE", "TLAN", Text),
        definition(TagKey::ItunesCompilation, "ITUNESCOMPILATION", "TCMP", Text),
        definition(TagKey::RemixedBy, "REMIXED_BY", "TPE4", Text),
        definition(TagKey::RadioStationOwner, "RADIO_STATION_OWNER", "TRSO", Text),
        definition(TagKey::RadioStation, "RADIO_STATION", "TRSN", Text),
        definition(TagKey::InitialKey, "INITIAL_KEY", "TKEY", Text),
        definition(TagKey::Owner, "OWNER", "TOWN", Text),
        definition(TagKey::EncodedBy, "ENCODED_BY", "TENC", Text),
        definition(TagKey::Copyright, "COPYRIGHT", "TCOP", Text),
        definition(TagKey::Genre, "GENRE", "TCON", Text),
        definition(TagKey::Grouping, "GROUPING", "TIT1", Text),
        definition(TagKey::Conductor, "CONDUCTOR", "TPE3", Text),
        definition(TagKey::ComposerSortOrder, "COMPOSERSORTORDER", "TSOC", Text),
        definition(TagKey::Composer, "COMPOSER", "TCOM", Text),
        definition(TagKey::Bpm, "BPM", "TBPM", Text),
        definition(TagKey::AlbumArtist, "ALBUM_ARTIST", "TPE2", Text),
        definition(TagKey::Band, "BAND", "TPE2", Text),
        definition(TagKey::ArtistSortOrder, "ARTISTSORTORDER", "TSOP", Text),
        definition(TagKey::Album, "ALBUM", "TALB", Text),
        definition(TagKey::AlbumSortOrder, "ALBUMSORTORDER", "TSOA", Text),
        definition(TagKey::AlbumArtistSortOrder, "ALBUMARTISTSORTORDER", "TSO2", Text),
        definition(TagKey::TaggingTime, "TAGGING_TIME", "TDTG", Text),
        definition(TagKey::SourceWebpageUrl, "SOURCE_WEBPAGE_URL", "WOAS", Url),
        definition(TagKey::FileWebpageUrl, "FILE_WEBPAGE_URL", "WOAF", Url),
        definition(TagKey::InternetRadioWebpageUrl, "INTERNET_RADIO_WEBPAGE_URL", "WORS", Url),
        definition(TagKey::ArtistWebpageUrl, "ARTIST_WEBPAGE_URL", "WOAR", Url),
        definition(TagKey::CopyrightUrl, "COPYRIGHT_URL", "WCOP", Url),
        definition(TagKey::CommercialInformationUrl, "COMMERCIAL_INFORMATION_URL", "WCOM", Url),
        definition(TagKey::PaymentUrl, "PAYMENT_URL", "WPAY", Url),
        definition(TagKey::MovementIndex, "MOVEMENT_INDEX", "MVIN", Unsupported),
        definition(TagKey::MovementName, "MOVEMENT_NAME", "MVNM", Unsupported),
        definition(TagKey::UnsyncedLyrics, "UNSYNCED_LYRICS", "USLT", Unsupported),
        definition(TagKey::Comment, "COMMENT", "COMM", Unsupported),
    ]
};

impl TagKey {
    /// Yields all tag keys.
    pub fn all() -> impl Iterator<Item = TagKey> {
        TAG_DEFINITIONS.iter().map(|definition| definition.key)
    }

    /// The static definition of this key.
    #[must_use]
    pub fn definition(self) -> &'static TagDefinition {
        &TAG_DEFINITIONS[self as usize]
    }

    /// Canonical name of this key (e.g. `ARTIST`).
    #[must_use]
    pub fn name(self) -> &'static str {
        self.definition().name
    }

    /// The 4-character ID3v2.4 frame identifier (e.g. `TPE1`).
    #[must_use]
    pub fn frame_id(self) -> &'static str {
        self.definition().frame_id
    }

    /// The kind of frame this key maps to.
    #[must_use]
    pub fn kind(self) -> FrameKind {
        self.definition().kind
    }

    /// Returns `true` if multiple values of this key are joined with a null byte.
    ///
    /// ID3v2.4 allows multiple values in all text frames except the free-form `TXXX` frame.
    #[must_use]
    pub fn joins_values(self) -> bool {
        self.kind() == FrameKind::Text && self.frame_id() != FREE_FORM_FRAME_ID
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TagKey {
    type Err = crate::Error;

    /// Look up a tag key by its canonical name (case-insensitive).
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        TAG_DEFINITIONS
            .iter()
            .find(|definition| definition.name.eq_ignore_ascii_case(name.trim()))
            .map(|definition| definition.key)
            .ok_or_else(|| crate::Error::UnknownTagKey(name.to_string()))
    }
}

/// Find the kind of frame for a frame identifier.
///
/// Returns [`FrameKind::Unsupported`] for identifiers that no tag key maps to.
#[must_use]
pub fn kind_of_frame(frame_id: &str) -> FrameKind {
    TAG_DEFINITIONS
        .iter()
        .find(|definition| definition.frame_id == frame_id)
        .map_or(FrameKind::Unsupported, |definition| definition.kind)
}
