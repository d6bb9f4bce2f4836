// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Albums.

use super::{
    overwrite, DatabaseObject, MetadataAttribute, MusicObject, ObjectId, ObjectKind,
    OptionsAttribute, SourceAttribute,
};
use crate::collection::{Collection, CollectionItem};
use crate::metadata::{Metadata, MetadataValue};
use crate::object::{Artist, Label, Song, Source};
use crate::tag::TagKey;
use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Release status of an album.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlbumStatus {
    /// Official release.
    Official,
    /// Promotional release.
    Promotional,
    /// Unofficial release.
    Bootleg,
    /// Release that was withdrawn by the artist or label.
    Withdrawn,
    /// Release that was planned, but never happened.
    Cancelled,
    /// Not released yet.
    Unreleased,
}

/// Type of an album.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlbumType {
    /// A regular album.
    #[serde(rename = "Studio Album")]
    Studio,
    /// A single.
    #[serde(rename = "Single")]
    Single,
    /// An extended play.
    #[serde(rename = "EP")]
    Ep,
    /// A recording of a live performance.
    #[serde(rename = "Live Album")]
    Live,
    /// A compilation of songs from other releases.
    #[serde(rename = "Compilation Album")]
    Compilation,
    /// A demo recording.
    #[serde(rename = "Demo")]
    Demo,
    /// Anything else.
    #[serde(rename = "Other")]
    Other,
}

impl AlbumType {
    /// The display name, which is also used in paths.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Studio => "Studio Album",
            Self::Single => "Single",
            Self::Ep => "EP",
            Self::Live => "Live Album",
            Self::Compilation => "Compilation Album",
            Self::Demo => "Demo",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for AlbumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An album.
#[derive(Debug, Clone, Default)]
pub struct Album {
    /// Stable identifier.
    id: ObjectId,
    /// The title.
    pub title: Option<String>,
    /// The record label.
    pub label: Option<Label>,
    /// The release status.
    pub status: Option<AlbumStatus>,
    /// The type.
    pub album_type: Option<AlbumType>,
    /// Language as per ISO 639-2.
    pub language: Option<String>,
    /// The release date.
    pub date: Option<Timestamp>,
    /// Country of release.
    pub country: Option<String>,
    /// Barcode (EAN/UPC).
    pub barcode: Option<String>,
    /// Whether this is a split release of several artists.
    pub is_split: bool,
    /// Position in the artist's discography.
    pub albumsort: Option<u32>,
    /// The songs on this album.
    pub tracklist: Collection<Song>,
    /// The artists primarily credited on this album.
    pub artists: Collection<Artist>,
    /// Where the album was found.
    pub sources: Collection<Source>,
    /// Whether this album was constructed on the fly and should not be persisted.
    pub dynamic: bool,
}

impl Album {
    /// Create an album with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Returns `true` if this is a compilation album.
    #[must_use]
    pub fn is_compilation(&self) -> bool {
        self.album_type == Some(AlbumType::Compilation)
    }
}

impl DatabaseObject for Album {
    const KIND: ObjectKind = ObjectKind::Album;

    fn id(&self) -> ObjectId {
        self.id
    }

    fn flat_copy(&self) -> Self {
        Self {
            id: self.id,
            title: self.title.clone(),
            label: self.label.as_ref().map(Label::flat_copy),
            status: self.status,
            album_type: self.album_type,
            language: self.language.clone(),
            date: self.date,
            country: self.country.clone(),
            barcode: self.barcode.clone(),
            is_split: self.is_split,
            albumsort: self.albumsort,
            tracklist: Collection::new(),
            artists: Collection::new(),
            sources: self.sources.shallow_copy(),
            dynamic: self.dynamic,
        }
    }
}

impl CollectionItem for Album {
    fn mapping_attribute(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn merge(&mut self, other: Self) {
        overwrite(&mut self.title, other.title);
        match (&mut self.label, other.label) {
            (Some(label), Some(other_label)) => label.merge(other_label),
            (label, other_label) => overwrite(label, other_label),
        }
        overwrite(&mut self.status, other.status);
        overwrite(&mut self.album_type, other.album_type);
        overwrite(&mut self.language, other.language);
        overwrite(&mut self.date, other.date);
        overwrite(&mut self.country, other.country);
        overwrite(&mut self.barcode, other.barcode);
        overwrite(&mut self.albumsort, other.albumsort);
        self.is_split |= other.is_split;
        self.tracklist.extend(other.tracklist);
        self.artists.extend(other.artists);
        self.sources.extend(other.sources);
        self.dynamic &= other.dynamic;
    }
}

impl SourceAttribute for Album {
    fn sources(&self) -> &Collection<Source> {
        &self.sources
    }
}

impl MetadataAttribute for Album {
    fn metadata(&self) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.set(
            TagKey::Album,
            [self.title.as_deref().map(MetadataValue::from)],
            true,
        );
        if let Some(label) = &self.label {
            metadata.merge(&label.metadata());
        }
        metadata.set(
            TagKey::ReleaseDate,
            [self.date.map(MetadataValue::from)],
            true,
        );
        metadata.set(
            TagKey::Language,
            [self.language.as_deref().map(MetadataValue::from)],
            true,
        );
        metadata.set(
            TagKey::AlbumArtist,
            self.artists
                .iter()
                .filter_map(|artist| artist.name.as_deref())
                .map(MetadataValue::from),
            true,
        );
        metadata.set(
            TagKey::ItunesCompilation,
            [self.is_compilation().then(|| MetadataValue::from("1"))],
            true,
        );
        metadata.merge(&self.source_metadata());
        metadata
    }
}

impl OptionsAttribute for Album {
    fn options(&self) -> Vec<MusicObject> {
        let mut options: Vec<MusicObject> = self.artists.flat_objects().collect();
        options.push(self.flat_copy().into());
        options.extend(self.tracklist.flat_objects());
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::SourcePage;

    fn vice_versa() -> Album {
        let mut album = Album::new("Vice Versa");
        album.label = Some(Label::new("Sony Music Latin"));
        album.date = Some(Timestamp::new().with_year(2021).with_month(6).with_day(25));
        album.language = Some("spa".to_string());
        album.album_type = Some(AlbumType::Studio);
        let _ = album.artists.append(Artist::new("Rauw Alejandro"));
        let _ = album.tracklist.append(Song::new("Todo de Ti"));
        let _ = album.tracklist.append(Song::new("Sexo Virtual"));
        album
    }

    #[test]
    fn test_metadata() {
        let metadata = vice_versa().metadata();
        assert_eq!(metadata.resolve(TagKey::Album).as_deref(), Some("Vice Versa"));
        assert_eq!(
            metadata.resolve(TagKey::Publisher).as_deref(),
            Some("Sony Music Latin")
        );
        assert_eq!(
            metadata.resolve(TagKey::ReleaseDate).as_deref(),
            Some("2021-06-25")
        );
        assert_eq!(metadata.resolve(TagKey::Language).as_deref(), Some("spa"));
        assert_eq!(
            metadata.resolve(TagKey::AlbumArtist).as_deref(),
            Some("Rauw Alejandro")
        );
        assert!(!metadata.contains(TagKey::ItunesCompilation));
    }

    #[test]
    fn test_metadata_skips_release_date_without_year() {
        let mut album = vice_versa();
        album.date = Some(Timestamp::strptime("06-25", "%m-%d").unwrap());
        let mut metadata = album.metadata();
        assert!(!metadata.contains(TagKey::ReleaseDate));
        assert!(metadata
            .to_frames()
            .unwrap()
            .iter()
            .all(|(frame_id, _)| *frame_id != "TDRL"));
    }

    #[test]
    fn test_metadata_includes_label_sources() {
        let mut album = vice_versa();
        if let Some(label) = album.label.as_mut() {
            let _ = label.sources.append(Source::new(
                SourcePage::Bandcamp,
                "https://sonymusiclatin.bandcamp.com/",
            ));
        }
        let metadata = album.metadata();
        assert_eq!(
            metadata.resolve(TagKey::Publisher).as_deref(),
            Some("Sony Music Latin")
        );
        assert_eq!(
            metadata.resolve(TagKey::PublisherUrl).as_deref(),
            Some("https://sonymusiclatin.bandcamp.com/")
        );
    }

    #[test]
    fn test_compilation_metadata() {
        let mut album = Album::new("Greatest Hits");
        album.album_type = Some(AlbumType::Compilation);
        let _ = album.artists.append(Artist::new("Rauw Alejandro"));
        let _ = album.artists.append(Artist::new("Shakira"));
        let _ = album.sources.append(
            Source::new(SourcePage::Deezer, "https://www.deezer.com/album/1").with_metadata(
                Metadata::from_raw(&serde_json::json!({"GENRE": ["Latin"]})).unwrap(),
            ),
        );
        let metadata = album.metadata();
        assert_eq!(
            metadata.resolve(TagKey::AlbumArtist).as_deref(),
            Some("Rauw Alejandro\0Shakira")
        );
        assert_eq!(
            metadata.resolve(TagKey::ItunesCompilation).as_deref(),
            Some("1")
        );
        assert_eq!(metadata.resolve(TagKey::Genre).as_deref(), Some("Latin"));
    }

    #[test]
    fn test_options() {
        let album = vice_versa();
        let options = album.options();
        let kinds: Vec<_> = options.iter().map(MusicObject::kind).collect();
        assert_eq!(
            kinds,
            [
                ObjectKind::Artist,
                ObjectKind::Album,
                ObjectKind::Song,
                ObjectKind::Song
            ]
        );
        assert_eq!(options[1].id(), album.id());
        let MusicObject::Album(flat) = &options[1] else {
            panic!("expected an album");
        };
        assert!(flat.tracklist.is_empty());
        assert!(flat.artists.is_empty());
    }

    #[test]
    fn test_merge() {
        let mut album = vice_versa();
        let mut other = Album::new("vice versa");
        other.country = Some("PR".to_string());
        other.dynamic = true;
        let _ = other.tracklist.append(Song::new("Todo De Ti"));
        let _ = other.tracklist.append(Song::new("Desesperados"));
        album.merge(other);
        assert_eq!(album.country.as_deref(), Some("PR"));
        assert_eq!(album.title.as_deref(), Some("vice versa"));
        assert_eq!(album.tracklist.len(), 3);
        assert!(!album.dynamic);
    }

    #[test]
    fn test_album_type_names() {
        assert_eq!(AlbumType::Compilation.to_string(), "Compilation Album");
        let album_type: AlbumType = serde_json::from_str("\"Live Album\"").unwrap();
        assert_eq!(album_type, AlbumType::Live);
    }
}
