// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Songs.

use super::{
    overwrite, DatabaseObject, MetadataAttribute, MusicObject, ObjectId, ObjectKind,
    OptionsAttribute, SourceAttribute,
};
use crate::collection::{Collection, CollectionItem};
use crate::metadata::{Metadata, MetadataValue};
use crate::object::{Album, Artist, Lyrics, Source, Target};
use crate::tag::TagKey;
use itertools::Itertools;
use std::fmt;

/// A song.
#[derive(Debug, Clone, Default)]
pub struct Song {
    /// Stable identifier.
    id: ObjectId,
    /// The title.
    pub title: Option<String>,
    /// International Standard Recording Code.
    pub isrc: Option<String>,
    /// Length in milliseconds.
    pub length: Option<u64>,
    /// Track number on the album.
    pub tracksort: Option<u32>,
    /// Disc number.
    pub discsort: Option<u32>,
    /// The genre.
    pub genre: Option<String>,
    /// MusicBrainz recording id.
    pub musicbrainz_id: Option<String>,
    /// Where the song is downloaded to.
    pub target: Target,
    /// The lyrics.
    pub lyrics: Collection<Lyrics>,
    /// Copy of the album this song was linked to.
    album: Option<Box<Album>>,
    /// Artists primarily credited on this song.
    pub main_artists: Collection<Artist>,
    /// Featured artists.
    pub feature_artists: Collection<Artist>,
    /// Where the song was found.
    pub sources: Collection<Source>,
    /// Whether this song was constructed on the fly and should not be persisted.
    pub dynamic: bool,
}

impl Song {
    /// Create a song with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// The album this song was linked to (as it was at the time of linking).
    #[must_use]
    pub fn album(&self) -> Option<&Album> {
        self.album.as_deref()
    }

    /// Link this song to an album.
    ///
    /// If the album's tracklist holds no entry for this song yet, a flat, dynamic copy of the song
    /// is appended. Afterwards, a copy of the album is stored as this song's album. Returns the
    /// tracklist entry that represents this song.
    pub fn link_to_album<'a>(&mut self, album: &'a mut Album) -> &'a Song {
        let position = match album.tracklist.position(self) {
            Some(position) => position,
            None => {
                let mut entry = self.flat_copy();
                entry.dynamic = true;
                album.tracklist.append(entry)
            }
        };
        log::debug!(
            "Linked song {} ({}) to album {} ({}) at position {position}",
            self.title.as_deref().unwrap_or_default(),
            self.id,
            album.title.as_deref().unwrap_or_default(),
            album.id(),
        );
        self.album = Some(Box::new(album.clone()));
        &album.tracklist[position]
    }

    /// The track number as it appears in the `TRCK` frame: `n`, or `n/total` if the song is
    /// linked to an album.
    fn track_number(&self) -> Option<String> {
        let tracksort = self.tracksort?;
        Some(match &self.album {
            Some(album) => format!("{tracksort}/{}", album.tracklist.len()),
            None => tracksort.to_string(),
        })
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.title.as_deref().unwrap_or_default())?;
        if !self.main_artists.is_empty() {
            write!(
                f,
                " by {}",
                self.main_artists
                    .iter()
                    .filter_map(|artist| artist.name.as_deref())
                    .join(", ")
            )?;
        }
        Ok(())
    }
}

impl DatabaseObject for Song {
    const KIND: ObjectKind = ObjectKind::Song;

    fn id(&self) -> ObjectId {
        self.id
    }

    fn flat_copy(&self) -> Self {
        Self {
            id: self.id,
            title: self.title.clone(),
            isrc: self.isrc.clone(),
            length: self.length,
            tracksort: self.tracksort,
            discsort: self.discsort,
            genre: self.genre.clone(),
            musicbrainz_id: self.musicbrainz_id.clone(),
            target: self.target.clone(),
            lyrics: self.lyrics.shallow_copy(),
            album: None,
            main_artists: Collection::new(),
            feature_artists: Collection::new(),
            sources: self.sources.shallow_copy(),
            dynamic: self.dynamic,
        }
    }
}

impl CollectionItem for Song {
    fn mapping_attribute(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn merge(&mut self, other: Self) {
        overwrite(&mut self.title, other.title);
        overwrite(&mut self.isrc, other.isrc);
        overwrite(&mut self.length, other.length);
        overwrite(&mut self.tracksort, other.tracksort);
        overwrite(&mut self.discsort, other.discsort);
        overwrite(&mut self.genre, other.genre);
        overwrite(&mut self.musicbrainz_id, other.musicbrainz_id);
        if other.target.is_set() {
            self.target = other.target;
        }
        self.lyrics.extend(other.lyrics);
        overwrite(&mut self.album, other.album);
        self.main_artists.extend(other.main_artists);
        self.feature_artists.extend(other.feature_artists);
        self.sources.extend(other.sources);
        self.dynamic &= other.dynamic;
    }
}

impl SourceAttribute for Song {
    fn sources(&self) -> &Collection<Source> {
        &self.sources
    }

    fn source_link_metadata(&self, source: &Source) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.set(
            TagKey::FileWebpageUrl,
            [MetadataValue::from(source.url.as_str())],
            true,
        );
        metadata.set(
            TagKey::SourceWebpageUrl,
            [source.homepage().map(MetadataValue::from)],
            true,
        );
        metadata
    }
}

impl MetadataAttribute for Song {
    fn metadata(&self) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.set(
            TagKey::Title,
            [self.title.as_deref().map(MetadataValue::from)],
            true,
        );
        metadata.set(
            TagKey::Isrc,
            [self.isrc.as_deref().map(MetadataValue::from)],
            true,
        );
        metadata.set(
            TagKey::Length,
            [self.length.map(|length| MetadataValue::from(length.to_string()))],
            true,
        );
        metadata.set(
            TagKey::Genre,
            [self.genre.as_deref().map(MetadataValue::from)],
            true,
        );
        metadata.set(
            TagKey::TrackNumber,
            [self.track_number().map(MetadataValue::from)],
            true,
        );
        metadata.set(
            TagKey::DiscNumber,
            [self
                .discsort
                .map(|discsort| MetadataValue::from(discsort.to_string()))],
            true,
        );

        metadata.merge(&self.source_metadata());
        if let Some(album) = &self.album {
            metadata.merge(&album.metadata());
        }
        metadata.merge_many(self.main_artists.iter().map(Artist::metadata));
        metadata.merge_many(self.feature_artists.iter().map(Artist::metadata));
        metadata.merge_many(self.lyrics.iter().map(Lyrics::metadata));
        metadata
    }
}

impl OptionsAttribute for Song {
    fn options(&self) -> Vec<MusicObject> {
        let mut options: Vec<MusicObject> = self.main_artists.flat_objects().collect();
        if let Some(album) = &self.album {
            options.push(album.flat_copy().into());
        }
        options.push(self.flat_copy().into());
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Label, SourcePage};
    use serde_json::json;

    fn source_with_artist(page: SourcePage, url: &str, artist: &str) -> Source {
        Source::new(page, url)
            .with_metadata(Metadata::from_raw(&json!({ "ARTIST": [artist] })).unwrap())
    }

    #[test]
    fn test_source_values_are_joined() {
        let mut song = Song::new("Te Felicito");
        song.isrc = Some("QM123".to_string());
        let _ = song.sources.append(source_with_artist(
            SourcePage::Youtube,
            "https://youtu.be/abc",
            "Rauw Alejandro",
        ));
        let _ = song.sources.append(source_with_artist(
            SourcePage::Musify,
            "https://musify.club/track/1",
            "Shakira",
        ));

        let mut metadata = song.metadata();
        assert_eq!(
            metadata.resolve(TagKey::Artist).as_deref(),
            Some("Rauw Alejandro\0Shakira")
        );
        assert_eq!(metadata.resolve(TagKey::Title).as_deref(), Some("Te Felicito"));
        assert_eq!(metadata.resolve(TagKey::Isrc).as_deref(), Some("QM123"));
        assert_eq!(
            metadata.resolve(TagKey::FileWebpageUrl).as_deref(),
            Some("https://youtu.be/abc")
        );

        let frames = metadata.to_frames().unwrap();
        let (_, artist) = frames.iter().find(|(id, _)| *id == "TPE1").unwrap();
        assert_eq!(artist.content().text(), Some("Rauw Alejandro\0Shakira"));
        assert!(frames.iter().any(|(id, _)| *id == "TDTG"));
    }

    #[test]
    fn test_related_entities_are_merged_in_order() {
        let mut song = Song::new("Te Felicito");
        song.genre = Some("Reggaeton".to_string());
        song.tracksort = Some(3);
        let _ = song.main_artists.append(Artist::new("Shakira"));
        let _ = song.feature_artists.append(Artist::new("Rauw Alejandro"));
        let _ = song.lyrics.append(Lyrics::new("la la la", None));

        let mut album = Album::new("Las Mujeres Ya No Lloran");
        let _ = album.tracklist.append(Song::new("Puntería"));
        let _ = song.link_to_album(&mut album);

        let metadata = song.metadata();
        assert_eq!(metadata.resolve(TagKey::TrackNumber).as_deref(), Some("3/2"));
        assert_eq!(
            metadata.resolve(TagKey::Album).as_deref(),
            Some("Las Mujeres Ya No Lloran")
        );
        assert_eq!(
            metadata.resolve(TagKey::Artist).as_deref(),
            Some("Shakira\0Rauw Alejandro")
        );
        assert_eq!(metadata.resolve(TagKey::Genre).as_deref(), Some("Reggaeton"));
        assert!(metadata.contains(TagKey::UnsyncedLyrics));

        let keys: Vec<_> = metadata.iter().map(|(key, _)| key).collect();
        let position = |key| keys.iter().position(|k| *k == key).unwrap();
        assert!(position(TagKey::Title) < position(TagKey::Album));
        assert!(position(TagKey::Album) < position(TagKey::Artist));
        assert!(position(TagKey::Artist) < position(TagKey::UnsyncedLyrics));
    }

    #[test]
    fn test_label_sources_reach_song() {
        let mut label = Label::new("Sony Music Latin");
        let _ = label.sources.append(Source::new(
            SourcePage::Bandcamp,
            "https://sonymusiclatin.bandcamp.com/",
        ));
        let mut album = Album::new("Vice Versa");
        album.label = Some(label);

        let mut song = Song::new("Todo de Ti");
        let _ = song.link_to_album(&mut album);

        let mut metadata = song.metadata();
        assert_eq!(
            metadata.resolve(TagKey::Publisher).as_deref(),
            Some("Sony Music Latin")
        );
        let frames = metadata.to_frames().unwrap();
        let publisher_url = frames
            .iter()
            .find(|(frame_id, _)| *frame_id == "WPUB")
            .and_then(|(_, frame)| frame.content().link());
        assert_eq!(publisher_url, Some("https://sonymusiclatin.bandcamp.com/"));
    }

    #[test]
    fn test_track_number_without_album() {
        let mut song = Song::new("Te Felicito");
        song.tracksort = Some(7);
        song.discsort = Some(1);
        let metadata = song.metadata();
        assert_eq!(metadata.resolve(TagKey::TrackNumber).as_deref(), Some("7"));
        assert_eq!(metadata.resolve(TagKey::DiscNumber).as_deref(), Some("1"));
    }

    #[test]
    fn test_link_to_album_copies() {
        let mut song = Song::new("Te Felicito");
        let _ = song.main_artists.append(Artist::new("Shakira"));
        let mut album = Album::new("Las Mujeres Ya No Lloran");

        let entry = song.link_to_album(&mut album);
        assert_eq!(entry.id(), song.id());
        assert!(entry.dynamic);
        assert!(entry.main_artists.is_empty());
        assert_eq!(album.tracklist.len(), 1);
        assert_eq!(song.album().map(Album::id), Some(album.id()));
        assert_eq!(song.album().unwrap().tracklist.len(), 1);

        song.title = Some("Te Felicito (Remix)".to_string());
        assert_eq!(album.tracklist[0].title.as_deref(), Some("Te Felicito"));

        // Linking again does not add a second entry.
        let _ = song.link_to_album(&mut album);
        assert_eq!(album.tracklist.len(), 1);
    }

    #[test]
    fn test_link_to_album_uses_matching_entry() {
        let mut album = Album::new("Vice Versa");
        let _ = album.tracklist.append(Song::new("Todo de Ti"));
        let existing = album.tracklist[0].id();

        let mut song = Song::new("todo de ti");
        let entry = song.link_to_album(&mut album);
        assert_eq!(entry.id(), existing);
        assert!(!entry.dynamic);
        assert_eq!(album.tracklist.len(), 1);
    }

    #[test]
    fn test_options() {
        let mut song = Song::new("Te Felicito");
        let _ = song.main_artists.append(Artist::new("Shakira"));
        let _ = song.main_artists.append(Artist::new("Rauw Alejandro"));
        let mut album = Album::new("Las Mujeres Ya No Lloran");
        let _ = song.link_to_album(&mut album);

        let kinds: Vec<_> = song.options().iter().map(MusicObject::kind).collect();
        assert_eq!(
            kinds,
            [
                ObjectKind::Artist,
                ObjectKind::Artist,
                ObjectKind::Album,
                ObjectKind::Song
            ]
        );
    }

    #[test]
    fn test_display() {
        let mut song = Song::new("Te Felicito");
        let _ = song.main_artists.append(Artist::new("Shakira"));
        let _ = song.main_artists.append(Artist::new("Rauw Alejandro"));
        assert_eq!(song.to_string(), "\"Te Felicito\" by Shakira, Rauw Alejandro");
    }
}
