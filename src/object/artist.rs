// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Artists.

use super::{
    overwrite, DatabaseObject, MetadataAttribute, MusicObject, ObjectId, ObjectKind,
    OptionsAttribute, SourceAttribute,
};
use crate::collection::{Collection, CollectionItem};
use crate::metadata::{Metadata, MetadataValue};
use crate::object::{Album, AlbumType, Label, Song, Source};
use crate::tag::TagKey;
use crate::timestamp::Timestamp;

/// Title of the album built by [`Artist::feature_album`].
pub const FEATURE_ALBUM_TITLE: &str = "Feature Songs";

/// An artist or band.
#[derive(Debug, Clone, Default)]
pub struct Artist {
    /// Stable identifier.
    id: ObjectId,
    /// The name.
    pub name: Option<String>,
    /// Country of origin.
    pub country: Option<String>,
    /// When the artist started out.
    pub formed_in: Option<Timestamp>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Recurring topics of the artist's lyrics.
    pub lyrical_themes: Vec<String>,
    /// Songs by this artist.
    pub main_songs: Collection<Song>,
    /// Songs of other artists that feature this artist.
    pub feature_songs: Collection<Song>,
    /// Albums by this artist.
    pub main_albums: Collection<Album>,
    /// The record label.
    pub label: Option<Label>,
    /// Where the artist was found.
    pub sources: Collection<Source>,
}

impl Artist {
    /// Create an artist with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Build a dynamic compilation album of the songs that feature this artist.
    #[must_use]
    pub fn feature_album(&self) -> Album {
        let mut album = Album::new(FEATURE_ALBUM_TITLE);
        album.album_type = Some(AlbumType::Compilation);
        album.is_split = true;
        album.dynamic = true;
        album
            .tracklist
            .extend(self.feature_songs.iter().map(Song::flat_copy));
        album
    }
}

impl DatabaseObject for Artist {
    const KIND: ObjectKind = ObjectKind::Artist;

    fn id(&self) -> ObjectId {
        self.id
    }

    fn flat_copy(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            country: self.country.clone(),
            formed_in: self.formed_in,
            notes: self.notes.clone(),
            lyrical_themes: self.lyrical_themes.clone(),
            main_songs: Collection::new(),
            feature_songs: Collection::new(),
            main_albums: Collection::new(),
            label: self.label.as_ref().map(Label::flat_copy),
            sources: self.sources.shallow_copy(),
        }
    }
}

impl CollectionItem for Artist {
    fn mapping_attribute(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn merge(&mut self, other: Self) {
        overwrite(&mut self.name, other.name);
        overwrite(&mut self.country, other.country);
        overwrite(&mut self.formed_in, other.formed_in);
        overwrite(&mut self.notes, other.notes);
        for theme in other.lyrical_themes {
            if !self.lyrical_themes.contains(&theme) {
                self.lyrical_themes.push(theme);
            }
        }
        self.main_songs.extend(other.main_songs);
        self.feature_songs.extend(other.feature_songs);
        self.main_albums.extend(other.main_albums);
        match (&mut self.label, other.label) {
            (Some(label), Some(other_label)) => label.merge(other_label),
            (label, other_label) => overwrite(label, other_label),
        }
        self.sources.extend(other.sources);
    }
}

impl SourceAttribute for Artist {
    fn sources(&self) -> &Collection<Source> {
        &self.sources
    }

    fn source_link_metadata(&self, source: &Source) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.set(
            TagKey::ArtistWebpageUrl,
            [MetadataValue::from(source.url.as_str())],
            true,
        );
        metadata
    }
}

impl MetadataAttribute for Artist {
    fn metadata(&self) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.set(
            TagKey::Artist,
            [self.name.as_deref().map(MetadataValue::from)],
            true,
        );
        metadata.merge(&self.source_metadata());
        metadata
    }
}

impl OptionsAttribute for Artist {
    fn options(&self) -> Vec<MusicObject> {
        let mut options = vec![MusicObject::from(self.flat_copy())];
        options.extend(self.main_albums.flat_objects());
        if !self.feature_songs.is_empty() {
            options.push(self.feature_album().into());
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::SourcePage;

    #[test]
    fn test_metadata() {
        let mut artist = Artist::new("Rauw Alejandro");
        let _ = artist.sources.append(Source::new(
            SourcePage::Spotify,
            "https://open.spotify.com/artist/1mcTU81TzQhprhouKaTkpq",
        ));
        let metadata = artist.metadata();
        assert_eq!(
            metadata.resolve(TagKey::Artist).as_deref(),
            Some("Rauw Alejandro")
        );
        assert_eq!(
            metadata.resolve(TagKey::ArtistWebpageUrl).as_deref(),
            Some("https://open.spotify.com/artist/1mcTU81TzQhprhouKaTkpq")
        );
    }

    #[test]
    fn test_feature_album() {
        let mut artist = Artist::new("Shakira");
        let mut song = Song::new("Te Felicito");
        let _ = song.main_artists.append(Artist::new("Rauw Alejandro"));
        let _ = artist.feature_songs.append(song.clone());

        let album = artist.feature_album();
        assert_eq!(album.title.as_deref(), Some(FEATURE_ALBUM_TITLE));
        assert!(album.dynamic);
        assert!(album.is_split);
        assert!(album.is_compilation());
        assert_eq!(album.tracklist.len(), 1);
        assert_eq!(album.tracklist[0], song);
        assert!(album.tracklist[0].main_artists.is_empty());
    }

    #[test]
    fn test_options() {
        let mut artist = Artist::new("Shakira");
        let _ = artist.main_albums.append(Album::new("El Dorado"));
        assert_eq!(artist.options().len(), 2);

        let _ = artist.feature_songs.append(Song::new("Te Felicito"));
        let options = artist.options();
        let kinds: Vec<_> = options.iter().map(MusicObject::kind).collect();
        assert_eq!(
            kinds,
            [ObjectKind::Artist, ObjectKind::Album, ObjectKind::Album]
        );
        assert_eq!(options[0].id(), artist.id());
        assert_eq!(options[2].name(), Some(FEATURE_ALBUM_TITLE));
    }

    #[test]
    fn test_merge() {
        let mut artist = Artist::new("Rauw Alejandro");
        artist.lyrical_themes = vec!["Love".to_string()];
        let mut other = Artist::new("Rauw Alejandro");
        other.country = Some("PR".to_string());
        other.lyrical_themes = vec!["Love".to_string(), "Parties".to_string()];
        artist.merge(other);
        assert_eq!(artist.country.as_deref(), Some("PR"));
        assert_eq!(artist.lyrical_themes, ["Love", "Parties"]);
    }
}
