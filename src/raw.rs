// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Raw entity descriptions, as produced by scrapers.
//!
//! A raw song looks like this:
//!
//! ```json
//! {
//!   "title": "Te Felicito",
//!   "isrc": "QM123",
//!   "main_artists": [{ "name": "Shakira" }],
//!   "album": { "title": "Las Mujeres Ya No Lloran", "date": "2024-03-22" },
//!   "sources": [
//!     { "url": "https://youtu.be/abc", "metadata": { "ARTIST": ["Rauw Alejandro"] } }
//!   ]
//! }
//! ```
//!
//! The `metadata` dictionaries are keyed by tag names and hold lists of scalars.

use crate::collection::Collection;
use crate::metadata::Metadata;
use crate::object::{
    Album, AlbumStatus, AlbumType, Artist, Label, Lyrics, Song, Source, SourcePage,
};
use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

/// Convert a list of raw descriptions into a collection.
fn collect<R, T>(raw: Vec<R>) -> crate::Result<Collection<T>>
where
    T: TryFrom<R, Error = crate::Error> + crate::collection::CollectionItem,
{
    raw.into_iter().map(<T as TryFrom<R>>::try_from).collect()
}

/// A raw source.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawSource {
    /// The site. Guessed from the URL if absent.
    pub page: Option<SourcePage>,
    /// The URL.
    pub url: String,
    /// Raw metadata dictionary.
    pub metadata: serde_json::Value,
}

impl TryFrom<RawSource> for Source {
    type Error = crate::Error;

    fn try_from(raw: RawSource) -> crate::Result<Self> {
        let page = raw.page.unwrap_or_else(|| SourcePage::from_url(&raw.url));
        let metadata = Metadata::from_raw(&raw.metadata)?;
        Ok(Source::new(page, raw.url).with_metadata(metadata))
    }
}

/// Raw lyrics.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawLyrics {
    /// The text.
    pub text: Option<String>,
    /// Language as per ISO 639-2.
    pub language: Option<String>,
    /// Sources.
    pub sources: Vec<RawSource>,
    /// Additional raw metadata.
    pub metadata: serde_json::Value,
}

impl TryFrom<RawLyrics> for Lyrics {
    type Error = crate::Error;

    fn try_from(raw: RawLyrics) -> crate::Result<Self> {
        let mut lyrics = Lyrics::default();
        lyrics.text = raw.text;
        lyrics.language = raw.language;
        lyrics.sources = collect(raw.sources)?;
        lyrics.metadata = Metadata::from_raw(&raw.metadata)?;
        Ok(lyrics)
    }
}

/// A raw artist.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawArtist {
    /// The name.
    pub name: Option<String>,
    /// Country of origin.
    pub country: Option<String>,
    /// When the artist started out.
    pub formed_in: Option<Timestamp>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Recurring topics of the lyrics.
    pub lyrical_themes: Vec<String>,
    /// Name of the record label.
    pub label: Option<String>,
    /// Sources.
    pub sources: Vec<RawSource>,
}

impl TryFrom<RawArtist> for Artist {
    type Error = crate::Error;

    fn try_from(raw: RawArtist) -> crate::Result<Self> {
        let mut artist = Artist::default();
        artist.name = raw.name;
        artist.country = raw.country;
        artist.formed_in = raw.formed_in;
        artist.notes = raw.notes;
        artist.lyrical_themes = raw.lyrical_themes;
        artist.label = raw.label.map(Label::new);
        artist.sources = collect(raw.sources)?;
        Ok(artist)
    }
}

/// A raw album.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawAlbum {
    /// The title.
    pub title: Option<String>,
    /// Name of the record label.
    pub label: Option<String>,
    /// Release status.
    pub status: Option<AlbumStatus>,
    /// Album type.
    pub album_type: Option<AlbumType>,
    /// Language as per ISO 639-2.
    pub language: Option<String>,
    /// Release date in ID3 format (e.g. `2021-06-25`).
    pub date: Option<Timestamp>,
    /// Country of release.
    pub country: Option<String>,
    /// Barcode.
    pub barcode: Option<String>,
    /// Whether this is a split release.
    pub is_split: bool,
    /// Position in the artist's discography.
    pub albumsort: Option<u32>,
    /// The other songs on the album.
    pub tracklist: Vec<RawSong>,
    /// Credited artists.
    pub artists: Vec<RawArtist>,
    /// Sources.
    pub sources: Vec<RawSource>,
}

impl TryFrom<RawAlbum> for Album {
    type Error = crate::Error;

    fn try_from(raw: RawAlbum) -> crate::Result<Self> {
        let mut album = Album::default();
        album.title = raw.title;
        album.label = raw.label.map(Label::new);
        album.status = raw.status;
        album.album_type = raw.album_type;
        album.language = raw.language;
        album.date = raw.date;
        album.country = raw.country;
        album.barcode = raw.barcode;
        album.is_split = raw.is_split;
        album.albumsort = raw.albumsort;
        album.tracklist = collect(raw.tracklist)?;
        album.artists = collect(raw.artists)?;
        album.sources = collect(raw.sources)?;
        Ok(album)
    }
}

/// A raw song.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawSong {
    /// The title.
    pub title: Option<String>,
    /// International Standard Recording Code.
    pub isrc: Option<String>,
    /// Length in milliseconds.
    pub length: Option<u64>,
    /// Track number.
    pub tracksort: Option<u32>,
    /// Disc number.
    pub discsort: Option<u32>,
    /// Genre.
    pub genre: Option<String>,
    /// MusicBrainz recording id.
    pub musicbrainz_id: Option<String>,
    /// The album. The song is linked to it.
    pub album: Option<Box<RawAlbum>>,
    /// Main artists.
    pub main_artists: Vec<RawArtist>,
    /// Featured artists.
    pub feature_artists: Vec<RawArtist>,
    /// Lyrics.
    pub lyrics: Vec<RawLyrics>,
    /// Sources.
    pub sources: Vec<RawSource>,
}

impl TryFrom<RawSong> for Song {
    type Error = crate::Error;

    fn try_from(raw: RawSong) -> crate::Result<Self> {
        let mut song = Song::default();
        song.title = raw.title;
        song.isrc = raw.isrc;
        song.length = raw.length;
        song.tracksort = raw.tracksort;
        song.discsort = raw.discsort;
        song.genre = raw.genre;
        song.musicbrainz_id = raw.musicbrainz_id;
        song.main_artists = collect(raw.main_artists)?;
        song.feature_artists = collect(raw.feature_artists)?;
        song.lyrics = collect(raw.lyrics)?;
        song.sources = collect(raw.sources)?;
        if let Some(album) = raw.album {
            let mut album = Album::try_from(*album)?;
            let _ = song.link_to_album(&mut album);
        }
        Ok(song)
    }
}

impl RawSong {
    /// Parse a raw song from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or does not describe a song.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let raw = serde_json::from_str(json)?;
        Ok(raw)
    }
}
