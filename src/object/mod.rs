// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Music entities and their relationships.
//!
//! Every entity has a stable [`ObjectId`] that is assigned on construction and used for
//! equality. Relationships are plain owned values: when an entity is linked to another one, a
//! copy is stored, so that later mutations of the original do not leak into the graph.

mod album;
mod artist;
mod label;
mod lyrics;
mod song;
mod source;
mod target;

pub use self::album::{Album, AlbumStatus, AlbumType};
pub use self::artist::{Artist, FEATURE_ALBUM_TITLE};
pub use self::label::Label;
pub use self::lyrics::Lyrics;
pub use self::song::Song;
pub use self::source::{Source, SourcePage};
pub use self::target::Target;

use crate::collection::Collection;
use crate::metadata::Metadata;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identifier of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(Uuid);

impl ObjectId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// The type of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// A [`Song`].
    Song,
    /// An [`Album`].
    Album,
    /// An [`Artist`].
    Artist,
    /// A [`Lyrics`] text.
    Lyrics,
    /// A record [`Label`].
    Label,
    /// A [`Source`].
    Source,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Song => "song",
            Self::Album => "album",
            Self::Artist => "artist",
            Self::Lyrics => "lyrics",
            Self::Label => "label",
            Self::Source => "source",
        };
        f.write_str(name)
    }
}

/// An entity of any type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MusicObject {
    /// A song.
    Song(Song),
    /// An album.
    Album(Album),
    /// An artist.
    Artist(Artist),
    /// Lyrics.
    Lyrics(Lyrics),
    /// A record label.
    Label(Label),
    /// A source.
    Source(Source),
}

impl MusicObject {
    /// The type of the wrapped entity.
    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Song(_) => ObjectKind::Song,
            Self::Album(_) => ObjectKind::Album,
            Self::Artist(_) => ObjectKind::Artist,
            Self::Lyrics(_) => ObjectKind::Lyrics,
            Self::Label(_) => ObjectKind::Label,
            Self::Source(_) => ObjectKind::Source,
        }
    }

    /// The identifier of the wrapped entity.
    #[must_use]
    pub fn id(&self) -> ObjectId {
        match self {
            Self::Song(song) => song.id(),
            Self::Album(album) => album.id(),
            Self::Artist(artist) => artist.id(),
            Self::Lyrics(lyrics) => lyrics.id(),
            Self::Label(label) => label.id(),
            Self::Source(source) => source.id(),
        }
    }

    /// A short human-readable name of the wrapped entity (title, name, text or URL).
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Song(song) => song.title.as_deref(),
            Self::Album(album) => album.title.as_deref(),
            Self::Artist(artist) => artist.name.as_deref(),
            Self::Lyrics(lyrics) => lyrics.text.as_deref(),
            Self::Label(label) => label.name.as_deref(),
            Self::Source(source) => Some(source.url.as_str()),
        }
    }
}

impl fmt::Display for MusicObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind(), self.name().unwrap_or("<unnamed>"))
    }
}

/// Implements the conversions to and from [`MusicObject`] and identity-based equality for an
/// entity type.
macro_rules! impl_music_object {
    ($ty:ident) => {
        impl From<$ty> for MusicObject {
            fn from(value: $ty) -> Self {
                Self::$ty(value)
            }
        }

        impl TryFrom<MusicObject> for $ty {
            type Error = MusicObject;

            fn try_from(object: MusicObject) -> Result<Self, Self::Error> {
                match object {
                    MusicObject::$ty(value) => Ok(value),
                    other => Err(other),
                }
            }
        }

        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.id() == other.id()
            }
        }

        impl Eq for $ty {}
    };
}

impl_music_object!(Song);
impl_music_object!(Album);
impl_music_object!(Artist);
impl_music_object!(Lyrics);
impl_music_object!(Label);
impl_music_object!(Source);

/// Identity of an entity.
pub trait DatabaseObject {
    /// The type of this entity.
    const KIND: ObjectKind;

    /// The stable identifier.
    fn id(&self) -> ObjectId;

    /// The type of this entity.
    fn kind(&self) -> ObjectKind {
        Self::KIND
    }

    /// A copy with the same identity and scalar fields, but without relationships to other
    /// entities.
    #[must_use]
    fn flat_copy(&self) -> Self
    where
        Self: Sized;
}

/// An entity that carries provenance records.
pub trait SourceAttribute {
    /// The sources of this entity.
    fn sources(&self) -> &Collection<Source>;

    /// Metadata that links this entity to one of its sources (e.g. the artist webpage).
    fn source_link_metadata(&self, _source: &Source) -> Metadata {
        Metadata::new()
    }

    /// The merged metadata of all sources: the raw dictionary each source contributed, followed
    /// by the link metadata for that source.
    fn source_metadata(&self) -> Metadata {
        let mut metadata = Metadata::new();
        for source in self.sources() {
            metadata.merge(&source.metadata);
            metadata.merge(&self.source_link_metadata(source));
        }
        metadata
    }
}

/// An entity that contributes to the tag set of a song.
pub trait MetadataAttribute {
    /// Assemble the metadata of this entity, including the metadata of its sources and related
    /// entities.
    fn metadata(&self) -> Metadata;
}

/// An entity that offers related entities for selection.
pub trait OptionsAttribute {
    /// Flat copies of this entity and the related entities, in display order.
    fn options(&self) -> Vec<MusicObject>;
}

/// Replace the value in `slot` if `value` is present.
pub(crate) fn overwrite<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}
