// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Provenance records.

use super::{DatabaseObject, ObjectId, ObjectKind};
use crate::collection::CollectionItem;
use crate::metadata::Metadata;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A site that entities can be collected from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourcePage {
    /// YouTube.
    Youtube,
    /// Musify.
    Musify,
    /// Encyclopaedia Metallum.
    EncyclopaediaMetallum,
    /// Spotify.
    Spotify,
    /// Bandcamp.
    Bandcamp,
    /// Deezer.
    Deezer,
    /// Genius.
    Genius,
    /// MusicBrainz.
    #[serde(rename = "musicbrainz")]
    MusicBrainz,
    /// Entered by hand.
    #[default]
    Manual,
}

impl SourcePage {
    /// All sites with their host names.
    const HOSTS: [(SourcePage, &'static [&'static str]); 8] = [
        (Self::Youtube, &["youtube.com", "youtu.be"]),
        (Self::Musify, &["musify.club"]),
        (Self::EncyclopaediaMetallum, &["metal-archives.com"]),
        (Self::Spotify, &["spotify.com"]),
        (Self::Bandcamp, &["bandcamp.com"]),
        (Self::Deezer, &["deezer.com"]),
        (Self::Genius, &["genius.com"]),
        (Self::MusicBrainz, &["musicbrainz.org"]),
    ];

    /// The homepage of the site.
    #[must_use]
    pub fn homepage(self) -> Option<&'static str> {
        match self {
            Self::Youtube => Some("https://www.youtube.com/"),
            Self::Musify => Some("https://musify.club/"),
            Self::EncyclopaediaMetallum => Some("https://www.metal-archives.com/"),
            Self::Spotify => Some("https://open.spotify.com/"),
            Self::Bandcamp => Some("https://bandcamp.com/"),
            Self::Deezer => Some("https://www.deezer.com/"),
            Self::Genius => Some("https://genius.com/"),
            Self::MusicBrainz => Some("https://musicbrainz.org/"),
            Self::Manual => None,
        }
    }

    /// Guess the site from a URL by looking at its host. Unknown hosts yield
    /// [`SourcePage::Manual`].
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        let host = url
            .split_once("://")
            .map_or(url, |(_, rest)| rest)
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default()
            .to_lowercase();
        Self::HOSTS
            .iter()
            .find(|(_, hosts)| {
                hosts.iter().any(|candidate| {
                    host == *candidate || host.ends_with(&format!(".{candidate}"))
                })
            })
            .map_or(Self::Manual, |(page, _)| *page)
    }
}

impl fmt::Display for SourcePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Youtube => "YouTube",
            Self::Musify => "Musify",
            Self::EncyclopaediaMetallum => "Encyclopaedia Metallum",
            Self::Spotify => "Spotify",
            Self::Bandcamp => "Bandcamp",
            Self::Deezer => "Deezer",
            Self::Genius => "Genius",
            Self::MusicBrainz => "MusicBrainz",
            Self::Manual => "Manual",
        };
        f.write_str(name)
    }
}

/// A provenance record: the page an entity was found on, plus the raw metadata that page
/// contributed.
#[derive(Debug, Clone)]
pub struct Source {
    /// Stable identifier.
    id: ObjectId,
    /// The site.
    pub page: SourcePage,
    /// The URL of the entity on the site.
    pub url: String,
    /// Raw metadata collected from the page.
    pub metadata: Metadata,
}

impl Source {
    /// Create a source without metadata.
    #[must_use]
    pub fn new(page: SourcePage, url: impl Into<String>) -> Self {
        Self {
            id: ObjectId::new(),
            page,
            url: url.into(),
            metadata: Metadata::new(),
        }
    }

    /// Create a source and guess the site from the URL.
    #[must_use]
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        Self::new(SourcePage::from_url(&url), url)
    }

    /// Attach raw metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// The homepage of the site.
    #[must_use]
    pub fn homepage(&self) -> Option<&'static str> {
        self.page.homepage()
    }
}

impl DatabaseObject for Source {
    const KIND: ObjectKind = ObjectKind::Source;

    fn id(&self) -> ObjectId {
        self.id
    }

    fn flat_copy(&self) -> Self {
        self.clone()
    }
}

impl CollectionItem for Source {
    fn mapping_attribute(&self) -> Option<&str> {
        Some(&self.url)
    }

    fn merge(&mut self, other: Self) {
        if self.page == SourcePage::Manual {
            self.page = other.page;
        }
        self.metadata.merge(&other.metadata);
    }
}
