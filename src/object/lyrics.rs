// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Song lyrics.

use super::{overwrite, DatabaseObject, MetadataAttribute, ObjectId, ObjectKind, SourceAttribute};
use crate::collection::{Collection, CollectionItem};
use crate::metadata::{Metadata, MetadataValue};
use crate::object::Source;
use crate::tag::TagKey;

/// Lyrics of a song.
#[derive(Debug, Clone, Default)]
pub struct Lyrics {
    /// Stable identifier.
    id: ObjectId,
    /// The unsynchronized lyrics text.
    pub text: Option<String>,
    /// Language as per ISO 639-2.
    pub language: Option<String>,
    /// Where the lyrics were found.
    pub sources: Collection<Source>,
    /// Additional metadata that ends up in the song's tags.
    pub metadata: Metadata,
}

impl Lyrics {
    /// Create lyrics with the given text and language.
    #[must_use]
    pub fn new(text: impl Into<String>, language: Option<String>) -> Self {
        Self {
            text: Some(text.into()),
            language,
            ..Self::default()
        }
    }
}

impl DatabaseObject for Lyrics {
    const KIND: ObjectKind = ObjectKind::Lyrics;

    fn id(&self) -> ObjectId {
        self.id
    }

    fn flat_copy(&self) -> Self {
        self.clone()
    }
}

impl CollectionItem for Lyrics {
    fn mapping_attribute(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn merge(&mut self, other: Self) {
        overwrite(&mut self.text, other.text);
        overwrite(&mut self.language, other.language);
        self.sources.extend(other.sources);
        self.metadata.merge(&other.metadata);
    }
}

impl SourceAttribute for Lyrics {
    fn sources(&self) -> &Collection<Source> {
        &self.sources
    }
}

impl MetadataAttribute for Lyrics {
    fn metadata(&self) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.set(
            TagKey::UnsyncedLyrics,
            [self.text.as_deref().map(MetadataValue::from)],
            true,
        );
        metadata.merge(&self.metadata);
        metadata.merge(&self.source_metadata());
        metadata
    }
}
