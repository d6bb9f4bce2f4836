// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Record labels.

use super::{overwrite, DatabaseObject, MetadataAttribute, ObjectId, ObjectKind, SourceAttribute};
use crate::collection::{Collection, CollectionItem};
use crate::metadata::{Metadata, MetadataValue};
use crate::object::{Album, Artist, Source};
use crate::tag::TagKey;

/// A record label.
#[derive(Debug, Clone, Default)]
pub struct Label {
    /// Stable identifier.
    id: ObjectId,
    /// The name.
    pub name: Option<String>,
    /// Albums released on this label.
    pub albums: Collection<Album>,
    /// Artists currently signed to this label.
    pub current_artists: Collection<Artist>,
    /// Where the label was found.
    pub sources: Collection<Source>,
}

impl Label {
    /// Create a label with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

impl DatabaseObject for Label {
    const KIND: ObjectKind = ObjectKind::Label;

    fn id(&self) -> ObjectId {
        self.id
    }

    fn flat_copy(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            albums: Collection::new(),
            current_artists: Collection::new(),
            sources: self.sources.shallow_copy(),
        }
    }
}

impl CollectionItem for Label {
    fn mapping_attribute(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn merge(&mut self, other: Self) {
        overwrite(&mut self.name, other.name);
        self.albums.extend(other.albums);
        self.current_artists.extend(other.current_artists);
        self.sources.extend(other.sources);
    }
}

impl SourceAttribute for Label {
    fn sources(&self) -> &Collection<Source> {
        &self.sources
    }

    fn source_link_metadata(&self, source: &Source) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.set(
            TagKey::PublisherUrl,
            [MetadataValue::from(source.url.as_str())],
            true,
        );
        metadata
    }
}

impl MetadataAttribute for Label {
    fn metadata(&self) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.set(
            TagKey::Publisher,
            [self.name.as_deref().map(MetadataValue::from)],
            true,
        );
        metadata.merge(&self.source_metadata());
        metadata
    }
}
