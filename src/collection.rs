// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Deduplicating, ordered containers for one-to-many relationships.

use crate::object::{DatabaseObject, MusicObject, ObjectId};
use itertools::Itertools;
use std::collections::HashMap;
use std::ops::Index;

/// A key under which a collection item can be found.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MappingKey {
    /// The stable identifier of the item.
    Id(ObjectId),
    /// The normalized value of the item's mapping attribute (e.g. the title of a song).
    Attribute(String),
}

/// Normalize an attribute value for comparison.
///
/// The value is transliterated to ASCII, lower-cased and its whitespace is collapsed, so that
/// `"Te  Felicitó"` and `"te felicito"` are considered equal.
#[must_use]
pub fn normalize(value: &str) -> String {
    unidecode::unidecode(value)
        .to_lowercase()
        .split_whitespace()
        .join(" ")
}

/// An entity that can be stored in a [`Collection`].
pub trait CollectionItem:
    DatabaseObject + Clone + Into<MusicObject> + TryFrom<MusicObject, Error = MusicObject>
{
    /// The value of the attribute that identifies duplicates besides the id (e.g. the title of a
    /// song or the URL of a source).
    fn mapping_attribute(&self) -> Option<&str>;

    /// Merge another entity that describes the same thing into this one.
    fn merge(&mut self, other: Self);

    /// All keys under which this item can be found.
    fn mapping_keys(&self) -> Vec<MappingKey> {
        let mut keys = vec![MappingKey::Id(self.id())];
        if let Some(value) = self.mapping_attribute() {
            let value = normalize(value);
            if !value.is_empty() {
                keys.push(MappingKey::Attribute(value));
            }
        }
        keys
    }
}

/// An ordered collection of entities of a single type that never holds two entities which
/// describe the same thing.
///
/// Appending an entity that shares its id or mapping attribute with an existing item merges the
/// entity into that item instead.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    /// The items, in order of first insertion.
    items: Vec<T>,
    /// Maps every key to the position of the item it belongs to.
    index: HashMap<MappingKey, usize>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: CollectionItem> Collection<T> {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the lookup index after the positions of items changed.
    fn rebuild_index(&mut self) {
        self.index.clear();
        for (position, item) in self.items.iter().enumerate() {
            for key in item.mapping_keys() {
                let _ = self.index.entry(key).or_insert(position);
            }
        }
    }

    /// Position of the first item that matches any of the keys.
    fn find(&self, keys: &[MappingKey]) -> Option<usize> {
        keys.iter().filter_map(|key| self.index.get(key)).min().copied()
    }

    /// Merge items that match the item at `position` into the earlier of the two, until no item
    /// matches it anymore. Returns the final position of the merged item.
    fn absorb_collisions(&mut self, mut position: usize) -> usize {
        loop {
            let keys = self.items[position].mapping_keys();
            let collision = self.items.iter().enumerate().find_map(|(other, item)| {
                (other != position
                    && item.mapping_keys().iter().any(|key| keys.contains(key)))
                .then_some(other)
            });
            let Some(other) = collision else {
                self.rebuild_index();
                return position;
            };

            let (keep, drop) = if other < position {
                (other, position)
            } else {
                (position, other)
            };
            log::trace!("Absorbing {} {} into position {keep}", T::KIND, self.items[drop].id());
            let dropped = self.items.remove(drop);
            self.items[keep].merge(dropped);
            position = keep;
        }
    }

    /// Append an item, or merge it into the matching item if there is one.
    ///
    /// Returns the position of the item that now represents the appended entity.
    pub fn append(&mut self, item: T) -> usize {
        let keys = item.mapping_keys();
        if let Some(position) = self.find(&keys) {
            log::trace!(
                "Merging {} {} into {}",
                T::KIND,
                item.id(),
                self.items[position].id()
            );
            self.items[position].merge(item);
            return self.absorb_collisions(position);
        }

        let position = self.items.len();
        for key in keys {
            let _ = self.index.insert(key, position);
        }
        self.items.push(item);
        position
    }

    /// Append an entity of unknown type.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::TypeMismatch`] if the entity is not of the collection's element
    /// type.
    pub fn try_append(&mut self, object: MusicObject) -> crate::Result<usize> {
        let found = object.kind();
        let item = T::try_from(object).map_err(|_| crate::Error::TypeMismatch {
            expected: T::KIND,
            found,
        })?;
        Ok(self.append(item))
    }

    /// Remove the item that matches the given entity and return it.
    pub fn remove(&mut self, item: &T) -> Option<T> {
        let position = self.position(item)?;
        let removed = self.items.remove(position);
        self.rebuild_index();
        Some(removed)
    }

    /// Position of the item that matches the given entity.
    #[must_use]
    pub fn position(&self, item: &T) -> Option<usize> {
        self.find(&item.mapping_keys())
    }

    /// Returns `true` if an item matches the given entity.
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.position(item).is_some()
    }

    /// Position of the item with the given mapping attribute value (compared after
    /// normalization).
    #[must_use]
    pub fn position_by_attribute(&self, value: &str) -> Option<usize> {
        self.index
            .get(&MappingKey::Attribute(normalize(value)))
            .copied()
    }

    /// Position of the item with the given id.
    #[must_use]
    pub fn position_by_id(&self, id: ObjectId) -> Option<usize> {
        self.index.get(&MappingKey::Id(id)).copied()
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the item at the given position.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&T> {
        self.items.get(position)
    }

    /// Returns the first item.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    /// Yields the items in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Create a new collection that holds the same entities (with the same identities).
    #[must_use]
    pub fn shallow_copy(&self) -> Self {
        self.clone()
    }

    /// Yields flat copies of all items, wrapped as [`MusicObject`].
    pub fn flat_objects(&self) -> impl Iterator<Item = MusicObject> + '_ {
        self.items.iter().map(|item| item.flat_copy().into())
    }
}

impl<T: CollectionItem> Extend<T> for Collection<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            let _ = self.append(item);
        }
    }
}

impl<T: CollectionItem> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Self::new();
        collection.extend(iter);
        collection
    }
}

impl<T> Index<usize> for Collection<T> {
    type Output = T;

    fn index(&self, position: usize) -> &T {
        &self.items[position]
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
