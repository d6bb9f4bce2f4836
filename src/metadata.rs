// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Ordered, multi-valued metadata container.

use crate::tag::{build_frame, TagKey, NULL_BYTE};
use crate::timestamp::Timestamp;
use id3::Frame;
use itertools::Itertools;
use std::borrow::{Borrow, Cow};
use std::fmt;

/// A single metadata value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataValue {
    /// Free text.
    Text(String),
    /// A timestamp, serialized when the value is resolved.
    Timestamp(Timestamp),
}

impl MetadataValue {
    /// The string representation that ends up in the frame.
    #[must_use]
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::from(text.as_str()),
            Self::Timestamp(timestamp) => Cow::from(timestamp.serialize()),
        }
    }

    /// Convert a raw JSON scalar into a value.
    ///
    /// Returns `Ok(None)` for `null`, which is filtered out on insertion.
    fn from_raw(key: TagKey, raw: &serde_json::Value) -> crate::Result<Option<Self>> {
        match raw {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::String(text) => Ok(Some(Self::Text(text.clone()))),
            serde_json::Value::Number(number) => Ok(Some(Self::Text(number.to_string()))),
            serde_json::Value::Bool(flag) => Ok(Some(Self::Text(
                if *flag { "1" } else { "0" }.to_string(),
            ))),
            other => Err(crate::Error::InvalidValueShape {
                key: key.name(),
                found: json_type_name(other),
            }),
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<String> for MetadataValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for MetadataValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Timestamp> for MetadataValue {
    fn from(timestamp: Timestamp) -> Self {
        Self::Timestamp(timestamp)
    }
}

/// Human-readable name of a JSON value type.
fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Metadata for a single entity, keyed by ID3 frame.
///
/// Each entry holds an ordered list of values. Keys that share a frame (e.g.
/// [`TagKey::TrackNumber`] and [`TagKey::TotalTracks`]) share an entry. Entries are kept in
/// insertion order and are never empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// The entries, in insertion order. The key is the first key that was set for the frame.
    entries: Vec<(TagKey, Vec<MetadataValue>)>,
}

impl Metadata {
    /// Create an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a container from a raw dictionary as supplied by a scraper, e.g.
    /// `{"ARTIST": ["Rauw Alejandro"], "GENRE": ["Reggaeton", null]}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the dictionary is not a JSON object, if a key is not the name of a
    /// [`TagKey`], or if a value is not a list of scalars.
    pub fn from_raw(raw: &serde_json::Value) -> crate::Result<Self> {
        let mut metadata = Self::new();
        match raw {
            serde_json::Value::Null => (),
            serde_json::Value::Object(dict) => {
                for (name, values) in dict {
                    let key = name.parse::<TagKey>()?;
                    metadata.set_raw(key, values, true)?;
                }
            }
            other => {
                return Err(crate::Error::InvalidValueShape {
                    key: "metadata",
                    found: json_type_name(other),
                })
            }
        }
        Ok(metadata)
    }

    /// Position of the entry for the frame the key maps to.
    fn position(&self, key: TagKey) -> Option<usize> {
        self.entries
            .iter()
            .position(|(entry_key, _)| entry_key.frame_id() == key.frame_id())
    }

    /// Set the values for a key.
    ///
    /// Absent values and timestamps without a year are dropped. If `override_existing` is `true`, the existing values are
    /// replaced (unless no values remain after dropping absent ones), otherwise the values are
    /// appended.
    pub fn set<I>(&mut self, key: TagKey, values: I, override_existing: bool)
    where
        I: IntoIterator,
        I::Item: Into<Option<MetadataValue>>,
    {
        let values: Vec<MetadataValue> = values
            .into_iter()
            .filter_map(Into::into)
            .filter(|value| match value {
                MetadataValue::Timestamp(timestamp) => !timestamp.serialize().is_empty(),
                MetadataValue::Text(_) => true,
            })
            .collect();
        if values.is_empty() {
            return;
        }

        match self.position(key) {
            Some(index) if override_existing => self.entries[index].1 = values,
            Some(index) => self.entries[index].1.extend(values),
            None => self.entries.push((key, values)),
        }
    }

    /// Set the values for a key from a raw JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidValueShape`] if the value is not a list or if it contains
    /// nested lists or objects. In that case, the container is left unchanged.
    pub fn set_raw(
        &mut self,
        key: TagKey,
        values: &serde_json::Value,
        override_existing: bool,
    ) -> crate::Result<()> {
        let serde_json::Value::Array(values) = values else {
            return Err(crate::Error::InvalidValueShape {
                key: key.name(),
                found: json_type_name(values),
            });
        };
        let values = values
            .iter()
            .map(|value| MetadataValue::from_raw(key, value))
            .collect::<crate::Result<Vec<_>>>()?;
        self.set(key, values, override_existing);
        Ok(())
    }

    /// Get the values for a key.
    #[must_use]
    pub fn get(&self, key: TagKey) -> Option<&[MetadataValue]> {
        self.position(key)
            .map(|index| self.entries[index].1.as_slice())
    }

    /// Returns `true` if there are values for the key.
    #[must_use]
    pub fn contains(&self, key: TagKey) -> bool {
        self.position(key).is_some()
    }

    /// Remove the values for a key and return them.
    pub fn delete(&mut self, key: TagKey) -> Option<Vec<MetadataValue>> {
        self.position(key)
            .map(|index| self.entries.remove(index).1)
    }

    /// Number of entries (i.e., distinct frames).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Yields the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (TagKey, &[MetadataValue])> {
        self.entries
            .iter()
            .map(|(key, values)| (*key, values.as_slice()))
    }

    /// Append all values from another container.
    pub fn merge(&mut self, other: &Metadata) {
        for (key, values) in &other.entries {
            self.set(*key, values.iter().cloned(), false);
        }
    }

    /// Append all values from several other containers, in order.
    pub fn merge_many<I>(&mut self, others: I)
    where
        I: IntoIterator,
        I::Item: Borrow<Metadata>,
    {
        for other in others {
            self.merge(other.borrow());
        }
    }

    /// Resolve the frame value for a key.
    ///
    /// Version 2.4 of the ID3 specification allows multiple values separated by a null byte in
    /// all text frames except `TXXX`, so these values are joined. For all other frames, only the
    /// first value is returned.
    #[must_use]
    pub fn resolve(&self, key: TagKey) -> Option<String> {
        let (entry_key, values) = &self.entries[self.position(key)?];
        if entry_key.joins_values() {
            Some(
                values
                    .iter()
                    .map(MetadataValue::as_text)
                    .join(&NULL_BYTE.to_string()),
            )
        } else {
            values.first().map(|value| value.as_text().into_owned())
        }
    }

    /// Set the tagging time to the current time.
    fn stamp_tagging_time(&mut self) {
        self.set(
            TagKey::TaggingTime,
            [MetadataValue::from(Timestamp::now())],
            true,
        );
    }

    /// Build the frame for a single entry.
    fn build_entry_frame(&self, key: TagKey) -> crate::Result<(&'static str, Frame)> {
        let value = self.resolve(key).unwrap_or_default();
        build_frame(key, value).map(|frame| (key.frame_id(), frame))
    }

    /// Build the ID3 frames for all entries.
    ///
    /// This stamps the current time as the tagging time first, so it should be called exactly
    /// once per tagging run.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnsupportedTagKind`] if any entry maps to a frame that cannot be
    /// constructed. No frames are returned in that case.
    pub fn to_frames(&mut self) -> crate::Result<Vec<(&'static str, Frame)>> {
        self.stamp_tagging_time();
        self.entries
            .iter()
            .map(|(key, _)| self.build_entry_frame(*key))
            .collect()
    }

    /// Build the ID3 frames for all entries that can be constructed, skipping the others.
    ///
    /// Like [`Metadata::to_frames`], this stamps the current time as the tagging time.
    pub fn to_supported_frames(&mut self) -> Vec<(&'static str, Frame)> {
        self.stamp_tagging_time();
        self.entries
            .iter()
            .filter_map(|(key, _)| match self.build_entry_frame(*key) {
                Ok(frame) => Some(frame),
                Err(err) => {
                    log::warn!("Skipping {key}: {err}");
                    None
                }
            })
            .collect()
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, values)) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{} - [{}]",
                key.frame_id(),
                values.iter().map(|value| format!("{value:?}")).join(", ")
            )?;
        }
        Ok(())
    }
}
