// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Path formatting and templating.
//!
//! Templates use single braces (e.g. `{genre}/{artist}/{album}`), which are converted to
//! handlebars expressions internally.

use crate::config::DefaultValues;
use crate::object::{Album, Artist, Label, Song, Target};
use crate::Config;
use handlebars::Handlebars;
use itertools::Itertools;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Characters that are forbidden in paths on Microsoft Windows (in addition to control characters).
#[cfg(target_os = "windows")]
const ILLEGAL_PATH_CHARS: &str = r#"\/:*?"<>|"#;

/// Characters that are forbidden in paths on Unices (in addition to control characters).
#[cfg(not(target_os = "windows"))]
const ILLEGAL_PATH_CHARS: &str = "/";

/// Name of the directory template.
const PATH_TEMPLATE: &str = "path";

/// Name of the file name template.
const FILE_TEMPLATE: &str = "file";

/// Strips control characters and escapes forbidden characters.
fn escape_path_chars(data: &str) -> String {
    data.chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .filter(|c| !c.is_control())
        .map(|c| {
            if ILLEGAL_PATH_CHARS.contains(c) {
                '_'
            } else {
                c
            }
        })
        .collect::<String>()
}

/// Make a value safe for use as a single path segment.
fn sanitize(value: &str) -> String {
    escape_path_chars(value)
        .split_whitespace()
        .join(" ")
        .trim_start_matches('.')
        .trim_start()
        .to_string()
}

/// Convert `{name}` placeholders to handlebars expressions.
fn convert_template(template: &str) -> String {
    Regex::new(r"\{(\w+)\}").map_or_else(
        |_| template.to_string(),
        |re| re.replace_all(template, "{{$1}}").into_owned(),
    )
}

/// Values that can be used in a target template.
///
/// Every field is written at most once: the first non-empty value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetValues {
    /// The genre.
    pub genre: Option<String>,
    /// The record label.
    pub label: Option<String>,
    /// The artist.
    pub artist: Option<String>,
    /// The album title.
    pub album: Option<String>,
    /// The album type.
    pub album_type: Option<String>,
    /// The song title.
    pub song: Option<String>,
}

impl TargetValues {
    /// Write a sanitized value into an empty slot.
    fn fill(slot: &mut Option<String>, value: Option<&str>) {
        if slot.is_some() {
            return;
        }
        let Some(value) = value.map(sanitize) else {
            return;
        };
        if !value.is_empty() {
            *slot = Some(value);
        }
    }

    /// Assign fields from a [`Song`], its album and its first main artist.
    #[must_use]
    pub fn with_song(mut self, song: &Song) -> Self {
        Self::fill(&mut self.song, song.title.as_deref());
        Self::fill(&mut self.genre, song.genre.as_deref());
        if let Some(album) = song.album() {
            self = self.with_album(album);
        }
        if let Some(artist) = song.main_artists.first() {
            self = self.with_artist(artist);
        }
        self
    }

    /// Assign fields from an [`Album`], its first artist and its label.
    #[must_use]
    pub fn with_album(mut self, album: &Album) -> Self {
        Self::fill(&mut self.album, album.title.as_deref());
        Self::fill(
            &mut self.album_type,
            album.album_type.map(|album_type| album_type.as_str()),
        );
        if let Some(artist) = album.artists.first() {
            self = self.with_artist(artist);
        }
        if let Some(label) = &album.label {
            self = self.with_label(label);
        }
        self
    }

    /// Assign fields from an [`Artist`] and its label.
    #[must_use]
    pub fn with_artist(mut self, artist: &Artist) -> Self {
        Self::fill(&mut self.artist, artist.name.as_deref());
        if let Some(label) = &artist.label {
            self = self.with_label(label);
        }
        self
    }

    /// Assign fields from a [`Label`].
    #[must_use]
    pub fn with_label(mut self, label: &Label) -> Self {
        Self::fill(&mut self.label, label.name.as_deref());
        self
    }

    /// Fill all fields that are still empty with the configured default values.
    #[must_use]
    pub fn with_defaults(mut self, defaults: &DefaultValues) -> Self {
        Self::fill(&mut self.genre, defaults.genre.as_deref());
        Self::fill(&mut self.label, defaults.label.as_deref());
        Self::fill(&mut self.artist, defaults.artist.as_deref());
        Self::fill(&mut self.album, defaults.album.as_deref());
        Self::fill(&mut self.album_type, defaults.album_type.as_deref());
        Self::fill(&mut self.song, defaults.song.as_deref());
        self
    }

    /// The template context. Fields without a value are left out, so that referencing them in
    /// a template fails.
    fn context(&self) -> BTreeMap<&'static str, &str> {
        [
            ("genre", &self.genre),
            ("label", &self.label),
            ("artist", &self.artist),
            ("album", &self.album),
            ("album_type", &self.album_type),
            ("song", &self.song),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|value| (name, value)))
        .collect()
    }
}

/// Formatter for download targets.
#[derive(Debug)]
pub struct TargetFormatter<'a> {
    /// Registry holding the directory and file name templates.
    registry: Handlebars<'a>,
    /// Values for missing information.
    defaults: DefaultValues,
}

impl TargetFormatter<'_> {
    /// Create a new target formatter.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::TemplateInvalid`] if one of the templates cannot be parsed.
    pub fn new(config: &Config) -> crate::Result<Self> {
        let config = config.with_defaults();
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        registry.register_template_string(
            PATH_TEMPLATE,
            convert_template(config.paths.path_format.as_deref().unwrap_or_default()),
        )?;
        registry.register_template_string(
            FILE_TEMPLATE,
            convert_template(config.paths.file_format.as_deref().unwrap_or_default()),
        )?;
        Ok(Self {
            registry,
            defaults: config.defaults,
        })
    }

    /// Format a target with the given values.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::TemplateFormattingFailed`] if a template references an unknown
    /// field.
    pub fn format(&self, values: &TargetValues) -> crate::Result<Target> {
        let context = values.context();
        let path = PathBuf::from(self.registry.render(PATH_TEMPLATE, &context)?);
        let file = path.join(self.registry.render(FILE_TEMPLATE, &context)?);
        Ok(Target {
            path: Some(path),
            file: Some(file),
        })
    }

    /// Resolve the target of a song.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::TemplateFormattingFailed`] if a template references an unknown
    /// field.
    pub fn resolve(&self, song: &Song) -> crate::Result<Target> {
        let values = TargetValues::default()
            .with_song(song)
            .with_defaults(&self.defaults);
        let target = self.format(&values)?;
        log::debug!("Resolved target of {song}: {target:?}");
        Ok(target)
    }
}

/// Resolve the target of a song with the given configuration.
///
/// # Errors
///
/// Returns an error if the configured templates are invalid or reference unknown fields.
pub fn resolve_target(config: &Config, song: &Song) -> crate::Result<Target> {
    TargetFormatter::new(config)?.resolve(song)
}
