// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Configuration utils.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Encountered when the configuration cannot be loaded or written.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration markup is malformed.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// The configuration cannot be serialized.
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Default configuration TOML string.
const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Represents a piece of configuration that can be merged with another one.
trait MergeableConfig {
    /// Merge this configuration object with another one, taking values not set in this object from
    /// the other one (if present).
    fn merge(&self, other: &Self) -> Self;
}

/// Configuration for the music directory and the layout of downloaded files.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    /// Root directory of the music library. A leading `~` is expanded.
    pub music_dir: Option<String>,
    /// Template for the directory of a song, relative to the music directory.
    pub path_format: Option<String>,
    /// Template for the file name of a song.
    pub file_format: Option<String>,
}

impl MergeableConfig for PathsConfig {
    fn merge(&self, other: &Self) -> Self {
        PathsConfig {
            music_dir: self.music_dir.clone().or_else(|| other.music_dir.clone()),
            path_format: self
                .path_format
                .clone()
                .or_else(|| other.path_format.clone()),
            file_format: self
                .file_format
                .clone()
                .or_else(|| other.file_format.clone()),
        }
    }
}

/// Values used in path templates when the corresponding information is missing.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct DefaultValues {
    /// Default genre.
    pub genre: Option<String>,
    /// Default record label.
    pub label: Option<String>,
    /// Default artist.
    pub artist: Option<String>,
    /// Default album title.
    pub album: Option<String>,
    /// Default album type.
    pub album_type: Option<String>,
    /// Default song title.
    pub song: Option<String>,
}

impl MergeableConfig for DefaultValues {
    fn merge(&self, other: &Self) -> Self {
        DefaultValues {
            genre: self.genre.clone().or_else(|| other.genre.clone()),
            label: self.label.clone().or_else(|| other.label.clone()),
            artist: self.artist.clone().or_else(|| other.artist.clone()),
            album: self.album.clone().or_else(|| other.album.clone()),
            album_type: self.album_type.clone().or_else(|| other.album_type.clone()),
            song: self.song.clone().or_else(|| other.song.clone()),
        }
    }
}

/// The main configuration struct.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Path configuration.
    #[serde(default)]
    pub paths: PathsConfig,
    /// Default values for path templates.
    #[serde(default)]
    pub defaults: DefaultValues,
}

impl MergeableConfig for Config {
    /// Merge this configuration object with another one, taking values not set in this object from
    /// the other one (if present).
    fn merge(&self, other: &Self) -> Self {
        Config {
            paths: self.paths.merge(&other.paths),
            defaults: self.defaults.merge(&other.defaults),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::load_default()
    }
}

impl Config {
    /// Load the configuration from a string slice.
    pub(crate) fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str(text)?;
        Ok(config)
    }

    /// Load the embedded default configuration.
    ///
    /// # Panics
    ///
    /// Panics if the embedded default configuration is malformed, which constitutes a programming
    /// error.
    #[must_use]
    pub fn load_default() -> Self {
        Self::load_from_str(DEFAULT_CONFIG).expect("Failed to load default config")
    }

    /// Load the configuration from a file located at the given path.
    ///
    /// # Errors
    ///
    /// This method can fail if the file cannot be accessed or if it contains malformed
    /// configuration markup.
    pub fn load_from_path<T: AsRef<Path>>(path: T) -> crate::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::load_from_str(&text)?;
        Ok(config)
    }

    /// Merge this configuration struct with the default values.
    #[must_use]
    pub fn with_defaults(&self) -> Self {
        let default = Self::load_default();
        self.merge(&default)
    }

    /// Serialize the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be represented in TOML.
    pub fn to_toml(&self) -> crate::Result<String> {
        let text = toml::to_string_pretty(self).map_err(ConfigError::from)?;
        Ok(text)
    }

    /// The music directory, with a leading `~` expanded.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn music_dir(&self) -> crate::Result<PathBuf> {
        let music_dir = self.paths.music_dir.as_deref().unwrap_or_default();
        let path = expanduser::expanduser(music_dir)?;
        Ok(path)
    }
}
