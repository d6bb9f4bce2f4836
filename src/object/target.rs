// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Download targets.

use std::path::{Path, PathBuf};

/// The location a song is downloaded to, relative to the music directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Target {
    /// The directory.
    pub path: Option<PathBuf>,
    /// The file (including the directory).
    pub file: Option<PathBuf>,
}

impl Target {
    /// Create a target from a relative directory and a relative file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, file: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            file: Some(file.into()),
        }
    }

    /// Returns `true` if both the directory and the file are set.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.path.is_some() && self.file.is_some()
    }

    /// The directory, resolved against the music directory.
    #[must_use]
    pub fn path_in(&self, music_dir: &Path) -> Option<PathBuf> {
        self.path.as_ref().map(|path| music_dir.join(path))
    }

    /// The file, resolved against the music directory.
    #[must_use]
    pub fn file_in(&self, music_dir: &Path) -> Option<PathBuf> {
        self.file.as_ref().map(|file| music_dir.join(file))
    }

    /// Returns `true` if the target is set and the file exists.
    ///
    /// This queries the filesystem on every call.
    #[must_use]
    pub fn exists_on_disk(&self, music_dir: &Path) -> bool {
        self.is_set()
            && self
                .file_in(music_dir)
                .is_some_and(|file| file.exists())
    }
}
