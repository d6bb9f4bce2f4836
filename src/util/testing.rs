// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Testing utils.

use crate::object::Song;
use crate::raw::RawSong;

/// A raw song with two sources that contribute different artists.
pub const TE_FELICITO_JSON: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/data/te_felicito.json"
));

/// The song described by [`TE_FELICITO_JSON`].
pub fn te_felicito() -> Song {
    let raw = RawSong::from_json(TE_FELICITO_JSON).unwrap();
    Song::try_from(raw).unwrap()
}
