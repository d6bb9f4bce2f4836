// Copyright (c) 2022 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Music metadata reconciliation library.
//!
//! Songs, albums, artists, lyrics, labels and sources are collected from several sites, merged
//! into a single view and turned into ID3v2.4 frames and a download target.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::missing_docs_in_private_items)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]
#![deny(unsafe_code)]
#![warn(elided_lifetimes_in_paths)]
#![warn(explicit_outlives_requirements)]
#![warn(keyword_idents)]
#![warn(macro_use_extern_crate)]
#![warn(meta_variable_misuse)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(non_ascii_idents)]
#![warn(noop_method_call)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused_extern_crates)]
#![warn(unused_import_braces)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]
#![warn(unused_results)]

pub mod cli;
pub mod collection;
pub mod config;
mod error;
pub mod metadata;
pub mod object;
pub mod pathformat;
pub mod raw;
pub mod tag;
pub mod timestamp;
#[cfg(test)]
mod util;

pub use crate::collection::Collection;
pub use crate::config::Config;
pub use crate::error::{ErrorType as Error, Result};
pub use crate::metadata::{Metadata, MetadataValue};
pub use crate::object::{Album, Artist, Label, Lyrics, MusicObject, Song, Source, Target};
pub use crate::pathformat::{resolve_target, TargetFormatter};
pub use crate::tag::TagKey;
pub use crate::timestamp::Timestamp;
