// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Module for the `tags` CLI subcommand.

use crate::object::{MetadataAttribute, Song};
use crate::pathformat::TargetFormatter;
use crate::raw::RawSong;
use crate::tag::NULL_BYTE;
use crate::Config;
use clap::Parser;
use std::fmt::Write;
use std::path::PathBuf;

/// Command line arguments for the `tags` CLI command.
#[derive(Parser, Debug)]
pub struct Args {
    /// JSON file describing the song.
    path: PathBuf,
    /// Skip frames that cannot be constructed instead of failing.
    #[arg(short, long)]
    skip_unsupported: bool,
}

/// Build the report for a song: one line per frame, followed by the target.
fn report(config: &Config, song: &Song, skip_unsupported: bool) -> crate::Result<String> {
    let mut metadata = song.metadata();
    let frames = if skip_unsupported {
        metadata.to_supported_frames()
    } else {
        metadata.to_frames()?
    };

    let mut output = String::new();
    for (frame_id, frame) in &frames {
        let content = frame.content();
        let value = content
            .text()
            .or_else(|| content.link())
            .unwrap_or_default()
            .replace(NULL_BYTE, " / ");
        let _ = writeln!(output, "{frame_id}: {value}");
    }

    let target = TargetFormatter::new(config)?.resolve(song)?;
    let music_dir = config.music_dir()?;
    if let Some(file) = target.file_in(&music_dir) {
        let _ = writeln!(output, "target: {}", file.display());
    }
    let _ = writeln!(output, "exists: {}", target.exists_on_disk(&music_dir));
    Ok(output)
}

/// Run the `tags` command.
pub fn run(config: &Config, args: Args) -> crate::Result<()> {
    let json = std::fs::read_to_string(&args.path)?;
    let song = Song::try_from(RawSong::from_json(&json)?)?;
    log::info!("Loaded {song} from {}", args.path.display());
    print!("{}", report(config, &song, args.skip_unsupported)?);

    Ok(())
}
