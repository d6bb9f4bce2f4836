// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Construction of ID3 frames.

use crate::tag::{FrameKind, TagKey};
use id3::Frame;

/// Build the ID3 frame for a tag key and its (already resolved) value.
///
/// Text keys yield a text frame that carries the value as free text (which may contain multiple
/// null-separated values), URL keys yield a link frame with a single URI.
///
/// # Errors
///
/// Returns [`crate::Error::UnsupportedTagKind`] if the key maps to a frame that is neither a text
/// nor a URL frame.
pub fn build_frame(key: TagKey, value: impl Into<String>) -> crate::Result<Frame> {
    let frame_id = key.frame_id();
    match key.kind() {
        FrameKind::Text => Ok(Frame::text(frame_id, value)),
        FrameKind::Url => Ok(Frame::link(frame_id, value)),
        FrameKind::Unsupported => Err(crate::Error::UnsupportedTagKind(frame_id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paste::paste;

    macro_rules! add_test_build_text_frame {
        ($tagkey:expr, $fnsuffix:ident) => {
            paste! {
                #[test]
                fn [<test_build_text_frame_ $fnsuffix>]() {
                    let frame = build_frame($tagkey, "Example Value").unwrap();
                    assert_eq!(frame.id(), $tagkey.frame_id());
                    assert_eq!(frame.content().text(), Some("Example Value"));
                }
            }
        };
    }

    macro_rules! add_test_build_url_frame {
        ($tagkey:expr, $fnsuffix:ident) => {
            paste! {
                #[test]
                fn [<test_build_url_frame_ $fnsuffix>]() {
                    let frame = build_frame($tagkey, "https://example.com/").unwrap();
                    assert_eq!(frame.id(), $tagkey.frame_id());
                    assert_eq!(frame.content().link(), Some("https://example.com/"));
                }
            }
        };
    }

    macro_rules! add_test_build_unsupported_frame {
        ($tagkey:expr, $fnsuffix:ident) => {
            paste! {
                #[test]
                fn [<test_build_unsupported_frame_ $fnsuffix>]() {
                    let result = build_frame($tagkey, "Example Value");
                    assert!(matches!(
                        result,
                        Err(crate::Error::UnsupportedTagKind(id)) if id == $tagkey.frame_id()
                    ));
                }
            }
        };
    }

    add_test_build_text_frame!(TagKey::Title, title);
    add_test_build_text_frame!(TagKey::Isrc, isrc);
    add_test_build_text_frame!(TagKey::Length, length);
    add_test_build_text_frame!(TagKey::TrackNumber, tracknumber);
    add_test_build_text_frame!(TagKey::DiscNumber, discnumber);
    add_test_build_text_frame!(TagKey::ReleaseDate, releasedate);
    add_test_build_text_frame!(TagKey::Publisher, publisher);
    add_test_build_text_frame!(TagKey::Artist, artist);
    add_test_build_text_frame!(TagKey::AlbumArtist, albumartist);
    add_test_build_text_frame!(TagKey::Album, album);
    add_test_build_text_frame!(TagKey::Genre, genre);
    add_test_build_text_frame!(TagKey::Language, language);
    add_test_build_text_frame!(TagKey::ItunesCompilation, itunescompilation);
    add_test_build_text_frame!(TagKey::TaggingTime, taggingtime);
    add_test_build_url_frame!(TagKey::PublisherUrl, publisherurl);
    add_test_build_url_frame!(TagKey::SourceWebpageUrl, sourcewebpageurl);
    add_test_build_url_frame!(TagKey::FileWebpageUrl, filewebpageurl);
    add_test_build_url_frame!(TagKey::ArtistWebpageUrl, artistwebpageurl);
    add_test_build_url_frame!(TagKey::PaymentUrl, paymenturl);
    add_test_build_unsupported_frame!(TagKey::Rating, rating);
    add_test_build_unsupported_frame!(TagKey::MovementIndex, movementindex);
    add_test_build_unsupported_frame!(TagKey::MovementName, movementname);
    add_test_build_unsupported_frame!(TagKey::UnsyncedLyrics, unsyncedlyrics);
    add_test_build_unsupported_frame!(TagKey::Comment, comment);

    #[test]
    fn test_build_text_frame_keeps_null_separated_values() {
        let frame = build_frame(TagKey::Artist, "Rauw Alejandro\0Shakira").unwrap();
        assert_eq!(frame.content().text(), Some("Rauw Alejandro\0Shakira"));
    }
}
