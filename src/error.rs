// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Error and result types.

use crate::object::ObjectKind;
use std::io;
use thiserror::Error;

/// Main error type.
#[derive(Error, Debug)]
pub enum ErrorType {
    /// Configuration error.
    #[error("Configuration Error ({0})")]
    Config(#[from] crate::config::ConfigError),
    /// I/O Error.
    #[error("Input/Output error ({:?})", .0)]
    Io(#[from] io::Error),
    /// Malformed JSON input.
    #[error("Failed to parse JSON input ({0})")]
    Json(#[from] serde_json::Error),
    /// A timestamp could not be parsed.
    #[error("Failed to parse timestamp: {0}")]
    Timestamp(#[from] crate::timestamp::ParseError),
    /// A frame was requested for a tag key that is neither a text nor a URL frame.
    #[error("Unsupported tag kind for frame {0}")]
    UnsupportedTagKind(&'static str),
    /// A raw metadata dictionary contains a key that is not a known tag name.
    #[error("Unknown tag key {0:?}")]
    UnknownTagKey(String),
    /// A raw metadata value does not have the expected shape (a list of scalars).
    #[error("Invalid value for {key}: expected a list of scalars, found {found}")]
    InvalidValueShape {
        /// Name of the tag key.
        key: &'static str,
        /// The JSON type that was found instead.
        found: &'static str,
    },
    /// An entity of the wrong type was added to a collection.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// The declared element type of the collection.
        expected: ObjectKind,
        /// The type of the rejected entity.
        found: ObjectKind,
    },
    /// A path template is invalid.
    #[error("Invalid template: {0}")]
    TemplateInvalid(#[from] Box<handlebars::TemplateError>),
    /// An error occurred while formatting a template string.
    #[error("Template formatting failed: {0}")]
    TemplateFormattingFailed(#[from] handlebars::RenderError),
}

impl From<handlebars::TemplateError> for ErrorType {
    fn from(err: handlebars::TemplateError) -> Self {
        Self::TemplateInvalid(Box::new(err))
    }
}

/// Convenience type.
pub type Result<T> = std::result::Result<T, ErrorType>;
