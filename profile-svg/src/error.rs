#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared by the banner, stats and uptime jobs."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint, so the lint is disabled
//! for the module.
//!
//! Only fatal conditions are represented here. Optional statistics that fail
//! upstream and template slots that cannot be found are logged and degrade
//! locally instead of surfacing as an [`Error`].

use std::path::{Path, PathBuf};

/// Unified error type returned by the jobs and the CLI.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// Required configuration is missing or malformed.
    #[error("invalid configuration: {message}")]
    Config {
        /// Human readable description of the configuration problem.
        message: String
    },
    /// A required upstream call answered with a non-success status.
    #[error("upstream error: {message}")]
    Upstream {
        /// Message including the status and the response body when known.
        message: String
    },
    /// A required upstream call returned a payload that could not be decoded.
    #[error("failed to decode upstream response: {source}")]
    Decode {
        /// Underlying decoding error.
        source: serde_json::Error
    },
    /// Reading or writing an SVG document failed.
    #[error("failed to access SVG at {path:?}: {source}")]
    TemplateIo {
        /// Location of the SVG document.
        path:   PathBuf,
        /// Underlying I/O error reported by the operating system.
        source: std::io::Error
    }
}

impl Error {
    /// Constructs a configuration error from the provided message.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the configuration failure.
    pub fn config<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Config {
            message: message.into()
        }
    }

    /// Constructs an upstream error from the provided message.
    ///
    /// # Parameters
    ///
    /// * `message` - Description of the failed call, ideally with its body.
    pub fn upstream<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Upstream {
            message: message.into()
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// The returned string matches the [`std::fmt::Display`] implementation
    /// and is what the CLI writes to stderr before exiting with status 1.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::Decode {
            source
        }
    }
}

/// Creates an [`Error::TemplateIo`] variant capturing the failing path and
/// source.
///
/// # Parameters
///
/// * `path` - Location of the SVG document that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn template_io_error(path: &Path, source: std::io::Error) -> Error {
    Error::TemplateIo {
        path: path.to_path_buf(),
        source
    }
}
