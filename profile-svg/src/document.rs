// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Loading SVG documents from disk and writing them back only when their
//! content changed.

use std::{fs, path::Path};

use tracing::info;

use crate::{
    error::{self, Error},
    template::SvgDocument
};

/// Whether a job rewrote its output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// New content was written.
    Updated,
    /// The rendered content matched the file; nothing was written.
    Unchanged
}

/// Reads the SVG template at `path`.
///
/// # Errors
///
/// Returns [`Error::TemplateIo`] when the file cannot be read.
pub fn load_document(path: &Path) -> Result<SvgDocument, Error> {
    let content = fs::read_to_string(path).map_err(|source| error::template_io_error(path, source))?;
    Ok(SvgDocument::new(content))
}

/// Writes `updated` to `path` unless it is byte-identical to `original`.
///
/// # Errors
///
/// Returns [`Error::TemplateIo`] when the file cannot be written.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// use profile_svg::{SvgDocument, UpdateOutcome, persist_if_changed};
///
/// # fn main() -> Result<(), profile_svg::Error> {
/// let original = "<svg/>";
/// let outcome = persist_if_changed(Path::new("about.svg"), original, &SvgDocument::new(original))?;
/// assert_eq!(outcome, UpdateOutcome::Unchanged);
/// # Ok(())
/// # }
/// ```
pub fn persist_if_changed(
    path: &Path,
    original: &str,
    updated: &SvgDocument
) -> Result<UpdateOutcome, Error> {
    if updated.as_str() == original {
        info!("No changes detected.");
        return Ok(UpdateOutcome::Unchanged);
    }

    fs::write(path, updated.as_str()).map_err(|source| error::template_io_error(path, source))?;
    info!("SVG updated.");
    Ok(UpdateOutcome::Updated)
}
