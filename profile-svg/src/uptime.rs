// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Uptime job: writes the time elapsed since the origin date into the card.

use chrono::NaiveDate;
use tracing::info;

use crate::{
    align::{AlignmentMode, apply_column_alignment, apply_fixed_width},
    calendar::calendar_diff,
    card::{AGE_DATA, PROFILE_COLUMNS, uptime_fixed_rule},
    config::{LayoutConfig, UptimeConfig},
    document::{UpdateOutcome, load_document, persist_if_changed},
    error::Error,
    template::SvgDocument
};

/// Substitutes `uptime` into `document` and realigns the fillers.
///
/// Column alignment measures every line of the card so the uptime value
/// shares the statistics column.
pub fn render_uptime(document: SvgDocument, uptime: &str, layout: &LayoutConfig) -> SvgDocument {
    let document = document.with_slot(AGE_DATA, uptime);

    match layout.alignment {
        AlignmentMode::Column => apply_column_alignment(document, &PROFILE_COLUMNS),
        AlignmentMode::Fixed => {
            apply_fixed_width(document, layout.line_width, &[uptime_fixed_rule(uptime)])
        }
    }
}

/// Runs the uptime job for `today`.
///
/// # Errors
///
/// Returns [`Error::TemplateIo`] when the SVG cannot be read or written.
pub fn run_uptime(config: &UptimeConfig, today: NaiveDate) -> Result<UpdateOutcome, Error> {
    let path = config.layout.svg_path.as_path();
    let document = load_document(path)?;
    let original = document.as_str().to_owned();

    let uptime = calendar_diff(config.origin, today).to_string();
    info!("Uptime since {}: {}", config.origin, uptime);

    let updated = render_uptime(document, &uptime, &config.layout);
    persist_if_changed(path, &original, &updated)
}
