// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Stats job: fetches profile metrics and rewrites the stats card.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::{
    align::{AlignmentMode, apply_column_alignment, apply_fixed_width},
    card::{PROFILE_COLUMNS, StatsValues},
    config::{LayoutConfig, StatsConfig},
    document::{UpdateOutcome, load_document, persist_if_changed},
    error::Error,
    github::GithubApi,
    metrics::{ProfileMetrics, collect_profile_metrics, format_grouped},
    template::SvgDocument
};

/// Formats every metric the way it appears on the card.
pub fn stats_values(metrics: &ProfileMetrics) -> StatsValues {
    StatsValues {
        repos:       format_grouped(metrics.public_repos),
        contributed: format_grouped(metrics.contributed_repos),
        commits:     format_grouped(metrics.commits),
        loc_total:   format_grouped(metrics.lines_touched()),
        loc_added:   format_grouped(metrics.lines_added),
        loc_deleted: format_grouped(metrics.lines_deleted),
        stars:       format_grouped(metrics.stars),
        followers:   format_grouped(metrics.followers)
    }
}

/// Substitutes the statistics into `document` and realigns the fillers.
pub fn render_stats(
    document: SvgDocument,
    values: &StatsValues,
    layout: &LayoutConfig
) -> SvgDocument {
    let document = document.with_slots(values.substitutions());

    match layout.alignment {
        AlignmentMode::Column => apply_column_alignment(document, &PROFILE_COLUMNS),
        AlignmentMode::Fixed => {
            apply_fixed_width(document, layout.line_width, &values.fixed_rules())
        }
    }
}

/// Runs the stats job against `api`.
///
/// The template is read before any upstream call so a missing file fails
/// fast.
///
/// # Errors
///
/// Returns [`Error::TemplateIo`] when the SVG cannot be read or written and
/// [`Error::Upstream`] or [`Error::Decode`] when a required upstream call
/// fails.
pub async fn run_stats<A: GithubApi>(
    config: &StatsConfig,
    api: &A,
    now: DateTime<Utc>
) -> Result<UpdateOutcome, Error> {
    let path = config.layout.svg_path.as_path();
    let document = load_document(path)?;
    let original = document.as_str().to_owned();

    info!("Updating GitHub stats in SVG for user: {}", config.account);
    let metrics = collect_profile_metrics(api, &config.account, &config.polling, now).await?;
    info!(
        "repos={} contributed={} commits={} loc=+{}/-{} stars={} followers={}",
        metrics.public_repos,
        metrics.contributed_repos,
        metrics.commits,
        metrics.lines_added,
        metrics.lines_deleted,
        metrics.stars,
        metrics.followers
    );

    let updated = render_stats(document, &stats_values(&metrics), &config.layout);
    persist_if_changed(path, &original, &updated)
}
