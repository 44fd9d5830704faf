// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Generators for the SVG assets of a GitHub profile README.
//!
//! Three stateless jobs share one idiom: gather inputs, compute derived
//! values, substitute them into identified `<tspan>` slots of an SVG and
//! write the file back only when its content changed.
//!
//! * the banner job renders the name banner themed after the current season,
//! * the stats job fetches account metrics from GitHub and rewrites the stats
//!   card, padding every line with dot leaders,
//! * the uptime job writes the calendar time elapsed since an origin date.

mod align;
mod banner;
mod calendar;
mod card;
mod config;
mod document;
mod error;
mod github;
mod metrics;
mod retry;
mod season;
mod stats;
mod template;
mod uptime;

pub use align::{
    AlignmentMode, ColumnMeasure, ColumnPlan, ColumnRule, DEFAULT_LINE_WIDTH, FILLER_CHAR,
    FixedWidthRule, apply_column_alignment, apply_fixed_width, filler, filler_count,
    measure_column, plan_column_alignment
};
pub use banner::{FLAKE_COUNT, render_banner, run_banner, write_banner};
pub use calendar::{CalendarSpan, calendar_diff, parse_date};
pub use card::{PROFILE_COLUMNS, StatsValues, uptime_fixed_rule};
pub use config::{
    AccountSources, BannerConfig, DEFAULT_BANNER_PATH, DEFAULT_SVG_PATH, DEFAULT_TIME_ZONE,
    DEFAULT_UPTIME_ORIGIN, LayoutConfig, StatsConfig, UptimeConfig, resolve_account
};
pub use document::{UpdateOutcome, load_document, persist_if_changed};
pub use error::{Error, template_io_error};
pub use github::{
    API_VERSION, CodeFrequencyWeek, CommitActivityWeek, GithubApi, OctocrabClient,
    REPOSITORIES_PER_PAGE, RepositorySummary, UserSummary, contributed_count_from_response
};
pub use metrics::{
    LineChurn, ProfileMetrics, TRAILING_WEEKS, collect_profile_metrics, format_grouped,
    list_owned_repositories, sum_code_frequency, sum_commit_activity, trailing_window_cutoff
};
pub use retry::{PollOutcome, RetryConfig, poll_until_ready};
pub use season::{Season, Theme};
pub use stats::{render_stats, run_stats, stats_values};
pub use template::{SlotLookup, SlotSpan, SvgDocument, escape_xml, visible_text};
pub use uptime::{render_uptime, run_uptime};
