// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Validated configuration for each job.
//!
//! The CLI collects raw strings from flags and environment variables; the
//! constructors here validate them and fail fast with [`Error::Config`]
//! before any file or network access happens.

use std::{fmt, path::PathBuf};

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::{align::AlignmentMode, calendar::parse_date, error::Error, retry::RetryConfig};

/// Stats card rewritten by the stats and uptime jobs by default.
pub const DEFAULT_SVG_PATH: &str = "assets/about.svg";
/// Banner written by the banner job by default.
pub const DEFAULT_BANNER_PATH: &str = "assets/name.svg";
/// Origin of the uptime line when none is configured.
pub const DEFAULT_UPTIME_ORIGIN: &str = "2001-08-06";
/// Time zone in which the current season is evaluated.
pub const DEFAULT_TIME_ZONE: &str = "Europe/Rome";

/// Places the account identifier may come from, in priority order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountSources {
    /// Explicit identifier (`--account` / `USERNAME`).
    pub explicit:         Option<String>,
    /// Owner of the repository running the job (`GITHUB_REPOSITORY_OWNER`).
    pub repository_owner: Option<String>,
    /// `owner/name` of the repository running the job (`GITHUB_REPOSITORY`).
    pub repository:       Option<String>
}

/// Resolves the account identifier from `sources`.
///
/// Blank values are ignored. The repository fallback uses the segment
/// before the first `/`.
///
/// # Errors
///
/// Returns [`Error::Config`] when no source yields an identifier.
///
/// # Examples
///
/// ```
/// use profile_svg::{AccountSources, resolve_account};
///
/// let sources = AccountSources {
///     repository: Some("octocat/octocat".to_owned()),
///     ..AccountSources::default()
/// };
/// assert_eq!(resolve_account(&sources).expect("resolved"), "octocat");
/// ```
pub fn resolve_account(sources: &AccountSources) -> Result<String, Error> {
    let explicit = non_blank(sources.explicit.as_deref());
    let owner = non_blank(sources.repository_owner.as_deref());
    let from_repository = non_blank(sources.repository.as_deref())
        .and_then(|repository| repository.split('/').next())
        .and_then(|segment| non_blank(Some(segment)));

    explicit
        .or(owner)
        .or(from_repository)
        .map(str::to_owned)
        .ok_or_else(|| Error::config("unable to determine the account. Set USERNAME."))
}

/// Template location and filler strategy shared by the stats and uptime
/// jobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    /// SVG document rewritten in place.
    pub svg_path:   PathBuf,
    /// Filler strategy.
    pub alignment:  AlignmentMode,
    /// Total line width for [`AlignmentMode::Fixed`].
    pub line_width: usize
}

impl LayoutConfig {
    /// Validates the layout settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when `line_width` is zero or the path is
    /// blank.
    pub fn new(
        svg_path: Option<PathBuf>,
        alignment: AlignmentMode,
        line_width: usize
    ) -> Result<Self, Error> {
        if line_width == 0 {
            return Err(Error::config("line width must be a positive integer"));
        }

        let svg_path = svg_path.unwrap_or_else(|| PathBuf::from(DEFAULT_SVG_PATH));
        if svg_path.as_os_str().is_empty() {
            return Err(Error::config("SVG path cannot be empty"));
        }

        Ok(Self {
            svg_path,
            alignment,
            line_width
        })
    }
}

/// Configuration of the stats job.
#[derive(Clone)]
pub struct StatsConfig {
    /// Bearer credential for the GitHub API.
    pub token:   String,
    /// Account whose statistics are rendered.
    pub account: String,
    /// Template and filler settings.
    pub layout:  LayoutConfig,
    /// Attempt budget for the statistics endpoints.
    pub polling: RetryConfig
}

impl StatsConfig {
    /// Validates the stats job configuration.
    ///
    /// The credential is checked before the account so a missing token is
    /// always the reported problem.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the token is missing or blank, or the
    /// account cannot be resolved.
    pub fn new(
        token: Option<&str>,
        account: &AccountSources,
        layout: LayoutConfig
    ) -> Result<Self, Error> {
        let token = non_blank(token).ok_or_else(|| Error::config("missing GITHUB_TOKEN"))?;
        let account = resolve_account(account)?;

        Ok(Self {
            token: token.to_owned(),
            account,
            layout,
            polling: RetryConfig::default()
        })
    }
}

impl fmt::Debug for StatsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatsConfig")
            .field("token", &"<redacted>")
            .field("account", &self.account)
            .field("layout", &self.layout)
            .field("polling", &self.polling)
            .finish()
    }
}

/// Configuration of the uptime job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UptimeConfig {
    /// Date the uptime counts from.
    pub origin: NaiveDate,
    /// Template and filler settings.
    pub layout: LayoutConfig
}

impl UptimeConfig {
    /// Validates the uptime job configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when `origin` is not a `YYYY-MM-DD` date.
    pub fn new(origin: Option<&str>, layout: LayoutConfig) -> Result<Self, Error> {
        let origin = parse_date(non_blank(origin).unwrap_or(DEFAULT_UPTIME_ORIGIN))?;
        Ok(Self {
            origin,
            layout
        })
    }
}

/// Configuration of the banner job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerConfig {
    /// Name rendered as the banner heading.
    pub name:        String,
    /// Destination of the generated banner.
    pub output_path: PathBuf,
    /// Time zone in which the season is evaluated.
    pub time_zone:   Tz
}

impl BannerConfig {
    /// Validates the banner job configuration.
    ///
    /// Without an explicit name the account identifier chain is used.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when no name can be determined or the time
    /// zone is unknown.
    pub fn new(
        name: Option<&str>,
        account: &AccountSources,
        output_path: Option<PathBuf>,
        time_zone: Option<&str>
    ) -> Result<Self, Error> {
        let name = match non_blank(name) {
            Some(name) => name.to_owned(),
            None => resolve_account(account)
                .map_err(|_| Error::config("unable to determine the banner name. Set BANNER_NAME."))?
        };

        let zone_name = non_blank(time_zone).unwrap_or(DEFAULT_TIME_ZONE);
        let time_zone = zone_name
            .parse::<Tz>()
            .map_err(|e| Error::config(format!("unknown time zone \"{zone_name}\": {e}")))?;

        Ok(Self {
            name,
            output_path: output_path.unwrap_or_else(|| PathBuf::from(DEFAULT_BANNER_PATH)),
            time_zone
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
