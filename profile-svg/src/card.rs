// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Slot layout of the profile card shared by the stats and uptime jobs.
//!
//! Every value slot `<id>` is preceded on its line by a filler slot
//! `<id>_dots`. Both jobs align against the full set of column rules so the
//! uptime line lands on the same column as the statistics lines.

use crate::align::{ColumnRule, FixedWidthRule};

/// Public repositories owned by the account.
pub const REPO_DATA: &str = "repo_data";
/// Repositories contributed to.
pub const CONTRIB_DATA: &str = "contrib_data";
/// Commits over the trailing window.
pub const COMMIT_DATA: &str = "commit_data";
/// Lines added plus lines deleted.
pub const LOC_DATA: &str = "loc_data";
/// Lines added.
pub const LOC_ADD: &str = "loc_add";
/// Lines deleted.
pub const LOC_DEL: &str = "loc_del";
/// Stars across owned repositories.
pub const STAR_DATA: &str = "star_data";
/// Followers of the account.
pub const FOLLOWER_DATA: &str = "follower_data";
/// Account uptime.
pub const AGE_DATA: &str = "age_data";

/// Filler/value pairs aligned on one column.
pub const PROFILE_COLUMNS: [ColumnRule<'static>; 7] = [
    column("repo_data_dots", REPO_DATA),
    column("contrib_data_dots", CONTRIB_DATA),
    column("commit_data_dots", COMMIT_DATA),
    column("loc_data_dots", LOC_DATA),
    column("star_data_dots", STAR_DATA),
    column("follower_data_dots", FOLLOWER_DATA),
    column("age_data_dots", AGE_DATA)
];

const fn column(filler_slot: &'static str, value_slot: &'static str) -> ColumnRule<'static> {
    ColumnRule {
        filler_slot,
        value_slot
    }
}

/// Formatted statistics exactly as they are written into the card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsValues {
    /// Formatted public repository count.
    pub repos:       String,
    /// Formatted contributed repository count.
    pub contributed: String,
    /// Formatted commit count.
    pub commits:     String,
    /// Formatted lines touched.
    pub loc_total:   String,
    /// Formatted lines added.
    pub loc_added:   String,
    /// Formatted lines deleted.
    pub loc_deleted: String,
    /// Formatted star count.
    pub stars:       String,
    /// Formatted follower count.
    pub followers:   String
}

impl StatsValues {
    /// Slot substitutions in the order they are applied.
    pub fn substitutions(&self) -> [(&'static str, &str); 8] {
        [
            (REPO_DATA, self.repos.as_str()),
            (CONTRIB_DATA, self.contributed.as_str()),
            (COMMIT_DATA, self.commits.as_str()),
            (LOC_DATA, self.loc_total.as_str()),
            (LOC_ADD, self.loc_added.as_str()),
            (LOC_DEL, self.loc_deleted.as_str()),
            (STAR_DATA, self.stars.as_str()),
            (FOLLOWER_DATA, self.followers.as_str())
        ]
    }

    /// Fixed-width rules reproducing the visible text of each stats line.
    pub fn fixed_rules(&self) -> Vec<FixedWidthRule<'static>> {
        vec![
            FixedWidthRule {
                filler_slot: "repo_data_dots",
                prefix:      ". Repos:",
                suffix:      format!(" {} {{Contributed: {}}}", self.repos, self.contributed)
            },
            FixedWidthRule {
                filler_slot: "commit_data_dots",
                prefix:      ". Commits:",
                suffix:      format!(" {}", self.commits)
            },
            FixedWidthRule {
                filler_slot: "loc_data_dots",
                prefix:      ". Lines of Code on GitHub:",
                suffix:      format!(
                    " {} ( {}++, {}-- )",
                    self.loc_total, self.loc_added, self.loc_deleted
                )
            },
            FixedWidthRule {
                filler_slot: "star_data_dots",
                prefix:      ". Stars:",
                suffix:      format!(" {}", self.stars)
            },
            FixedWidthRule {
                filler_slot: "follower_data_dots",
                prefix:      ". Followers:",
                suffix:      format!(" {}", self.followers)
            },
        ]
    }
}

/// Fixed-width rule for the uptime line.
pub fn uptime_fixed_rule(uptime: &str) -> FixedWidthRule<'static> {
    FixedWidthRule {
        filler_slot: "age_data_dots",
        prefix:      ". Uptime:",
        suffix:      format!(" {uptime}")
    }
}
