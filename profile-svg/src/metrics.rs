// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Profile metric aggregation.
///
/// Collects account counters, walks every owned non-fork repository and sums
/// its trailing-year activity. Repositories are processed one at a time.
use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::{
    error::Error,
    github::{CodeFrequencyWeek, CommitActivityWeek, GithubApi, REPOSITORIES_PER_PAGE, RepositorySummary},
    retry::{RetryConfig, poll_until_ready},
};

/// Length of the trailing activity window in weeks.
pub const TRAILING_WEEKS: i64 = 52;

/// Aggregated numbers rendered on the stats card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq,)]
pub struct ProfileMetrics
{
    /// Public repositories owned by the account.
    pub public_repos:      u64,
    /// Distinct repositories contributed to.
    pub contributed_repos: u64,
    /// Commits over the trailing window, across owned non-fork repositories.
    pub commits:           u64,
    /// Lines added over the trailing window.
    pub lines_added:       u64,
    /// Lines deleted over the trailing window, as a magnitude.
    pub lines_deleted:     u64,
    /// Stars across owned non-fork repositories.
    pub stars:             u64,
    /// Followers of the account.
    pub followers:         u64,
}

impl ProfileMetrics
{
    /// Lines added plus lines deleted.
    pub fn lines_touched(&self,) -> u64
    {
        self.lines_added + self.lines_deleted
    }
}

/// Additions and deletions summed over a window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq,)]
pub struct LineChurn
{
    /// Lines added.
    pub added:   u64,
    /// Lines deleted, as a magnitude.
    pub deleted: u64,
}

/// Collects every figure shown on the stats card for `login`.
///
/// # Arguments
///
/// * `api` - Upstream client
/// * `login` - Account identifier
/// * `polling` - Attempt budget for the statistics endpoints
/// * `now` - Instant the trailing window ends at
///
/// # Errors
///
/// Returns [`Error::Upstream`] when the account lookup, the contributed
/// repositories query or a repository listing page fails. Statistics
/// endpoints never fail the run; they contribute zero instead.
pub async fn collect_profile_metrics<A: GithubApi,>(
    api: &A,
    login: &str,
    polling: &RetryConfig,
    now: DateTime<Utc,>,
) -> Result<ProfileMetrics, Error,>
{
    let user = api.user_summary(login,).await?;
    let contributed_repos = api.contributed_repository_count(login,).await?;
    let owned = list_owned_repositories(api, login,).await?;
    info!("Found {} owned non-fork repositories for {}", owned.len(), login);

    let stars: u64 = owned.iter().filter_map(|repo| repo.stargazers_count,).sum();
    let cutoff = trailing_window_cutoff(now,);

    let pb = ProgressBar::new(owned.len() as u64,);
    if let Ok(style,) = ProgressStyle::default_bar().template("{bar:30.cyan/blue} {pos}/{len} {msg}",) {
        pb.set_style(style,);
    }

    let mut commits = 0;
    let mut churn = LineChurn::default();

    for repo in &owned {
        let Some(full_name,) = repo.full_name.as_deref() else {
            pb.inc(1,);
            continue;
        };
        pb.set_message(full_name.to_owned(),);

        let activity = poll_until_ready(polling, &format!("commit activity for {full_name}"), || {
            api.commit_activity(full_name,)
        },)
        .await;
        let repo_commits = activity.as_deref().map_or(0, sum_commit_activity,);

        let frequency = poll_until_ready(polling, &format!("code frequency for {full_name}"), || {
            api.code_frequency(full_name,)
        },)
        .await;
        let repo_churn = frequency.as_deref().map_or_else(LineChurn::default, |weeks| {
            sum_code_frequency(weeks, cutoff,)
        },);

        debug!(
            "{}: {} commits, +{} -{} lines",
            full_name, repo_commits, repo_churn.added, repo_churn.deleted
        );

        commits += repo_commits;
        churn.added += repo_churn.added;
        churn.deleted += repo_churn.deleted;
        pb.inc(1,);
    }

    pb.finish_and_clear();

    Ok(ProfileMetrics {
        public_repos: user.public_repos,
        contributed_repos,
        commits,
        lines_added: churn.added,
        lines_deleted: churn.deleted,
        stars,
        followers: user.followers,
    },)
}

/// Lists every non-fork repository owned by `login`.
///
/// Pages are requested until one comes back empty or shorter than the page
/// size.
///
/// # Errors
///
/// Returns [`Error::Upstream`] when any listing page fails.
pub async fn list_owned_repositories<A: GithubApi,>(
    api: &A,
    login: &str,
) -> Result<Vec<RepositorySummary,>, Error,>
{
    let mut repositories = Vec::with_capacity(usize::from(REPOSITORIES_PER_PAGE,),);
    let mut page = 1u32;

    loop {
        let batch = api.repositories_page(login, page, REPOSITORIES_PER_PAGE,).await?;
        let batch_len = batch.len();
        repositories.extend(batch.into_iter().filter(|repo| !repo.fork,),);

        if batch_len < usize::from(REPOSITORIES_PER_PAGE,) {
            break;
        }
        page += 1;
    }

    Ok(repositories,)
}

/// Sums commit totals over the weekly activity series.
pub fn sum_commit_activity(weeks: &[CommitActivityWeek],) -> u64
{
    weeks.iter().map(|week| week.total,).sum()
}

/// Sums additions and deletion magnitudes for weeks at or after `cutoff`.
pub fn sum_code_frequency(weeks: &[CodeFrequencyWeek], cutoff: i64,) -> LineChurn
{
    weeks.iter().filter(|week| week.week >= cutoff,).fold(LineChurn::default(), |churn, week| {
        LineChurn {
            added:   churn.added + week.additions.unsigned_abs(),
            deleted: churn.deleted + week.deletions.unsigned_abs(),
        }
    },)
}

/// Unix timestamp [`TRAILING_WEEKS`] weeks before `now`.
pub fn trailing_window_cutoff(now: DateTime<Utc,>,) -> i64
{
    now.timestamp() - TRAILING_WEEKS * 7 * 24 * 3600
}

/// Formats an integer with en-US thousands separators.
///
/// # Examples
///
/// ```
/// use profile_svg::format_grouped;
///
/// assert_eq!(format_grouped(1234567,), "1,234,567");
/// assert_eq!(format_grouped(999,), "999");
/// ```
pub fn format_grouped(value: u64,) -> String
{
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3,);
    for (index, digit,) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',',);
        }
        grouped.push(digit,);
    }
    grouped
}

#[cfg(test)]
pub(crate) mod fake
{
    use std::{
        cell::RefCell,
        collections::HashMap,
    };

    use crate::{
        error::Error,
        github::{CodeFrequencyWeek, CommitActivityWeek, GithubApi, RepositorySummary, UserSummary},
        retry::PollOutcome,
    };

    /// In-memory [`GithubApi`] used by unit tests.
    #[derive(Debug, Default,)]
    pub(crate) struct FakeGithub
    {
        pub user:              UserSummary,
        pub contributed:       u64,
        pub repositories:      Vec<RepositorySummary,>,
        pub commit_activity:   HashMap<String, PollOutcome<Vec<CommitActivityWeek,>,>,>,
        pub code_frequency:    HashMap<String, PollOutcome<Vec<CodeFrequencyWeek,>,>,>,
        pub fail_user:         bool,
        pub requested_pages:   RefCell<Vec<u32,>,>,
        pub stats_requests:    RefCell<usize,>,
    }

    impl FakeGithub
    {
        pub(crate) fn repository(full_name: &str, fork: bool, stars: u64,) -> RepositorySummary
        {
            RepositorySummary {
                full_name: Some(full_name.to_owned(),),
                fork,
                stargazers_count: Some(stars,),
            }
        }
    }

    impl GithubApi for FakeGithub
    {
        async fn user_summary(&self, login: &str,) -> Result<UserSummary, Error,>
        {
            if self.fail_user {
                return Err(Error::upstream(format!(
                    "GitHub API error 404 for /users/{login}: Not Found"
                ),),);
            }
            Ok(self.user,)
        }

        async fn contributed_repository_count(&self, _login: &str,) -> Result<u64, Error,>
        {
            Ok(self.contributed,)
        }

        async fn repositories_page(
            &self,
            _login: &str,
            page: u32,
            per_page: u8,
        ) -> Result<Vec<RepositorySummary,>, Error,>
        {
            self.requested_pages.borrow_mut().push(page,);
            let per_page = usize::from(per_page,);
            let start = (page as usize - 1) * per_page;
            Ok(self.repositories.iter().skip(start,).take(per_page,).cloned().collect(),)
        }

        async fn commit_activity(&self, full_name: &str,) -> PollOutcome<Vec<CommitActivityWeek,>,>
        {
            *self.stats_requests.borrow_mut() += 1;
            self.commit_activity
                .get(full_name,)
                .cloned()
                .unwrap_or_else(|| PollOutcome::Unavailable("404 Not Found".to_owned(),),)
        }

        async fn code_frequency(&self, full_name: &str,) -> PollOutcome<Vec<CodeFrequencyWeek,>,>
        {
            *self.stats_requests.borrow_mut() += 1;
            self.code_frequency
                .get(full_name,)
                .cloned()
                .unwrap_or_else(|| PollOutcome::Unavailable("404 Not Found".to_owned(),),)
        }
    }
}
