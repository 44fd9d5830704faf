// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// GitHub REST and GraphQL access for profile statistics.
///
/// [`GithubApi`] is the seam the aggregation code talks to;
/// [`OctocrabClient`] implements it against the live API. Required calls
/// surface failures as [`Error::Upstream`], statistics calls report a
/// [`PollOutcome`] so callers can poll and degrade.
use http::{HeaderName, StatusCode};
use octocrab::Octocrab;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use tracing::debug;

use crate::{error::Error, retry::PollOutcome};

/// API version pinned on every request.
pub const API_VERSION: &str = "2022-11-28";
/// Page size used when listing repositories.
pub const REPOSITORIES_PER_PAGE: u8 = 100;

const CONTRIBUTED_REPOSITORIES_QUERY: &str = r"
query($login:String!) {
  user(login:$login) {
    repositoriesContributedTo(
      first: 1
      includeUserRepositories: true
      contributionTypes: [COMMIT, PULL_REQUEST, ISSUE]
    ) { totalCount }
  }
}
";

/// Account level counters returned by `GET /users/{login}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq,)]
pub struct UserSummary
{
    /// Number of public repositories owned by the account.
    pub public_repos: u64,
    /// Number of followers.
    pub followers:    u64,
}

#[derive(Debug, Deserialize,)]
struct RawUser
{
    #[serde(default)]
    public_repos: Option<u64,>,
    #[serde(default)]
    followers:    Option<u64,>,
}

impl From<RawUser,> for UserSummary
{
    fn from(raw: RawUser,) -> Self
    {
        Self {
            public_repos: raw.public_repos.unwrap_or(0,),
            followers:    raw.followers.unwrap_or(0,),
        }
    }
}

/// Repository entry from `GET /users/{login}/repos`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize,)]
pub struct RepositorySummary
{
    /// `owner/name` identifier.
    #[serde(default)]
    pub full_name:        Option<String,>,
    /// Whether the repository is a fork.
    #[serde(default)]
    pub fork:             bool,
    /// Stargazer count.
    #[serde(default)]
    pub stargazers_count: Option<u64,>,
}

/// One week of `GET /repos/{full_name}/stats/commit_activity`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize,)]
pub struct CommitActivityWeek
{
    /// Unix timestamp of the start of the week.
    #[serde(default)]
    pub week:  i64,
    /// Commits during the week.
    #[serde(default)]
    pub total: u64,
}

/// One week of `GET /repos/{full_name}/stats/code_frequency`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq,)]
pub struct CodeFrequencyWeek
{
    /// Unix timestamp of the start of the week.
    pub week:      i64,
    /// Lines added.
    pub additions: i64,
    /// Lines deleted, reported negative upstream.
    pub deletions: i64,
}

impl CodeFrequencyWeek
{
    /// Builds a week from an upstream `[week, additions, deletions]` row.
    ///
    /// Rows shorter than three entries yield `None`.
    pub fn from_row(row: &[i64],) -> Option<Self,>
    {
        match row {
            [week, additions, deletions, ..] => Some(Self {
                week: *week, additions: *additions, deletions: *deletions,
            },),
            _ => None,
        }
    }
}

/// Upstream operations needed to build a profile stats card.
#[allow(async_fn_in_trait)]
pub trait GithubApi
{
    /// Looks the account up.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Upstream`] on any non-success response.
    async fn user_summary(&self, login: &str,) -> Result<UserSummary, Error,>;

    /// Counts repositories the account contributed to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Upstream`] on non-success responses or GraphQL errors.
    async fn contributed_repository_count(&self, login: &str,) -> Result<u64, Error,>;

    /// Fetches one page of the account's repositories, most recently updated
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Upstream`] on any non-success response.
    async fn repositories_page(
        &self,
        login: &str,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<RepositorySummary,>, Error,>;

    /// Weekly commit totals for the trailing year.
    async fn commit_activity(&self, full_name: &str,) -> PollOutcome<Vec<CommitActivityWeek,>,>;

    /// Weekly additions and deletions.
    async fn code_frequency(&self, full_name: &str,) -> PollOutcome<Vec<CodeFrequencyWeek,>,>;
}

/// [`GithubApi`] backed by an authenticated [`Octocrab`] client.
#[derive(Clone,)]
pub struct OctocrabClient
{
    octocrab: Octocrab,
}

#[derive(Serialize,)]
struct RepositoryListParams
{
    per_page: u8,
    page:     u32,
    sort:     &'static str,
}

impl OctocrabClient
{
    /// Builds a client sending `token` as bearer credential and pinning
    /// [`API_VERSION`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the HTTP client cannot be initialized.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use profile_svg::OctocrabClient;
    ///
    /// # fn example() -> Result<(), profile_svg::Error> {
    /// let client = OctocrabClient::new("ghp_token",)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(token: &str,) -> Result<Self, Error,>
    {
        let octocrab = Octocrab::builder()
            .personal_token(token.to_owned(),)
            .add_header(HeaderName::from_static("x-github-api-version",), API_VERSION.to_owned(),)
            .build()
            .map_err(|e| Error::config(format!("failed to initialize GitHub client: {e}"),),)?;

        Ok(Self {
            octocrab,
        },)
    }

    async fn fetch_stats<T: DeserializeOwned,>(&self, route: &str,) -> PollOutcome<T,>
    {
        let response = match self.octocrab._get(route,).await {
            Ok(response,) => response,
            Err(e,) => return PollOutcome::Unavailable(format!("request to {route} failed: {e}"),),
        };

        let status = response.status();
        if status == StatusCode::ACCEPTED {
            return PollOutcome::Pending;
        }
        if !status.is_success() {
            return PollOutcome::Unavailable(format!("{route} answered {status}"),);
        }

        let body = match self.octocrab.body_to_string(response,).await {
            Ok(body,) => body,
            Err(e,) => {
                return PollOutcome::Unavailable(format!("failed to read {route} body: {e}"),);
            }
        };

        match serde_json::from_str::<T,>(&body,) {
            Ok(payload,) => PollOutcome::Ready(payload,),
            Err(e,) => PollOutcome::Unavailable(format!("unexpected payload from {route}: {e}"),),
        }
    }
}

impl GithubApi for OctocrabClient
{
    async fn user_summary(&self, login: &str,) -> Result<UserSummary, Error,>
    {
        let route = format!("/users/{login}");
        debug!("GET {}", route);
        let raw: RawUser = self
            .octocrab
            .get(&route, None::<&(),>,)
            .await
            .map_err(|e| Error::upstream(format!("GitHub API error for {route}: {e}"),),)?;

        Ok(raw.into(),)
    }

    async fn contributed_repository_count(&self, login: &str,) -> Result<u64, Error,>
    {
        let payload = json!({
            "query": CONTRIBUTED_REPOSITORIES_QUERY,
            "variables": { "login": login },
        });
        debug!("POST /graphql repositoriesContributedTo for {}", login);
        let response: Value = self
            .octocrab
            .graphql(&payload,)
            .await
            .map_err(|e| Error::upstream(format!("GraphQL error: {e}"),),)?;

        contributed_count_from_response(&response,)
    }

    async fn repositories_page(
        &self,
        login: &str,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<RepositorySummary,>, Error,>
    {
        let route = format!("/users/{login}/repos");
        let params = RepositoryListParams {
            per_page,
            page,
            sort: "updated",
        };
        debug!("GET {} page {}", route, page);
        self.octocrab
            .get(&route, Some(&params,),)
            .await
            .map_err(|e| Error::upstream(format!("GitHub API error for {route}: {e}"),),)
    }

    async fn commit_activity(&self, full_name: &str,) -> PollOutcome<Vec<CommitActivityWeek,>,>
    {
        self.fetch_stats(&format!("/repos/{full_name}/stats/commit_activity"),).await
    }

    async fn code_frequency(&self, full_name: &str,) -> PollOutcome<Vec<CodeFrequencyWeek,>,>
    {
        self.fetch_stats::<Vec<Vec<i64,>,>,>(&format!("/repos/{full_name}/stats/code_frequency"),)
            .await
            .map(|rows| rows.iter().filter_map(|row| CodeFrequencyWeek::from_row(row,),).collect(),)
    }
}

/// Extracts `repositoriesContributedTo.totalCount` from a GraphQL response.
///
/// A missing count is treated as zero.
///
/// # Errors
///
/// Returns [`Error::Upstream`] when the response carries a non-empty
/// `errors` array.
pub fn contributed_count_from_response(response: &Value,) -> Result<u64, Error,>
{
    if let Some(errors,) = response.get("errors",).and_then(Value::as_array,)
        && !errors.is_empty()
    {
        return Err(Error::upstream(format!("GraphQL errors: {}", Value::Array(errors.clone()))),);
    }

    Ok(response
        .pointer("/data/user/repositoriesContributedTo/totalCount",)
        .and_then(Value::as_u64,)
        .unwrap_or(0,),)
}
