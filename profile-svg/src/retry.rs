// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Bounded polling for endpoints that answer "still computing".
///
/// GitHub statistics endpoints reply 202 while the numbers are generated in
/// the background. The helpers here re-issue the request after a delay until
/// the payload is ready or the attempt budget runs out.
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

/// Configuration for polling behavior.
#[derive(Debug, Clone, PartialEq,)]
pub struct RetryConfig
{
    /// Maximum number of requests, the first one included (default: 11).
    pub max_attempts:     u32,
    /// Delay before the first retry in milliseconds (default: 1500).
    pub initial_delay_ms: u64,
    /// Multiplier applied to the delay after each retry (default: 1.0).
    pub backoff_factor:   f64,
}

impl Default for RetryConfig
{
    fn default() -> Self
    {
        Self {
            max_attempts: 11, initial_delay_ms: 1500, backoff_factor: 1.0,
        }
    }
}

/// Outcome of a single polling attempt.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub enum PollOutcome<T,>
{
    /// The payload is available.
    Ready(T,),
    /// The upstream is still computing; ask again later.
    Pending,
    /// The upstream refused or returned garbage; asking again will not help.
    Unavailable(String,),
}

impl<T,> PollOutcome<T,>
{
    /// Transforms a ready payload, keeping the other states.
    pub fn map<U, F,>(self, f: F,) -> PollOutcome<U,>
    where
        F: FnOnce(T,) -> U,
    {
        match self {
            Self::Ready(value,) => PollOutcome::Ready(f(value,),),
            Self::Pending => PollOutcome::Pending,
            Self::Unavailable(reason,) => PollOutcome::Unavailable(reason,),
        }
    }
}

/// Polls `f` until it reports [`PollOutcome::Ready`] or gives up.
///
/// # Arguments
///
/// * `config` - Attempt budget and delays
/// * `operation_name` - Name of the operation for logging
/// * `f` - Async function performing one attempt
///
/// Returns `None` when the attempt budget is exhausted while the upstream is
/// still pending, or immediately on [`PollOutcome::Unavailable`].
///
/// # Example
///
/// ```no_run
/// use profile_svg::{PollOutcome, RetryConfig, poll_until_ready};
///
/// # async fn example() {
/// let config = RetryConfig::default();
/// let total = poll_until_ready(&config, "commit activity", || async {
///     PollOutcome::Ready(42,)
/// },)
/// .await;
/// assert_eq!(total, Some(42));
/// # }
/// ```
pub async fn poll_until_ready<F, Fut, T,>(
    config: &RetryConfig,
    operation_name: &str,
    mut f: F,
) -> Option<T,>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = PollOutcome<T,>,>,
{
    let mut attempt = 1;
    let mut delay_ms = config.initial_delay_ms;

    loop {
        match f().await {
            PollOutcome::Ready(result,) => {
                if attempt > 1 {
                    debug!("{} ready on attempt {}", operation_name, attempt);
                }
                return Some(result,);
            }
            PollOutcome::Unavailable(reason,) => {
                warn!("{} unavailable: {}", operation_name, reason);
                return None;
            }
            PollOutcome::Pending => {
                if attempt >= config.max_attempts {
                    warn!(
                        "{} still computing after {} attempts, counting it as zero",
                        operation_name, config.max_attempts
                    );
                    return None;
                }

                debug!(
                    "{} still computing on attempt {}/{}. Retrying in {}ms...",
                    operation_name, attempt, config.max_attempts, delay_ms
                );

                sleep(Duration::from_millis(delay_ms,),).await;
                delay_ms = (delay_ms as f64 * config.backoff_factor) as u64;
                attempt += 1;
            }
        }
    }
}
