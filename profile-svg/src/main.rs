// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Command-line interface for the profile-svg binary.
//!
//! One subcommand per job. Every flag falls back to an environment variable
//! so scheduled workflows can configure the jobs without arguments.

use std::{path::PathBuf, process};

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use profile_svg::{
    AccountSources, AlignmentMode, BannerConfig, DEFAULT_LINE_WIDTH, Error, LayoutConfig,
    OctocrabClient, StatsConfig, UpdateOutcome, UptimeConfig, run_banner, run_stats, run_uptime,
};
use tracing_subscriber::EnvFilter;

/// Command line interface for the profile README asset generators.
#[derive(Debug, Parser,)]
#[command(name = "profile-svg", version, about = "Generate the SVG assets of a GitHub profile README")]
struct Cli
{
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand,)]
/// Supported commands exposed by the CLI.
enum Command
{
    /// Render the seasonal name banner.
    Banner(BannerArgs,),
    /// Refresh the GitHub statistics of the stats card.
    Stats(StatsArgs,),
    /// Refresh the uptime line of the stats card.
    Uptime(UptimeArgs,),
}

/// Sources the account identifier is resolved from.
#[derive(Debug, Args, Default,)]
struct AccountArgs
{
    /// GitHub login whose assets are generated.
    #[arg(long = "account", env = "USERNAME", value_name = "LOGIN")]
    account: Option<String,>,

    /// Owner of the repository running the job.
    #[arg(long = "repository-owner", env = "GITHUB_REPOSITORY_OWNER", hide = true)]
    repository_owner: Option<String,>,

    /// `owner/name` of the repository running the job.
    #[arg(long = "repository", env = "GITHUB_REPOSITORY", hide = true)]
    repository: Option<String,>,
}

impl AccountArgs
{
    fn sources(&self,) -> AccountSources
    {
        AccountSources {
            explicit:         self.account.clone(),
            repository_owner: self.repository_owner.clone(),
            repository:       self.repository.clone(),
        }
    }
}

/// Template location and filler strategy.
#[derive(Debug, Args,)]
struct LayoutArgs
{
    /// SVG card rewritten in place.
    #[arg(long = "svg-path", env = "SVG_PATH", value_name = "PATH")]
    svg_path: Option<PathBuf,>,

    /// Filler strategy for the dot leaders.
    #[arg(long = "alignment", env = "SVG_ALIGNMENT", value_enum, default_value_t = AlignmentMode::Column)]
    alignment: AlignmentMode,

    /// Total visible line width used by the fixed alignment.
    #[arg(long = "line-width", env = "SVG_LINE_WIDTH", default_value_t = DEFAULT_LINE_WIDTH)]
    line_width: usize,
}

impl LayoutArgs
{
    fn layout(&self,) -> Result<LayoutConfig, Error,>
    {
        LayoutConfig::new(self.svg_path.clone(), self.alignment, self.line_width,)
    }
}

#[derive(Debug, Args,)]
struct StatsArgs
{
    /// GitHub token used for every API call.
    #[arg(long = "token", env = "GITHUB_TOKEN", hide_env_values = true, value_name = "TOKEN")]
    token: Option<String,>,

    #[command(flatten)]
    account: AccountArgs,

    #[command(flatten)]
    layout: LayoutArgs,
}

#[derive(Debug, Args,)]
struct UptimeArgs
{
    /// Date the uptime counts from, as `YYYY-MM-DD`.
    #[arg(long = "origin", env = "UPTIME_ORIGIN", value_name = "DATE")]
    origin: Option<String,>,

    #[command(flatten)]
    layout: LayoutArgs,
}

#[derive(Debug, Args,)]
struct BannerArgs
{
    /// Name rendered as the banner heading.
    #[arg(long = "name", env = "BANNER_NAME", value_name = "NAME")]
    name: Option<String,>,

    #[command(flatten)]
    account: AccountArgs,

    /// Destination of the generated banner.
    #[arg(long = "output", env = "BANNER_PATH", value_name = "PATH")]
    output: Option<PathBuf,>,

    /// IANA time zone in which the season is evaluated.
    #[arg(long = "time-zone", env = "SEASON_TIME_ZONE", value_name = "TZ")]
    time_zone: Option<String,>,
}

/// Entry point that reports errors and sets the appropriate exit status.
#[tokio::main]
async fn main()
{
    init_tracing();

    if let Err(error,) = run(Cli::parse(),).await {
        eprintln!("{}", error.to_display_string());
        process::exit(1,);
    }
}

fn init_tracing()
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info",),);
    tracing_subscriber::fmt().with_env_filter(filter,).with_writer(std::io::stderr,).init();
}

/// Executes the selected job.
///
/// # Errors
///
/// Propagates configuration, upstream and template errors from the job.
async fn run(cli: Cli,) -> Result<UpdateOutcome, Error,>
{
    match cli.command {
        Command::Banner(args,) => run_banner(&banner_config(&args,)?, Utc::now(),),
        Command::Stats(args,) => {
            let config = stats_config(&args,)?;
            let client = OctocrabClient::new(&config.token,)?;
            run_stats(&config, &client, Utc::now(),).await
        }
        Command::Uptime(args,) => run_uptime(&uptime_config(&args,)?, Utc::now().date_naive(),),
    }
}

fn stats_config(args: &StatsArgs,) -> Result<StatsConfig, Error,>
{
    StatsConfig::new(args.token.as_deref(), &args.account.sources(), args.layout.layout()?,)
}

fn uptime_config(args: &UptimeArgs,) -> Result<UptimeConfig, Error,>
{
    UptimeConfig::new(args.origin.as_deref(), args.layout.layout()?,)
}

fn banner_config(args: &BannerArgs,) -> Result<BannerConfig, Error,>
{
    BannerConfig::new(
        args.name.as_deref(),
        &args.account.sources(),
        args.output.clone(),
        args.time_zone.as_deref(),
    )
}

#[cfg(test)]
mod tests
{
    use std::{fs, path::Path};

    use clap::Parser;
    use tempfile::tempdir;

    use super::{Cli, Command, banner_config, run, stats_config, uptime_config};
    use profile_svg::{AlignmentMode, Error, UpdateOutcome};

    #[test]
    fn stats_subcommand_accepts_explicit_flags()
    {
        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "stats",
            "--token",
            "ghp_example",
            "--account",
            "octocat",
            "--svg-path",
            "card.svg",
            "--alignment",
            "fixed",
            "--line-width",
            "80",
        ],)
        .expect("failed to parse CLI",);

        let args = match cli.command {
            Command::Stats(args,) => args,
            other => panic!("unexpected command variant: {other:?}"),
        };
        let config = stats_config(&args,).expect("valid stats config",);

        assert_eq!(config.account, "octocat");
        assert_eq!(config.layout.svg_path, Path::new("card.svg"));
        assert_eq!(config.layout.alignment, AlignmentMode::Fixed);
        assert_eq!(config.layout.line_width, 80);
    }

    #[test]
    fn stats_subcommand_rejects_blank_token()
    {
        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "stats",
            "--token",
            " ",
            "--account",
            "octocat",
        ],)
        .expect("failed to parse CLI",);

        let args = match cli.command {
            Command::Stats(args,) => args,
            other => panic!("unexpected command variant: {other:?}"),
        };
        let error = stats_config(&args,).expect_err("expected configuration error",);
        assert!(matches!(error, Error::Config { .. }));
    }

    #[test]
    fn invalid_alignment_is_rejected_by_parser()
    {
        let result =
            Cli::try_parse_from([env!("CARGO_PKG_NAME"), "uptime", "--alignment", "diagonal",],);
        assert!(result.is_err());
    }

    #[test]
    fn uptime_subcommand_validates_origin()
    {
        let cli = Cli::try_parse_from([env!("CARGO_PKG_NAME"), "uptime", "--origin", "06/08/2001",],)
            .expect("failed to parse CLI",);

        let args = match cli.command {
            Command::Uptime(args,) => args,
            other => panic!("unexpected command variant: {other:?}"),
        };
        let error = uptime_config(&args,).expect_err("expected configuration error",);
        assert!(error.to_display_string().contains("YYYY-MM-DD"));
    }

    #[test]
    fn banner_subcommand_prefers_explicit_name()
    {
        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "banner",
            "--name",
            "Ada Lovelace",
            "--output",
            "out/name.svg",
            "--time-zone",
            "Asia/Tokyo",
        ],)
        .expect("failed to parse CLI",);

        let args = match cli.command {
            Command::Banner(args,) => args,
            other => panic!("unexpected command variant: {other:?}"),
        };
        let config = banner_config(&args,).expect("valid banner config",);

        assert_eq!(config.name, "Ada Lovelace");
        assert_eq!(config.output_path, Path::new("out/name.svg"));
        assert_eq!(config.time_zone, chrono_tz::Asia::Tokyo);
    }

    #[tokio::test]
    async fn banner_command_writes_output()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let output = temp.path().join("assets",).join("name.svg",);

        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "banner",
            "--name",
            "Ada",
            "--output",
            output.to_str().expect("utf8",),
        ],)
        .expect("failed to parse CLI",);

        let outcome = run(cli,).await.expect("banner job failed",);
        assert_eq!(outcome, UpdateOutcome::Updated);
        assert!(fs::read_to_string(&output,).expect("read back",).contains("<h1>Ada</h1>"));
    }

    #[tokio::test]
    async fn uptime_command_reports_missing_template()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let missing = temp.path().join("absent.svg",);

        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "uptime",
            "--origin",
            "2001-08-06",
            "--svg-path",
            missing.to_str().expect("utf8",),
        ],)
        .expect("failed to parse CLI",);

        let error = run(cli,).await.expect_err("expected template error",);
        assert!(matches!(error, Error::TemplateIo { .. }));
    }
}
