use std::convert::Infallible;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use docver_core::Quota;

#[derive(Parser, Debug)]
#[command(
    name = "docver",
    author,
    version,
    about = "Manage the versions of a multi-version documentation site",
    long_about = None,
    args_override_self = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Print debug logs to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Also append logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Purge unwanted documentation builds
    #[command(args_override_self = true)]
    Purge(PurgeArgs),
    /// Synchronize metadata and symlinks
    #[command(visible_alias = "sync", args_override_self = true)]
    Synchronize(SyncArgs),
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct CommonArgs {
    /// Path to your documentation output directory [default: "docs" unless set in the config]
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Path to your typedoc config, or a directory containing one
    #[arg(long, value_name = "PATH")]
    pub typedoc: Option<PathBuf>,

    /// Automatically confirm prompts
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct PurgeArgs {
    /// Version ranges to purge
    #[arg(value_name = "VERSIONS")]
    pub versions: Vec<String>,

    /// Purge stale dev builds (default)
    #[arg(long, overrides_with = "no_stale")]
    pub stale: bool,

    /// Keep stale dev builds
    #[arg(long, overrides_with = "stale")]
    pub no_stale: bool,

    /// Number of major versions to keep
    #[arg(long, value_name = "N", value_parser = parse_count, allow_negative_numbers = true)]
    pub major: Vec<f64>,

    /// Number of minor versions to keep per major version
    #[arg(long, value_name = "N", value_parser = parse_count, allow_negative_numbers = true)]
    pub minor: Vec<f64>,

    /// Number of patch versions to keep per minor version
    #[arg(long, value_name = "N", value_parser = parse_count, allow_negative_numbers = true)]
    pub patch: Vec<f64>,

    /// Version ranges to never purge
    #[arg(long, short, value_name = "RANGE")]
    pub exclude: Vec<String>,

    /// Let version ranges match prereleases
    #[arg(long, visible_alias = "pre")]
    pub prerelease: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl PurgeArgs {
    #[must_use]
    pub fn stale(&self) -> bool {
        !self.no_stale
    }

    #[must_use]
    pub fn quotas(&self) -> (Quota, Quota, Quota) {
        (
            Quota::from_last(&self.major),
            Quota::from_last(&self.minor),
            Quota::from_last(&self.patch),
        )
    }
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct SyncArgs {
    /// Always synchronize symlinks
    #[arg(long)]
    pub symlinks: bool,

    /// Path to the package.json whose version must have docs
    #[arg(long, value_name = "PATH", default_value = "package.json")]
    pub package: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Counts that are not numbers become NaN, which disables the quota.
#[allow(clippy::unnecessary_wraps)]
fn parse_count(value: &str) -> Result<f64, Infallible> {
    Ok(value.trim().parse().unwrap_or(f64::NAN))
}
