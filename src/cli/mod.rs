//! CLI subcommand definitions and handlers.
//!
//! Implements a git-like subcommand architecture:
//! - `forkscan scan` - Scan (or resume scanning) a repository's forks
//! - `forkscan report` - Print results from a progress file
//! - `forkscan status` - Show how far a scan has got
//!
//! With no subcommand, `scan` runs with its options taken from the
//! environment (`GITHUB_OWNER`, `GITHUB_REPO`, `GITHUB_TOKEN`,
//! `PROGRESS_FILENAME`).

mod report;
mod scan;
mod status;

pub use report::ReportCommand;
pub use scan::ScanCommand;
pub use status::StatusCommand;

use crate::config::{AppSettings, Paths};
use crate::error::{CliResult, ConfigError};
use crate::types::RepoSlug;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// forkscan - Find forks that are ahead of their upstream repository.
///
/// Walks every fork of a GitHub repository, compares its default branch with
/// upstream and records which forks carry commits upstream lacks. Progress is
/// saved after every fork, so an interrupted scan picks up where it stopped.
#[derive(Parser, Debug)]
#[command(name = "forkscan")]
#[command(author = "HueCodes <huecodes@proton.me>")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Find forks that are ahead of their upstream", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to custom settings file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Load settings from `--config`, or the default location.
    pub fn app_settings(&self) -> CliResult<AppSettings> {
        let settings = match &self.config {
            Some(path) => AppSettings::load_from(path)?,
            None => AppSettings::load()?,
        };
        Ok(settings)
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a repository's forks, resuming saved progress
    #[command(alias = "s")]
    Scan(ScanCommand),

    /// Print the sorted fork list from a progress file
    #[command(alias = "r")]
    Report(ReportCommand),

    /// Show scan progress counters
    Status(StatusCommand),
}

/// Options locating a repository and its progress file.
#[derive(Args, Debug, Clone, Default)]
pub struct RepoArgs {
    /// Owner of the upstream repository
    #[arg(long, env = "GITHUB_OWNER")]
    pub owner: Option<String>,

    /// Upstream repository name, or `owner/name`
    #[arg(long, env = "GITHUB_REPO")]
    pub repo: Option<String>,

    /// Progress file (defaults to one per repository in the data directory)
    #[arg(long = "progress-file", env = "PROGRESS_FILENAME", value_name = "PATH")]
    pub progress_file: Option<PathBuf>,
}

impl RepoArgs {
    /// Resolve the repository from `--repo owner/name` or `--owner` + `--repo`.
    pub fn slug(&self) -> CliResult<RepoSlug> {
        let repo = self
            .repo
            .as_deref()
            .ok_or(ConfigError::MissingValue("repository (--repo or GITHUB_REPO)"))?;

        let slug = match (&self.owner, repo.contains('/')) {
            (_, true) => repo.parse(),
            (Some(owner), false) => RepoSlug::new(owner.as_str(), repo),
            (None, false) => {
                return Err(ConfigError::MissingValue("owner (--owner or GITHUB_OWNER)").into())
            }
        };

        slug.map_err(|e| ConfigError::InvalidRepo(e.to_string()).into())
    }

    /// The progress file to use: explicit path, or the per-repository default.
    pub fn progress_path(&self) -> CliResult<PathBuf> {
        if let Some(path) = &self.progress_file {
            return Ok(path.clone());
        }
        let slug = self.slug()?;
        Ok(Paths::new()?.progress_file(&slug))
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    Plain,
    /// JSON structured output
    Json,
    /// CSV format for data analysis
    Csv,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Plain
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}
