//! # forkscan - Find Forks That Are Ahead of Upstream
//!
//! forkscan walks every fork of a GitHub repository, compares each fork's
//! default branch with the upstream default branch and sorts the forks by how
//! many commits they carry that upstream lacks.
//!
//! ## Features
//!
//! - **Resumable**: progress is written after every fork; an interrupted scan
//!   continues from the first unfinished page without counting a fork twice
//! - **Classification**: forks are bucketed as ahead, ahead and behind,
//!   identical or behind, or unknown
//! - **Multiple Output Formats**: Plain text, JSON, and CSV
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use forkscan::config::ScanSettings;
//! use forkscan::github::GitHubClient;
//! use forkscan::scan::ScanController;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = ScanSettings::new("octocat/hello-world".parse()?, "ghp_...", "progress.json");
//!     let client = GitHubClient::new(&settings)?;
//!     let outcome = ScanController::new(client, settings).run().await?;
//!
//!     for fork in forkscan::output::sort_by_commits_ahead(outcome.forks_with_commits_ahead()) {
//!         println!("{} is {} commits ahead.", fork.fork_name, fork.commits_ahead);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Repository slug and commit SHA newtypes
//! - [`github`] - The `RepositoryApi` trait and its GitHub implementation
//! - [`scan`] - Divergence classifier and the resumable scan controller
//! - [`storage`] - Progress file persistence
//! - [`config`] - Settings file, XDG paths and per-run scan settings
//! - [`output`] - Result sorting and formatting
//! - [`error`] - Error types

pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod output;
pub mod scan;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{ApiError, CliError, ScanError};
pub use github::{GitHubClient, RepositoryApi};
pub use scan::{classify, Bucket, ScanController, ScanOutcome};
pub use storage::{ForkAhead, ProgressStore, ScanProgress};
pub use types::{CommitSha, RepoSlug};
