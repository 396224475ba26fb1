//! Scan subcommand implementation.
//!
//! Handles `forkscan scan`, building [`ScanSettings`] from flags, environment
//! and the settings file before handing off to the controller.

use crate::cli::{OutputFormat, RepoArgs};
use crate::config::{AppSettings, ScanSettings};
use crate::error::CliResult;
use crate::github::GitHubClient;
use crate::output::{self, ForkList};
use crate::scan::ScanController;
use clap::Parser;

/// Scan a repository's forks.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    #[command(flatten)]
    pub target: RepoArgs,

    /// GitHub access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Forks requested per page (1-100)
    #[arg(long, value_name = "N")]
    pub page_size: Option<u32>,

    /// Stop after this many pages; run again to continue
    #[arg(long, value_name = "N")]
    pub max_pages: Option<u32>,

    /// Output format for results
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,

    /// Which forks to print when the scan ends
    #[arg(short, long, value_enum, default_value = "ahead-and-behind")]
    pub list: ForkList,
}

impl ScanCommand {
    /// Resolve the full scan configuration.
    pub fn settings(&self, app: &AppSettings) -> CliResult<ScanSettings> {
        let settings = ScanSettings::new(
            self.target.slug()?,
            self.token.clone(),
            self.target.progress_path()?,
        )
        .with_app_settings(app)
        .with_max_pages(self.max_pages);

        let settings = match &self.api_url {
            Some(url) => settings.with_api_url(url),
            None => settings,
        };
        let settings = match self.page_size {
            Some(size) => settings.with_page_size(size),
            None => settings,
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Execute the scan command.
    pub async fn execute(&self, app: &AppSettings, verbose: bool, quiet: bool) -> CliResult<()> {
        let settings = self.settings(app)?;
        let settings = if !verbose && !quiet && console::Term::stderr().is_term() {
            settings.with_progress()
        } else {
            settings
        };

        if !quiet && self.format == OutputFormat::Plain {
            output::print_scan_header(&settings.repo.to_string(), &settings.progress_path);
        }

        let client = GitHubClient::new(&settings).map_err(crate::error::ScanError::from)?;
        let controller = ScanController::new(client, settings);
        let outcome = controller.run().await?;

        if !quiet && self.format == OutputFormat::Plain {
            if outcome.completed {
                output::print_success(&format!(
                    "Scan complete: {} forks processed in total, {} this run",
                    outcome.progress.total_forks_processed, outcome.forks_processed
                ));
            } else {
                output::print_warning(&format!(
                    "Stopped after {} pages; run again to continue from page {}",
                    outcome.pages_processed,
                    outcome.progress.next_page()
                ));
            }
            if outcome.progress.errors > 0 {
                output::print_warning(&format!(
                    "{} forks could not be classified",
                    outcome.progress.errors
                ));
            }
            output::print_info(&format!("Forks {}:", self.list));
        }

        let entries = match self.list {
            ForkList::AheadAndBehind => outcome.forks_with_commits_ahead(),
            list => list.entries(&outcome.progress),
        };
        output::print_results(entries, self.format)?;

        Ok(())
    }
}
