//! Status subcommand implementation.

use crate::cli::RepoArgs;
use crate::error::CliResult;
use crate::output;
use crate::storage::ProgressStore;
use clap::Parser;

/// Show scan progress counters.
#[derive(Parser, Debug)]
pub struct StatusCommand {
    #[command(flatten)]
    pub target: RepoArgs,

    /// Print the counters as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatusCommand {
    /// Execute the status command.
    pub fn execute(&self) -> CliResult<()> {
        let path = self.target.progress_path()?;
        let summary = ProgressStore::new(&path).read()?.summary();

        if self.json {
            let json = serde_json::to_string_pretty(&summary)
                .map_err(|e| crate::error::CliError::Other(e.to_string()))?;
            println!("{}", json);
        } else {
            output::print_status(&summary, &path)?;
        }

        Ok(())
    }
}
