//! Report subcommand implementation.
//!
//! Prints the sorted fork list from an existing progress file without
//! touching the network.

use crate::cli::{OutputFormat, RepoArgs};
use crate::error::CliResult;
use crate::output::{self, ForkList};
use crate::storage::ProgressStore;
use clap::Parser;

/// Print recorded results.
#[derive(Parser, Debug)]
pub struct ReportCommand {
    #[command(flatten)]
    pub target: RepoArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,

    /// Which forks to print
    #[arg(short, long, value_enum, default_value = "ahead-and-behind")]
    pub list: ForkList,
}

impl ReportCommand {
    /// Execute the report command.
    pub fn execute(&self, quiet: bool) -> CliResult<()> {
        let path = self.target.progress_path()?;
        let progress = ProgressStore::new(&path).read()?;

        if !quiet && self.format == OutputFormat::Plain {
            output::print_info(&format!(
                "Forks {} ({} of {} processed):",
                self.list,
                self.list.entries(&progress).len(),
                progress.total_forks_processed
            ));
        }
        output::print_results(self.list.entries(&progress), self.format)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CliError, StorageError};
    use std::fs;

    #[test]
    fn test_corrupt_progress_file_is_reported_and_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, b"\xff\xfe").unwrap();

        let cmd = ReportCommand {
            target: RepoArgs {
                progress_file: Some(path.clone()),
                ..RepoArgs::default()
            },
            format: OutputFormat::Json,
            list: ForkList::default(),
        };
        let err = cmd.execute(true).unwrap_err();
        assert!(matches!(err, CliError::Storage(StorageError::Corrupt { .. })));
        assert_eq!(fs::read(&path).unwrap(), b"\xff\xfe".to_vec());
    }
}
