//! Result reporting.
//!
//! Sorts recorded forks by how far ahead they are and prints them as plain
//! text, JSON or CSV.

mod csv_format;
mod json_format;
mod plain;

pub use csv_format::{print_csv, write_csv};
pub use json_format::{print_json, write_json};
pub use plain::{
    print_error, print_info, print_plain, print_scan_header, print_status, print_success,
    print_warning, write_plain,
};

use crate::cli::OutputFormat;
use crate::storage::{ForkAhead, ScanProgress};
use std::io;

/// Which recorded list to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ForkList {
    /// Forks ahead of upstream that are also behind it
    #[default]
    AheadAndBehind,
    /// Forks ahead of upstream and not behind it
    AheadOnly,
}

impl ForkList {
    /// The entries of this list in `progress`, in recorded order.
    pub fn entries(self, progress: &ScanProgress) -> &[ForkAhead] {
        match self {
            Self::AheadAndBehind => &progress.forks_with_commits_ahead,
            Self::AheadOnly => &progress.forks_with_commits_ahead_but_not_behind,
        }
    }
}

impl std::fmt::Display for ForkList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AheadAndBehind => write!(f, "ahead and behind"),
            Self::AheadOnly => write!(f, "ahead, not behind"),
        }
    }
}

/// Sort by commits ahead, most first.
///
/// The sort is stable: ties keep their recorded order, which is the
/// listing's oldest-fork-first order.
pub fn sort_by_commits_ahead(entries: &[ForkAhead]) -> Vec<ForkAhead> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| b.commits_ahead.cmp(&a.commits_ahead));
    sorted
}

/// Sort and print entries in the requested format.
pub fn print_results(entries: &[ForkAhead], format: OutputFormat) -> io::Result<()> {
    let sorted = sort_by_commits_ahead(entries);
    match format {
        OutputFormat::Plain => print_plain(&sorted),
        OutputFormat::Json => print_json(&sorted),
        OutputFormat::Csv => print_csv(&sorted),
    }
}
