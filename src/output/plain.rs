//! Plain text output formatting.
//!
//! Result lines are unstyled so they can be piped; banners and status
//! messages use `console` styling.

use crate::storage::{ForkAhead, ProgressSummary};
use console::style;
use std::io::{self, Write};
use std::path::Path;

/// Write one line per fork.
pub fn write_plain<W: Write>(out: &mut W, entries: &[ForkAhead]) -> io::Result<()> {
    for entry in entries {
        writeln!(
            out,
            "{} is {} commits ahead.",
            entry.fork_name, entry.commits_ahead
        )?;
    }
    Ok(())
}

/// Print results in plain text format.
pub fn print_plain(entries: &[ForkAhead]) -> io::Result<()> {
    write_plain(&mut io::stdout().lock(), entries)
}

/// Print a header before scanning begins.
pub fn print_scan_header(repo: &str, progress_file: &Path) {
    println!();
    println!(
        "{} {} v{}",
        style("Starting").cyan(),
        style("forkscan").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(
        "{} Repository: {}",
        style("•").dim(),
        style(repo).white().bold()
    );
    println!(
        "{} Progress file: {}",
        style("•").dim(),
        style(progress_file.display()).dim()
    );
    println!();
}

/// Print the progress counters of a scan.
pub fn print_status(summary: &ProgressSummary, progress_file: &Path) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out)?;
    writeln!(
        out,
        "  {} {}",
        style("Progress file:").bold(),
        progress_file.display()
    )?;
    match summary.last_page {
        Some(last) => writeln!(
            out,
            "  {} {} (last page {})",
            style("Pages searched:").bold(),
            summary.pages_searched,
            last
        )?,
        None => writeln!(out, "  {} none", style("Pages searched:").bold())?,
    }
    if summary.in_flight_forks > 0 {
        writeln!(
            out,
            "  {} {} forks recorded on the next page",
            style("Interrupted:").bold(),
            summary.in_flight_forks
        )?;
    }
    writeln!(
        out,
        "  {} {}",
        style("Forks processed:").bold(),
        summary.total_forks_processed
    )?;
    writeln!(
        out,
        "               {} ahead, {} ahead and behind, {} identical or behind, {} errors",
        style(summary.ahead_only).green().bold(),
        style(summary.ahead_and_behind).cyan(),
        style(summary.identical_or_behind).dim(),
        style(summary.errors).red()
    )?;
    if let Some(updated) = summary.updated_at {
        writeln!(
            out,
            "  {} {}",
            style("Last saved:").bold(),
            updated.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
    }
    writeln!(out)?;

    Ok(())
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an info message.
pub fn print_info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}
