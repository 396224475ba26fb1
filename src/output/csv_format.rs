//! CSV output formatting.

use crate::storage::ForkAhead;
use std::io::{self, Write};

/// Write entries as CSV with a header row.
pub fn write_csv<W: Write>(out: W, entries: &[ForkAhead]) -> io::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    wtr.write_record(["fork", "commits_ahead"])?;
    for entry in entries {
        let commits_ahead = entry.commits_ahead.to_string();
        wtr.write_record([entry.fork_name.as_str(), commits_ahead.as_str()])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Print results in CSV format.
pub fn print_csv(entries: &[ForkAhead]) -> io::Result<()> {
    write_csv(io::stdout().lock(), entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_output() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &[ForkAhead::new("a/x", 4), ForkAhead::new("b/y", 1)]).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "fork,commits_ahead\na/x,4\nb/y,1\n"
        );
    }
}
