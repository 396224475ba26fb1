//! JSON output formatting.

use crate::storage::ForkAhead;
use std::io::{self, Write};

/// Write entries as a pretty-printed JSON array.
pub fn write_json<W: Write>(out: &mut W, entries: &[ForkAhead]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, entries)?;
    writeln!(out)
}

/// Print results in JSON format.
pub fn print_json(entries: &[ForkAhead]) -> io::Result<()> {
    write_json(&mut io::stdout().lock(), entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_keys() {
        let mut buf = Vec::new();
        write_json(&mut buf, &[ForkAhead::new("a/x", 4)]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["fork"], "a/x");
        assert_eq!(value[0]["commits_ahead"], 4);
    }
}
