//! Output annotation and writing.
//!
//! Consumes the numerically-sorted address list plus the resolution
//! outcomes, assigns per-country sequence numbers, and writes the final
//! flat file.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

/// Formats the ordered output lines.
///
/// Each country label gets a running counter starting at 1, in address
/// order, zero-padded to three digits: `1.1.1.1#美国001`. Addresses with no
/// label come out bare. Pure function; counters depend only on the input
/// ordering, so the output is deterministic regardless of how resolution
/// was scheduled.
pub fn annotate(
    addresses: &[String],
    labels: &HashMap<String, Option<String>>,
) -> Vec<String> {
    let mut counters: HashMap<&str, u32> = HashMap::new();
    addresses
        .iter()
        .map(|address| {
            match labels.get(address).and_then(|label| label.as_deref()) {
                Some(label) => {
                    let counter = counters.entry(label).or_insert(0);
                    *counter += 1;
                    format!("{address}#{label}{:03}", *counter)
                }
                None => address.clone(),
            }
        })
        .collect()
}

/// Writes the annotated lines to the output file, one per line,
/// newline-joined (no trailing newline), fully overwriting prior contents.
pub fn write_output(path: &Path, lines: &[String]) -> io::Result<()> {
    fs::write(path, lines.join("\n"))
}
