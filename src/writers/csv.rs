//! Write the verdicts as CSV
//! A header line, then one line per CVE.

use std::io::{self, Write};

use super::Writer;
use crate::models::LookupResult;

/// A writer to print the verdicts as CSV.
pub struct CsvWriter;

/// Escape quotes (") to avoid breaking the CSV
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

impl Writer for CsvWriter {
    fn begin(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "\"CVE\",\"Outcome\",\"Result\"")
    }

    fn write(&self, out: &mut dyn Write, result: &LookupResult) -> io::Result<()> {
        // Serializing a unit variant gives a plain string
        let outcome = serde_json::to_value(result.outcome)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        writeln!(
            out,
            "{},{},{}",
            quote(&result.identifier),
            quote(&outcome),
            quote(&result.message)
        )
    }
}
