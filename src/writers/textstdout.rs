//! Write the verdicts as text
//! It is the default writer, one `<CVE> -- <verdict>` line per CVE.

use std::io::{self, Write};

use super::Writer;
use crate::models::LookupResult;

/// A writer to print the verdicts in the terminal.
pub struct TextStdoutWriter;

impl Writer for TextStdoutWriter {
    fn write(&self, out: &mut dyn Write, result: &LookupResult) -> io::Result<()> {
        writeln!(out, "{}", result.summary_line)
    }
}
