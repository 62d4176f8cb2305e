//! Write the verdicts as JSON
//! One JSON object per line, so the verdicts can be streamed.

use std::io::{self, Write};

use super::Writer;
use crate::models::LookupResult;

/// A writer to print the verdicts as JSON lines.
pub struct JsonWriter;

impl Writer for JsonWriter {
    fn write(&self, out: &mut dyn Write, result: &LookupResult) -> io::Result<()> {
        serde_json::to_writer(&mut *out, result)?;
        writeln!(out)
    }
}
