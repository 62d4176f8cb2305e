//! Writing verdicts
//!
//! Each [`LookupResult`] is handed to a writer as soon as the CVE has been
//! looked up. It provides a common interface, allowing to change the
//! output format without affecting the lookups.

pub mod csv;
pub mod json;
pub mod textstdout;

use std::io::{self, Write};

use clap::{builder::PossibleValue, ValueEnum};

use crate::models::LookupResult;

/// A trait to have a common interface between writers.
pub trait Writer {
    /// Writes what comes before the first verdict, if anything.
    fn begin(&self, _out: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }

    /// Writes one verdict.
    fn write(&self, out: &mut dyn Write, result: &LookupResult) -> io::Result<()>;
}

/// The output formats available.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Writers {
    /// `<CVE> -- <verdict>` lines
    TextStdout,
    Csv,
    /// One JSON object per line
    Json,
}

impl Writers {
    /// Creates the writer of the format.
    pub fn writer(&self) -> Box<dyn Writer> {
        match self {
            Writers::TextStdout => Box::new(textstdout::TextStdoutWriter),
            Writers::Csv => Box::new(csv::CsvWriter),
            Writers::Json => Box::new(json::JsonWriter),
        }
    }
}

impl ValueEnum for Writers {
    /// Lists the variants available for clap
    fn value_variants<'a>() -> &'a [Self] {
        &[Writers::TextStdout, Writers::Csv, Writers::Json]
    }

    /// Map each value to a possible value in clap
    fn to_possible_value(&self) -> Option<PossibleValue> {
        match &self {
            Writers::TextStdout => Some(PossibleValue::new("textstdout")),
            Writers::Csv => Some(PossibleValue::new("csv")),
            Writers::Json => Some(PossibleValue::new("json")),
        }
    }
}
