//! The vulnerabilities module contains what's needed to give a verdict
//! about CVEs.
//!
//! It is composed of two parts, fetchers and cache managers.
//! A fetcher is there to find the verdict from a source (e.g. Red Hat).
//! A cache manager stores the verdicts found by the fetcher
//! (e.g. in a SQLite database)

pub mod cache_managers;
pub mod fetchers;

use clap::{builder::PossibleValue, ValueEnum};

/// This enum represents the source of the advisories.
#[derive(Clone, Debug, PartialEq)]
pub enum VulnSource {
    /// The advisories are read on the Red Hat security website.
    RedHat,
}

impl ValueEnum for VulnSource {
    /// Lists the variants available for clap
    fn value_variants<'a>() -> &'a [Self] {
        &[VulnSource::RedHat]
    }

    /// Map each value to a possible value in clap
    fn to_possible_value(&self) -> Option<PossibleValue> {
        match &self {
            VulnSource::RedHat => Some(PossibleValue::new("redhat")),
        }
    }
}
