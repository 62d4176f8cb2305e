//! This module declares the advisory classifiers.
//! A classifier reads the markup of an advisory website and tells what
//! kind of remediation exists for a CVE. It never touches the network,
//! the pages are given to it.

pub mod markup;
pub mod redhat;

use crate::models::Platform;

/// What the CVE page says, before the advisory itself is read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageVerdict {
    /// An advisory fixes the CVE. The link leads to the advisory page.
    Advisory { link: String },
    /// The vendor published a statement about the CVE.
    Statement { text: String },
    /// The page says the CVE is unknown.
    NotFound,
    /// Neither an advisory nor a statement.
    Unresolved,
}

/// A common interface between all advisory classifiers.
pub trait AdvisoryClassifier {
    /// Classifies the page of a CVE.
    fn classify(&self, html: &str) -> PageVerdict;

    /// Extracts the name of the fixed package for the given platform from
    /// the advisory page. Returns None when the page doesn't have the
    /// expected structure.
    fn extract_package(&self, html: &str, platform: Platform) -> Option<String>;

    /// The version of the distribution the advisories are searched for.
    fn distribution_version(&self) -> &str;
}
