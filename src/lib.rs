//! Match CVEs against the Red Hat security advisories.
//!
//! Every CVE is looked up on the Red Hat website. Its page tells whether an
//! advisory (RHSA) fixes it, whether Red Hat published a statement instead,
//! or whether nothing is known. Advisories and statements are kept in a
//! SQLite cache.

pub mod application;
pub mod classifiers;
pub mod error;
pub mod models;
pub mod readers;
pub mod vulnerabilities;
pub mod writers;
