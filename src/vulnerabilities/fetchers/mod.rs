/// The module fetchers defines the verdict fetchers.
pub mod redhat;

use crate::error::Result;
use crate::models::LookupResult;

/// A common interface between all verdict fetchers.
pub trait VulnFetcher {
    /// Looks a CVE up for the given platform name. It never fails, every
    /// problem is turned into a verdict.
    fn lookup(&self, identifier: &str, platform: &str) -> LookupResult;

    /// Releases the resources held by the fetcher.
    fn close(self: Box<Self>) -> Result<()>;
}
