/// The module cache_managers defines the verdict cache managers.
pub mod sqlite;

use crate::error::Result;
use crate::models::{CacheRecord, Platform};

/// A common interface between all cache managers.
///
/// The cache is append-only: records are never updated nor removed, and
/// the same CVE can be stored several times.
pub trait CacheManager {
    /// Reads the most recent verdict stored for a CVE & platform.
    fn read(&self, identifier: &str, platform: Platform) -> Result<Option<String>>;

    /// Stores a verdict for a CVE & platform.
    fn store(&self, identifier: &str, result: &str, platform: Platform) -> Result<()>;

    /// Lists all the records of a CVE, oldest first.
    fn records(&self, identifier: &str) -> Result<Vec<CacheRecord>>;

    /// Releases the cache. Nothing can be stored after that.
    fn close(self: Box<Self>) -> Result<()>;
}
