//! This module contains the SqliteCacheManager struct.

use std::env;
use std::path::{Path, PathBuf};

use log::{debug, error, trace};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::Result;
use crate::models::{CacheRecord, Platform};
use crate::vulnerabilities::cache_managers::CacheManager;

/// The name of the database file.
pub const CACHE_FILE: &str = "cache.db";

/// Represents a cache manager which stores the verdicts in a SQLite table.
///
/// The table has the following structure:
///
/// | column    | content                          |
/// |-----------|----------------------------------|
/// | id        | auto-increment                   |
/// | timestamp | set by SQLite on insertion       |
/// | platform  | x86_64 or i386                   |
/// | cve       | the CVE identifier (indexed)     |
/// | result    | the verdict, without the CVE     |
pub struct SqliteCacheManager {
    conn: Connection,
}

impl SqliteCacheManager {
    /// Opens the cache stored in the given file, creating it if needed.
    pub fn open(path: &Path) -> Result<Self> {
        trace!("Running SqliteCacheManager::open()");
        debug!("Opening the cache {}", path.to_string_lossy());
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Opens a cache living in memory only.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    /// The default location of the cache, next to the executable.
    pub fn default_path() -> PathBuf {
        if let Ok(mut p) = env::current_exe() {
            p.pop();
            p.join(CACHE_FILE)
        } else {
            // By default, the cache is created in the current working directory
            PathBuf::from(CACHE_FILE)
        }
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let cache = Self { conn };
        cache.init_schema()?;
        Ok(cache)
    }

    /// Creates the table and its index if they don't exist yet.
    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS cache (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp NOT NULL DEFAULT CURRENT_TIMESTAMP,
                platform TEXT NOT NULL,
                cve TEXT NOT NULL,
                result TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS cve_idx ON cache (cve);
            "#,
        )?;
        Ok(())
    }
}

impl CacheManager for SqliteCacheManager {
    /// Reads the verdict of the last record for the CVE & platform.
    fn read(&self, identifier: &str, platform: Platform) -> Result<Option<String>> {
        trace!("Running SqliteCacheManager::read()");
        let result = self
            .conn
            .query_row(
                "SELECT result FROM cache WHERE cve = ?1 AND platform = ?2 ORDER BY id DESC LIMIT 1",
                params![identifier, platform.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(result)
    }

    /// Appends a record. The timestamp is set by SQLite.
    fn store(&self, identifier: &str, result: &str, platform: Platform) -> Result<()> {
        trace!("Running SqliteCacheManager::store()");
        if result.is_empty() {
            error!("Refusing to cache an empty verdict for {}", identifier);
            return Ok(());
        }
        self.conn.execute(
            "INSERT INTO cache (cve, result, platform) VALUES (?1, ?2, ?3)",
            params![identifier, result, platform.as_str()],
        )?;
        debug!("{} stored in cache for {}", identifier, platform);
        Ok(())
    }

    fn records(&self, identifier: &str) -> Result<Vec<CacheRecord>> {
        let mut statement = self.conn.prepare(
            "SELECT id, CAST(timestamp AS TEXT), platform, cve, result FROM cache WHERE cve = ?1 ORDER BY id",
        )?;
        let records = statement
            .query_map(params![identifier], |row| {
                Ok(CacheRecord {
                    id: row.get(0)?,
                    timestamp: row.get(1)?,
                    platform: row.get(2)?,
                    identifier: row.get(3)?,
                    result: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<CacheRecord>>>()?;
        Ok(records)
    }

    fn close(self: Box<Self>) -> Result<()> {
        trace!("Running SqliteCacheManager::close()");
        self.conn.close().map_err(|(_, e)| e)?;
        Ok(())
    }
}
