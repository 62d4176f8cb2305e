//! In this module are declared the entities manipulated by this program

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// The message given when the platform is not supported.
pub const INVALID_PLATFORM_MESSAGE: &str = "Platform must be 'x86_64' or 'i386'.";

/// Represents the CPU architecture the packages are built for.
///
/// The architecture token replaces the `.src.` part of a source package
/// filename to give the name of the binary package.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Platform {
    #[serde(rename = "x86_64")]
    X86_64,
    #[serde(rename = "i386")]
    I386,
}

impl Platform {
    /// The token used in package filenames and in the cache.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::X86_64 => "x86_64",
            Platform::I386 => "i386",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error returned when a platform name is not supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPlatform(pub String);

impl fmt::Display for InvalidPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported platform \"{}\"", self.0)
    }
}

impl std::error::Error for InvalidPlatform {}

impl FromStr for Platform {
    type Err = InvalidPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x86_64" => Ok(Platform::X86_64),
            "i386" => Ok(Platform::I386),
            other => Err(InvalidPlatform(other.to_string())),
        }
    }
}

/// A CVE to look up for a given platform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupRequest {
    /// The CVE identifier, already trimmed.
    /// Example: CVE-2011-1089
    pub identifier: String,
    /// The platform of the packages.
    pub platform: Platform,
}

impl LookupRequest {
    /// Creates a new request. Surrounding whitespace is removed from
    /// the identifier.
    pub fn new(identifier: &str, platform: Platform) -> Self {
        Self {
            identifier: identifier.trim().to_string(),
            platform,
        }
    }
}

/// The kind of verdict reached for a CVE.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// An advisory fixes the CVE for the platform.
    Resolved,
    /// No advisory, but Red Hat published a statement.
    Statement,
    /// The CVE is unknown to Red Hat.
    NotFound,
    /// Neither an advisory nor a statement.
    Unresolved,
    /// The platform requested is not supported.
    InvalidPlatform,
    /// The advisory website couldn't be reached.
    TransportError,
    /// The verdict comes from the cache.
    Cached,
}

impl Outcome {
    /// Whether a verdict of this kind is written to the cache.
    pub fn is_cacheable(&self) -> bool {
        matches!(self, Outcome::Resolved | Outcome::Statement)
    }
}

/// Detailed information about the fix. Never filled for now.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RemediationDetail {
    /// The fixed package.
    pub package: String,
    /// The advisory URL.
    pub advisory_url: String,
}

/// The result of the lookup of one CVE.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LookupResult {
    /// The CVE identifier.
    pub identifier: String,
    /// The kind of verdict.
    pub outcome: Outcome,
    /// The verdict itself.
    /// Example: Resolved in version openssl-0.9.8e-12.el5.x86_64.rpm: https://rhn.redhat.com/errata/RHSA-2010-0162.html
    pub message: String,
    /// The line printed for this CVE: `<identifier> -- <message>`.
    pub summary_line: String,
    pub remediation_detail: Option<RemediationDetail>,
}

impl LookupResult {
    /// Creates a new LookupResult
    pub fn new(identifier: &str, outcome: Outcome, message: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            outcome,
            message: message.to_string(),
            summary_line: format!("{} -- {}", identifier, message),
            remediation_detail: None,
        }
    }
}

/// A row of the cache table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CacheRecord {
    pub id: i64,
    /// Set by the database when the row is inserted.
    /// Example: 2024-03-01 12:31:07
    pub timestamp: String,
    pub platform: String,
    pub identifier: String,
    /// The message of the verdict, without the identifier.
    pub result: String,
}
