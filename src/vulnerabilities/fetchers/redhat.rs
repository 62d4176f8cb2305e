//! This module implements a verdict fetcher reading the Red Hat security
//! website.
//! https://www.redhat.com/security/data/cve/

use log::{debug, error, info, trace, warn};
use reqwest::Url;

use crate::classifiers::{AdvisoryClassifier, PageVerdict};
use crate::error::{FetchError, Result};
use crate::models::{LookupRequest, LookupResult, Outcome, Platform, INVALID_PLATFORM_MESSAGE};
use crate::readers::PageReader;
use crate::vulnerabilities::cache_managers::CacheManager;
use crate::vulnerabilities::fetchers::VulnFetcher;

/// Where the CVE pages are.
pub const DEFAULT_BASE_URL: &str = "https://www.redhat.com/security/data/cve/";

/// The verdict when Red Hat doesn't know the CVE.
pub const NOT_FOUND_MESSAGE: &str =
    "!!FIX!! Not found on Red Hat's website. Google it, might be Windows only or bad CVE reference.";

/// The verdict when the website couldn't be reached.
pub const TRANSPORT_MESSAGE: &str = "There was a problem with the URL.";

/// This structs represents the Red Hat verdict fetcher.
pub struct RedHatFetcher {
    /// The URL the CVE pages are under.
    base_url: String,
    reader: Box<dyn PageReader>,
    classifier: Box<dyn AdvisoryClassifier>,
    /// Every advisory or statement found is stored there.
    cache: Box<dyn CacheManager>,
    /// Whether a cached verdict is used instead of fetching the pages.
    read_through: bool,
}

impl RedHatFetcher {
    /// Creates a new RedHatFetcher. The cache is only written to.
    pub fn new(
        base_url: &str,
        reader: Box<dyn PageReader>,
        classifier: Box<dyn AdvisoryClassifier>,
        cache: Box<dyn CacheManager>,
    ) -> Self {
        Self {
            base_url: base_url.to_string(),
            reader,
            classifier,
            cache,
            read_through: false,
        }
    }

    /// Enables or disables reading verdicts from the cache.
    pub fn with_read_through(mut self, read_through: bool) -> Self {
        self.read_through = read_through;
        self
    }

    /// The cache used by the fetcher.
    pub fn cache(&self) -> &dyn CacheManager {
        self.cache.as_ref()
    }

    /// The URL of the page of a CVE.
    /// Example: https://www.redhat.com/security/data/cve/CVE-2010-0742.html
    pub fn cve_url(&self, identifier: &str) -> String {
        format!("{}{}.html", self.base_url, identifier)
    }

    /// Fetches and classifies the page of a CVE.
    fn fetch_verdict(&self, request: &LookupRequest) -> LookupResult {
        trace!("Running RedHatFetcher::fetch_verdict()");
        let identifier = &request.identifier;
        let cve_url = self.cve_url(identifier);
        let html = match self.reader.read(&cve_url) {
            Ok(html) => html,
            Err(FetchError::NotFound { status, .. }) => {
                // Not cached, it could show up later
                info!("{} not found on the website (HTTP {})", identifier, status);
                return LookupResult::new(identifier, Outcome::NotFound, NOT_FOUND_MESSAGE);
            }
            Err(e) => {
                error!("Unable to fetch {}: {}", identifier, e);
                return LookupResult::new(identifier, Outcome::TransportError, TRANSPORT_MESSAGE);
            }
        };

        match self.classifier.classify(&html) {
            PageVerdict::Advisory { link } => self.follow_advisory(request, &cve_url, &link),
            PageVerdict::Statement { text } => {
                let message = format!("Red Hat Statement: \"{}\" - {}", text, cve_url);
                self.remember(request, LookupResult::new(identifier, Outcome::Statement, &message))
            }
            PageVerdict::NotFound => {
                LookupResult::new(identifier, Outcome::NotFound, NOT_FOUND_MESSAGE)
            }
            PageVerdict::Unresolved => self.unresolved(identifier, &cve_url),
        }
    }

    /// Reads the advisory to find the fixed package. When the advisory can't
    /// be read, the CVE is considered unresolved.
    fn follow_advisory(&self, request: &LookupRequest, cve_url: &str, link: &str) -> LookupResult {
        trace!("Running RedHatFetcher::follow_advisory()");
        let identifier = &request.identifier;
        // The link may be relative to the CVE page
        let advisory_url = Url::parse(cve_url)
            .and_then(|base| base.join(link))
            .map(|url| url.to_string())
            .unwrap_or_else(|_| link.to_string());
        debug!("Advisory of {} is {}", identifier, advisory_url);

        let html = match self.reader.read(&advisory_url) {
            Ok(html) => html,
            Err(e) => {
                warn!("Unable to read the advisory of {}: {}", identifier, e);
                return self.unresolved(identifier, cve_url);
            }
        };

        match self.classifier.extract_package(&html, request.platform) {
            Some(package) => {
                let message = format!("Resolved in version {}: {}", package, advisory_url);
                self.remember(request, LookupResult::new(identifier, Outcome::Resolved, &message))
            }
            None => {
                warn!("Unexpected advisory structure at {}", advisory_url);
                self.unresolved(identifier, cve_url)
            }
        }
    }

    fn unresolved(&self, identifier: &str, cve_url: &str) -> LookupResult {
        let message = format!(
            "!!FIX!! No RHSA for version {}, no statement either. See: {}",
            self.classifier.distribution_version(),
            cve_url
        );
        LookupResult::new(identifier, Outcome::Unresolved, &message)
    }

    /// Stores the verdict in cache. A failure doesn't change the verdict.
    fn remember(&self, request: &LookupRequest, result: LookupResult) -> LookupResult {
        if let Err(e) = self
            .cache
            .store(&request.identifier, &result.message, request.platform)
        {
            error!("Unable to store {} in cache: {}", request.identifier, e);
        }
        result
    }
}

impl VulnFetcher for RedHatFetcher {
    /// Looks the CVE up, in cache first if enabled, then on the website.
    fn lookup(&self, identifier: &str, platform: &str) -> LookupResult {
        trace!("Running RedHatFetcher::lookup()");
        let identifier = identifier.trim();
        let platform: Platform = match platform.parse() {
            Ok(p) => p,
            Err(e) => {
                debug!("{}", e);
                return LookupResult::new(identifier, Outcome::InvalidPlatform, INVALID_PLATFORM_MESSAGE);
            }
        };
        let request = LookupRequest::new(identifier, platform);

        if self.read_through {
            match self.cache.read(&request.identifier, request.platform) {
                Ok(Some(cached)) => {
                    debug!("{} found in cache", request.identifier);
                    return LookupResult::new(&request.identifier, Outcome::Cached, &cached);
                }
                Ok(None) => debug!("{} not in cache", request.identifier),
                Err(e) => error!("Unable to read the cache: {}", e),
            }
        }

        self.fetch_verdict(&request)
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.cache.close()
    }
}
