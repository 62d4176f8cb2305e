//! This module contains the main structure and logic for the whole
//! application.

use std::io::{Read, Write};
use std::path::PathBuf;

use clap::Parser;
use log::{debug, error, info, trace, LevelFilter};

use crate::classifiers::redhat::RedHatClassifier;
use crate::error::Result;
use crate::readers::http::HttpReader;
use crate::vulnerabilities::cache_managers::sqlite::SqliteCacheManager;
use crate::vulnerabilities::fetchers::redhat::{RedHatFetcher, DEFAULT_BASE_URL};
use crate::vulnerabilities::fetchers::VulnFetcher;
use crate::vulnerabilities::VulnSource;
use crate::writers::{Writer, Writers};

/// The text shown when nothing is piped in.
pub const USAGE: &str = "No input detected. You need to pipe a whitespace separated list of CVEs in!\n\
e.g. `rhsa-report < cvelist.txt` or your preferred method.";

/// The default User-Agent of the HTTP requests.
pub const USER_AGENT: &str = concat!("rhsa-report/", env!("CARGO_PKG_VERSION"));

/// Represents the application
pub struct Application {
    /// Gives the verdict of each CVE.
    fetcher: Box<dyn VulnFetcher>,
    /// Prints the verdicts.
    writer: Box<dyn Writer>,
    /// The platform name, as given on the command line.
    platform: String,
}

impl Application {
    /// Creates the application from the command line arguments.
    /// The cache is opened here and kept until [`Application::close`].
    pub fn new(args: &Args) -> Result<Self> {
        trace!("In Application::new()");
        let fetcher: Box<dyn VulnFetcher> = match args.source {
            VulnSource::RedHat => {
                let cache_path = args
                    .cache_file
                    .clone()
                    .unwrap_or_else(SqliteCacheManager::default_path);
                let cache = SqliteCacheManager::open(&cache_path)?;
                let reader = HttpReader::new(&args.user_agent)?;
                let classifier = RedHatClassifier::new(&args.rhel_version)?;
                Box::new(
                    RedHatFetcher::new(
                        &args.base_url,
                        Box::new(reader),
                        Box::new(classifier),
                        Box::new(cache),
                    )
                    .with_read_through(args.use_cache),
                )
            }
        };
        Ok(Self::with_fetcher(fetcher, args.writer.writer(), &args.platform))
    }

    /// Creates the application with an already built fetcher.
    pub fn with_fetcher(fetcher: Box<dyn VulnFetcher>, writer: Box<dyn Writer>, platform: &str) -> Self {
        Self {
            fetcher,
            writer,
            platform: platform.to_string(),
        }
    }

    /// Looks up every CVE of the input, in order, and writes the verdicts
    /// as they come. Returns the number of CVEs handled.
    pub fn process(&self, input: &str, out: &mut dyn Write) -> Result<usize> {
        trace!("Running Application::process()");
        self.writer.begin(out)?;
        let mut count = 0;
        for identifier in input.split_whitespace() {
            debug!("Looking up {}", identifier);
            let result = self.fetcher.lookup(identifier, &self.platform);
            self.writer.write(out, &result)?;
            count += 1;
        }
        out.flush()?;
        info!("{} CVEs handled", count);
        Ok(count)
    }

    /// Closes the cache.
    pub fn close(self) -> Result<()> {
        trace!("Running Application::close()");
        self.fetcher.close()
    }
}

/// The exit status of a run where every CVE has been handled.
pub const EXIT_SUCCESS: u8 = 0;
/// The exit status when nothing was piped in, or when the run couldn't
/// start or write its output.
pub const EXIT_FAILURE: u8 = 1;

/// Runs the whole program: reads the CVEs, looks them up and writes the
/// verdicts. Returns the exit status.
pub fn run(args: &Args, input: &mut dyn Read, interactive: bool, out: &mut dyn Write) -> u8 {
    trace!("Running application::run()");
    // The CVEs must be piped in
    let input = match read_input(input, interactive) {
        Ok(Some(input)) => input,
        Ok(None) => {
            if let Err(e) = writeln!(out, "{}", USAGE) {
                error!("Unable to write the usage: {}", e);
            }
            return EXIT_FAILURE;
        }
        Err(e) => {
            error!("Unable to read the input: {}", e);
            return EXIT_FAILURE;
        }
    };

    let application = match Application::new(args) {
        Ok(application) => application,
        Err(e) => {
            error!("{}", e);
            return EXIT_FAILURE;
        }
    };

    let mut status = EXIT_SUCCESS;
    if let Err(e) = application.process(&input, out) {
        error!("Unable to write the verdicts: {}", e);
        status = EXIT_FAILURE;
    }
    if let Err(e) = application.close() {
        error!("Unable to close the cache: {}", e);
    }
    status
}

/// Reads the whole input. Returns None when the input is interactive, since
/// the CVEs are expected to be piped in.
pub fn read_input(input: &mut dyn Read, interactive: bool) -> Result<Option<String>> {
    if interactive {
        debug!("The input is a terminal");
        return Ok(None);
    }
    let mut data = String::new();
    input.read_to_string(&mut data)?;
    Ok(Some(data))
}

/// Represents the CLI arguments accepted by rhsa-report
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The platform of the packages (x86_64 or i386)
    #[arg(short, long, value_name = "PLATFORM", default_value = "x86_64")]
    pub platform: String,
    /// The RHEL version advisories are searched for
    #[arg(short, long, value_name = "VERSION", default_value = "5")]
    pub rhel_version: String,
    /// The URL the CVE pages are under
    #[arg(short, long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
    /// The advisory source
    #[arg(short, long, value_name = "SOURCE", default_value = "redhat")]
    pub source: VulnSource,
    /// The SQLite file of the cache. Defaults to cache.db next to the executable
    #[arg(short, long, value_name = "FILE")]
    pub cache_file: Option<PathBuf>,
    /// Use the verdicts already in cache instead of fetching the pages again
    #[arg(short, long)]
    pub use_cache: bool,
    /// The writer to use
    #[arg(short, long, value_name = "WRITER", default_value = "textstdout")]
    pub writer: Writers,
    /// The User-Agent sent with the HTTP requests
    #[arg(long, value_name = "USER_AGENT", default_value = USER_AGENT)]
    pub user_agent: String,
    /// The log level, logs are written on stderr
    #[arg(short, long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: LevelFilter,
}
