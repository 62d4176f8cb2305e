//! Fetch pages over HTTP(S)
//!
//! The [`HttpReader`] sends one blocking GET request per page. There are no
//! retries and the default timeouts of the client are kept.

use log::{debug, error, trace};
use reqwest::blocking::Client;

use super::PageReader;
use crate::error::{FetchError, Result};

/// A reader used to fetch HTTP(S) pages.
pub struct HttpReader {
    /// The client, reused for every request of the run.
    client: Client,
}

impl HttpReader {
    /// Creates a new HttpReader sending the given User-Agent.
    pub fn new(user_agent: &str) -> Result<Self> {
        trace!("In HttpReader::new()");
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }
}

impl PageReader for HttpReader {
    /// Sends the HTTP request and returns the body.
    /// HTTP error statuses are reported as [`FetchError::NotFound`],
    /// everything else as [`FetchError::Transport`].
    fn read(&self, url: &str) -> std::result::Result<String, FetchError> {
        trace!("Running HttpReader::read()");
        debug!("Sending HTTP request for URL {}", url);
        let response = self
            .client
            .get(url)
            .header("Accept", "text/html,*/*;q=0.8")
            .send()
            .map_err(|e| {
                error!("An error occured in the HTTP request to {}: {:?}", url, e);
                FetchError::Transport {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            debug!("Invalid HTTP response code for {}: {}", url, status);
            return Err(FetchError::NotFound {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|e| {
            error!("Unable to read the body of {}: {:?}", url, e);
            FetchError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::runtime::Runtime;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Starts a server answering `/page.html` with the given status & body.
    /// The runtime must outlive the server.
    fn serve(status: u16, body: &str) -> (Runtime, MockServer) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let server = runtime.block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/page.html"))
                .respond_with(ResponseTemplate::new(status).set_body_string(body))
                .mount(&server)
                .await;
            server
        });
        (runtime, server)
    }

    #[test]
    fn success_returns_the_body() {
        let (_runtime, server) = serve(200, "<html>x</html>");
        let reader = HttpReader::new("rhsa-report-test").unwrap();
        let body = reader.read(&format!("{}/page.html", server.uri())).unwrap();
        assert_eq!("<html>x</html>", body);
    }

    #[test]
    fn missing_page_is_not_found() {
        let (_runtime, server) = serve(404, "Not Found");
        let reader = HttpReader::new("rhsa-report-test").unwrap();
        let result = reader.read(&format!("{}/page.html", server.uri()));
        assert!(matches!(result, Err(FetchError::NotFound { status: 404, .. })));
    }

    #[test]
    fn server_error_is_not_found() {
        let (_runtime, server) = serve(500, "Internal Server Error");
        let reader = HttpReader::new("rhsa-report-test").unwrap();
        let url = format!("{}/page.html", server.uri());
        match reader.read(&url) {
            Err(FetchError::NotFound { url: failed, status }) => {
                assert_eq!(500, status);
                assert_eq!(url, failed);
            }
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn malformed_url_is_a_transport_error() {
        let reader = HttpReader::new("rhsa-report-test").unwrap();
        let result = reader.read("not a url/CVE-2011-1089.html");
        assert!(matches!(result, Err(FetchError::Transport { .. })));
    }

    #[test]
    fn unsupported_scheme_is_a_transport_error() {
        let reader = HttpReader::new("rhsa-report-test").unwrap();
        let result = reader.read("gopher://example.org/CVE-2011-1089.html");
        assert!(matches!(result, Err(FetchError::Transport { .. })));
    }
}
