//! This module declares the readers.
//! A reader is used to fetch the advisory pages over the network, so the
//! classification only has to work on the markup.

pub mod http;

use crate::error::FetchError;

/// A common interface between all page readers.
pub trait PageReader {
    /// Reads the page at the given URL and returns its body.
    fn read(&self, url: &str) -> Result<String, FetchError>;
}

/// A reader serving canned pages, recording the URLs asked.
#[cfg(test)]
pub(crate) struct MockReader {
    pub pages: std::collections::HashMap<String, String>,
    pub requests: std::rc::Rc<std::cell::RefCell<Vec<String>>>,
    /// When set, every request fails as if the network was down.
    pub offline: bool,
}

#[cfg(test)]
impl MockReader {
    pub fn new(pages: &[(&str, &str)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(url, body)| (url.to_string(), body.to_string()))
                .collect(),
            requests: Default::default(),
            offline: false,
        }
    }
}

#[cfg(test)]
impl PageReader for MockReader {
    fn read(&self, url: &str) -> Result<String, FetchError> {
        self.requests.borrow_mut().push(url.to_string());
        if self.offline {
            return Err(FetchError::Transport {
                url: url.to_string(),
                reason: "network is down".to_string(),
            });
        }
        self.pages.get(url).cloned().ok_or(FetchError::NotFound {
            url: url.to_string(),
            status: 404,
        })
    }
}
