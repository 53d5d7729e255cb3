use std::fmt;
use std::time::Duration;

use crate::jsonrpc::client::HttpClient;

/// Handle to a single node, cheap to clone. Every request made through it is
/// bounded by `timeout`
#[derive(Clone)]
pub struct Web3 {
    pub(crate) url: String,
    pub(crate) jsonrpc_client: HttpClient,
    pub(crate) timeout: Duration,
}

impl Web3 {
    pub fn new(url: &str, timeout: Duration) -> Self {
        Self {
            jsonrpc_client: HttpClient::new(url),
            timeout,
            url: url.to_string(),
        }
    }

    pub fn get_timeout(&self) -> Duration {
        self.timeout
    }

    pub fn get_url(&self) -> &str {
        &self.url
    }
}

impl fmt::Debug for Web3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Web3")
            .field("url", &self.url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
