//! Remote boilerplate downloads
//!
//! The pipeline pulls the community-maintained ignore files instead of
//! embedding a snapshot, so generated projects start from the current
//! upstream text. The fetcher sits behind a trait so tests can run
//! without network access.

use async_trait::async_trait;
use tracing::debug;

use crate::error::{PipelineError, Result};

/// Upstream ignore file for the Python backend
pub const PYTHON_GITIGNORE_URL: &str =
    "https://raw.githubusercontent.com/github/gitignore/main/Python.gitignore";

/// Upstream ignore file for the Node frontend
pub const NODE_GITIGNORE_URL: &str =
    "https://raw.githubusercontent.com/github/gitignore/main/Node.gitignore";

/// Fetches boilerplate text from a URL
#[async_trait]
pub trait BoilerplateFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// [`BoilerplateFetcher`] backed by an HTTP client
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BoilerplateFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!("Fetching {url}");
        let fetch_err = |e: reqwest::Error| PipelineError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        };
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(fetch_err)?
            .error_for_status()
            .map_err(fetch_err)?;
        response.text().await.map_err(fetch_err)
    }
}
