//! HTTP fetch collaborator.
//!
//! The rest of the pipeline never touches `reqwest` directly: it hands a URL
//! to [`PageFetcher`] and gets back either a [`FetchedDocument`] or a typed
//! [`FetchError`]. One attempt per call, bounded by the configured timeout —
//! no retries, no cookies, no session state.

use std::time::Duration;

use reqwest::Client;
use scraper::Html;
use tracing::debug;
use url::Url;

use joblens_shared::{JoblensError, Result, ScrapeConfig};

/// A single fetch attempt's failure modes.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// DNS, connection, TLS, or body-read failure.
    #[error("network error: {0}")]
    Network(String),

    /// The request exceeded the configured timeout.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The server answered with a non-2xx status.
    #[error("HTTP {0}")]
    Status(u16),
}

/// A successfully fetched page, body unparsed.
///
/// Parsing is deferred so the document handle (`scraper::Html` is not `Send`)
/// never has to cross an await point in concurrent callers.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    /// The URL the body was fetched from.
    pub url: Url,
    /// HTTP status code (always 2xx).
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

impl FetchedDocument {
    /// Parse the body into a DOM for selector queries.
    pub fn parse(&self) -> Html {
        Html::parse_document(&self.body)
    }
}

/// Blocking-per-call HTTP fetcher with a bounded per-request timeout.
pub struct PageFetcher {
    client: Client,
    timeout: Duration,
}

impl PageFetcher {
    /// Build a fetcher from the runtime scrape configuration.
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(timeout)
            .build()
            .map_err(|e| JoblensError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, timeout })
    }

    /// Fetch `url` once. Non-2xx statuses are failures, not documents.
    pub async fn fetch(&self, url: &Url) -> std::result::Result<FetchedDocument, FetchError> {
        debug!(%url, "fetching page");

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let final_url = response.url().clone();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        Ok(FetchedDocument {
            url: final_url,
            status: status.as_u16(),
            body,
        })
    }

    fn classify(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Network(e.to_string())
        }
    }
}
