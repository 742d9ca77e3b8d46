//! Fetching book records from the remote API
//!
//! [`BookSource`] is the seam the pipeline pulls books through.
//! [`HttpBookFetcher`] is the reqwest-backed implementation: one GET with
//! `Accept: application/json`, a status check, then JSON decoding of the
//! `{ "books": [...] }` body. There are no retries.

use crate::config::ApiConfig;
use crate::error::{Error, FetchError, Result};
use crate::types::{Book, BookApiResponse};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderValue};
use std::time::Duration;
use tracing::{debug, warn};

/// Source of book records
///
/// Implementations return the books in the order the backing source
/// provides them.
#[async_trait]
pub trait BookSource: Send + Sync {
    /// Fetch all book records
    async fn fetch_books(&self) -> Result<Vec<Book>>;
}

/// Fetches books over HTTP from a configured endpoint
#[derive(Clone, Debug)]
pub struct HttpBookFetcher {
    /// HTTP client used for the request
    client: reqwest::Client,
    /// Endpoint URL
    url: String,
    /// Request timeout, reported in timeout errors
    timeout: Option<Duration>,
}

impl HttpBookFetcher {
    /// Create a fetcher from API settings
    ///
    /// # Errors
    /// Returns [`FetchError::Client`] if the HTTP client cannot be created
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            url: config.api_url.clone(),
            timeout: config.timeout,
        })
    }

    /// Create a fetcher around an existing client
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            timeout: None,
        }
    }

    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            FetchError::Timeout {
                url: self.url.clone(),
                secs: self.timeout.map(|t| t.as_secs()).unwrap_or_default(),
            }
            .into()
        } else {
            FetchError::Transport {
                url: self.url.clone(),
                message: e.to_string(),
            }
            .into()
        }
    }
}

#[async_trait]
impl BookSource for HttpBookFetcher {
    async fn fetch_books(&self) -> Result<Vec<Book>> {
        debug!(url = %self.url, "requesting books");

        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        // Check HTTP status before trying to parse the response body
        let status = response.status();
        if !status.is_success() {
            warn!(url = %self.url, status = status.as_u16(), "API returned error status");
            return Err(FetchError::Status {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            }
            .into());
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        let books = parse_books(&body)?;

        debug!(url = %self.url, count = books.len(), "received books");
        Ok(books)
    }
}

/// Decode an API response body into its book list
///
/// # Errors
/// Returns [`Error::Parse`] if the body is not a JSON object with a `books` array
/// of well-formed records.
pub fn parse_books(body: &str) -> Result<Vec<Book>> {
    let response: BookApiResponse = serde_json::from_str(body)?;
    Ok(response.books)
}
