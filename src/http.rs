//! HTTP client wrapper
//!
//! One persistent [`reqwest::Client`] (and therefore one connection pool) is
//! shared across every request in a run. Retries apply only to server-side
//! 5xx responses; transport failures and 4xx statuses go back to the caller
//! on the first attempt. Status codes are surfaced as plain integers on the
//! response value so call sites branch instead of catching.

use crate::config::RetryConfig;
use crate::error::{Error, Result};
use crate::retry::{IsRetryable, fetch_with_retry};
use bytes::Bytes;
use std::time::Duration;

/// TCP connect timeout applied to every request
pub const CONNECT_TIMEOUT: Duration = Duration::from_millis(3050);

/// Total request timeout applied to every request
pub const READ_TIMEOUT: Duration = Duration::from_secs(10);

/// Server-side statuses that trigger automatic retry
const RETRYABLE_STATUS: [u16; 4] = [500, 502, 503, 504];

/// A fully-buffered HTTP response
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// HTTP status code as a plain integer
    pub status: u16,
    /// Response body bytes
    pub body: Bytes,
}

impl HttpResponse {
    /// Whether the request succeeded (the catalog serves everything as 200)
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// The body decoded as UTF-8, with invalid sequences replaced
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Internal classification for the retry loop: only retryable-status
/// responses loop; everything else exits on the first attempt.
#[derive(Debug)]
enum FetchError {
    Transport(reqwest::Error),
    ServerError(HttpResponse),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Transport(e) => write!(f, "transport error: {e}"),
            FetchError::ServerError(resp) => write!(f, "server error: status {}", resp.status),
        }
    }
}

impl IsRetryable for FetchError {
    fn is_retryable(&self) -> bool {
        match self {
            FetchError::Transport(_) => false,
            FetchError::ServerError(resp) => RETRYABLE_STATUS.contains(&resp.status),
        }
    }
}

/// HTTP client shared by every network-touching operation in a run
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    retry: RetryConfig,
}

impl HttpClient {
    /// Create a client with the fixed connect/read timeouts and the given
    /// retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] if the underlying client cannot be built.
    pub fn new(retry: RetryConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(READ_TIMEOUT)
            .build()?;
        Ok(Self { client, retry })
    }

    /// Issue a GET request.
    ///
    /// Non-success statuses are returned as values on [`HttpResponse`], not
    /// as errors; after the retry budget is exhausted the last 5xx response
    /// is returned the same way so callers can log the status code.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] for transport-level failures (DNS,
    /// connection reset, timeout). These are never retried.
    pub async fn get(&self, url: &str) -> Result<HttpResponse> {
        let result = fetch_with_retry(&self.retry, || async {
            let resp = self
                .client
                .get(url)
                .send()
                .await
                .map_err(FetchError::Transport)?;
            let status = resp.status().as_u16();
            let body = resp.bytes().await.map_err(FetchError::Transport)?;
            let response = HttpResponse { status, body };
            if RETRYABLE_STATUS.contains(&status) {
                Err(FetchError::ServerError(response))
            } else {
                Ok(response)
            }
        })
        .await;

        match result {
            Ok(response) => Ok(response),
            Err(FetchError::ServerError(response)) => Ok(response),
            Err(FetchError::Transport(e)) => Err(Error::Network(e)),
        }
    }
}
