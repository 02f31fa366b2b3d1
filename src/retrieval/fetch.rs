//! Authenticated document fetch.

use std::future::Future;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::models::RetrievedPayload;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Errors from document API calls.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    /// No bearer token — checked before any network call.
    #[error("no bearer token available for the document API")]
    MissingCredential,
    /// The API answered with a non-success status.
    #[error("document API returned {status}: {body}")]
    Http { status: u16, body: String },
    /// Could not reach the API at all.
    #[error("connection to document API failed: {0}")]
    Connection(String),
    /// Anything else the HTTP client reported.
    #[error("HTTP client error: {0}")]
    Client(String),
    /// Request rejected client-side before sending.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Fetches one document's raw content over the authenticated API.
///
/// One attempt per call, no retry — failure surfaces immediately so the
/// coordinator can decide on the fallback.
pub trait DocumentFetcher {
    fn fetch(
        &self,
        document_id: &str,
        token: &str,
    ) -> impl Future<Output = Result<RetrievedPayload, FetchError>> + Send;
}

/// Shared HTTP client configuration for the document API.
pub(crate) fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client")
}

/// Map a reqwest send error onto the fetch taxonomy.
pub(crate) fn map_send_error(url: &str, e: reqwest::Error) -> FetchError {
    if e.is_connect() {
        FetchError::Connection(url.to_string())
    } else if e.is_timeout() {
        FetchError::Client(format!("request timed out after {REQUEST_TIMEOUT_SECS}s"))
    } else {
        FetchError::Client(e.to_string())
    }
}

/// HTTP fetcher against `GET {api_base}/documents/{id}/view`.
pub struct HttpFetcher {
    api_base: String,
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            api_base: config.api_base().to_string(),
            client: build_http_client(),
        }
    }

    fn view_url(&self, document_id: &str) -> String {
        format!("{}/documents/{}/view", self.api_base, document_id)
    }
}

impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, document_id: &str, token: &str) -> Result<RetrievedPayload, FetchError> {
        if token.is_empty() {
            return Err(FetchError::MissingCredential);
        }

        let url = self.view_url(document_id);
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| map_send_error(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Http {
                status: status.as_u16(),
                body,
            });
        }

        // Any successful body is presentable; the declared content type is
        // recorded but not validated.
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Client(e.to_string()))?;

        tracing::debug!(
            document_id,
            content_type = %content_type,
            size = bytes.len(),
            "document fetched"
        );
        Ok(RetrievedPayload::new(bytes.to_vec(), &content_type))
    }
}

/// Mock fetcher for testing — returns a configured outcome and counts calls.
pub struct MockFetcher {
    response: Result<RetrievedPayload, FetchError>,
    calls: std::sync::atomic::AtomicUsize,
}

impl MockFetcher {
    pub fn succeeding(payload: RetrievedPayload) -> Self {
        Self {
            response: Ok(payload),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn failing(error: FetchError) -> Self {
        Self {
            response: Err(error),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// How many times `fetch` was invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

impl DocumentFetcher for MockFetcher {
    async fn fetch(&self, _document_id: &str, token: &str) -> Result<RetrievedPayload, FetchError> {
        self.calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if token.is_empty() {
            return Err(FetchError::MissingCredential);
        }
        self.response.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_url_formats_endpoint() {
        let fetcher = HttpFetcher::new(&ApiConfig::new(
            "https://api.example.com",
            "https://res.example.com/up/v1",
        ));
        assert_eq!(
            fetcher.view_url("doc-42"),
            "https://api.example.com/documents/doc-42/view"
        );
    }

    #[tokio::test]
    async fn empty_token_fails_before_any_network_call() {
        // An unroutable base guarantees a network attempt would error
        // differently — MissingCredential proves we never got that far.
        let fetcher = HttpFetcher::new(&ApiConfig::new(
            "https://0.0.0.0:1",
            "https://res.example.com/up/v1",
        ));
        let err = fetcher.fetch("doc-42", "").await.unwrap_err();
        assert!(matches!(err, FetchError::MissingCredential));
    }

    #[tokio::test]
    async fn mock_fetcher_counts_calls() {
        let fetcher = MockFetcher::succeeding(RetrievedPayload::new(
            b"%PDF-1.4".to_vec(),
            "application/pdf",
        ));
        assert_eq!(fetcher.calls(), 0);
        let payload = fetcher.fetch("doc-1", "tok").await.unwrap();
        assert_eq!(payload.content_type, "application/pdf");
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn mock_fetcher_returns_configured_failure() {
        let fetcher = MockFetcher::failing(FetchError::Http {
            status: 404,
            body: "not found".into(),
        });
        let err = fetcher.fetch("doc-1", "tok").await.unwrap_err();
        assert!(matches!(err, FetchError::Http { status: 404, .. }));
    }
}
