use std::future::Future;
use std::time::Duration;

use futures::StreamExt;
use reqwest::redirect::Policy;
use thiserror::Error;

use crate::feed::parser::{parse_entries, EntryContent};
use crate::feed::registry::Feed;

const MAX_FEED_SIZE: usize = 10 * 1024 * 1024; // 10MB
const MAX_REDIRECTS: usize = 3;

/// Errors from a single fetch attempt. There are no retries.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    /// Feed XML could not be parsed as RSS or Atom
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Response too large")]
    ResponseTooLarge,
    /// Received fewer bytes than Content-Length announced
    #[error("Incomplete response: expected {expected} bytes, received {received}")]
    IncompleteResponse { expected: u64, received: usize },
    /// Any other source failure (used by non-HTTP sources)
    #[error("Fetch failed: {0}")]
    Other(String),
}

/// The feed-fetch primitive the loader drives.
///
/// Implementations must always resolve: either with the feed's entries or
/// with an error. A fetch that never completes would leave its request
/// pending forever.
pub trait FeedSource: Send + Sync + 'static {
    fn fetch(
        &self,
        feed: &Feed,
    ) -> impl Future<Output = Result<Vec<EntryContent>, FetchError>> + Send;
}

/// Redirect policy: at most 3 hops, no loops.
fn redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            return attempt.error("Too many redirects (max 3)");
        }

        let url = attempt.url();
        if attempt.previous().iter().any(|prev| prev.as_str() == url.as_str()) {
            return attempt.error("Redirect loop detected");
        }

        tracing::debug!(
            to = %url,
            hop = attempt.previous().len() + 1,
            "Following redirect"
        );
        attempt.follow()
    })
}

/// Fetches feeds over HTTP and parses them with `feed-rs`.
#[derive(Clone)]
pub struct HttpFeedSource {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFeedSource {
    /// Builds a source whose every request is bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Fails if the underlying HTTP client cannot be constructed.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .redirect(redirect_policy())
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(30))
            .timeout(timeout)
            .build()?;
        Ok(Self { client, timeout })
    }

    /// Wraps an existing client; `timeout` still bounds each request.
    pub fn with_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = tokio::time::timeout(self.timeout, self.client.get(url).send())
            .await
            .map_err(|_| FetchError::Timeout(self.timeout))??;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status().as_u16()));
        }

        tokio::time::timeout(self.timeout, read_limited_bytes(response, MAX_FEED_SIZE))
            .await
            .map_err(|_| FetchError::Timeout(self.timeout))?
    }
}

impl FeedSource for HttpFeedSource {
    async fn fetch(&self, feed: &Feed) -> Result<Vec<EntryContent>, FetchError> {
        let bytes = self.fetch_bytes(&feed.url).await?;
        let entries = parse_entries(&bytes).map_err(|e| FetchError::Parse(e.to_string()))?;
        tracing::debug!(feed = %feed.url, entries = entries.len(), "Feed fetched");
        Ok(entries)
    }
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    let expected_length = response.content_length();

    if let Some(len) = expected_length {
        if len > limit as u64 {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    if let Some(expected) = expected_length {
        if (bytes.len() as u64) < expected {
            return Err(FetchError::IncompleteResponse {
                expected,
                received: bytes.len(),
            });
        }
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const VALID_RSS: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
    <item><guid>1</guid><title>Test</title></item>
    <item><guid>2</guid><title>Other</title></item>
</channel></rss>"#;

    fn source() -> HttpFeedSource {
        HttpFeedSource::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(VALID_RSS)
                    .insert_header("Content-Type", "application/xml"),
            )
            .mount(&mock_server)
            .await;

        let feed = Feed::new("Test", format!("{}/feed", mock_server.uri()));
        let entries = source().fetch(&feed).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Test");
    }

    #[tokio::test]
    async fn test_fetch_404_is_single_attempt() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&mock_server)
            .await;

        let feed = Feed::new("Test", format!("{}/feed", mock_server.uri()));
        match source().fetch(&feed).await.unwrap_err() {
            FetchError::HttpStatus(404) => {}
            e => panic!("Expected HttpStatus(404), got {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_fetch_500_not_retried() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&mock_server)
            .await;

        let feed = Feed::new("Test", format!("{}/feed", mock_server.uri()));
        assert!(matches!(
            source().fetch(&feed).await,
            Err(FetchError::HttpStatus(500))
        ));
    }

    #[tokio::test]
    async fn test_malformed_feed_parse_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<not valid xml"))
            .mount(&mock_server)
            .await;

        let feed = Feed::new("Test", format!("{}/feed", mock_server.uri()));
        match source().fetch(&feed).await.unwrap_err() {
            FetchError::Parse(_) => {}
            e => panic!("Expected Parse error, got {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(VALID_RSS)
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let feed = Feed::new("Test", format!("{}/feed", mock_server.uri()));
        let source = HttpFeedSource::new(Duration::from_millis(200)).unwrap();
        let err = source.fetch(&feed).await.unwrap_err();
        assert!(
            matches!(err, FetchError::Timeout(_) | FetchError::Network(_)),
            "Expected a timeout, got {:?}",
            err
        );
    }
}
