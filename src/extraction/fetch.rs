use std::time::Duration;

use anyhow::Result;
use reqwest::Client;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_millis(10_000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered with a non-2xx status.
    Status(u16),
    /// Connect, timeout, body or URL errors.
    Transport(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Status(code) => write!(f, "HTTP {code}"),
            FetchError::Transport(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        let msg = err.to_string();
        if msg.trim().is_empty() {
            FetchError::Transport("request failed".to_string())
        } else {
            FetchError::Transport(msg)
        }
    }
}

/// Plain GETs with a per-request deadline; no retries, no custom headers.
pub struct PageFetcher {
    http: Client,
}

impl PageFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    pub async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn returns_body_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let fetcher = PageFetcher::new(DEFAULT_FETCH_TIMEOUT).unwrap();
        let body = fetcher.fetch_page(&format!("{}/page", server.uri())).await.unwrap();
        assert_eq!(body, "<html>ok</html>");
    }

    #[tokio::test]
    async fn non_success_status_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = PageFetcher::new(DEFAULT_FETCH_TIMEOUT).unwrap();
        let err = fetcher.fetch_page(&format!("{}/missing", server.uri())).await.unwrap_err();
        assert_eq!(err, FetchError::Status(404));
        assert_eq!(err.to_string(), "HTTP 404");
    }

    #[tokio::test]
    async fn timeout_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let fetcher = PageFetcher::new(Duration::from_millis(100)).unwrap();
        let err = fetcher.fetch_page(&server.uri()).await.unwrap_err();
        match err {
            FetchError::Transport(msg) => assert!(!msg.is_empty()),
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_url_is_transport_error() {
        let fetcher = PageFetcher::new(DEFAULT_FETCH_TIMEOUT).unwrap();
        let err = fetcher.fetch_page("").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
