//! HTTP source.
//!
//! Uses a blocking `ureq` agent on tokio's blocking pool so callers still see
//! an ordinary future.

use std::time::Duration;

use async_trait::async_trait;
use ureq::Agent;

use crate::source::{Source, SourceError, SourceErrorKind, validate_path};

const BACKEND: &str = "Http";

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Source issuing `GET` requests below a base URL.
#[derive(Clone)]
pub struct HttpSource {
    agent: Agent,
    base_url: String,
}

impl HttpSource {
    /// Create a source with the default timeout.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT))
    }

    /// Create a source with an explicit global request timeout.
    #[must_use]
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a resource path.
    fn url_for(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

impl std::fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSource")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Map a non-success HTTP status to an error kind.
fn status_kind(status: u16) -> SourceErrorKind {
    match status {
        404 | 410 => SourceErrorKind::NotFound,
        _ => SourceErrorKind::Status(status),
    }
}

#[async_trait]
impl Source for HttpSource {
    async fn fetch(&self, path: &str) -> Result<String, SourceError> {
        validate_path(path).map_err(|e| e.with_backend(BACKEND))?;

        let url = self.url_for(path);
        let agent = self.agent.clone();
        tracing::debug!(url = %url, "Fetching resource");

        let response = tokio::task::spawn_blocking(move || {
            let mut response = agent.get(&url).call()?;
            let status = response.status().as_u16();
            if !(200..300).contains(&status) {
                return Ok((status, None));
            }
            let body = response.body_mut().read_to_string()?;
            Ok::<_, ureq::Error>((status, Some(body)))
        })
        .await
        .map_err(|e| {
            SourceError::new(SourceErrorKind::Other)
                .with_path(path)
                .with_backend(BACKEND)
                .with_source(e)
        })?;

        match response {
            Ok((_, Some(body))) => Ok(body),
            Ok((status, None)) => {
                tracing::debug!(path, status, "Resource request failed");
                Err(SourceError::new(status_kind(status))
                    .with_path(path)
                    .with_backend(BACKEND))
            }
            Err(e) => Err(SourceError::new(SourceErrorKind::Unavailable)
                .with_path(path)
                .with_backend(BACKEND)
                .with_source(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    /// `(request target, status, body)`; unknown targets answer 404.
    type Route = (&'static str, u16, &'static str);

    /// Serve canned HTTP/1.1 responses on a local port and return the base URL.
    async fn serve(routes: &'static [Route]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = stream.read(&mut buf).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&buf[..n]);
                }

                let request = String::from_utf8_lossy(&request);
                let target = request.split_whitespace().nth(1).unwrap_or_default();
                let (status, body) = routes
                    .iter()
                    .find(|(path, ..)| *path == target)
                    .map_or((404, ""), |(_, status, body)| (*status, *body));

                let response = format!(
                    "HTTP/1.1 {status} Canned\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                stream.write_all(response.as_bytes()).await.unwrap();
                let _ = stream.shutdown().await;
            }
        });

        format!("http://{addr}/site/")
    }

    const ROUTES: &[Route] = &[
        ("/site/index.json", 200, r#"{"sections": []}"#),
        ("/site/docs/gone.md", 410, "gone"),
        ("/site/docs/broken.md", 500, "internal error"),
    ];

    #[tokio::test]
    async fn test_fetch_returns_body_on_success() {
        let source = HttpSource::new(&serve(ROUTES).await);

        let body = source.fetch("index.json").await.unwrap();
        assert_eq!(body, r#"{"sections": []}"#);
    }

    #[tokio::test]
    async fn test_fetch_maps_missing_resources_to_not_found() {
        let source = HttpSource::new(&serve(ROUTES).await);

        let err = source.fetch("docs/missing.md").await.unwrap_err();
        assert_eq!(err.kind(), SourceErrorKind::NotFound);
        assert_eq!(err.path(), Some("docs/missing.md"));
        assert_eq!(err.backend(), Some("Http"));

        let err = source.fetch("docs/gone.md").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_fetch_maps_server_error_to_status() {
        let source = HttpSource::new(&serve(ROUTES).await);

        let err = source.fetch("docs/broken.md").await.unwrap_err();
        assert_eq!(err.kind(), SourceErrorKind::Status(500));
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_unavailable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = HttpSource::with_timeout(&format!("http://{addr}"), Duration::from_secs(5));
        let err = source.fetch("index.json").await.unwrap_err();
        assert_eq!(err.kind(), SourceErrorKind::Unavailable);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let source = HttpSource::new("https://docs.example.com/site/");
        assert_eq!(source.base_url(), "https://docs.example.com/site");
        assert_eq!(
            source.url_for("docs/install.md"),
            "https://docs.example.com/site/docs/install.md"
        );
    }

    #[test]
    fn test_status_kind() {
        assert_eq!(status_kind(404), SourceErrorKind::NotFound);
        assert_eq!(status_kind(410), SourceErrorKind::NotFound);
        assert_eq!(status_kind(500), SourceErrorKind::Status(500));
        assert_eq!(status_kind(403), SourceErrorKind::Status(403));
    }

    #[tokio::test]
    async fn test_fetch_rejects_invalid_path_without_request() {
        let source = HttpSource::new("http://127.0.0.1:9");
        let err = source.fetch("../index.json").await.unwrap_err();
        assert_eq!(err.kind(), SourceErrorKind::InvalidPath);
        assert_eq!(err.backend(), Some("Http"));
    }
}
