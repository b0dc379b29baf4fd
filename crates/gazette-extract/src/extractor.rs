//! Fetch a PDF over HTTP and extract its text.

use std::time::Duration;

use async_trait::async_trait;
use gazette_core::config::ExtractSettings;

use crate::error::{ExtractError, Result};

/// Turns the PDF resource at `url` into plain text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn extract_text_from_pdf(&self, url: &str) -> std::result::Result<String, Self::Error>;
}

#[async_trait]
impl<T: TextExtractor + ?Sized> TextExtractor for std::sync::Arc<T> {
    type Error = T::Error;

    async fn extract_text_from_pdf(&self, url: &str) -> std::result::Result<String, Self::Error> {
        (**self).extract_text_from_pdf(url).await
    }
}

/// HTTP settings for [`PdfTextExtractor`].
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    pub timeout: Duration,
    pub max_bytes: usize,
    pub user_agent: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        ExtractSettings::default().into()
    }
}

impl From<ExtractSettings> for ExtractConfig {
    fn from(s: ExtractSettings) -> Self {
        Self {
            timeout: Duration::from_secs(s.timeout_secs),
            max_bytes: s.max_bytes,
            user_agent: s.user_agent,
        }
    }
}

/// Downloads the document with `reqwest` and parses it with `pdf-extract`.
///
/// Parsing is CPU-bound and runs on the blocking pool.
#[derive(Clone)]
pub struct PdfTextExtractor {
    client: reqwest::Client,
    max_bytes: usize,
}

impl PdfTextExtractor {
    pub fn new(config: &ExtractConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ExtractError::Client(e.to_string()))?;

        Ok(Self {
            client,
            max_bytes: config.max_bytes,
        })
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let http_err = |source| ExtractError::Http {
            url: url.to_string(),
            source,
        };
        let too_large = || ExtractError::TooLarge {
            url: url.to_string(),
            limit: self.max_bytes,
        };

        let mut response = self.client.get(url).send().await.map_err(http_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if let Some(len) = response.content_length() {
            if len > self.max_bytes as u64 {
                return Err(too_large());
            }
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(http_err)? {
            if body.len() + chunk.len() > self.max_bytes {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    type Error = ExtractError;

    async fn extract_text_from_pdf(&self, url: &str) -> Result<String> {
        let bytes = self.download(url).await?;
        tracing::debug!(url, bytes = bytes.len(), "Downloaded PDF");

        let owned_url = url.to_string();
        tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| ExtractError::Pdf {
                url: owned_url,
                reason: e.to_string(),
            })
        })
        .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a local port; returns the URL.
    async fn serve_once(response: Vec<u8>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let mut seen = Vec::new();
            while !seen.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                seen.extend_from_slice(&buf[..n]);
            }
            let _ = socket.write_all(&response).await;
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}/gazette.pdf")
    }

    fn http_response(status: &str, headers: &str, body: &[u8]) -> Vec<u8> {
        let mut out = format!("HTTP/1.1 {status}\r\nConnection: close\r\n{headers}\r\n").into_bytes();
        out.extend_from_slice(body);
        out
    }

    fn extractor(max_bytes: usize) -> PdfTextExtractor {
        PdfTextExtractor::new(&ExtractConfig {
            timeout: Duration::from_secs(5),
            max_bytes,
            user_agent: "gazette-tracer-test".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_config_from_settings() {
        let config = ExtractConfig::from(ExtractSettings {
            timeout_secs: 7,
            max_bytes: 1024,
            user_agent: "ua".to_string(),
        });
        assert_eq!(config.timeout, Duration::from_secs(7));
        assert_eq!(config.max_bytes, 1024);
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let url = serve_once(http_response("404 Not Found", "Content-Length: 0\r\n", b"")).await;
        let err = extractor(1024).extract_text_from_pdf(&url).await.unwrap_err();
        assert!(matches!(err, ExtractError::Status { status: 404, .. }), "got {err}");
    }

    #[tokio::test]
    async fn test_declared_length_over_limit_is_rejected() {
        let url = serve_once(http_response("200 OK", "Content-Length: 100\r\n", &[b'x'; 100])).await;
        let err = extractor(10).extract_text_from_pdf(&url).await.unwrap_err();
        assert!(matches!(err, ExtractError::TooLarge { limit: 10, .. }), "got {err}");
    }

    #[tokio::test]
    async fn test_non_pdf_body_is_parse_error() {
        let body = b"this is not a pdf";
        let headers = format!("Content-Length: {}\r\n", body.len());
        let url = serve_once(http_response("200 OK", &headers, body)).await;
        let err = extractor(1024).extract_text_from_pdf(&url).await.unwrap_err();
        match err {
            ExtractError::Pdf { url: failed, .. } => assert_eq!(failed, url),
            other => panic!("expected PDF parse error, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_host_is_http_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = format!("http://{addr}/gone.pdf");
        let err = extractor(1024).extract_text_from_pdf(&url).await.unwrap_err();
        assert!(matches!(err, ExtractError::Http { .. }), "got {err}");
    }
}
