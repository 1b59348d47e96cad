//! Implements MediaResolverPort.
//!
//! - `http://` / `https://` references are fetched with reqwest
//! - `file://` references and bare paths are read from disk
//!
//! The catalog never calls this while mutating; references stay opaque to the store.

use crate::domain::DomainError;
use crate::ports::MediaResolverPort;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

/// Resolver for thumbnail references.
pub struct HttpMediaResolver {
    client: reqwest::Client,
    timeout: Duration,
}

/// Where a thumbnail reference points.
#[derive(Debug, PartialEq, Eq)]
enum MediaLocation {
    Remote(String),
    Local(PathBuf),
}

impl HttpMediaResolver {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    fn locate(thumbnail_ref: &str) -> Result<MediaLocation, DomainError> {
        let r = thumbnail_ref.trim();
        if r.is_empty() {
            return Err(DomainError::Media("empty thumbnail reference".to_string()));
        }
        let lower = r.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Ok(MediaLocation::Remote(r.to_string()));
        }
        let path = r.strip_prefix("file://").unwrap_or(r);
        Ok(MediaLocation::Local(PathBuf::from(path)))
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DomainError> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| DomainError::Media(format!("request {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = %status, "thumbnail fetch failed");
            return Err(DomainError::Media(format!("{} returned {}", url, status)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DomainError::Media(format!("read body {}: {}", url, e)))?;
        debug!(url, len = bytes.len(), "thumbnail fetched");
        Ok(bytes.to_vec())
    }
}

#[async_trait::async_trait]
impl MediaResolverPort for HttpMediaResolver {
    async fn resolve(&self, thumbnail_ref: &str) -> Result<Vec<u8>, DomainError> {
        match Self::locate(thumbnail_ref)? {
            MediaLocation::Remote(url) => self.fetch(&url).await,
            MediaLocation::Local(path) => tokio::fs::read(&path)
                .await
                .map_err(|e| DomainError::Media(format!("read {}: {}", path.display(), e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate() {
        assert_eq!(
            HttpMediaResolver::locate("https://images.example.com/a.jpg").unwrap(),
            MediaLocation::Remote("https://images.example.com/a.jpg".into())
        );
        assert_eq!(
            HttpMediaResolver::locate("file:///tmp/a.gif").unwrap(),
            MediaLocation::Local(PathBuf::from("/tmp/a.gif"))
        );
        assert_eq!(
            HttpMediaResolver::locate("media/a.gif").unwrap(),
            MediaLocation::Local(PathBuf::from("media/a.gif"))
        );
        assert!(matches!(
            HttpMediaResolver::locate("  "),
            Err(DomainError::Media(_))
        ));
    }

    #[tokio::test]
    async fn test_resolve_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("thumb.gif");
        std::fs::write(&path, b"GIF89a").unwrap();

        let resolver = HttpMediaResolver::new(Duration::from_secs(1));
        let bytes = resolver.resolve(path.to_str().unwrap()).await.unwrap();
        assert_eq!(bytes, b"GIF89a");

        let missing = dir.path().join("missing.gif");
        assert!(matches!(
            resolver.resolve(missing.to_str().unwrap()).await,
            Err(DomainError::Media(_))
        ));
    }
}
