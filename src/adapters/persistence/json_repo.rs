//! Implements CatalogRepoPort using a JSON file.
//!
//! The whole catalog is one document; every save replaces it.

use crate::domain::{CatalogSnapshot, DomainError};
use crate::ports::CatalogRepoPort;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::info;

/// JSON file-based catalog storage.
pub struct JsonCatalogRepo {
    path: PathBuf,
    /// Serializes writers so two saves never share the temp file.
    write_lock: Mutex<()>,
}

impl JsonCatalogRepo {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl CatalogRepoPort for JsonCatalogRepo {
    async fn load(&self) -> Result<Option<CatalogSnapshot>, DomainError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(DomainError::Persistence(format!("read catalog: {}", e))),
        };
        let snapshot: CatalogSnapshot = serde_json::from_str(&raw)
            .map_err(|e| DomainError::Persistence(format!("parse catalog: {}", e)))?;
        info!(
            path = %self.path.display(),
            categories = snapshot.categories.len(),
            items = snapshot.items.len(),
            "loaded catalog"
        );
        Ok(Some(snapshot))
    }

    /// Atomic save using write-replace:
    /// 1. Write to temp file
    /// 2. sync_all() to flush to disk
    /// 3. Rename over the target path
    async fn save(&self, snapshot: &CatalogSnapshot) -> Result<(), DomainError> {
        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| DomainError::Persistence(e.to_string()))?;

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Persistence(format!("create data dir: {}", e)))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Persistence(format!("create temp file: {}", e)))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::Persistence(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Persistence(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::Persistence(format!("atomic rename failed: {}", e)))?;

        info!(
            path = %self.path.display(),
            revision = snapshot.revision,
            "saved catalog to disk"
        );
        Ok(())
    }
}
