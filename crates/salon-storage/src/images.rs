// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filesystem-backed image store.
//!
//! Objects live under a root directory and are served by the gateway (or a
//! reverse proxy) under `public_base_url`.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use salon_config::model::ImagesConfig;
use salon_core::{Adapter, AdapterType, HealthStatus, ImageStore, SalonError};

/// Stores service images as plain files.
pub struct LocalImageStore {
    root: PathBuf,
    base_url: String,
}

impl LocalImageStore {
    pub fn new(config: &ImagesConfig) -> Self {
        Self {
            root: PathBuf::from(&config.directory),
            base_url: config.public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Root directory on disk.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves an object key under the root, rejecting absolute paths and `..`.
    fn resolve(&self, path: &str) -> Result<PathBuf, SalonError> {
        let relative = Path::new(path);
        let safe = !path.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(image_err(format!("invalid image path `{path}`"), None));
        }
        Ok(self.root.join(relative))
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

fn image_err(message: String, source: Option<std::io::Error>) -> SalonError {
    SalonError::ImageStore {
        message,
        source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
    }
}

#[async_trait]
impl Adapter for LocalImageStore {
    fn name(&self) -> &str {
        "local-images"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::ImageStore
    }

    async fn health_check(&self) -> Result<HealthStatus, SalonError> {
        match tokio::fs::metadata(&self.root).await {
            Ok(meta) if meta.is_dir() => Ok(HealthStatus::Healthy),
            Ok(_) => Ok(HealthStatus::Unhealthy(format!(
                "{} is not a directory",
                self.root.display()
            ))),
            Err(_) => Ok(HealthStatus::Degraded(format!(
                "{} does not exist yet",
                self.root.display()
            ))),
        }
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn upload(&self, path: &str, bytes: Vec<u8>) -> Result<String, SalonError> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| image_err(format!("creating {}", parent.display()), Some(e)))?;
        }
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .await
            .map_err(|e| image_err(format!("creating {path}"), Some(e)))?;
        file.write_all(&bytes)
            .await
            .map_err(|e| image_err(format!("writing {path}"), Some(e)))?;
        file.flush()
            .await
            .map_err(|e| image_err(format!("writing {path}"), Some(e)))?;
        debug!(path, size = bytes.len(), "image stored");
        Ok(self.url_for(path))
    }

    async fn download(&self, path: &str) -> Result<Vec<u8>, SalonError> {
        let target = self.resolve(path)?;
        tokio::fs::read(&target)
            .await
            .map_err(|e| image_err(format!("reading {path}"), Some(e)))
    }

    async fn remove(&self, paths: &[String]) -> Result<(), SalonError> {
        for path in paths {
            let target = self.resolve(path)?;
            match tokio::fs::remove_file(&target).await {
                Ok(()) => debug!(path = %path, "image removed"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    warn!(path = %path, "image already gone");
                }
                Err(e) => return Err(image_err(format!("removing {path}"), Some(e))),
            }
        }
        Ok(())
    }

    fn path_from_url(&self, url: &str) -> Option<String> {
        let rest = url.strip_prefix(&self.base_url)?.strip_prefix('/')?;
        (!rest.is_empty()).then(|| rest.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store(dir: &Path) -> LocalImageStore {
        LocalImageStore::new(&ImagesConfig {
            directory: dir.display().to_string(),
            public_base_url: "https://cdn.example.com/images/".to_string(),
        })
    }

    #[tokio::test]
    async fn upload_download_and_remove() {
        let dir = tempdir().unwrap();
        let images = store(dir.path());

        let url = images
            .upload("services_nails/1.jpg", b"jpeg".to_vec())
            .await
            .unwrap();
        assert_eq!(url, "https://cdn.example.com/images/services_nails/1.jpg");
        assert_eq!(
            images.download("services_nails/1.jpg").await.unwrap(),
            b"jpeg".to_vec()
        );

        images
            .remove(&["services_nails/1.jpg".to_string(), "missing.jpg".to_string()])
            .await
            .unwrap();
        assert!(images.download("services_nails/1.jpg").await.is_err());
    }

    #[tokio::test]
    async fn upload_never_overwrites() {
        let dir = tempdir().unwrap();
        let images = store(dir.path());
        images.upload("a/1.png", vec![1]).await.unwrap();
        assert!(images.upload("a/1.png", vec![2]).await.is_err());
        assert_eq!(images.download("a/1.png").await.unwrap(), vec![1]);
    }

    #[tokio::test]
    async fn traversal_paths_are_rejected() {
        let dir = tempdir().unwrap();
        let images = store(dir.path());
        assert!(images.upload("../escape.png", vec![1]).await.is_err());
        assert!(images.upload("/etc/passwd", vec![1]).await.is_err());
        assert!(images.download("").await.is_err());
    }

    #[test]
    fn path_from_url_strips_base() {
        let dir = tempdir().unwrap();
        let images = store(dir.path());
        assert_eq!(
            images.path_from_url("https://cdn.example.com/images/services_nails/1.jpg"),
            Some("services_nails/1.jpg".to_string())
        );
        assert_eq!(images.path_from_url("https://elsewhere.example.com/x.jpg"), None);
        assert_eq!(images.path_from_url("https://cdn.example.com/images/"), None);
    }

    #[tokio::test]
    async fn health_reports_missing_root_as_degraded() {
        let dir = tempdir().unwrap();
        let images = store(&dir.path().join("absent"));
        assert!(matches!(
            images.health_check().await.unwrap(),
            HealthStatus::Degraded(_)
        ));
    }
}
