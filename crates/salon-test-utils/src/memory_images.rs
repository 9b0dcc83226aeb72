// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory image store.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use salon_core::{Adapter, AdapterType, HealthStatus, ImageStore, SalonError};

/// Holds image objects in a map keyed by path.
pub struct MemoryImageStore {
    base_url: String,
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryImageStore {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            objects: Mutex::new(BTreeMap::new()),
        }
    }

    /// Stored paths in sorted order.
    pub fn paths(&self) -> Vec<String> {
        crate::lock(&self.objects).keys().cloned().collect()
    }

    pub fn bytes(&self, path: &str) -> Option<Vec<u8>> {
        crate::lock(&self.objects).get(path).cloned()
    }
}

#[async_trait]
impl Adapter for MemoryImageStore {
    fn name(&self) -> &str {
        "memory-images"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::ImageStore
    }

    async fn health_check(&self) -> Result<HealthStatus, SalonError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn upload(&self, path: &str, bytes: Vec<u8>) -> Result<String, SalonError> {
        let mut objects = crate::lock(&self.objects);
        if objects.contains_key(path) {
            return Err(SalonError::ImageStore {
                message: format!("{path} already exists"),
                source: None,
            });
        }
        objects.insert(path.to_string(), bytes);
        Ok(format!("{}/{path}", self.base_url))
    }

    async fn download(&self, path: &str) -> Result<Vec<u8>, SalonError> {
        self.bytes(path).ok_or_else(|| SalonError::ImageStore {
            message: format!("{path} not found"),
            source: None,
        })
    }

    async fn remove(&self, paths: &[String]) -> Result<(), SalonError> {
        let mut objects = crate::lock(&self.objects);
        for path in paths {
            objects.remove(path);
        }
        Ok(())
    }

    fn path_from_url(&self, url: &str) -> Option<String> {
        let rest = url.strip_prefix(&self.base_url)?.strip_prefix('/')?;
        (!rest.is_empty()).then(|| rest.to_string())
    }
}
