// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Image store trait for service pictures.

use async_trait::async_trait;

use crate::error::SalonError;
use crate::traits::adapter::Adapter;

/// Adapter for the file-upload collaborator.
///
/// Paths are relative object keys such as `services_nails/1700000000000.jpg`.
#[async_trait]
pub trait ImageStore: Adapter {
    /// Stores `bytes` under `path` and returns the public URL. Never overwrites.
    async fn upload(&self, path: &str, bytes: Vec<u8>) -> Result<String, SalonError>;

    /// Reads back the object stored under `path`.
    async fn download(&self, path: &str) -> Result<Vec<u8>, SalonError>;

    /// Removes the objects under `paths`. Missing objects are ignored.
    async fn remove(&self, paths: &[String]) -> Result<(), SalonError>;

    /// Recovers the object path from a public URL issued by this store.
    fn path_from_url(&self, url: &str) -> Option<String>;
}
