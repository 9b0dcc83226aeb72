// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog store trait for service categories and services.

use async_trait::async_trait;

use crate::error::SalonError;
use crate::traits::adapter::Adapter;
use crate::types::{Category, NewCategory, Service, ServiceDraft};

/// Adapter for the store that owns the service catalog.
#[async_trait]
pub trait CatalogStore: Adapter {
    /// Lists categories, optionally only the active ones.
    async fn list_categories(&self, active_only: bool) -> Result<Vec<Category>, SalonError>;

    /// Fetches one category by id.
    async fn get_category(&self, id: i64) -> Result<Option<Category>, SalonError>;

    /// Creates a category and returns its id.
    async fn create_category(&self, category: &NewCategory) -> Result<i64, SalonError>;

    /// Deletes a category and, with it, its services. Returns `false` if absent.
    async fn delete_category(&self, id: i64) -> Result<bool, SalonError>;

    /// Lists services, optionally restricted to one category, ordered by id.
    async fn list_services(&self, category_id: Option<i64>) -> Result<Vec<Service>, SalonError>;

    /// Fetches one service by id.
    async fn get_service(&self, id: i64) -> Result<Option<Service>, SalonError>;

    /// Creates a service and returns its id.
    async fn create_service(
        &self,
        category_id: i64,
        draft: &ServiceDraft,
        image_url: Option<&str>,
    ) -> Result<i64, SalonError>;

    /// Overwrites a service. Returns `false` if absent.
    async fn update_service(
        &self,
        id: i64,
        category_id: i64,
        draft: &ServiceDraft,
        image_url: Option<&str>,
    ) -> Result<bool, SalonError>;

    /// Deletes a service. Returns `false` if absent.
    async fn delete_service(&self, id: i64) -> Result<bool, SalonError>;
}
