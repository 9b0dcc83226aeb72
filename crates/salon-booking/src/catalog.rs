// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service catalog management, including service pictures.
//!
//! Pictures live in one folder per category, `services_{slug}/{millis}.{ext}`,
//! where the slug is the category's English name lower-cased with whitespace
//! replaced by `_`. Moving a service to another category moves its picture.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use salon_core::{
    CatalogStore, Category, CategoryWithServices, Clock, ImageStore, Locale, NewCategory,
    SalonError, Service, ServiceDraft,
};

use crate::forms::{validate_category, validate_service};

/// An uploaded picture and its file extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub ext: String,
}

/// A category rendered in one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedCategory {
    pub id: i64,
    pub name: String,
    pub services: Vec<LocalizedService>,
}

/// A service rendered in one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedService {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image_url: Option<String>,
}

/// Folder name for a category's pictures.
pub fn category_folder(name_en: &str) -> String {
    let slug = name_en
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    format!("services_{slug}")
}

fn extension_of(path: &str) -> Option<&str> {
    let file = path.rsplit('/').next()?;
    let (_, ext) = file.rsplit_once('.')?;
    (!ext.is_empty()).then_some(ext)
}

fn normalize_ext(ext: &str) -> Result<String, SalonError> {
    let ext = ext.trim().trim_start_matches('.').to_ascii_lowercase();
    if ext.is_empty() || ext.len() > 5 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(SalonError::Validation(vec![salon_core::FieldError::new(
            "image",
            format!("`{ext}` is not an image extension"),
        )]));
    }
    Ok(ext)
}

pub struct CatalogService {
    catalog: Arc<dyn CatalogStore>,
    images: Arc<dyn ImageStore>,
    clock: Arc<dyn Clock>,
}

impl CatalogService {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        images: Arc<dyn ImageStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            catalog,
            images,
            clock,
        }
    }

    /// Active categories, each with its services ordered by id.
    pub async fn categories_with_services(&self) -> Result<Vec<CategoryWithServices>, SalonError> {
        let categories = self.catalog.list_categories(true).await?;
        let mut result = Vec::with_capacity(categories.len());
        for category in categories {
            let mut services = self.catalog.list_services(Some(category.id)).await?;
            services.sort_by_key(|s| s.id);
            result.push(CategoryWithServices { category, services });
        }
        Ok(result)
    }

    /// The public catalog in `locale`.
    pub async fn catalog(&self, locale: Locale) -> Result<Vec<LocalizedCategory>, SalonError> {
        Ok(self
            .categories_with_services()
            .await?
            .into_iter()
            .map(|entry| LocalizedCategory {
                id: entry.category.id,
                name: entry.category.name(locale).to_string(),
                services: entry
                    .services
                    .iter()
                    .map(|s| LocalizedService {
                        id: s.id,
                        title: s.title(locale).to_string(),
                        description: s.description(locale).to_string(),
                        price: s.price,
                        image_url: s.image_url.clone(),
                    })
                    .collect(),
            })
            .collect())
    }

    pub async fn create_category(&self, category: &NewCategory) -> Result<i64, SalonError> {
        validate_category(category)?;
        let trimmed = NewCategory {
            name_es: category.name_es.trim().to_string(),
            name_en: category.name_en.trim().to_string(),
        };
        let id = self.catalog.create_category(&trimmed).await?;
        info!(id, name = %trimmed.name_en, "category created");
        Ok(id)
    }

    /// Deletes a category, its services and their pictures.
    pub async fn delete_category(&self, id: i64) -> Result<(), SalonError> {
        self.category(id).await?;
        let services = self.catalog.list_services(Some(id)).await?;
        let paths: Vec<String> = services
            .iter()
            .filter_map(|s| s.image_url.as_deref())
            .filter_map(|url| self.images.path_from_url(url))
            .collect();
        if !paths.is_empty() {
            self.images.remove(&paths).await?;
        }
        if !self.catalog.delete_category(id).await? {
            return Err(category_not_found(id));
        }
        info!(id, services = services.len(), "category deleted");
        Ok(())
    }

    pub async fn create_service(
        &self,
        draft: &ServiceDraft,
        image: Option<ImageUpload>,
    ) -> Result<i64, SalonError> {
        let category_id = validate_service(draft)?;
        let category = self.category(category_id).await?;

        let image_url = match image {
            Some(upload) => Some(self.upload(&category, upload).await?),
            None => None,
        };

        match self
            .catalog
            .create_service(category_id, draft, image_url.as_deref())
            .await
        {
            Ok(id) => {
                info!(id, category_id, "service created");
                Ok(id)
            }
            Err(e) => {
                self.discard(image_url.as_deref()).await;
                Err(e)
            }
        }
    }

    /// Overwrites a service. A new picture replaces the old one; without one,
    /// a category change moves the existing picture to the new folder.
    pub async fn update_service(
        &self,
        id: i64,
        draft: &ServiceDraft,
        image: Option<ImageUpload>,
    ) -> Result<(), SalonError> {
        let category_id = validate_service(draft)?;
        let existing = self.service(id).await?;
        let category = self.category(category_id).await?;

        let old_path = existing
            .image_url
            .as_deref()
            .and_then(|url| self.images.path_from_url(url));

        let new_url = match (image, &old_path) {
            (Some(upload), _) => Some(self.upload(&category, upload).await?),
            (None, Some(path)) if existing.category_id != category_id => {
                let bytes = self.images.download(path).await?;
                let ext = extension_of(path).unwrap_or("jpg").to_string();
                Some(self.upload(&category, ImageUpload { bytes, ext }).await?)
            }
            (None, _) => existing.image_url.clone(),
        };
        let replaced = new_url != existing.image_url;

        match self
            .catalog
            .update_service(id, category_id, draft, new_url.as_deref())
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                if replaced {
                    self.discard(new_url.as_deref()).await;
                }
                return Err(service_not_found(id));
            }
            Err(e) => {
                if replaced {
                    self.discard(new_url.as_deref()).await;
                }
                return Err(e);
            }
        }

        if replaced && let Some(path) = old_path {
            self.images.remove(&[path]).await?;
        }
        info!(id, category_id, image_replaced = replaced, "service updated");
        Ok(())
    }

    /// Replaces only the picture of a service.
    pub async fn replace_service_image(&self, id: i64, image: ImageUpload) -> Result<(), SalonError> {
        let existing = self.service(id).await?;
        let draft = ServiceDraft {
            category_id: Some(existing.category_id),
            title_es: existing.title_es,
            title_en: existing.title_en,
            description_es: existing.description_es,
            description_en: existing.description_en,
            price: existing.price,
        };
        self.update_service(id, &draft, Some(image)).await
    }

    /// Removes the picture, then the row.
    pub async fn delete_service(&self, id: i64) -> Result<(), SalonError> {
        let existing = self.service(id).await?;
        if let Some(path) = existing
            .image_url
            .as_deref()
            .and_then(|url| self.images.path_from_url(url))
        {
            self.images.remove(&[path]).await?;
        }
        if !self.catalog.delete_service(id).await? {
            return Err(service_not_found(id));
        }
        info!(id, "service deleted");
        Ok(())
    }

    async fn category(&self, id: i64) -> Result<Category, SalonError> {
        self.catalog
            .get_category(id)
            .await?
            .ok_or_else(|| category_not_found(id))
    }

    async fn service(&self, id: i64) -> Result<Service, SalonError> {
        self.catalog
            .get_service(id)
            .await?
            .ok_or_else(|| service_not_found(id))
    }

    async fn upload(&self, category: &Category, upload: ImageUpload) -> Result<String, SalonError> {
        let ext = normalize_ext(&upload.ext)?;
        let millis = self.clock.now().and_utc().timestamp_millis();
        let path = format!("{}/{millis}.{ext}", category_folder(&category.name_en));
        self.images.upload(&path, upload.bytes).await
    }

    /// Best-effort removal of a picture whose row was never written.
    async fn discard(&self, url: Option<&str>) {
        let Some(path) = url.and_then(|u| self.images.path_from_url(u)) else {
            return;
        };
        if let Err(e) = self.images.remove(std::slice::from_ref(&path)).await {
            warn!(path = %path, error = %e, "could not discard orphaned image");
        }
    }
}

fn category_not_found(id: i64) -> SalonError {
    SalonError::NotFound {
        entity: "category",
        id: id.to_string(),
    }
}

fn service_not_found(id: i64) -> SalonError {
    SalonError::NotFound {
        entity: "service",
        id: id.to_string(),
    }
}
