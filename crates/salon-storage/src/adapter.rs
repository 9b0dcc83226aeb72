// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the appointment and catalog store traits.

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::OnceCell;
use tracing::debug;

use salon_config::model::StorageConfig;
use salon_core::{
    Adapter, AdapterType, Appointment, AppointmentStatus, AppointmentStore, CatalogStore,
    Category, HealthStatus, NewAppointment, NewCategory, Role, SalonError, Service, ServiceDraft,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed store for appointments and the service catalog.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily opened by
/// [`SqliteStore::initialize`].
pub struct SqliteStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStore {
    /// Create a new store with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`](Self::initialize) is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Open the database and run migrations. Fails if called twice.
    pub async fn initialize(&self) -> Result<(), SalonError> {
        let db = Database::open_with(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| SalonError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite store initialized");
        Ok(())
    }

    /// Checkpoint the WAL. The connection closes when the store is dropped.
    pub async fn close(&self) -> Result<(), SalonError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    /// Returns the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, SalonError> {
        self.db.get().ok_or_else(|| SalonError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl Adapter for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::AppointmentStore
    }

    async fn health_check(&self) -> Result<HealthStatus, SalonError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl AppointmentStore for SqliteStore {
    async fn list_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        role: Role,
    ) -> Result<Vec<Appointment>, SalonError> {
        match role {
            Role::Public => queries::appointments::list_public_range(self.db()?, from, to).await,
            Role::Admin => queries::appointments::list_range(self.db()?, from, to).await,
        }
    }

    async fn list_all(&self) -> Result<Vec<Appointment>, SalonError> {
        queries::appointments::list_all(self.db()?).await
    }

    async fn insert(&self, appointment: &NewAppointment) -> Result<String, SalonError> {
        queries::appointments::insert_appointment(self.db()?, appointment).await
    }

    async fn update_status(
        &self,
        id: &str,
        status: AppointmentStatus,
    ) -> Result<bool, SalonError> {
        queries::appointments::update_status(self.db()?, id, status).await
    }

    async fn delete(&self, id: &str) -> Result<bool, SalonError> {
        queries::appointments::delete_appointment(self.db()?, id).await
    }
}

#[async_trait]
impl CatalogStore for SqliteStore {
    async fn list_categories(&self, active_only: bool) -> Result<Vec<Category>, SalonError> {
        queries::categories::list_categories(self.db()?, active_only).await
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>, SalonError> {
        queries::categories::get_category(self.db()?, id).await
    }

    async fn create_category(&self, category: &NewCategory) -> Result<i64, SalonError> {
        queries::categories::create_category(self.db()?, category).await
    }

    async fn delete_category(&self, id: i64) -> Result<bool, SalonError> {
        queries::categories::delete_category(self.db()?, id).await
    }

    async fn list_services(&self, category_id: Option<i64>) -> Result<Vec<Service>, SalonError> {
        queries::services::list_services(self.db()?, category_id).await
    }

    async fn get_service(&self, id: i64) -> Result<Option<Service>, SalonError> {
        queries::services::get_service(self.db()?, id).await
    }

    async fn create_service(
        &self,
        category_id: i64,
        draft: &ServiceDraft,
        image_url: Option<&str>,
    ) -> Result<i64, SalonError> {
        queries::services::create_service(self.db()?, category_id, draft, image_url).await
    }

    async fn update_service(
        &self,
        id: i64,
        category_id: i64,
        draft: &ServiceDraft,
        image_url: Option<&str>,
    ) -> Result<bool, SalonError> {
        queries::services::update_service(self.db()?, id, category_id, draft, image_url).await
    }

    async fn delete_service(&self, id: i64) -> Result<bool, SalonError> {
        queries::services::delete_service(self.db()?, id).await
    }
}
