// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory appointment and catalog store.
//!
//! Mirrors the SQLite store's observable behavior (inclusive date ranges,
//! public projection, id ordering, cascading category deletes) so service
//! tests can run without a database file.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use salon_core::types::{DATE_FORMAT, TIME_FORMAT};
use salon_core::{
    Adapter, AdapterType, Appointment, AppointmentStatus, AppointmentStore, CatalogStore,
    Category, HealthStatus, NewAppointment, NewCategory, Role, SalonError, Service, ServiceDraft,
};

#[derive(Default)]
struct Inner {
    appointments: Vec<Appointment>,
    categories: Vec<Category>,
    services: Vec<Service>,
    next_category_id: i64,
    next_service_id: i64,
}

/// Appointments, categories and services kept in vectors.
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Every stored appointment, in insertion order.
    pub fn appointments(&self) -> Vec<Appointment> {
        crate::lock(&self.inner).appointments.clone()
    }

    /// Store a raw row as-is, bypassing validation (malformed dates included).
    pub fn push_appointment(&self, appointment: Appointment) {
        crate::lock(&self.inner).appointments.push(appointment);
    }

    pub fn service(&self, id: i64) -> Option<Service> {
        crate::lock(&self.inner)
            .services
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    /// Mark a category inactive so it drops out of the public catalog.
    pub fn deactivate_category(&self, id: i64) {
        let mut inner = crate::lock(&self.inner);
        if let Some(category) = inner.categories.iter_mut().find(|c| c.id == id) {
            category.active = false;
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn sorted(mut rows: Vec<Appointment>) -> Vec<Appointment> {
    rows.sort_by(|a, b| (&a.date, &a.start_time).cmp(&(&b.date, &b.start_time)));
    rows
}

fn public_view(row: &Appointment) -> Appointment {
    Appointment {
        id: row.id.clone(),
        date: row.date.clone(),
        start_time: row.start_time.clone(),
        duration_hours: row.duration_hours,
        status: row.status.clone(),
        customer_name: String::new(),
        customer_email: String::new(),
        customer_phone: String::new(),
        service_type: String::new(),
        created_at: String::new(),
    }
}

#[async_trait]
impl Adapter for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::AppointmentStore
    }

    async fn health_check(&self) -> Result<HealthStatus, SalonError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl AppointmentStore for MemoryStore {
    async fn list_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        role: Role,
    ) -> Result<Vec<Appointment>, SalonError> {
        let from = from.format(DATE_FORMAT).to_string();
        let to = to.format(DATE_FORMAT).to_string();
        let inner = crate::lock(&self.inner);
        let in_range = inner
            .appointments
            .iter()
            .filter(|a| a.date.as_str() >= from.as_str() && a.date.as_str() <= to.as_str());
        let rows = match role {
            Role::Admin => in_range.cloned().collect(),
            Role::Public => in_range
                .filter(|a| a.parsed_status().is_some())
                .map(public_view)
                .collect(),
        };
        Ok(sorted(rows))
    }

    async fn list_all(&self) -> Result<Vec<Appointment>, SalonError> {
        Ok(sorted(self.appointments()))
    }

    async fn insert(&self, appointment: &NewAppointment) -> Result<String, SalonError> {
        let id = uuid::Uuid::new_v4().to_string();
        self.push_appointment(Appointment {
            id: id.clone(),
            date: appointment.date.format(DATE_FORMAT).to_string(),
            start_time: appointment.start_time.format(TIME_FORMAT).to_string(),
            duration_hours: appointment.duration_hours,
            status: AppointmentStatus::Pending.to_string(),
            customer_name: appointment.customer_name.clone(),
            customer_email: appointment.customer_email.clone(),
            customer_phone: appointment.customer_phone.clone(),
            service_type: appointment.service_type.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
        });
        Ok(id)
    }

    async fn update_status(
        &self,
        id: &str,
        status: AppointmentStatus,
    ) -> Result<bool, SalonError> {
        let mut inner = crate::lock(&self.inner);
        match inner.appointments.iter_mut().find(|a| a.id == id) {
            Some(row) => {
                row.status = status.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, SalonError> {
        let mut inner = crate::lock(&self.inner);
        let before = inner.appointments.len();
        inner.appointments.retain(|a| a.id != id);
        Ok(inner.appointments.len() < before)
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_categories(&self, active_only: bool) -> Result<Vec<Category>, SalonError> {
        let inner = crate::lock(&self.inner);
        Ok(inner
            .categories
            .iter()
            .filter(|c| !active_only || c.active)
            .cloned()
            .collect())
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>, SalonError> {
        let inner = crate::lock(&self.inner);
        Ok(inner.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn create_category(&self, category: &NewCategory) -> Result<i64, SalonError> {
        let mut inner = crate::lock(&self.inner);
        inner.next_category_id += 1;
        let id = inner.next_category_id;
        inner.categories.push(Category {
            id,
            name_es: category.name_es.clone(),
            name_en: category.name_en.clone(),
            active: true,
        });
        Ok(id)
    }

    async fn delete_category(&self, id: i64) -> Result<bool, SalonError> {
        let mut inner = crate::lock(&self.inner);
        let before = inner.categories.len();
        inner.categories.retain(|c| c.id != id);
        if inner.categories.len() == before {
            return Ok(false);
        }
        inner.services.retain(|s| s.category_id != id);
        Ok(true)
    }

    async fn list_services(&self, category_id: Option<i64>) -> Result<Vec<Service>, SalonError> {
        let inner = crate::lock(&self.inner);
        Ok(inner
            .services
            .iter()
            .filter(|s| category_id.is_none_or(|c| s.category_id == c))
            .cloned()
            .collect())
    }

    async fn get_service(&self, id: i64) -> Result<Option<Service>, SalonError> {
        Ok(self.service(id))
    }

    async fn create_service(
        &self,
        category_id: i64,
        draft: &ServiceDraft,
        image_url: Option<&str>,
    ) -> Result<i64, SalonError> {
        let mut inner = crate::lock(&self.inner);
        if !inner.categories.iter().any(|c| c.id == category_id) {
            return Err(SalonError::Storage {
                source: format!("FOREIGN KEY constraint failed: category {category_id}").into(),
            });
        }
        inner.next_service_id += 1;
        let id = inner.next_service_id;
        inner.services.push(Service {
            id,
            category_id,
            title_es: draft.title_es.clone(),
            title_en: draft.title_en.clone(),
            description_es: draft.description_es.clone(),
            description_en: draft.description_en.clone(),
            price: draft.price,
            image_url: image_url.map(str::to_string),
        });
        Ok(id)
    }

    async fn update_service(
        &self,
        id: i64,
        category_id: i64,
        draft: &ServiceDraft,
        image_url: Option<&str>,
    ) -> Result<bool, SalonError> {
        let mut inner = crate::lock(&self.inner);
        let Some(service) = inner.services.iter_mut().find(|s| s.id == id) else {
            return Ok(false);
        };
        service.category_id = category_id;
        service.title_es = draft.title_es.clone();
        service.title_en = draft.title_en.clone();
        service.description_es = draft.description_es.clone();
        service.description_en = draft.description_en.clone();
        service.price = draft.price;
        service.image_url = image_url.map(str::to_string);
        Ok(true)
    }

    async fn delete_service(&self, id: i64) -> Result<bool, SalonError> {
        let mut inner = crate::lock(&self.inner);
        let before = inner.services.len();
        inner.services.retain(|s| s.id != id);
        Ok(inner.services.len() < before)
    }
}
