// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles the collaborators a full salon stack needs: a
//! temp SQLite store with migrations applied, an in-memory image store, a
//! recording notifier and a fixed clock. Callers wire them into services or
//! the HTTP gateway.

use std::sync::Arc;

use chrono::NaiveDateTime;

use salon_config::SalonConfig;
use salon_config::model::StorageConfig;
use salon_core::SalonError;
use salon_storage::SqliteStore;

use crate::clock::FixedClock;
use crate::memory_images::MemoryImageStore;
use crate::recording_notifier::RecordingNotifier;

/// Admin token configured by default in harness configs.
pub const TEST_BEARER_TOKEN: &str = "test-admin-token-0123456789";

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    now: NaiveDateTime,
    config: SalonConfig,
    failing_notifier: bool,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        let mut config = SalonConfig::default();
        config.salon.owner_email = Some("owner@example.com".to_string());
        config.gateway.bearer_token = Some(TEST_BEARER_TOKEN.to_string());
        config.images.public_base_url = "/images".to_string();
        Self {
            now: chrono::NaiveDate::from_ymd_opt(2026, 3, 9)
                .and_then(|d| d.and_hms_opt(9, 0, 0))
                .unwrap_or_default(),
            config,
            failing_notifier: false,
        }
    }

    /// Start the clock at `now` instead of 2026-03-09 09:00.
    pub fn with_now(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }

    /// Replace the whole configuration. Storage paths are overridden at build time.
    pub fn with_config(mut self, config: SalonConfig) -> Self {
        self.config = config;
        self
    }

    /// Make every notification fail.
    pub fn with_failing_notifier(mut self) -> Self {
        self.failing_notifier = true;
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, SalonError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| SalonError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db").to_string_lossy().to_string();

        let mut config = self.config;
        config.storage = StorageConfig {
            database_path: db_path,
            wal_mode: true,
        };
        config.images.directory = temp_dir.path().join("images").to_string_lossy().to_string();

        let store = SqliteStore::new(config.storage.clone());
        store.initialize().await?;

        let notifier = if self.failing_notifier {
            RecordingNotifier::failing()
        } else {
            RecordingNotifier::new()
        };

        Ok(TestHarness {
            images: Arc::new(MemoryImageStore::new(&config.images.public_base_url)),
            store: Arc::new(store),
            notifier: Arc::new(notifier),
            clock: Arc::new(FixedClock::new(self.now)),
            config,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete set of test collaborators backed by a temp directory.
pub struct TestHarness {
    pub config: SalonConfig,
    pub store: Arc<SqliteStore>,
    pub images: Arc<MemoryImageStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub clock: Arc<FixedClock>,
    // Held so the temp directory outlives the store.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }
}
