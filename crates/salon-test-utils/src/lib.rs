// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for salon booking integration tests.
//!
//! Provides in-memory collaborators and a harness for fast, deterministic,
//! CI-runnable tests without SMTP servers or a real clock.
//!
//! # Components
//!
//! - [`MemoryStore`] - appointments and catalog held in memory
//! - [`RecordingNotifier`] - captures notifications, optionally failing every send
//! - [`MemoryImageStore`] - image objects held in memory
//! - [`FixedClock`] - a clock tests can set and advance
//! - [`TestHarness`] - temp SQLite store plus the mocks above

pub mod clock;
pub mod fixtures;
pub mod harness;
pub mod memory_images;
pub mod memory_store;
pub mod recording_notifier;

pub use clock::FixedClock;
pub use harness::{TEST_BEARER_TOKEN, TestHarness, TestHarnessBuilder};
pub use memory_images::MemoryImageStore;
pub use memory_store::MemoryStore;
pub use recording_notifier::RecordingNotifier;

/// Locks a std mutex, recovering the data if a test thread panicked while holding it.
pub(crate) fn lock<T>(mutex: &std::sync::Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
