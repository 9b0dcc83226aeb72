// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Booking logic for the salon booking service.
//!
//! The two pure cores are [`conflict`] (half-open slot overlap) and
//! [`stats`] (dashboard buckets). Around them sit the calendar rules, form
//! validation and the async services the gateway and CLI call into.

pub mod admin;
pub mod booking;
pub mod calendar;
pub mod catalog;
pub mod conflict;
pub mod contact;
pub mod forms;
pub mod stats;

pub use admin::{AdminService, MonthView};
pub use booking::{BookingOutcome, BookingService};
pub use calendar::{month_range, parse_month, round_to_hour, CalendarRules};
pub use catalog::{CatalogService, ImageUpload, LocalizedCategory, LocalizedService};
pub use conflict::{has_conflict, TimeSlot};
pub use contact::ContactService;
pub use forms::{BookingRequest, ContactForm};
pub use stats::{aggregate, FutureCounts, PastCounts, StatsAggregator, StatsReport};
