// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dashboard statistics over a set of appointments.
//!
//! Records are partitioned at date granularity against a single `now`
//! snapshot:
//!
//! - **future**: every `pending` row (any date) plus `confirmed` rows dated
//!   today or later.
//! - **past**: `confirmed` rows dated before today.
//!
//! Rows with a status outside `pending`/`confirmed` land in `excluded`;
//! rows with a known status but an unparsable date land in `skipped`. Neither
//! touches a bucket.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use salon_core::{Appointment, AppointmentStatus};

/// Counts for upcoming work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FutureCounts {
    /// All pending rows regardless of date.
    pub pending: u32,
    /// Confirmed rows dated today or later.
    pub confirmed: u32,
    pub today: u32,
    pub tomorrow: u32,
    pub this_week: u32,
    pub this_month: u32,
}

/// Counts for confirmed appointments already behind us.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PastCounts {
    pub yesterday: u32,
    /// Dated within the 7 days before today.
    ///
    /// The lower bound is inclusive: a row dated exactly seven days ago
    /// counts, whatever the time of day of `now`.
    pub last_week: u32,
    /// Dated on or after the same day one month ago.
    pub last_month: u32,
    pub all_past: u32,
}

/// Result of one aggregation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsReport {
    pub future: FutureCounts,
    pub past: PastCounts,
    /// Rows with a known status whose date did not parse.
    pub skipped: u32,
    /// Rows whose status is neither `pending` nor `confirmed`.
    pub excluded: u32,
}

/// Calendar boundaries derived once from `now`.
struct Window {
    today: NaiveDate,
    tomorrow: NaiveDate,
    yesterday: NaiveDate,
    week_start: NaiveDate,
    week_end: NaiveDate,
    last_week_start: NaiveDate,
    last_month_start: NaiveDate,
}

impl Window {
    fn new(now: NaiveDateTime, first_day: Weekday) -> Self {
        let today = now.date();
        let offset = (7 + today.weekday().num_days_from_monday()
            - first_day.num_days_from_monday())
            % 7;
        let week_start = today - Days::new(u64::from(offset));
        Self {
            today,
            tomorrow: today + Days::new(1),
            yesterday: today - Days::new(1),
            week_start,
            week_end: week_start + Days::new(7),
            last_week_start: today - Days::new(7),
            last_month_start: today
                .checked_sub_months(Months::new(1))
                .unwrap_or(NaiveDate::MIN),
        }
    }

    fn same_month(&self, date: NaiveDate) -> bool {
        date.year() == self.today.year() && date.month() == self.today.month()
    }
}

/// Aggregates appointments into dashboard buckets.
#[derive(Debug, Clone, Copy)]
pub struct StatsAggregator {
    week_start: Weekday,
}

impl Default for StatsAggregator {
    fn default() -> Self {
        Self::new(Weekday::Sun)
    }
}

impl StatsAggregator {
    /// `week_start` decides the boundaries of "this week".
    pub fn new(week_start: Weekday) -> Self {
        Self { week_start }
    }

    /// Single pass over `appointments`, evaluated against one `now` snapshot.
    /// The result does not depend on input order.
    pub fn aggregate(&self, appointments: &[Appointment], now: NaiveDateTime) -> StatsReport {
        let window = Window::new(now, self.week_start);
        let mut report = StatsReport::default();

        for appointment in appointments {
            let Some(status) = appointment.parsed_status() else {
                report.excluded += 1;
                continue;
            };
            let Some(date) = appointment.parsed_date() else {
                report.skipped += 1;
                continue;
            };

            match status {
                AppointmentStatus::Pending => report.future.pending += 1,
                AppointmentStatus::Confirmed if date >= window.today => {
                    let future = &mut report.future;
                    future.confirmed += 1;
                    future.today += u32::from(date == window.today);
                    future.tomorrow += u32::from(date == window.tomorrow);
                    future.this_week +=
                        u32::from(date >= window.week_start && date < window.week_end);
                    future.this_month += u32::from(window.same_month(date));
                }
                AppointmentStatus::Confirmed => {
                    let past = &mut report.past;
                    past.all_past += 1;
                    past.yesterday += u32::from(date == window.yesterday);
                    past.last_week += u32::from(date >= window.last_week_start);
                    past.last_month += u32::from(date >= window.last_month_start);
                }
            }
        }

        report
    }
}

/// Aggregates with weeks starting on Sunday.
pub fn aggregate(appointments: &[Appointment], now: NaiveDateTime) -> StatsReport {
    StatsAggregator::default().aggregate(appointments, now)
}
