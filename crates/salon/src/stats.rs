// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `salon stats` command implementation.
//!
//! Reads every appointment from the configured database and prints the
//! dashboard counts evaluated at the current local time.

use chrono::NaiveDateTime;

use salon_booking::{StatsAggregator, StatsReport};
use salon_config::SalonConfig;
use salon_core::{AppointmentStore, Clock, SalonError, SystemClock};
use salon_storage::SqliteStore;

/// Run the `salon stats` command.
pub async fn run_stats(config: &SalonConfig, json: bool) -> Result<(), SalonError> {
    let store = SqliteStore::new(config.storage.clone());
    store.initialize().await?;
    let rows = store.list_all().await?;
    store.close().await?;

    let now = SystemClock.now();
    let report = StatsAggregator::new(config.booking.week_start()).aggregate(&rows, now);

    if json {
        let out = serde_json::to_string_pretty(&report)
            .map_err(|e| SalonError::Internal(format!("failed to serialize stats: {e}")))?;
        println!("{out}");
    } else {
        print!("{}", render_table(&report, now));
    }
    Ok(())
}

/// Plain-text dashboard.
fn render_table(report: &StatsReport, now: NaiveDateTime) -> String {
    let f = &report.future;
    let p = &report.past;
    let mut out = format!("Appointments as of {}\n\n", now.format("%Y-%m-%d %H:%M"));
    let rows: [(&str, u32); 10] = [
        ("pending", f.pending),
        ("confirmed (upcoming)", f.confirmed),
        ("today", f.today),
        ("tomorrow", f.tomorrow),
        ("this week", f.this_week),
        ("this month", f.this_month),
        ("yesterday", p.yesterday),
        ("last 7 days", p.last_week),
        ("last month", p.last_month),
        ("all past", p.all_past),
    ];
    for (label, count) in rows {
        out.push_str(&format!("  {label:<22}{count:>6}\n"));
    }
    if report.skipped > 0 || report.excluded > 0 {
        out.push_str(&format!(
            "\n  ignored: {} with unreadable dates, {} with unknown status\n",
            report.skipped, report.excluded
        ));
    }
    out
}
