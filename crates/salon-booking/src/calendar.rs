// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Calendar rules: which slots a customer may request.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};

use salon_config::model::BookingConfig;
use salon_core::types::hours;
use salon_core::SalonError;

use crate::conflict::TimeSlot;

/// First and last day of the month containing `date`.
pub fn month_range(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).unwrap_or(date);
    let last = first
        .checked_add_months(chrono::Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX);
    (first, last)
}

/// Parses a `YYYY-MM` month key into its first day.
pub fn parse_month(month: &str) -> Result<NaiveDate, SalonError> {
    NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d").map_err(|_| {
        SalonError::Validation(vec![salon_core::FieldError::new(
            "month",
            format!("`{month}` is not a YYYY-MM month"),
        )])
    })
}

/// Truncates an instant to the start of its hour.
pub fn round_to_hour(instant: NaiveDateTime) -> NaiveDateTime {
    let time = NaiveTime::from_hms_opt(instant.hour(), 0, 0).unwrap_or(NaiveTime::MIN);
    instant.date().and_time(time)
}

/// Bookable-calendar constraints derived from `[booking]` configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarRules {
    pub duration_hours: f64,
    pub lead_days: u32,
    pub closed_weekdays: Vec<Weekday>,
    pub opening_hour: u32,
    pub closing_hour: u32,
}

impl Default for CalendarRules {
    fn default() -> Self {
        Self::from_config(&BookingConfig::default())
    }
}

impl CalendarRules {
    pub fn from_config(config: &BookingConfig) -> Self {
        Self {
            duration_hours: config.duration_hours,
            lead_days: config.lead_days,
            closed_weekdays: config.closed_weekdays(),
            opening_hour: config.opening_hour,
            closing_hour: config.closing_hour,
        }
    }

    /// Earliest date a customer may book when today is `today`.
    pub fn earliest_date(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_add_days(Days::new(u64::from(self.lead_days)))
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn is_closed(&self, date: NaiveDate) -> bool {
        self.closed_weekdays.contains(&date.weekday())
    }

    /// Rejects `start` with `SlotUnavailable` if it breaks any rule.
    pub fn check_bookable(&self, start: NaiveDateTime, now: NaiveDateTime) -> Result<(), SalonError> {
        let date = start.date();
        if self.is_closed(date) {
            return Err(SalonError::SlotUnavailable(format!(
                "the salon is closed on {}",
                date.weekday()
            )));
        }
        let earliest = self.earliest_date(now.date());
        if date < earliest {
            return Err(SalonError::SlotUnavailable(format!(
                "bookings open from {earliest} onwards"
            )));
        }
        let hour = start.hour();
        if hour < self.opening_hour || hour >= self.closing_hour {
            return Err(SalonError::SlotUnavailable(format!(
                "appointments start between {:02}:00 and {:02}:00",
                self.opening_hour, self.closing_hour
            )));
        }
        Ok(())
    }

    /// The `[start, start + duration)` slot a booking at `start` occupies.
    pub fn slot_for(&self, start: NaiveDateTime) -> Result<TimeSlot, SalonError> {
        let length = hours(self.duration_hours).ok_or_else(|| {
            SalonError::Config(format!(
                "booking duration {} is not a valid hour count",
                self.duration_hours
            ))
        })?;
        let end = start.checked_add_signed(length).ok_or_else(|| {
            SalonError::SlotUnavailable(format!("a booking at {start} would end past the calendar"))
        })?;
        TimeSlot::new(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    /// Monday 2026-03-09, mid-morning.
    fn now() -> NaiveDateTime {
        dt("2026-03-09 10:15")
    }

    #[test]
    fn month_range_handles_varied_lengths() {
        assert_eq!(month_range(d("2026-02-14")), (d("2026-02-01"), d("2026-02-28")));
        assert_eq!(month_range(d("2028-02-01")), (d("2028-02-01"), d("2028-02-29")));
        assert_eq!(month_range(d("2026-12-31")), (d("2026-12-01"), d("2026-12-31")));
    }

    #[test]
    fn parse_month_accepts_year_month_only() {
        assert_eq!(parse_month("2026-03").unwrap(), d("2026-03-01"));
        assert!(parse_month("2026-13").is_err());
        assert!(parse_month("March").is_err());
    }

    #[test]
    fn round_to_hour_drops_minutes_and_seconds() {
        let instant = NaiveDateTime::parse_from_str("2026-03-12 10:47:31", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        assert_eq!(round_to_hour(instant), dt("2026-03-12 10:00"));
    }

    #[test]
    fn lead_time_rejects_the_next_two_days() {
        let rules = CalendarRules::default();
        assert!(rules.check_bookable(dt("2026-03-11 10:00"), now()).is_err());
        assert!(rules.check_bookable(dt("2026-03-12 10:00"), now()).is_ok());
        assert_eq!(rules.earliest_date(now().date()), d("2026-03-12"));
    }

    #[test]
    fn closed_weekday_is_rejected() {
        let rules = CalendarRules::default();
        let err = rules.check_bookable(dt("2026-03-15 10:00"), now()).unwrap_err();
        assert!(matches!(err, SalonError::SlotUnavailable(msg) if msg.contains("Sun")));
    }

    #[test]
    fn opening_hours_are_half_open() {
        let rules = CalendarRules::default();
        assert!(rules.check_bookable(dt("2026-03-12 07:00"), now()).is_err());
        assert!(rules.check_bookable(dt("2026-03-12 08:00"), now()).is_ok());
        assert!(rules.check_bookable(dt("2026-03-12 22:00"), now()).is_ok());
        assert!(rules.check_bookable(dt("2026-03-12 23:00"), now()).is_err());
    }

    #[test]
    fn slot_uses_configured_duration() {
        let rules = CalendarRules::default();
        let slot = rules.slot_for(dt("2026-03-12 10:00")).unwrap();
        assert_eq!(slot.end(), dt("2026-03-12 14:00"));

        let short = CalendarRules {
            duration_hours: 1.5,
            ..CalendarRules::default()
        };
        assert_eq!(
            short.slot_for(dt("2026-03-12 10:00")).unwrap().end(),
            dt("2026-03-12 11:30")
        );
    }

    #[test]
    fn slot_past_the_last_representable_day_is_unavailable() {
        let rules = CalendarRules::default();
        let start = NaiveDate::MAX.and_hms_opt(22, 0, 0).unwrap();
        let err = rules.slot_for(start).unwrap_err();
        assert!(matches!(err, SalonError::SlotUnavailable(_)));
    }

    #[test]
    fn rules_follow_config() {
        let config = BookingConfig {
            closed_weekdays: vec!["mon".into(), "tue".into()],
            lead_days: 0,
            ..BookingConfig::default()
        };
        let rules = CalendarRules::from_config(&config);
        assert!(rules.check_bookable(dt("2026-03-09 12:00"), now()).is_err());
        assert!(rules.check_bookable(dt("2026-03-15 12:00"), now()).is_ok());
    }
}
