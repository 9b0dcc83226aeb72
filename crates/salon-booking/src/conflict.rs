// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Slot conflict checking over half-open intervals.
//!
//! `[s1, e1)` and `[s2, e2)` overlap iff `s1 < e2 && e1 > s2`. Back-to-back
//! slots therefore never conflict, and a zero-length slot overlaps nothing,
//! not even itself.
//!
//! The `existing` slice is whatever snapshot the caller fetched. A booking
//! inserted by another client after that fetch is not seen here; only a
//! store-level exclusion constraint could close that window.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use salon_core::{Appointment, BusySlot, SalonError};

/// A half-open `[start, end)` interval on the salon's local clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeSlot {
    /// Builds a slot, failing with `InvalidInterval` when `end < start`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, SalonError> {
        if end < start {
            return Err(SalonError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Slot occupied by a stored appointment, `None` if its fields don't parse.
    pub fn from_appointment(appointment: &Appointment) -> Option<Self> {
        Self::new(appointment.start()?, appointment.end()?).ok()
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Half-open overlap test. An empty slot covers no instant.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.start < other.end
            && self.end > other.start
    }

    /// Busy-view projection for the public calendar.
    pub fn busy(&self, id: impl Into<String>) -> BusySlot {
        BusySlot {
            id: id.into(),
            start: self.start,
            end: self.end,
        }
    }
}

/// True as soon as `candidate` overlaps any slot in `existing`.
pub fn has_conflict(candidate: &TimeSlot, existing: &[TimeSlot]) -> bool {
    existing.iter().any(|slot| candidate.overlaps(slot))
}

/// Slots of every appointment in `appointments` whose time fields parse.
pub fn occupied_slots(appointments: &[Appointment]) -> Vec<TimeSlot> {
    appointments
        .iter()
        .filter_map(TimeSlot::from_appointment)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 10)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn slot(start: u32, end: u32) -> TimeSlot {
        TimeSlot::new(at(start), at(end)).unwrap()
    }

    #[test]
    fn empty_existing_never_conflicts() {
        assert!(!has_conflict(&slot(10, 14), &[]));
    }

    #[test]
    fn abutting_slots_do_not_conflict() {
        assert!(!has_conflict(&slot(10, 14), &[slot(14, 18)]));
        assert!(!has_conflict(&slot(14, 18), &[slot(10, 14)]));
    }

    #[test]
    fn partial_overlap_conflicts() {
        assert!(has_conflict(&slot(10, 14), &[slot(12, 16)]));
    }

    #[test]
    fn containment_conflicts_both_ways() {
        assert!(has_conflict(&slot(10, 20), &[slot(12, 14)]));
        assert!(has_conflict(&slot(12, 14), &[slot(10, 20)]));
    }

    #[test]
    fn identical_slots_conflict() {
        assert!(has_conflict(&slot(10, 14), &[slot(10, 14)]));
    }

    #[test]
    fn zero_length_slot_overlaps_nothing() {
        let point = slot(12, 12);
        assert!(point.is_empty());
        assert!(!has_conflict(&point, &[point]));
        assert!(!has_conflict(&point, &[slot(10, 14)]));
        assert!(!has_conflict(&slot(10, 14), &[point]));
        assert!(!has_conflict(&slot(12, 14), &[point]));
    }

    #[test]
    fn reversed_bounds_are_rejected() {
        let err = TimeSlot::new(at(14), at(10)).unwrap_err();
        assert!(matches!(err, SalonError::InvalidInterval { .. }));
    }

    #[test]
    fn any_match_among_many_is_enough() {
        let existing = [slot(8, 9), slot(9, 10), slot(15, 19)];
        assert!(has_conflict(&slot(18, 22), &existing));
        assert!(!has_conflict(&slot(10, 15), &existing));
    }

    #[test]
    fn appointment_without_parsable_time_has_no_slot() {
        let appt = Appointment {
            id: "x".into(),
            date: "2026-03-10".into(),
            start_time: "noon".into(),
            duration_hours: 4.0,
            status: "pending".into(),
            customer_name: String::new(),
            customer_email: String::new(),
            customer_phone: String::new(),
            service_type: String::new(),
            created_at: String::new(),
        };
        assert!(TimeSlot::from_appointment(&appt).is_none());
        assert!(occupied_slots(&[appt]).is_empty());
    }

    #[test]
    fn row_ending_past_the_calendar_is_skipped() {
        let mut huge = salon_test_utils::fixtures::appointment("2026-03-10", "10:00:00");
        huge.duration_hours = 1e13;
        let ok = salon_test_utils::fixtures::appointment("2026-03-11", "10:00:00");

        let slots = occupied_slots(&[huge, ok]);
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].start(), at(10) + Duration::days(1));
    }

    fn arb_slot() -> impl Strategy<Value = TimeSlot> {
        (0i64..10_000, 0i64..500).prop_map(|(start, len)| {
            let base = at(0);
            TimeSlot::new(
                base + Duration::minutes(start),
                base + Duration::minutes(start + len),
            )
            .unwrap()
        })
    }

    proptest! {
        #[test]
        fn conflict_is_symmetric(a in arb_slot(), b in arb_slot()) {
            prop_assert_eq!(has_conflict(&a, &[b]), has_conflict(&b, &[a]));
        }

        #[test]
        fn conflict_matches_any_pairwise_overlap(
            candidate in arb_slot(),
            existing in proptest::collection::vec(arb_slot(), 0..8),
        ) {
            let expected = !candidate.is_empty() && existing.iter().any(|s| {
                !s.is_empty() && candidate.start() < s.end() && candidate.end() > s.start()
            });
            prop_assert_eq!(has_conflict(&candidate, &existing), expected);
        }
    }
}
