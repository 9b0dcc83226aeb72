// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Controllable clock.

use std::sync::Mutex;

use chrono::{Duration, NaiveDateTime};

use salon_core::Clock;

/// A clock that only moves when told to.
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        *crate::lock(&self.now) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = crate::lock(&self.now);
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *crate::lock(&self.now)
    }
}
