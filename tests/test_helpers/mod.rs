//! Shared clock support for integration tests.

#![expect(
    clippy::expect_used,
    reason = "Test helpers use expect for assertion clarity"
)]

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::{Arc, RwLock};

/// Clock whose current instant the test advances explicitly.
#[derive(Debug, Clone)]
pub struct SteppingClock {
    now: Arc<RwLock<DateTime<Utc>>>,
}

impl SteppingClock {
    /// Creates a clock pinned to the given instant.
    #[must_use]
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(RwLock::new(now)),
        }
    }

    /// Creates a clock at a reference instant away from any day boundary.
    #[must_use]
    pub fn base() -> Self {
        Self::starting_at(
            Utc.with_ymd_and_hms(2024, 5, 14, 9, 0, 0)
                .single()
                .expect("valid reference instant"),
        )
    }

    /// Moves the clock forward.
    pub fn advance(&self, step: Duration) {
        let mut now = self.now.write().expect("clock lock");
        *now += step;
    }

    /// Returns the current instant.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        *self.now.read().expect("clock lock")
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.now().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now()
    }
}
