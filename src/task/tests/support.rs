//! Deterministic clock support for task engine tests.

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

/// Clock pinned to a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FrozenClock(pub DateTime<Utc>);

impl FrozenClock {
    /// A reference instant away from any day or month boundary.
    pub fn base() -> Self {
        Self(
            Utc.with_ymd_and_hms(2024, 5, 14, 9, 0, 0)
                .single()
                .expect("valid reference instant"),
        )
    }
}

impl Clock for FrozenClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}
