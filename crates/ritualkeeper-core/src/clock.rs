//! Clock collaborator. Injected so tests can fix "today".

use chrono::{DateTime, Local, NaiveDate, Utc};

pub trait Clock {
    /// The current calendar day in the account's local timezone.
    fn today(&self) -> NaiveDate;

    /// Milliseconds since the Unix epoch; used for buff expiry.
    fn now_ms(&self) -> i64;

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Wall-clock implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Pinned clock for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub today: NaiveDate,
    pub now_ms: i64,
}

impl FixedClock {
    pub fn on(today: NaiveDate) -> Self {
        Self { today, now_ms: 0 }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn now_ms(&self) -> i64 {
        self.now_ms
    }
}
