// File: ./src/clock.rs
/*! Clock sources for "today" and "now".

The engines never read the system clock directly. Hosts hand them a
`Clock` so today-highlighting and default initialisation stay
deterministic under test:

- `SystemClock`: local wall-clock time via `chrono::Local`.
- `FixedClock`: a frozen date and time, used by tests and replays.
*/

use chrono::{Local, NaiveDate, NaiveTime, Timelike};

/// Supplies the current date and time of day.
pub trait Clock: std::fmt::Debug {
    fn today(&self) -> NaiveDate;
    fn now(&self) -> NaiveTime;
}

// --- Production Implementation ---

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> NaiveTime {
        let now = Local::now().time();
        // Sub-second precision never reaches the text buffer.
        now.with_nanosecond(0).unwrap_or(now)
    }
}

// --- Test Implementation ---

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl FixedClock {
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self { date, time }
    }

    /// A clock frozen at midnight of `date`.
    pub fn on(date: NaiveDate) -> Self {
        Self {
            date,
            time: NaiveTime::MIN,
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date
    }

    fn now(&self) -> NaiveTime {
        self.time
    }
}
