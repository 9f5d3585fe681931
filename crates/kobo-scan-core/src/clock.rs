//! Source of the reference date used for age calculation.

use chrono::{Local, NaiveDate};

/// Supplies "today" to the pipeline.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Device local date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A fixed date, for tests and replays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
