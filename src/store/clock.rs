use chrono::{NaiveDate, Utc};

/// Source of "today" for date-relative queries such as upcoming events.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    /// Today as an ISO date string, comparable with record dates.
    fn today_iso(&self) -> String {
        self.today().format("%Y-%m-%d").to_string()
    }
}

/// The real calendar date (UTC).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
