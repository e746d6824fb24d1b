//! Movie release calendar: month grids, release filtering, date selection and
//! per-movie notification flags over an injected release repository.

use chrono::NaiveDate;

pub mod controller;
pub mod date_index;
pub mod error;
pub mod filter;
pub mod format;
pub mod grid;
pub mod notification;

pub use controller::{CalendarController, CalendarEvent, CalendarState, LoadState};
pub use date_index::DateIndex;
pub use error::CalendarError;
pub use filter::FilterFacets;
pub use grid::{build_month_grid, CalendarCell, WeekStart};
pub use notification::{NotificationSync, NotificationToggles, Subscription};

/// Source of "today" for grid decoration and the today action.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
