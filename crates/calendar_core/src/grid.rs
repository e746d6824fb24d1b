//! Month grid construction.
//!
//! A grid is a flat sequence of cells rendered as rows of seven. Padding
//! cells fill the positions before the 1st and after the last day of the
//! month so the length is always a multiple of seven.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{date_index::DateIndex, error::CalendarError};

pub use shared::{
    domain::{days_in_month, YearMonth},
    protocol::CalendarCell,
};

pub const DAYS_PER_WEEK: usize = 7;

/// Weekday shown in the first grid column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("sunday") || value.eq_ignore_ascii_case("sun") {
            Some(Self::Sunday)
        } else if value.eq_ignore_ascii_case("monday") || value.eq_ignore_ascii_case("mon") {
            Some(Self::Monday)
        } else {
            None
        }
    }

    pub fn first_weekday(self) -> Weekday {
        match self {
            Self::Sunday => Weekday::Sun,
            Self::Monday => Weekday::Mon,
        }
    }

    /// Column of `weekday` in a grid starting on this day.
    pub fn column(self, weekday: Weekday) -> usize {
        let column = match self {
            Self::Sunday => weekday.num_days_from_sunday(),
            Self::Monday => weekday.num_days_from_monday(),
        };
        column as usize
    }
}

/// Builds the grid for `month` (1-12) of `year`.
pub fn build_month_grid(
    year: i32,
    month: u32,
    index: &DateIndex,
    today: NaiveDate,
    selected: Option<NaiveDate>,
    week_start: WeekStart,
) -> Result<Vec<CalendarCell>, CalendarError> {
    let Some(month) = YearMonth::new(year, month) else {
        warn!(year, month, "rejected grid request for invalid month");
        return Err(CalendarError::InvalidMonth { year, month });
    };
    Ok(build_grid(month, index, today, selected, week_start))
}

pub fn build_grid(
    month: YearMonth,
    index: &DateIndex,
    today: NaiveDate,
    selected: Option<NaiveDate>,
    week_start: WeekStart,
) -> Vec<CalendarCell> {
    let first_day = month.first_day();
    let leading = week_start.column(first_day.weekday());
    let days = month.days() as usize;
    let total = (leading + days).div_ceil(DAYS_PER_WEEK) * DAYS_PER_WEEK;

    let mut cells = Vec::with_capacity(total);
    cells.extend(std::iter::repeat_with(CalendarCell::padding).take(leading));
    cells.extend(first_day.iter_days().take(days).map(|date| CalendarCell {
        date: Some(date),
        releases: index.lookup(date).to_vec(),
        is_today: date == today,
        is_selected: selected == Some(date),
    }));
    cells.resize_with(total, CalendarCell::padding);
    cells
}

/// Splits a grid into week rows.
pub fn rows(cells: &[CalendarCell]) -> impl Iterator<Item = &[CalendarCell]> {
    cells.chunks(DAYS_PER_WEEK)
}

#[cfg(test)]
#[path = "tests/grid_tests.rs"]
mod tests;
