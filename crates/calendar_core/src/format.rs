use chrono::NaiveDate;
use shared::domain::{ReleaseType, YearMonth};

use crate::grid::WeekStart;

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// "February 2024"
pub fn month_title(month: YearMonth) -> String {
    month.first_day().format("%B %Y").to_string()
}

/// "May 1, 2024"
pub fn format_release_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

pub fn weekday_labels(week_start: WeekStart) -> [&'static str; 7] {
    let mut labels = WEEKDAY_LABELS;
    labels.rotate_left(week_start.first_weekday().num_days_from_sunday() as usize);
    labels
}

pub fn release_badge(release_type: ReleaseType) -> &'static str {
    match release_type {
        ReleaseType::Theatrical => "Theater",
        ReleaseType::Ott => "OTT",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_titles_and_dates() {
        let month = YearMonth::new(2024, 2).expect("month");
        assert_eq!(month_title(month), "February 2024");
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).expect("date");
        assert_eq!(format_release_date(date), "May 1, 2024");
    }

    #[test]
    fn weekday_labels_follow_week_start() {
        assert_eq!(weekday_labels(WeekStart::Sunday)[0], "Sun");
        assert_eq!(
            weekday_labels(WeekStart::Monday),
            ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
        );
    }

    #[test]
    fn badges() {
        assert_eq!(release_badge(ReleaseType::Theatrical), "Theater");
        assert_eq!(release_badge(ReleaseType::Ott), "OTT");
    }
}
