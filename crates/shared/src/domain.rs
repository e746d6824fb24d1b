use std::collections::BTreeSet;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(ReleaseId);
id_newtype!(MovieId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseType {
    Theatrical,
    Ott,
}

/// One title's appearance on a specific date through one distribution channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRelease {
    pub id: ReleaseId,
    pub movie_id: MovieId,
    pub title: String,
    pub release_date: NaiveDate,
    pub release_type: ReleaseType,
    #[serde(default)]
    pub languages: BTreeSet<String>,
    #[serde(default)]
    pub genres: BTreeSet<String>,
    #[serde(default)]
    pub countries: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseTypeFilter {
    #[default]
    All,
    Theatrical,
    Ott,
}

impl ReleaseTypeFilter {
    pub fn accepts(self, release_type: ReleaseType) -> bool {
        match self {
            Self::All => true,
            Self::Theatrical => release_type == ReleaseType::Theatrical,
            Self::Ott => release_type == ReleaseType::Ott,
        }
    }
}

impl From<ReleaseType> for ReleaseTypeFilter {
    fn from(value: ReleaseType) -> Self {
        match value {
            ReleaseType::Theatrical => Self::Theatrical,
            ReleaseType::Ott => Self::Ott,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagDimension {
    Language,
    Genre,
    Country,
}

/// Filter selection. An empty tag set places no restriction on its dimension.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterOptions {
    #[serde(default)]
    pub release_type: ReleaseTypeFilter,
    #[serde(default)]
    pub languages: BTreeSet<String>,
    #[serde(default)]
    pub genres: BTreeSet<String>,
    #[serde(default)]
    pub countries: BTreeSet<String>,
}

impl FilterOptions {
    pub fn is_unrestricted(&self) -> bool {
        !self.has_active_filters()
    }

    pub fn has_active_filters(&self) -> bool {
        self.release_type != ReleaseTypeFilter::All
            || !self.languages.is_empty()
            || !self.genres.is_empty()
            || !self.countries.is_empty()
    }

    /// Badge count shown next to the filter panel header.
    pub fn active_filter_count(&self) -> usize {
        let type_count = usize::from(self.release_type != ReleaseTypeFilter::All);
        self.languages.len() + self.genres.len() + self.countries.len() + type_count
    }

    pub fn tags(&self, dimension: TagDimension) -> &BTreeSet<String> {
        match dimension {
            TagDimension::Language => &self.languages,
            TagDimension::Genre => &self.genres,
            TagDimension::Country => &self.countries,
        }
    }

    fn tags_mut(&mut self, dimension: TagDimension) -> &mut BTreeSet<String> {
        match dimension {
            TagDimension::Language => &mut self.languages,
            TagDimension::Genre => &mut self.genres,
            TagDimension::Country => &mut self.countries,
        }
    }

    /// Adds `value` to the dimension if absent, removes it otherwise.
    /// Returns whether the value is selected afterwards.
    pub fn toggle_tag(&mut self, dimension: TagDimension, value: impl Into<String>) -> bool {
        let value = value.into();
        let tags = self.tags_mut(dimension);
        if tags.remove(&value) {
            false
        } else {
            tags.insert(value);
            true
        }
    }
}

impl MovieRelease {
    pub fn tags(&self, dimension: TagDimension) -> &BTreeSet<String> {
        match dimension {
            TagDimension::Language => &self.languages,
            TagDimension::Genre => &self.genres,
            TagDimension::Country => &self.countries,
        }
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`, or `None` for an out-of-range month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 if is_leap_year(year) => Some(29),
        2 => Some(28),
        _ => None,
    }
}

/// A calendar month, stored as its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "YearMonthRepr", into = "YearMonthRepr")]
pub struct YearMonth(NaiveDate);

#[derive(Serialize, Deserialize)]
struct YearMonthRepr {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Returns `None` when `month` is outside 1-12 or the year is not representable.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    pub fn of(date: NaiveDate) -> Self {
        Self(date - Days::new(u64::from(date.day0())))
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn days(self) -> u32 {
        days_in_month(self.year(), self.month()).unwrap_or(31)
    }

    pub fn first_day(self) -> NaiveDate {
        self.0
    }

    pub fn last_day(self) -> NaiveDate {
        self.0
            .checked_add_days(Days::new(u64::from(self.days() - 1)))
            .unwrap_or(self.0)
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Saturates at the earliest representable month.
    pub fn previous(self) -> Self {
        self.0
            .checked_sub_months(Months::new(1))
            .map_or(self, Self)
    }

    /// Saturates at the latest representable month.
    pub fn next(self) -> Self {
        self.0
            .checked_add_months(Months::new(1))
            .map_or(self, Self)
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl TryFrom<YearMonthRepr> for YearMonth {
    type Error = String;

    fn try_from(value: YearMonthRepr) -> Result<Self, Self::Error> {
        Self::new(value.year, value.month)
            .ok_or_else(|| format!("invalid month {}-{}", value.year, value.month))
    }
}

impl From<YearMonth> for YearMonthRepr {
    fn from(value: YearMonth) -> Self {
        Self {
            year: value.year(),
            month: value.month(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn leap_years_follow_gregorian_rules() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(2023, 13), None);
        assert_eq!(days_in_month(2023, 0), None);
    }

    #[test]
    fn year_month_navigation_wraps_years() {
        let january = YearMonth::new(2024, 1).expect("month");
        assert_eq!(january.previous(), YearMonth::new(2023, 12).expect("month"));
        let december = YearMonth::new(2023, 12).expect("month");
        assert_eq!(december.next(), january);
    }

    #[test]
    fn year_month_bounds() {
        let february = YearMonth::of(date(2024, 2, 17));
        assert_eq!(february.first_day(), date(2024, 2, 1));
        assert_eq!(february.last_day(), date(2024, 2, 29));
        assert!(february.contains(date(2024, 2, 29)));
        assert!(!february.contains(date(2024, 3, 1)));
        assert!(!february.contains(date(2023, 2, 1)));
    }

    #[test]
    fn year_month_rejects_invalid_month_on_deserialize() {
        let parsed: YearMonth =
            serde_json::from_str(r#"{"year":2024,"month":2}"#).expect("valid month");
        assert_eq!(parsed.to_string(), "2024-02");
        assert!(serde_json::from_str::<YearMonth>(r#"{"year":2024,"month":13}"#).is_err());
    }

    #[test]
    fn toggling_a_tag_twice_restores_the_selection() {
        let mut filters = FilterOptions::default();
        assert!(filters.toggle_tag(TagDimension::Genre, "Drama"));
        assert_eq!(filters.active_filter_count(), 1);
        assert!(!filters.toggle_tag(TagDimension::Genre, "Drama"));
        assert!(filters.is_unrestricted());
    }

    #[test]
    fn active_filter_count_includes_release_type() {
        let mut filters = FilterOptions {
            release_type: ReleaseTypeFilter::Ott,
            ..FilterOptions::default()
        };
        filters.toggle_tag(TagDimension::Language, "Hindi");
        filters.toggle_tag(TagDimension::Country, "India");
        assert!(filters.has_active_filters());
        assert_eq!(filters.active_filter_count(), 3);
    }

    #[test]
    fn release_deserializes_with_missing_tag_sets() {
        let release: MovieRelease = serde_json::from_str(
            r#"{"id":"r1","movie_id":"m1","title":"Dune","release_date":"2024-05-01","release_type":"theatrical"}"#,
        )
        .expect("release");
        assert_eq!(release.release_type, ReleaseType::Theatrical);
        assert!(release.languages.is_empty());
        assert_eq!(release.platform_name, None);
    }
}
