//! Release lookup by calendar date.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use shared::domain::MovieRelease;

/// Multimap from release date to releases. Input order is preserved within a date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateIndex {
    by_date: BTreeMap<NaiveDate, Vec<MovieRelease>>,
}

impl DateIndex {
    pub fn build(releases: &[MovieRelease]) -> Self {
        releases.iter().cloned().collect()
    }

    pub fn lookup(&self, date: NaiveDate) -> &[MovieRelease] {
        self.by_date.get(&date).map_or(&[], Vec::as_slice)
    }

    /// Number of distinct dates with at least one release.
    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.by_date.keys().copied()
    }
}

impl FromIterator<MovieRelease> for DateIndex {
    fn from_iter<T: IntoIterator<Item = MovieRelease>>(iter: T) -> Self {
        let mut by_date: BTreeMap<NaiveDate, Vec<MovieRelease>> = BTreeMap::new();
        for release in iter {
            by_date.entry(release.release_date).or_default().push(release);
        }
        Self { by_date }
    }
}

#[cfg(test)]
#[path = "tests/date_index_tests.rs"]
mod tests;
