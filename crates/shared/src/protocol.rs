use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{FilterOptions, MovieRelease, ReleaseTypeFilter, YearMonth};

/// One grid position: a concrete date with its releases, or padding outside the month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarCell {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub releases: Vec<MovieRelease>,
    pub is_today: bool,
    pub is_selected: bool,
}

impl CalendarCell {
    pub fn padding() -> Self {
        Self {
            date: None,
            releases: Vec::new(),
            is_today: false,
            is_selected: false,
        }
    }

    pub fn is_padding(&self) -> bool {
        self.date.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewStatus {
    Loading,
    Ready,
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridView {
    pub month: YearMonth,
    pub cells: Vec<CalendarCell>,
    pub status: ViewStatus,
}

impl GridView {
    pub fn is_loading(&self) -> bool {
        self.status == ViewStatus::Loading
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseListView {
    pub releases: Vec<MovieRelease>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_date: Option<NaiveDate>,
    pub status: ViewStatus,
}

impl ReleaseListView {
    pub fn is_loading(&self) -> bool {
        self.status == ViewStatus::Loading
    }

    /// A successful load that produced nothing to show, as opposed to
    /// a pending or failed one.
    pub fn is_empty_result(&self) -> bool {
        self.status == ViewStatus::Ready && self.releases.is_empty()
    }
}

/// Partial filter update emitted by the filter panel. `None` leaves a field unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_type: Option<ReleaseTypeFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub countries: Option<BTreeSet<String>>,
}

impl FilterPatch {
    pub fn release_type(release_type: ReleaseTypeFilter) -> Self {
        Self {
            release_type: Some(release_type),
            ..Self::default()
        }
    }

    pub fn languages<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            languages: Some(languages.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.release_type.is_none()
            && self.languages.is_none()
            && self.genres.is_none()
            && self.countries.is_none()
    }
}

impl FilterOptions {
    pub fn apply_patch(&mut self, patch: FilterPatch) {
        let FilterPatch {
            release_type,
            languages,
            genres,
            countries,
        } = patch;
        if let Some(release_type) = release_type {
            self.release_type = release_type;
        }
        if let Some(languages) = languages {
            self.languages = languages;
        }
        if let Some(genres) = genres {
            self.genres = genres;
        }
        if let Some(countries) = countries {
            self.countries = countries;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_only_touches_present_fields() {
        let mut filters = FilterOptions::default();
        filters.apply_patch(FilterPatch::languages(["English"]));
        filters.apply_patch(FilterPatch::release_type(ReleaseTypeFilter::Ott));

        assert_eq!(filters.release_type, ReleaseTypeFilter::Ott);
        assert!(filters.languages.contains("English"));
        assert!(filters.genres.is_empty());
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut filters = FilterOptions::default();
        filters.apply_patch(FilterPatch::languages(["Hindi"]));
        let before = filters.clone();
        let patch = FilterPatch::default();
        assert!(patch.is_empty());
        filters.apply_patch(patch);
        assert_eq!(filters, before);
    }

    #[test]
    fn empty_result_is_distinct_from_loading_and_failure() {
        let mut view = ReleaseListView {
            releases: Vec::new(),
            selected_date: None,
            status: ViewStatus::Loading,
        };
        assert!(view.is_loading());
        assert!(!view.is_empty_result());

        view.status = ViewStatus::Failed {
            message: "offline".into(),
        };
        assert!(!view.is_loading());
        assert!(!view.is_empty_result());

        view.status = ViewStatus::Ready;
        assert!(view.is_empty_result());
    }

    #[test]
    fn view_status_serializes_with_type_tag() {
        let json = serde_json::to_string(&ViewStatus::Failed {
            message: "timeout".into(),
        })
        .expect("serialize");
        assert_eq!(json, r#"{"type":"failed","message":"timeout"}"#);
    }
}
