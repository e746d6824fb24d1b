//! Release filtering: AND across dimensions, OR within a dimension.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use shared::domain::{FilterOptions, MovieRelease, TagDimension};

const TAG_DIMENSIONS: [TagDimension; 3] = [
    TagDimension::Language,
    TagDimension::Genre,
    TagDimension::Country,
];

pub fn matches(release: &MovieRelease, filters: &FilterOptions) -> bool {
    filters.release_type.accepts(release.release_type)
        && TAG_DIMENSIONS.iter().all(|&dimension| {
            let selected = filters.tags(dimension);
            selected.is_empty() || !selected.is_disjoint(release.tags(dimension))
        })
}

/// Order-preserving filter.
pub fn apply(releases: &[MovieRelease], filters: &FilterOptions) -> Vec<MovieRelease> {
    if filters.is_unrestricted() {
        return releases.to_vec();
    }
    releases
        .iter()
        .filter(|release| matches(release, filters))
        .cloned()
        .collect()
}

/// Distinct tag values present in a release set, offered by the filter panel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterFacets {
    pub languages: BTreeSet<String>,
    pub genres: BTreeSet<String>,
    pub countries: BTreeSet<String>,
}

impl FilterFacets {
    pub fn from_releases<'a>(releases: impl IntoIterator<Item = &'a MovieRelease>) -> Self {
        let mut facets = Self::default();
        for release in releases {
            facets.languages.extend(release.languages.iter().cloned());
            facets.genres.extend(release.genres.iter().cloned());
            facets.countries.extend(release.countries.iter().cloned());
        }
        facets
    }

    pub fn values(&self, dimension: TagDimension) -> &BTreeSet<String> {
        match dimension {
            TagDimension::Language => &self.languages,
            TagDimension::Genre => &self.genres,
            TagDimension::Country => &self.countries,
        }
    }
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
