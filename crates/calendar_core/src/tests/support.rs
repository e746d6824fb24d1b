use chrono::NaiveDate;
use shared::domain::{MovieId, MovieRelease, ReleaseId, ReleaseType};

pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(crate) fn release(
    id: &str,
    release_date: NaiveDate,
    release_type: ReleaseType,
    languages: &[&str],
) -> MovieRelease {
    MovieRelease {
        id: ReleaseId::new(id),
        movie_id: MovieId::new(format!("movie-{id}")),
        title: format!("Title {id}"),
        release_date,
        release_type,
        languages: languages.iter().map(ToString::to_string).collect(),
        genres: Default::default(),
        countries: Default::default(),
        platform_name: (release_type == ReleaseType::Ott).then(|| "Netflix".to_string()),
        poster_url: None,
        score: None,
    }
}

pub(crate) fn with_tags(mut release: MovieRelease, genres: &[&str], countries: &[&str]) -> MovieRelease {
    release.genres = genres.iter().map(ToString::to_string).collect();
    release.countries = countries.iter().map(ToString::to_string).collect();
    release
}

/// The February 2024 mixed-release scenario.
pub(crate) fn february_releases() -> Vec<MovieRelease> {
    vec![
        release("1", date(2024, 2, 10), ReleaseType::Theatrical, &["en"]),
        release("2", date(2024, 2, 10), ReleaseType::Ott, &["hi"]),
        release("3", date(2024, 2, 29), ReleaseType::Theatrical, &["en"]),
    ]
}

pub(crate) fn ids(releases: &[MovieRelease]) -> Vec<&str> {
    releases.iter().map(|release| release.id.as_str()).collect()
}
