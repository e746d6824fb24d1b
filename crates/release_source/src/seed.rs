use chrono::NaiveDate;
use shared::domain::{MovieId, MovieRelease, ReleaseId, ReleaseType};

struct SeedRelease {
    movie_id: &'static str,
    title: &'static str,
    date: (i32, u32, u32),
    release_type: ReleaseType,
    languages: &'static [&'static str],
    genres: &'static [&'static str],
    country: &'static str,
    platform: Option<&'static str>,
    poster: &'static str,
    score: f32,
}

const SEED_RELEASES: &[SeedRelease] = &[
    SeedRelease {
        movie_id: "movie1",
        title: "Dune: Part Two",
        date: (2024, 5, 1),
        release_type: ReleaseType::Theatrical,
        languages: &["English"],
        genres: &["Sci-Fi", "Adventure"],
        country: "USA",
        platform: None,
        poster: "/dune-part-two-poster.png",
        score: 9.1,
    },
    SeedRelease {
        movie_id: "movie2",
        title: "Challengers",
        date: (2024, 5, 3),
        release_type: ReleaseType::Theatrical,
        languages: &["English"],
        genres: &["Drama", "Sport"],
        country: "USA",
        platform: None,
        poster: "/challengers-poster.png",
        score: 8.7,
    },
    SeedRelease {
        movie_id: "movie3",
        title: "The Fall Guy",
        date: (2024, 5, 3),
        release_type: ReleaseType::Theatrical,
        languages: &["English"],
        genres: &["Action", "Comedy"],
        country: "USA",
        platform: None,
        poster: "/action-movie-poster.png",
        score: 7.9,
    },
    SeedRelease {
        movie_id: "movie4",
        title: "Kingdom of the Planet of the Apes",
        date: (2024, 5, 10),
        release_type: ReleaseType::Theatrical,
        languages: &["English"],
        genres: &["Sci-Fi", "Action"],
        country: "USA",
        platform: None,
        poster: "/sci-fi-movie-poster.png",
        score: 8.3,
    },
    SeedRelease {
        movie_id: "movie5",
        title: "IF",
        date: (2024, 5, 17),
        release_type: ReleaseType::Theatrical,
        languages: &["English"],
        genres: &["Comedy", "Family"],
        country: "USA",
        platform: None,
        poster: "/family-movie-poster.png",
        score: 7.5,
    },
    SeedRelease {
        movie_id: "movie6",
        title: "Furiosa: A Mad Max Saga",
        date: (2024, 5, 24),
        release_type: ReleaseType::Theatrical,
        languages: &["English"],
        genres: &["Action", "Adventure"],
        country: "Australia",
        platform: None,
        poster: "/action-movie-poster.png",
        score: 8.8,
    },
    SeedRelease {
        movie_id: "movie7",
        title: "The Garfield Movie",
        date: (2024, 5, 24),
        release_type: ReleaseType::Theatrical,
        languages: &["English"],
        genres: &["Animation", "Comedy"],
        country: "USA",
        platform: None,
        poster: "/animated-movie-poster.png",
        score: 7.2,
    },
    SeedRelease {
        movie_id: "movie8",
        title: "Bridgerton Season 3",
        date: (2024, 5, 16),
        release_type: ReleaseType::Ott,
        languages: &["English"],
        genres: &["Drama", "Romance"],
        country: "UK",
        platform: Some("Netflix"),
        poster: "/period-drama-poster.png",
        score: 8.5,
    },
    SeedRelease {
        movie_id: "movie9",
        title: "The Idea of You",
        date: (2024, 5, 2),
        release_type: ReleaseType::Ott,
        languages: &["English"],
        genres: &["Romance", "Drama"],
        country: "USA",
        platform: Some("Prime Video"),
        poster: "/romance-movie-poster.png",
        score: 7.8,
    },
    SeedRelease {
        movie_id: "movie10",
        title: "Gangs of Godavari",
        date: (2024, 5, 31),
        release_type: ReleaseType::Theatrical,
        languages: &["Telugu"],
        genres: &["Action", "Crime"],
        country: "India",
        platform: None,
        poster: "/placeholder-ffhh8.png",
        score: 8.1,
    },
    SeedRelease {
        movie_id: "movie11",
        title: "Mr. & Mrs. Mahi",
        date: (2024, 5, 31),
        release_type: ReleaseType::Theatrical,
        languages: &["Hindi"],
        genres: &["Drama", "Sport"],
        country: "India",
        platform: None,
        poster: "/bollywood-movie-poster.png",
        score: 7.6,
    },
    SeedRelease {
        movie_id: "movie12",
        title: "Citadel: Honey Bunny",
        date: (2024, 5, 10),
        release_type: ReleaseType::Ott,
        languages: &["Hindi", "English"],
        genres: &["Action", "Thriller"],
        country: "India",
        platform: Some("Prime Video"),
        poster: "/spy-thriller-poster.png",
        score: 8.2,
    },
];

/// Demo catalog for May 2024, used when no release file is configured.
pub fn seed_catalog() -> Vec<MovieRelease> {
    SEED_RELEASES
        .iter()
        .filter_map(|seed| {
            let (year, month, day) = seed.date;
            let release_date = NaiveDate::from_ymd_opt(year, month, day)?;
            Some(MovieRelease {
                id: ReleaseId::new(format!("{}-{}", seed.movie_id, release_date)),
                movie_id: MovieId::new(seed.movie_id),
                title: seed.title.to_string(),
                release_date,
                release_type: seed.release_type,
                languages: seed.languages.iter().map(ToString::to_string).collect(),
                genres: seed.genres.iter().map(ToString::to_string).collect(),
                countries: std::iter::once(seed.country.to_string()).collect(),
                platform_name: seed.platform.map(ToString::to_string),
                poster_url: Some(seed.poster.to_string()),
                score: Some(seed.score),
            })
        })
        .collect()
}
