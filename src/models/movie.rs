use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Identifier of a movie in the catalog
pub type MovieId = u32;

/// Separator between genre tags in the raw `genres` column
pub const GENRE_SEPARATOR: &str = "|";

static RELEASE_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\((\d{4})\)$").expect("release year pattern is valid")
});

/// A movie in the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub movie_id: MovieId,
    /// Display title, usually ending in "(YYYY)"
    pub title: String,
    /// Genre tags, in the order they appear in the source record
    pub genres: Vec<String>,
    /// Release year parsed from the title, if present
    pub release_year: Option<i32>,
}

impl Movie {
    /// Creates a movie from its raw catalog fields
    ///
    /// `genres` is the pipe-delimited tag list (e.g. `"Action|Comedy"`).
    pub fn new(movie_id: MovieId, title: String, genres: &str) -> Self {
        let release_year = extract_release_year(&title);
        Self {
            movie_id,
            title,
            genres: split_genres(genres),
            release_year,
        }
    }

    /// Whether the movie carries the given tag
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }

    /// Genre tags joined back into their pipe-delimited form
    pub fn genre_string(&self) -> String {
        self.genres.join(GENRE_SEPARATOR)
    }
}

/// Extracts the release year from a trailing `(YYYY)` in a title
pub fn extract_release_year(title: &str) -> Option<i32> {
    RELEASE_YEAR
        .captures(title.trim_end())
        .and_then(|caps| caps.get(1))
        .and_then(|year| year.as_str().parse().ok())
}

fn split_genres(raw: &str) -> Vec<String> {
    let mut genres: Vec<String> = Vec::new();
    for tag in raw.split(GENRE_SEPARATOR).map(str::trim) {
        if !tag.is_empty() && !genres.iter().any(|g| g == tag) {
            genres.push(tag.to_string());
        }
    }
    genres
}

/// Movie record handed to the presentation layer by the filter queries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub movie_id: MovieId,
    pub title: String,
    /// Pipe-delimited genre tags
    pub genres: String,
}

impl From<&Movie> for MovieSummary {
    fn from(movie: &Movie) -> Self {
        Self {
            movie_id: movie.movie_id,
            title: movie.title.clone(),
            genres: movie.genre_string(),
        }
    }
}
