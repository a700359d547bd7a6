use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{
    error::AppResult,
    models::{Movie, MovieId, Rating, UserId},
    services::{Catalog, RatingStore},
};

/// Row of the ratings CSV (`userId,movieId,rating`, extra columns ignored)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RatingRecord {
    user_id: UserId,
    movie_id: MovieId,
    rating: f64,
}

/// Row of the movies CSV (`movieId,title,genres`)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MovieRecord {
    movie_id: MovieId,
    title: String,
    #[serde(default)]
    genres: Option<String>,
}

/// Loads the ratings CSV from disk
pub fn load_ratings<P: AsRef<Path>>(path: P) -> AppResult<RatingStore> {
    tracing::info!(path = ?path.as_ref(), "Loading ratings");
    let file = File::open(path)?;
    read_ratings(file)
}

/// Loads the movies CSV from disk
pub fn load_movies<P: AsRef<Path>>(path: P) -> AppResult<Catalog> {
    tracing::info!(path = ?path.as_ref(), "Loading movies");
    let file = File::open(path)?;
    read_movies(file)
}

/// Parses ratings from any CSV source with a header row
pub fn read_ratings<R: Read>(source: R) -> AppResult<RatingStore> {
    let mut reader = csv::Reader::from_reader(source);
    let mut ratings = Vec::new();

    for result in reader.deserialize() {
        let record: RatingRecord = result?;
        ratings.push(Rating::new(record.user_id, record.movie_id, record.rating));
    }

    let store = RatingStore::new(ratings);
    tracing::info!(
        ratings = store.len(),
        users = store.user_count(),
        "Ratings loaded"
    );
    Ok(store)
}

/// Parses the movie catalog from any CSV source with a header row
pub fn read_movies<R: Read>(source: R) -> AppResult<Catalog> {
    let mut reader = csv::Reader::from_reader(source);
    let mut movies = Vec::new();

    for result in reader.deserialize() {
        let record: MovieRecord = result?;
        let genres = record.genres.unwrap_or_default();
        movies.push(Movie::new(record.movie_id, record.title, &genres));
    }

    let catalog = Catalog::new(movies);
    let undated = catalog.iter().filter(|m| m.release_year.is_none()).count();
    if undated > 0 {
        tracing::debug!(undated, "Movies without a release year in the title");
    }
    tracing::info!(movies = catalog.len(), "Movies loaded");
    Ok(catalog)
}
