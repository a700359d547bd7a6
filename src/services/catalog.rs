use std::collections::{BTreeMap, BTreeSet};

use crate::models::{Movie, MovieId};

/// Immutable movie catalog, ordered by movie id
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: BTreeMap<MovieId, Movie>,
}

impl Catalog {
    /// Builds a catalog; a repeated movie id keeps the last record
    pub fn new(movies: Vec<Movie>) -> Self {
        let mut by_id = BTreeMap::new();
        for movie in movies {
            if let Some(previous) = by_id.insert(movie.movie_id, movie) {
                tracing::warn!(movie_id = previous.movie_id, "Duplicate movie id in catalog");
            }
        }
        Self { movies: by_id }
    }

    pub fn get(&self, movie_id: MovieId) -> Option<&Movie> {
        self.movies.get(&movie_id)
    }

    /// Movies in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &Movie> {
        self.movies.values()
    }

    /// Distinct genre tags across the catalog, sorted
    pub fn genres(&self) -> Vec<String> {
        self.movies
            .values()
            .flat_map(|m| m.genres.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
