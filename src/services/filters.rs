use std::collections::{BTreeSet, HashMap};
use std::ops::RangeInclusive;

use crate::models::{Movie, MovieId, MovieSummary};

use super::{Catalog, RatingStore};

/// Average rating per movie, used to rank release-year queries
#[derive(Debug, Clone, Default)]
pub struct Popularity {
    average: HashMap<MovieId, f64>,
}

impl Popularity {
    pub fn from_ratings(ratings: &RatingStore, catalog: &Catalog) -> Self {
        let average = catalog
            .iter()
            .filter_map(|m| ratings.average_rating(m.movie_id).map(|avg| (m.movie_id, avg)))
            .collect();
        Self { average }
    }

    pub fn average_rating(&self, movie_id: MovieId) -> Option<f64> {
        self.average.get(&movie_id).copied()
    }
}

/// Movies tagged with at least one requested genre
///
/// Ranked by how many requested genres a movie carries, then by movie id.
/// Genre names match exactly; an empty request matches nothing.
pub fn by_genres(catalog: &Catalog, genres: &[String], n: usize) -> Vec<MovieSummary> {
    let wanted: BTreeSet<&str> = genres
        .iter()
        .map(|g| g.trim())
        .filter(|g| !g.is_empty())
        .collect();
    if wanted.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<(usize, &Movie)> = catalog
        .iter()
        .map(|movie| {
            let count = wanted.iter().filter(|g| movie.has_genre(g)).count();
            (count, movie)
        })
        .filter(|&(count, _)| count > 0)
        .collect();

    // catalog iteration is already in movie id order, and the sort is stable
    matches.sort_by(|a, b| b.0.cmp(&a.0));

    matches
        .into_iter()
        .take(n)
        .map(|(_, movie)| MovieSummary::from(movie))
        .collect()
}

/// Movies released in exactly `year`, most popular first
pub fn by_release_year(
    catalog: &Catalog,
    popularity: &Popularity,
    year: i32,
    n: usize,
) -> Vec<MovieSummary> {
    by_release_years(catalog, popularity, year..=year, n)
}

/// Movies released in `[decade, decade + 9]`, most popular first
pub fn by_release_decade(
    catalog: &Catalog,
    popularity: &Popularity,
    decade: i32,
    n: usize,
) -> Vec<MovieSummary> {
    by_release_years(catalog, popularity, decade..=decade.saturating_add(9), n)
}

/// Movies whose title year falls in `years`
///
/// Movies without a parseable year never match. Ranking is by average rating
/// descending with unrated movies last, then by movie id.
pub fn by_release_years(
    catalog: &Catalog,
    popularity: &Popularity,
    years: RangeInclusive<i32>,
    n: usize,
) -> Vec<MovieSummary> {
    let mut matches: Vec<(Option<f64>, &Movie)> = catalog
        .iter()
        .filter(|m| m.release_year.is_some_and(|y| years.contains(&y)))
        .map(|m| (popularity.average_rating(m.movie_id), m))
        .collect();

    matches.sort_by(|a, b| match (a.0, b.0) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    matches
        .into_iter()
        .take(n)
        .map(|(_, movie)| MovieSummary::from(movie))
        .collect()
}
