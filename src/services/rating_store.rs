use std::collections::BTreeMap;

use crate::models::{MovieId, Rating, UserId};

/// Immutable collection of raw rating observations
///
/// Ratings are kept in input order; the per-user and per-movie indexes hold
/// positions into that list.
#[derive(Debug, Clone, Default)]
pub struct RatingStore {
    ratings: Vec<Rating>,
    by_user: BTreeMap<UserId, Vec<usize>>,
    by_movie: BTreeMap<MovieId, Vec<usize>>,
}

impl RatingStore {
    /// Builds the store and its lookup indexes
    pub fn new(ratings: Vec<Rating>) -> Self {
        let mut by_user: BTreeMap<UserId, Vec<usize>> = BTreeMap::new();
        let mut by_movie: BTreeMap<MovieId, Vec<usize>> = BTreeMap::new();

        for (idx, rating) in ratings.iter().enumerate() {
            by_user.entry(rating.user_id).or_default().push(idx);
            by_movie.entry(rating.movie_id).or_default().push(idx);
        }

        Self {
            ratings,
            by_user,
            by_movie,
        }
    }

    /// All ratings in input order
    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    /// Ratings given by a user; empty for unknown users
    pub fn ratings_for_user(&self, user_id: UserId) -> Vec<&Rating> {
        self.lookup(self.by_user.get(&user_id))
    }

    /// Ratings received by a movie; empty for unrated movies
    pub fn ratings_for_movie(&self, movie_id: MovieId) -> Vec<&Rating> {
        self.lookup(self.by_movie.get(&movie_id))
    }

    pub fn is_rated(&self, movie_id: MovieId) -> bool {
        self.by_movie.contains_key(&movie_id)
    }

    /// Mean rating of a movie, `None` when nobody rated it
    pub fn average_rating(&self, movie_id: MovieId) -> Option<f64> {
        let positions = self.by_movie.get(&movie_id)?;
        let total: f64 = positions.iter().map(|&i| self.ratings[i].value).sum();
        Some(total / positions.len() as f64)
    }

    /// Distinct user ids, ascending
    pub fn user_ids(&self) -> impl Iterator<Item = UserId> + '_ {
        self.by_user.keys().copied()
    }

    pub fn user_count(&self) -> usize {
        self.by_user.len()
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    fn lookup(&self, positions: Option<&Vec<usize>>) -> Vec<&Rating> {
        positions
            .map(|p| p.iter().map(|&i| &self.ratings[i]).collect())
            .unwrap_or_default()
    }
}
