use std::time::Instant;

use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    models::{MovieSummary, UserId},
};

use super::{
    filters, Catalog, ColumnKeying, ItemSimilarity, Popularity, RatingStore, Recommender,
    UserItemMatrix,
};

/// Dataset size figures reported by the stats endpoint
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EngineStats {
    pub users: usize,
    pub items: usize,
    pub movies: usize,
    pub ratings: usize,
    pub genres: usize,
    pub column_keying: ColumnKeying,
}

/// Movie recommendation engine
///
/// Built once from an immutable catalog and rating snapshot. The matrix and
/// similarity structure are derived at construction and only read afterwards,
/// so a single engine can be shared across requests behind an `Arc`.
#[derive(Debug)]
pub struct RecommendationEngine {
    catalog: Catalog,
    ratings: RatingStore,
    matrix: UserItemMatrix,
    similarity: ItemSimilarity,
    popularity: Popularity,
}

impl RecommendationEngine {
    pub fn new(catalog: Catalog, ratings: RatingStore, keying: ColumnKeying) -> Self {
        let start = Instant::now();

        let matrix = UserItemMatrix::build(&ratings, &catalog, keying);
        let similarity = ItemSimilarity::compute(&matrix);
        let popularity = Popularity::from_ratings(&ratings, &catalog);

        tracing::info!(
            users = matrix.user_count(),
            items = matrix.column_count(),
            movies = catalog.len(),
            ratings = ratings.len(),
            processing_time_ms = start.elapsed().as_millis(),
            "Recommendation engine ready"
        );

        Self {
            catalog,
            ratings,
            matrix,
            similarity,
            popularity,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn matrix(&self) -> &UserItemMatrix {
        &self.matrix
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            users: self.matrix.user_count(),
            items: self.matrix.column_count(),
            movies: self.catalog.len(),
            ratings: self.ratings.len(),
            genres: self.catalog.genres().len(),
            column_keying: self.matrix.keying(),
        }
    }

    /// Distinct genre tags available for genre queries
    pub fn genres(&self) -> Vec<String> {
        self.catalog.genres()
    }

    /// Cosine similarity between two items, looked up by title
    pub fn similarity(&self, title_a: &str, title_b: &str) -> AppResult<f64> {
        let a = self.column(title_a)?;
        let b = self.column(title_b)?;
        Ok(self.similarity.similarity(a, b))
    }

    /// Titles of the `n` items most similar to `title`, excluding itself
    pub fn get_similar_items(&self, title: &str, n: usize) -> AppResult<Vec<String>> {
        let col = self.column(title)?;
        Ok(self
            .similarity
            .similar_columns(col, n)
            .into_iter()
            .map(|(c, _)| self.matrix.column_label(c).to_string())
            .collect())
    }

    /// Titles recommended to a user through item-item collaborative filtering
    ///
    /// Users with no ratings, known or not, get an empty list.
    pub fn recommend_movies(&self, user_id: UserId, n: usize) -> Vec<String> {
        Recommender::new(&self.matrix, &self.similarity)
            .recommend(user_id, n)
            .into_iter()
            .map(|item| self.matrix.column_label(item.column).to_string())
            .collect()
    }

    pub fn recommend_movies_by_genres(&self, genres: &[String], n: usize) -> Vec<MovieSummary> {
        filters::by_genres(&self.catalog, genres, n)
    }

    pub fn recommend_movies_by_release_year(&self, year: i32, n: usize) -> Vec<MovieSummary> {
        filters::by_release_year(&self.catalog, &self.popularity, year, n)
    }

    pub fn recommend_movies_by_release_decade(&self, decade: i32, n: usize) -> Vec<MovieSummary> {
        filters::by_release_decade(&self.catalog, &self.popularity, decade, n)
    }

    fn column(&self, title: &str) -> AppResult<usize> {
        self.matrix
            .column_for_title(title)
            .ok_or_else(|| AppError::ItemNotFound(title.to_string()))
    }
}
