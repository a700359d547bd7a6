use std::collections::HashMap;

use crate::models::UserId;

use super::{ItemSimilarity, UserItemMatrix};

/// A candidate item with its accumulated recommendation score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredItem {
    pub column: usize,
    pub score: f64,
}

/// Item-item collaborative filtering scorer for a single user
pub struct Recommender<'a> {
    matrix: &'a UserItemMatrix,
    similarity: &'a ItemSimilarity,
}

impl<'a> Recommender<'a> {
    pub fn new(matrix: &'a UserItemMatrix, similarity: &'a ItemSimilarity) -> Self {
        Self { matrix, similarity }
    }

    /// Ranks unseen items for a user
    ///
    /// For every item the user rated, its `n` most similar items are looked
    /// up; those the user has not rated collect `rating * similarity` into
    /// their score, summed across all rated items that reach them. Items only
    /// reachable through a zero similarity never become candidates.
    ///
    /// Returns at most `n` items, score descending, ties by column ascending.
    /// Users without ratings (including unknown users) get an empty list.
    pub fn recommend(&self, user_id: UserId, n: usize) -> Vec<ScoredItem> {
        let rated = self.matrix.user_ratings(user_id);
        if rated.is_empty() || n == 0 {
            return Vec::new();
        }

        let already_rated = |col: usize| rated.binary_search_by_key(&col, |&(c, _)| c).is_ok();

        let mut scores: HashMap<usize, f64> = HashMap::new();
        for &(col, rating) in rated {
            for (candidate, similarity) in self.similarity.nonzero_similar_columns(col, n) {
                if already_rated(candidate) {
                    continue;
                }
                *scores.entry(candidate).or_insert(0.0) += rating * similarity;
            }
        }

        let mut ranked: Vec<ScoredItem> = scores
            .into_iter()
            .map(|(column, score)| ScoredItem { column, score })
            .collect();
        ranked.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.column.cmp(&b.column))
        });
        ranked.truncate(n);

        tracing::debug!(
            user_id,
            rated = rated.len(),
            returned = ranked.len(),
            "Scored recommendations"
        );

        ranked
    }
}
