use std::cmp::Ordering;
use std::time::Instant;

use super::UserItemMatrix;

/// Symmetric item-item cosine similarity over zero-filled matrix columns
///
/// Only nonzero off-diagonal entries are stored. Each item's neighbours are
/// kept in ranking order: similarity descending, then column ascending.
#[derive(Debug, Clone)]
pub struct ItemSimilarity {
    neighbours: Vec<Vec<(usize, f64)>>,
    rated: Vec<bool>,
}

impl ItemSimilarity {
    /// Computes pairwise cosine similarity for every pair of matrix columns
    ///
    /// Zero-filled vectors only produce nonzero products on users who rated
    /// both items, so dot products are accumulated over co-rating users. Each
    /// rating is divided by its column norm before multiplying, which makes
    /// proportional columns score bit-identically. The result equals the
    /// dense computation on the zero-filled matrix up to rounding.
    pub fn compute(matrix: &UserItemMatrix) -> Self {
        let start = Instant::now();
        let items = matrix.column_count();

        let norms: Vec<f64> = (0..items)
            .map(|col| {
                matrix
                    .column_ratings(col)
                    .iter()
                    .map(|&(_, v)| v * v)
                    .sum::<f64>()
                    .sqrt()
            })
            .collect();

        let mut neighbours: Vec<Vec<(usize, f64)>> = vec![Vec::new(); items];
        let mut dots = vec![0.0_f64; items];
        let mut touched: Vec<usize> = Vec::new();
        let mut seen = vec![false; items];

        for a in 0..items {
            if norms[a] == 0.0 {
                continue;
            }

            for &(row, va) in matrix.column_ratings(a) {
                let ua = va / norms[a];
                for &(b, vb) in matrix.row_ratings(row) {
                    if b <= a || norms[b] == 0.0 {
                        continue;
                    }
                    if !seen[b] {
                        seen[b] = true;
                        touched.push(b);
                    }
                    dots[b] += ua * (vb / norms[b]);
                }
            }

            for b in touched.drain(..) {
                let dot = std::mem::take(&mut dots[b]);
                seen[b] = false;
                if dot == 0.0 {
                    continue;
                }
                let score = dot.clamp(-1.0, 1.0);
                neighbours[a].push((b, score));
                neighbours[b].push((a, score));
            }
        }

        for list in &mut neighbours {
            list.sort_by(rank_order);
        }

        let pairs: usize = neighbours.iter().map(Vec::len).sum::<usize>() / 2;
        tracing::info!(
            items,
            nonzero_pairs = pairs,
            processing_time_ms = start.elapsed().as_millis(),
            "Item similarity computed"
        );

        Self {
            neighbours,
            rated: norms.iter().map(|&n| n > 0.0).collect(),
        }
    }

    /// Number of items (matrix columns) covered
    pub fn len(&self) -> usize {
        self.neighbours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbours.is_empty()
    }

    /// Similarity between two columns
    ///
    /// The diagonal is 1 for items with a nonzero rating vector and 0 otherwise.
    pub fn similarity(&self, a: usize, b: usize) -> f64 {
        if a == b {
            return if self.rated[a] { 1.0 } else { 0.0 };
        }
        self.neighbours[a]
            .iter()
            .find(|&&(col, _)| col == b)
            .map_or(0.0, |&(_, score)| score)
    }

    /// Items with a nonzero similarity to `col`
    pub fn neighbour_count(&self, col: usize) -> usize {
        self.neighbours[col].len()
    }

    /// The `n` most similar columns to `col`, never including `col` itself
    ///
    /// The order matches a full sort of the dense similarity row: positive
    /// scores descending, then zero-similarity items by column, then negative
    /// scores descending. Ties on equal scores go to the lower column.
    pub fn similar_columns(&self, col: usize, n: usize) -> Vec<(usize, f64)> {
        let list = &self.neighbours[col];
        let split = list.partition_point(|&(_, score)| score > 0.0);
        let (positive, negative) = list.split_at(split);

        let mut out: Vec<(usize, f64)> = positive.iter().take(n).copied().collect();
        if out.len() == n {
            return out;
        }

        let mut linked: Vec<usize> = list.iter().map(|&(c, _)| c).collect();
        linked.sort_unstable();
        let zeros = (0..self.len())
            .filter(|&c| c != col && linked.binary_search(&c).is_err())
            .map(|c| (c, 0.0));

        out.extend(zeros.chain(negative.iter().copied()).take(n - out.len()));
        out
    }

    /// The nonzero entries of `similar_columns(col, n)`, in the same order
    ///
    /// Only the stored neighbour list is walked: zero-similarity items are
    /// counted rather than enumerated, so negative neighbours are cut off
    /// exactly where the dense ranking would cut them.
    pub fn nonzero_similar_columns(
        &self,
        col: usize,
        n: usize,
    ) -> impl Iterator<Item = (usize, f64)> + '_ {
        let list = &self.neighbours[col];
        let split = list.partition_point(|&(_, score)| score > 0.0);
        let (positive, negative) = list.split_at(split);

        let positive_taken = positive.len().min(n);
        let zeros = self.len().saturating_sub(1 + list.len());
        let negative_taken = n.saturating_sub(positive_taken + zeros);

        positive[..positive_taken]
            .iter()
            .chain(negative.iter().take(negative_taken))
            .copied()
    }
}

/// Score descending, then column ascending
///
/// Ties are exact float equality. Column normalization makes proportional
/// columns tie exactly, but scores that are only mathematically equal through
/// different arithmetic paths may still differ in the last bit.
fn rank_order(a: &(usize, f64), b: &(usize, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}
