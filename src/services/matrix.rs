use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::models::{MovieId, UserId};

use super::{Catalog, RatingStore};

/// How user-item matrix columns are identified
///
/// `Title` keys columns by the display title, so distinct movies sharing a
/// title collapse into one column (their ratings are averaged per user).
/// `MovieId` keeps every catalog entry in its own column and uses the title
/// only as a label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKeying {
    #[default]
    Title,
    MovieId,
}

/// One item column of the matrix
#[derive(Debug, Clone, PartialEq)]
pub struct ItemColumn {
    /// Title shown for this column
    pub label: String,
    /// Catalog entries merged into this column, ascending
    pub movie_ids: Vec<MovieId>,
}

/// A defined matrix cell seen from a row or a column: (other index, rating)
pub type Cell = (usize, f64);

/// Sparse user × item rating matrix
///
/// Rows are users in ascending id order; columns are items ordered by title
/// (`ColumnKeying::Title`) or by movie id (`ColumnKeying::MovieId`). Only
/// defined cells are stored, so "not rated" stays distinct from a rating of
/// zero until a column is explicitly zero-filled.
#[derive(Debug, Clone)]
pub struct UserItemMatrix {
    keying: ColumnKeying,
    users: Vec<UserId>,
    user_index: HashMap<UserId, usize>,
    columns: Vec<ItemColumn>,
    title_index: HashMap<String, usize>,
    rows: Vec<Vec<Cell>>,
    cols: Vec<Vec<Cell>>,
}

impl UserItemMatrix {
    /// Pivots the ratings into a matrix
    ///
    /// Ratings for movies missing from the catalog are skipped. Several
    /// ratings landing on the same cell (duplicate rows, or colliding titles)
    /// are averaged.
    pub fn build(ratings: &RatingStore, catalog: &Catalog, keying: ColumnKeying) -> Self {
        let (columns, column_of) = Self::layout_columns(ratings, catalog, keying);

        let mut cells: BTreeMap<(UserId, usize), (f64, u32)> = BTreeMap::new();
        let mut skipped = 0usize;
        for rating in ratings.ratings() {
            let Some(&col) = column_of.get(&rating.movie_id) else {
                skipped += 1;
                continue;
            };
            let cell = cells.entry((rating.user_id, col)).or_insert((0.0, 0));
            cell.0 += rating.value;
            cell.1 += 1;
        }

        if skipped > 0 {
            tracing::warn!(skipped, "Ratings reference movies missing from the catalog");
        }

        let mut users: Vec<UserId> = Vec::new();
        let mut rows: Vec<Vec<Cell>> = Vec::new();
        let mut cols: Vec<Vec<Cell>> = vec![Vec::new(); columns.len()];

        // BTreeMap order is (user asc, column asc): rows come out sorted.
        for ((user_id, col), (sum, count)) in cells {
            if users.last() != Some(&user_id) {
                users.push(user_id);
                rows.push(Vec::new());
            }
            let row = users.len() - 1;
            let value = sum / f64::from(count);
            rows[row].push((col, value));
            cols[col].push((row, value));
        }

        let user_index = users.iter().enumerate().map(|(i, &u)| (u, i)).collect();

        let mut title_index = HashMap::new();
        for (idx, column) in columns.iter().enumerate() {
            title_index.entry(column.label.clone()).or_insert(idx);
        }

        tracing::debug!(
            users = users.len(),
            columns = columns.len(),
            ?keying,
            "User-item matrix built"
        );

        Self {
            keying,
            users,
            user_index,
            columns,
            title_index,
            rows,
            cols,
        }
    }

    /// Decides the column set and maps every rated catalog movie to its column
    fn layout_columns(
        ratings: &RatingStore,
        catalog: &Catalog,
        keying: ColumnKeying,
    ) -> (Vec<ItemColumn>, HashMap<MovieId, usize>) {
        let rated = catalog
            .iter()
            .filter(|m| ratings.is_rated(m.movie_id));

        let mut columns: Vec<ItemColumn> = Vec::new();
        let mut column_of = HashMap::new();

        match keying {
            ColumnKeying::Title => {
                let mut by_title: BTreeMap<&str, Vec<MovieId>> = BTreeMap::new();
                for movie in rated {
                    by_title.entry(movie.title.as_str()).or_default().push(movie.movie_id);
                }
                for (title, movie_ids) in by_title {
                    if movie_ids.len() > 1 {
                        tracing::debug!(title, ?movie_ids, "Movies share a title column");
                    }
                    for &id in &movie_ids {
                        column_of.insert(id, columns.len());
                    }
                    columns.push(ItemColumn {
                        label: title.to_string(),
                        movie_ids,
                    });
                }
            }
            ColumnKeying::MovieId => {
                for movie in rated {
                    column_of.insert(movie.movie_id, columns.len());
                    columns.push(ItemColumn {
                        label: movie.title.clone(),
                        movie_ids: vec![movie.movie_id],
                    });
                }
            }
        }

        (columns, column_of)
    }

    pub fn keying(&self) -> ColumnKeying {
        self.keying
    }

    /// User ids, one per row
    pub fn users(&self) -> &[UserId] {
        &self.users
    }

    pub fn columns(&self) -> &[ItemColumn] {
        &self.columns
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_of(&self, user_id: UserId) -> Option<usize> {
        self.user_index.get(&user_id).copied()
    }

    /// Column holding the given title
    ///
    /// With `ColumnKeying::MovieId` a title shared by several movies resolves
    /// to the one with the lowest movie id.
    pub fn column_for_title(&self, title: &str) -> Option<usize> {
        self.title_index.get(title).copied()
    }

    pub fn column_label(&self, col: usize) -> &str {
        &self.columns[col].label
    }

    /// Defined ratings of a user as (column, value), ascending by column
    ///
    /// Unknown users have no defined ratings.
    pub fn user_ratings(&self, user_id: UserId) -> &[Cell] {
        self.row_of(user_id)
            .map(|row| self.rows[row].as_slice())
            .unwrap_or(&[])
    }

    /// Defined ratings in a row as (column, value), ascending by column
    pub fn row_ratings(&self, row: usize) -> &[Cell] {
        &self.rows[row]
    }

    /// Defined ratings in a column as (row, value), ascending by row
    pub fn column_ratings(&self, col: usize) -> &[Cell] {
        &self.cols[col]
    }

    /// Cell value; `None` means "not rated"
    pub fn get(&self, user_id: UserId, col: usize) -> Option<f64> {
        let row = self.row_of(user_id)?;
        self.rows[row]
            .binary_search_by_key(&col, |&(c, _)| c)
            .ok()
            .map(|pos| self.rows[row][pos].1)
    }

    /// Column as a dense vector over all users, unrated cells set to 0
    pub fn zero_filled_column(&self, col: usize) -> Vec<f64> {
        let mut dense = vec![0.0; self.users.len()];
        for &(row, value) in &self.cols[col] {
            dense[row] = value;
        }
        dense
    }
}
