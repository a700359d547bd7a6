use super::MovieId;

/// Identifier of a user in the ratings data
pub type UserId = u32;

/// A single user → movie rating observation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    /// Rating value, typically 0.5 to 5.0 in half steps
    pub value: f64,
}

impl Rating {
    pub fn new(user_id: UserId, movie_id: MovieId, value: f64) -> Self {
        Self {
            user_id,
            movie_id,
            value,
        }
    }
}
