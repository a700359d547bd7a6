mod movie;
mod rating;

pub use movie::{extract_release_year, Movie, MovieId, MovieSummary, GENRE_SEPARATOR};
pub use rating::{Rating, UserId};
