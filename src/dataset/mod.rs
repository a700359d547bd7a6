pub mod loader;

pub use loader::{load_movies, load_ratings, read_movies, read_ratings};
