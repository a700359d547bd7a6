pub mod catalog;
pub mod engine;
pub mod filters;
pub mod matrix;
pub mod rating_store;
pub mod recommender;
pub mod similarity;

pub use catalog::Catalog;
pub use engine::{EngineStats, RecommendationEngine};
pub use filters::Popularity;
pub use matrix::{ColumnKeying, ItemColumn, UserItemMatrix};
pub use rating_store::RatingStore;
pub use recommender::{Recommender, ScoredItem};
pub use similarity::ItemSimilarity;
