#![allow(dead_code)]

use movie_recommender::{
    dataset,
    services::{ColumnKeying, RecommendationEngine},
};

pub const MOVIES_CSV: &str = "movieId,title,genres
1,Toy Story (1995),Adventure|Animation|Children|Comedy|Fantasy
2,Jumanji (1995),Adventure|Children|Fantasy
3,Grumpier Old Men (1995),Comedy|Romance
4,Heat (1995),Action|Crime|Thriller
6,Seven (a.k.a. Se7en) (1995),Mystery|Thriller
7,Clueless (1995),Comedy|Romance
8,The Matrix (1999),Action|Sci-Fi
9,Untitled Short,Comedy
356,Forrest Gump (1994),Comedy|Drama|Romance|War
";

pub const RATINGS_CSV: &str = "userId,movieId,rating,timestamp
1,1,5.0,964982703
1,2,3.0,964981247
2,1,4.0,964982224
2,356,5.0,964983815
2,4,2.0,964982931
3,1,5.0,964982400
3,356,4.0,964980868
4,4,5.0,964982176
4,6,4.0,964984041
4,8,5.0,964984100
5,356,3.0,964983000
5,7,4.0,964983100
5,3,3.0,964983200
";

pub const TOY_STORY: &str = "Toy Story (1995)";
pub const JUMANJI: &str = "Jumanji (1995)";
pub const FORREST_GUMP: &str = "Forrest Gump (1994)";
pub const HEAT: &str = "Heat (1995)";

pub fn engine() -> RecommendationEngine {
    engine_with(ColumnKeying::Title)
}

pub fn engine_with(keying: ColumnKeying) -> RecommendationEngine {
    let catalog = dataset::read_movies(MOVIES_CSV.as_bytes()).unwrap();
    let ratings = dataset::read_ratings(RATINGS_CSV.as_bytes()).unwrap();
    RecommendationEngine::new(catalog, ratings, keying)
}
