mod common;

use std::io::Write;

use tempfile::NamedTempFile;

use common::{engine, engine_with, FORREST_GUMP, HEAT, JUMANJI, TOY_STORY};
use movie_recommender::{
    dataset,
    error::AppError,
    models::{Movie, Rating},
    services::{Catalog, ColumnKeying, RatingStore, RecommendationEngine},
};

#[test]
fn test_similarity_is_symmetric() {
    let engine = engine();
    let titles: Vec<String> = engine
        .matrix()
        .columns()
        .iter()
        .map(|c| c.label.clone())
        .collect();

    for a in &titles {
        for b in &titles {
            assert_eq!(
                engine.similarity(a, b).unwrap(),
                engine.similarity(b, a).unwrap()
            );
        }
    }
}

#[test]
fn test_self_similarity_is_one_and_never_listed() {
    let engine = engine();
    for column in engine.matrix().columns() {
        assert_eq!(engine.similarity(&column.label, &column.label).unwrap(), 1.0);
        let similar = engine.get_similar_items(&column.label, 20).unwrap();
        assert!(!similar.contains(&column.label));
    }
}

#[test]
fn test_similar_items_for_toy_story() {
    let engine = engine();
    let similar = engine.get_similar_items(TOY_STORY, 3).unwrap();
    assert_eq!(similar, vec![FORREST_GUMP, JUMANJI, HEAT]);

    let toy_gump = engine.similarity(TOY_STORY, FORREST_GUMP).unwrap();
    assert!((toy_gump - 40.0 / (66.0_f64 * 50.0).sqrt()).abs() < 1e-12);
}

#[test]
fn test_similar_items_unknown_title_is_item_not_found() {
    let engine = engine();
    let err = engine.get_similar_items("Nonexistent (2099)", 5).unwrap_err();
    assert!(matches!(err, AppError::ItemNotFound(title) if title == "Nonexistent (2099)"));
}

#[test]
fn test_recommend_forrest_gump_to_toy_story_fan() {
    let engine = engine();
    assert_eq!(engine.recommend_movies(1, 1), vec![FORREST_GUMP]);
    assert_eq!(engine.recommend_movies(1, 5), vec![FORREST_GUMP, HEAT]);
}

#[test]
fn test_recommendations_exclude_rated_items() {
    let engine = engine();
    let recommendations = engine.recommend_movies(2, 10);
    assert!(!recommendations.is_empty());
    for title in [TOY_STORY, FORREST_GUMP, HEAT] {
        assert!(!recommendations.iter().any(|r| r == title));
    }
}

#[test]
fn test_user_without_ratings_gets_empty_list() {
    let engine = engine();
    assert!(engine.recommend_movies(999, 5).is_empty());
    assert!(engine.recommend_movies(0, 5).is_empty());
}

#[test]
fn test_recommendation_length_bounded_by_n() {
    let engine = engine();
    for user in 1..=5 {
        for n in 0..8 {
            assert!(engine.recommend_movies(user, n).len() <= n);
        }
    }
}

#[test]
fn test_recommendations_are_deterministic() {
    let engine = engine();
    for user in 1..=5 {
        assert_eq!(engine.recommend_movies(user, 5), engine.recommend_movies(user, 5));
    }

    let rebuilt = common::engine();
    for user in 1..=5 {
        assert_eq!(engine.recommend_movies(user, 5), rebuilt.recommend_movies(user, 5));
    }
}

#[test]
fn test_genre_filter_returns_top_comedies() {
    let engine = engine();
    let result = engine.recommend_movies_by_genres(&["Comedy".to_string()], 3);
    let ids: Vec<u32> = result.iter().map(|m| m.movie_id).collect();
    assert_eq!(ids, vec![1, 3, 7]);
    assert!(result.iter().all(|m| m.genres.split('|').any(|g| g == "Comedy")));
}

#[test]
fn test_release_year_filter_exact_year() {
    let engine = engine();
    let result = engine.recommend_movies_by_release_year(1994, 5);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].title, FORREST_GUMP);
    assert_eq!(result[0].genres, "Comedy|Drama|Romance|War");
}

#[test]
fn test_release_decade_filter_ranked_by_average_rating() {
    let engine = engine();
    let result = engine.recommend_movies_by_release_decade(1990, 5);
    let ids: Vec<u32> = result.iter().map(|m| m.movie_id).collect();
    assert_eq!(ids, vec![8, 1, 6, 7, 356]);
    for summary in &result {
        let year = engine.catalog().get(summary.movie_id).unwrap().release_year.unwrap();
        assert!((1990..=1999).contains(&year));
    }
}

#[test]
fn test_stats() {
    let engine = engine();
    let stats = engine.stats();
    assert_eq!(stats.users, 5);
    assert_eq!(stats.items, 8);
    assert_eq!(stats.movies, 9);
    assert_eq!(stats.ratings, 13);
    assert_eq!(stats.column_keying, ColumnKeying::Title);
}

#[test]
fn test_title_keying_merges_duplicate_titles() {
    let catalog = Catalog::new(vec![
        Movie::new(1, "Hamlet (1996)".to_string(), "Drama"),
        Movie::new(2, "Hamlet (1996)".to_string(), "Drama"),
        Movie::new(3, "Emma (1996)".to_string(), "Romance"),
    ]);
    let ratings = RatingStore::new(vec![
        Rating::new(1, 1, 4.0),
        Rating::new(2, 2, 4.0),
        Rating::new(2, 3, 5.0),
    ]);

    let by_title = RecommendationEngine::new(catalog.clone(), ratings.clone(), ColumnKeying::Title);
    assert_eq!(by_title.stats().items, 2);
    // user 1 rated "Hamlet", which shares user 2 with Emma
    assert_eq!(by_title.recommend_movies(1, 5), vec!["Emma (1996)"]);

    let by_id = RecommendationEngine::new(catalog, ratings, ColumnKeying::MovieId);
    assert_eq!(by_id.stats().items, 3);
    // movie 1's only rater never rated anything else
    assert!(by_id.recommend_movies(1, 5).is_empty());
}

#[test]
fn test_exact_score_ties_follow_column_order_under_both_keyings() {
    // user 2 reaches Clueless/Grumpier Old Men through Forrest Gump and
    // Seven/The Matrix through Heat with identical scores
    let by_title = engine_with(ColumnKeying::Title);
    assert_eq!(
        by_title.recommend_movies(2, 5),
        vec![
            JUMANJI,
            "Clueless (1995)",
            "Grumpier Old Men (1995)",
            "Seven (a.k.a. Se7en) (1995)",
            "The Matrix (1999)",
        ]
    );

    let by_id = engine_with(ColumnKeying::MovieId);
    assert_eq!(
        by_id.recommend_movies(2, 5),
        vec![
            JUMANJI,
            "Grumpier Old Men (1995)",
            "Clueless (1995)",
            "Seven (a.k.a. Se7en) (1995)",
            "The Matrix (1999)",
        ]
    );
}

#[test]
fn test_movie_id_keying_matches_title_keying_without_collisions() {
    let by_title = engine_with(ColumnKeying::Title);
    let by_id = engine_with(ColumnKeying::MovieId);
    // same candidates; tied entries are ordered by each keying's column order
    for user in 1..=5 {
        let mut a = by_title.recommend_movies(user, 5);
        let mut b = by_id.recommend_movies(user, 5);
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }
}

#[test]
fn test_load_from_files() {
    let mut movies = NamedTempFile::new().unwrap();
    write!(movies, "{}", common::MOVIES_CSV).unwrap();
    let mut ratings = NamedTempFile::new().unwrap();
    write!(ratings, "{}", common::RATINGS_CSV).unwrap();

    let catalog = dataset::load_movies(movies.path()).unwrap();
    let store = dataset::load_ratings(ratings.path()).unwrap();
    assert_eq!(catalog.len(), 9);
    assert_eq!(store.len(), 13);

    let engine = RecommendationEngine::new(catalog, store, ColumnKeying::Title);
    assert_eq!(engine.recommend_movies(1, 1), vec![FORREST_GUMP]);
}
