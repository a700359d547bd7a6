use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use movie_recommender::{
    api::{create_router, AppState, ResultLimits},
    config::Config,
    dataset,
    services::RecommendationEngine,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let catalog = dataset::load_movies(&config.movies_path)
        .with_context(|| format!("Failed to load movies from {}", config.movies_path))?;
    let ratings = dataset::load_ratings(&config.ratings_path)
        .with_context(|| format!("Failed to load ratings from {}", config.ratings_path))?;

    // Similarity is computed up front; keep it off the async workers
    let keying = config.column_keying;
    let engine = tokio::task::spawn_blocking(move || {
        RecommendationEngine::new(catalog, ratings, keying)
    })
    .await
    .context("Engine construction task failed")?;

    let state = AppState::new(engine, ResultLimits::from_config(&config));
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(addr = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
