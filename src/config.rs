use serde::Deserialize;

use crate::services::ColumnKeying;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the ratings CSV (`userId,movieId,rating[,timestamp]`)
    #[serde(default = "default_ratings_path")]
    pub ratings_path: String,

    /// Path to the movies CSV (`movieId,title,genres`)
    #[serde(default = "default_movies_path")]
    pub movies_path: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// How user-item matrix columns are identified (`title` or `movie_id`)
    #[serde(default)]
    pub column_keying: ColumnKeying,

    /// Result count used when a request does not specify `n`
    #[serde(default = "default_results")]
    pub default_results: usize,

    /// Largest `n` a request may ask for
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_ratings_path() -> String {
    "data/ratings.csv".to_string()
}

fn default_movies_path() -> String {
    "data/movies.csv".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_results() -> usize {
    5
}

fn default_max_results() -> usize {
    20
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.max_results == 0 {
            anyhow::bail!("MAX_RESULTS must be at least 1");
        }
        if self.default_results == 0 || self.default_results > self.max_results {
            anyhow::bail!(
                "DEFAULT_RESULTS must be between 1 and MAX_RESULTS ({})",
                self.max_results
            );
        }
        Ok(())
    }

    /// Address the HTTP listener binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
