use std::sync::Arc;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::services::RecommendationEngine;

/// Bounds on the number of results a request may ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultLimits {
    pub default: usize,
    pub max: usize,
}

impl Default for ResultLimits {
    fn default() -> Self {
        Self { default: 5, max: 20 }
    }
}

impl ResultLimits {
    pub fn from_config(config: &Config) -> Self {
        Self {
            default: config.default_results,
            max: config.max_results,
        }
    }

    /// Resolves the requested result count, falling back to the default
    pub fn resolve(&self, requested: Option<usize>) -> AppResult<usize> {
        match requested {
            None => Ok(self.default),
            Some(n) if (1..=self.max).contains(&n) => Ok(n),
            Some(n) => Err(AppError::InvalidInput(format!(
                "n must be between 1 and {}, got {}",
                self.max, n
            ))),
        }
    }
}

/// Shared application state
///
/// The engine is read-only after construction, so it is shared without a lock.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RecommendationEngine>,
    pub limits: ResultLimits,
}

impl AppState {
    pub fn new(engine: RecommendationEngine, limits: ResultLimits) -> Self {
        Self {
            engine: Arc::new(engine),
            limits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults_when_missing() {
        let limits = ResultLimits::default();
        assert_eq!(limits.resolve(None).unwrap(), 5);
    }

    #[test]
    fn test_resolve_accepts_bounds() {
        let limits = ResultLimits::default();
        assert_eq!(limits.resolve(Some(1)).unwrap(), 1);
        assert_eq!(limits.resolve(Some(20)).unwrap(), 20);
    }

    #[test]
    fn test_resolve_rejects_out_of_range() {
        let limits = ResultLimits::default();
        assert!(matches!(limits.resolve(Some(0)), Err(AppError::InvalidInput(_))));
        assert!(matches!(limits.resolve(Some(21)), Err(AppError::InvalidInput(_))));
    }
}
