//! Evaluation configuration.

use std::time::Duration;
use thiserror::Error;

/// Default number of files classified concurrently per run.
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Upper bound accepted for `max_concurrency`.
pub const MAX_CONCURRENCY_LIMIT: usize = 64;

/// Default lifetime of presigned download URLs.
pub const DEFAULT_PRESIGN_TTL: Duration = Duration::from_secs(3600);

/// Longest presigned URL lifetime accepted.
pub const MAX_PRESIGN_TTL: Duration = Duration::from_secs(7 * 24 * 3600);

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max_concurrency must be between 1 and {MAX_CONCURRENCY_LIMIT}, got {0}")]
    InvalidConcurrency(usize),

    #[error("presign_ttl must be between 1 second and 7 days, got {0}s")]
    InvalidPresignTtl(u64),
}

/// Tunables for the evaluation pipeline and file access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationConfig {
    /// Cap on in-flight per-file classification tasks for one run.
    pub max_concurrency: usize,
    /// Lifetime of presigned download URLs handed out for dataset files.
    pub presign_ttl: Duration,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            presign_ttl: DEFAULT_PRESIGN_TTL,
        }
    }
}

impl EvaluationConfig {
    #[must_use]
    pub const fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    #[must_use]
    pub const fn with_presign_ttl(mut self, ttl: Duration) -> Self {
        self.presign_ttl = ttl;
        self
    }

    /// Check that every field is within its accepted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_CONCURRENCY_LIMIT).contains(&self.max_concurrency) {
            return Err(ConfigError::InvalidConcurrency(self.max_concurrency));
        }
        if self.presign_ttl.is_zero() || self.presign_ttl > MAX_PRESIGN_TTL {
            return Err(ConfigError::InvalidPresignTtl(self.presign_ttl.as_secs()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EvaluationConfig::default();
        assert_eq!(config.max_concurrency, 8);
        assert_eq!(config.presign_ttl, Duration::from_secs(3600));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_concurrency_bounds() {
        let zero = EvaluationConfig::default().with_max_concurrency(0);
        assert_eq!(zero.validate(), Err(ConfigError::InvalidConcurrency(0)));

        let too_many = EvaluationConfig::default().with_max_concurrency(65);
        assert!(too_many.validate().is_err());

        let max = EvaluationConfig::default().with_max_concurrency(64);
        assert!(max.validate().is_ok());
    }

    #[test]
    fn test_presign_ttl_bounds() {
        let zero = EvaluationConfig::default().with_presign_ttl(Duration::ZERO);
        assert_eq!(zero.validate(), Err(ConfigError::InvalidPresignTtl(0)));

        let week = EvaluationConfig::default().with_presign_ttl(MAX_PRESIGN_TTL);
        assert!(week.validate().is_ok());

        let longer = EvaluationConfig::default().with_presign_ttl(MAX_PRESIGN_TTL + Duration::from_secs(1));
        assert!(longer.validate().is_err());
    }
}
