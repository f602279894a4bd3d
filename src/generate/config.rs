//! Initial roster generator configuration.

use crate::error::{Result, RosterError};

/// Configuration for random construction of the first feasible roster.
///
/// # Examples
///
/// ```
/// use u_roster::generate::GeneratorConfig;
///
/// let config = GeneratorConfig::default()
///     .with_max_attempts(50_000)
///     .with_seed(42);
/// assert_eq!(config.max_attempts, 50_000);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratorConfig {
    /// Number of complete candidates to build before giving up.
    pub max_attempts: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_attempts: 1_000_000,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    pub fn with_max_attempts(mut self, n: usize) -> Self {
        self.max_attempts = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(RosterError::InvalidConfig(
                "max_attempts must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.max_attempts, 1_000_000);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let config = GeneratorConfig::default().with_max_attempts(0);
        assert!(config.validate().is_err());
    }
}
