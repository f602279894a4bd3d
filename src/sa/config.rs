//! Annealing configuration.

use crate::error::{Result, RosterError};

/// Move used to derive a neighbor from the current roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Neighborhood {
    /// Overwrite one random position with a random worker.
    #[default]
    Reassign,

    /// Exchange the workers at two random positions.
    ///
    /// Preserves each worker's total shift count.
    Swap,
}

/// Configuration for the annealing optimizer.
///
/// Temperature starts at `initial_temperature`, runs
/// `iterations_per_temperature` proposals per level, and is multiplied by
/// `cooling_factor` until it no longer exceeds `min_temperature`.
///
/// # Examples
///
/// ```
/// use u_roster::sa::{AnnealConfig, Neighborhood};
///
/// let config = AnnealConfig::default()
///     .with_initial_temperature(20.0)
///     .with_cooling_factor(0.9)
///     .with_iterations_per_temperature(200)
///     .with_neighborhood(Neighborhood::Swap)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealConfig {
    /// Starting temperature.
    pub initial_temperature: f64,

    /// Geometric cooling factor in (0, 1).
    pub cooling_factor: f64,

    /// The run stops once the temperature drops to this value.
    pub min_temperature: f64,

    /// Proposals evaluated at each temperature level.
    pub iterations_per_temperature: usize,

    /// Infeasible proposals tolerated within one iteration before the run
    /// is reported as stalled.
    pub max_neighbor_attempts: usize,

    /// Neighbor move.
    pub neighborhood: Neighborhood,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 10.0,
            cooling_factor: 0.95,
            min_temperature: 0.05,
            iterations_per_temperature: 1000,
            max_neighbor_attempts: 100_000,
            neighborhood: Neighborhood::default(),
            seed: None,
        }
    }
}

impl AnnealConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_factor(mut self, alpha: f64) -> Self {
        self.cooling_factor = alpha;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_max_neighbor_attempts(mut self, n: usize) -> Self {
        self.max_neighbor_attempts = n;
        self
    }

    pub fn with_neighborhood(mut self, neighborhood: Neighborhood) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of temperature levels the schedule will visit.
    pub fn temperature_levels(&self) -> usize {
        let mut levels = 0;
        let mut t = self.initial_temperature;
        while t > self.min_temperature {
            levels += 1;
            t *= self.cooling_factor;
        }
        levels
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(invalid("initial_temperature must be positive"));
        }
        if !self.min_temperature.is_finite() || self.min_temperature <= 0.0 {
            return Err(invalid("min_temperature must be positive"));
        }
        if self.min_temperature >= self.initial_temperature {
            return Err(invalid("min_temperature must be less than initial_temperature"));
        }
        if self.cooling_factor.is_nan()
            || self.cooling_factor <= 0.0
            || self.cooling_factor >= 1.0
        {
            return Err(RosterError::InvalidConfig(format!(
                "cooling_factor must be in (0, 1), got {}",
                self.cooling_factor
            )));
        }
        if self.iterations_per_temperature == 0 {
            return Err(invalid("iterations_per_temperature must be positive"));
        }
        if self.max_neighbor_attempts == 0 {
            return Err(invalid("max_neighbor_attempts must be positive"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> RosterError {
    RosterError::InvalidConfig(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnnealConfig::default();
        assert!((config.initial_temperature - 10.0).abs() < 1e-12);
        assert!((config.cooling_factor - 0.95).abs() < 1e-12);
        assert!((config.min_temperature - 0.05).abs() < 1e-12);
        assert_eq!(config.iterations_per_temperature, 1000);
        assert_eq!(config.neighborhood, Neighborhood::Reassign);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_temperature_levels() {
        // 10 * 0.95^k > 0.05  <=>  k < ln(0.005)/ln(0.95) ~ 103.3
        assert_eq!(AnnealConfig::default().temperature_levels(), 104);

        let config = AnnealConfig::default()
            .with_initial_temperature(1.0)
            .with_cooling_factor(0.5)
            .with_min_temperature(0.2);
        // 1.0, 0.5, 0.25
        assert_eq!(config.temperature_levels(), 3);
    }

    #[test]
    fn test_validate_bad_temperature() {
        let config = AnnealConfig::default().with_initial_temperature(-1.0);
        assert!(config.validate().is_err());
        let config = AnnealConfig::default().with_initial_temperature(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_min_ge_initial() {
        let config = AnnealConfig::default()
            .with_initial_temperature(1.0)
            .with_min_temperature(2.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_alpha() {
        assert!(AnnealConfig::default()
            .with_cooling_factor(1.0)
            .validate()
            .is_err());
        assert!(AnnealConfig::default()
            .with_cooling_factor(0.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_zero_budgets() {
        assert!(AnnealConfig::default()
            .with_iterations_per_temperature(0)
            .validate()
            .is_err());
        assert!(AnnealConfig::default()
            .with_max_neighbor_attempts(0)
            .validate()
            .is_err());
    }
}
