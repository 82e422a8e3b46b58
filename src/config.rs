//! Settings for transition extraction and pair scoring
//!
//! ```rust
//! use cotrans::{Config, ConsecutivePolicy};
//!
//! let config = Config::builder()
//!     .min_transitions(3)
//!     .count_consecutive(true)
//!     .threads(4)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.min_transitions(), 3);
//! assert_eq!(config.policy(), ConsecutivePolicy::Count);
//! assert_eq!(config.step(), 1.0);
//! ```
use crate::transition::ConsecutivePolicy;
use crate::{CotransError, CotransResult};
use crate::{DEFAULT_MIN_SCORE, DEFAULT_MIN_TRANSITIONS, DEFAULT_STEP};

/// Configuration of an [`Analysis`](`crate::Analysis`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    policy: ConsecutivePolicy,
    step: f64,
    min_transitions: u32,
    min_score: u32,
    threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            policy: ConsecutivePolicy::default(),
            step: DEFAULT_STEP,
            min_transitions: DEFAULT_MIN_TRANSITIONS,
            min_score: DEFAULT_MIN_SCORE,
            threads: 1,
        }
    }
}

impl Config {
    /// Returns a [`ConfigBuilder`] initialized with the default values
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Handling of adjacent opposite transitions
    pub fn policy(&self) -> ConsecutivePolicy {
        self.policy
    }

    /// A difference between neighbouring organisms must exceed this value
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Minimum absolute net score of a pair in exhaustive mode
    pub fn min_transitions(&self) -> u32 {
        self.min_transitions
    }

    /// Minimum absolute net score of a candidate pair in validation mode
    pub fn min_score(&self) -> u32 {
        self.min_score
    }

    /// Number of worker threads for exhaustive scoring.
    ///
    /// `1` scores sequentially, `0` uses one thread per CPU.
    pub fn threads(&self) -> usize {
        self.threads
    }
}

/// Builds a [`Config`]
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Counts every transition if `true`, otherwise adjacent opposite
    /// transitions are counted only once (default)
    #[must_use]
    pub fn count_consecutive(mut self, count_consecutive: bool) -> Self {
        self.config.policy = ConsecutivePolicy::from_count_consecutive(count_consecutive);
        self
    }

    /// Sets the [`ConsecutivePolicy`]
    #[must_use]
    pub fn policy(mut self, policy: ConsecutivePolicy) -> Self {
        self.config.policy = policy;
        self
    }

    /// Sets the step size, must be a finite, non-negative number
    #[must_use]
    pub fn step(mut self, step: f64) -> Self {
        self.config.step = step;
        self
    }

    /// Sets the minimum absolute net score in exhaustive mode
    #[must_use]
    pub fn min_transitions(mut self, min_transitions: u32) -> Self {
        self.config.min_transitions = min_transitions;
        self
    }

    /// Sets the minimum absolute net score in validation mode
    #[must_use]
    pub fn min_score(mut self, min_score: u32) -> Self {
        self.config.min_score = min_score;
        self
    }

    /// Sets the number of worker threads
    #[must_use]
    pub fn threads(mut self, threads: usize) -> Self {
        self.config.threads = threads;
        self
    }

    /// Validates the settings and returns the [`Config`]
    ///
    /// # Errors
    ///
    /// [`CotransError::InvalidConfig`] if the step size is negative or not finite
    pub fn build(self) -> CotransResult<Config> {
        if !self.config.step.is_finite() || self.config.step < 0.0 {
            return Err(CotransError::InvalidConfig(format!(
                "step must be a non-negative number, not {}",
                self.config.step
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::builder().build().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.min_transitions(), 4);
        assert_eq!(config.min_score(), 4);
        assert_eq!(config.policy(), ConsecutivePolicy::Collapse);
        assert_eq!(config.threads(), 1);
    }

    #[test]
    fn invalid_step() {
        assert!(Config::builder().step(-1.0).build().is_err());
        assert!(Config::builder().step(f64::NAN).build().is_err());
        assert!(Config::builder().step(f64::INFINITY).build().is_err());
        assert!(Config::builder().step(0.0).build().is_ok());
    }

    #[test]
    fn policy_from_flag() {
        let config = Config::builder().count_consecutive(true).build().unwrap();
        assert_eq!(config.policy(), ConsecutivePolicy::Count);
        let config = config_with(false);
        assert_eq!(config.policy(), ConsecutivePolicy::Collapse);
    }

    fn config_with(count_consecutive: bool) -> Config {
        Config::builder()
            .count_consecutive(count_consecutive)
            .build()
            .unwrap()
    }
}
