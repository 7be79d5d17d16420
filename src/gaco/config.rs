//! GACO configuration.
//!
//! [`GacoConfig`] holds all parameters that control one evolution run.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the GACO engine.
///
/// Controls the generation budget, the kernel (solution archive) size,
/// convergence pressure, the oracle penalty, and the three stopping
/// watchdogs.
///
/// # Defaults
///
/// ```
/// use gaco::GacoConfig;
///
/// let config = GacoConfig::default();
/// assert_eq!(config.generations, 100);
/// assert_eq!(config.kernel_size, 63);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use gaco::GacoConfig;
///
/// let config = GacoConfig::default()
///     .with_generations(200)
///     .with_kernel_size(15)
///     .with_focus(10.0)
///     .with_seed(23);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GacoConfig {
    /// Number of generations. 0 turns `evolve` into a no-op.
    pub generations: u32,

    /// Number of top-ranked solutions kept as the sampling kernel.
    ///
    /// Must be at least 2 (a spread cannot be derived from fewer), and the
    /// population passed to `evolve` must be at least this large.
    pub kernel_size: u32,

    /// Convergence speed `q` of the rank weights.
    ///
    /// Small values concentrate sampling on the very best kernel members;
    /// large values flatten the mixture toward uniform.
    pub convergence_speed: f64,

    /// Initial oracle reference value for the penalty scheme.
    pub oracle_init: f64,

    /// Resolution below which two fitness values count as equal.
    ///
    /// Drives improvement detection in the stagnation watchdogs and floors
    /// the kernel spread. Must be non-negative.
    pub accuracy: f64,

    /// Generation at which convergence pressure kicks in.
    ///
    /// Once the generation counter reaches this value the effective `q`
    /// snaps to 0.01. Must be at least 1; when [`memory`](Self::memory) is
    /// off and `generations >= 1` it must not exceed `generations` (a mark
    /// past the last generation could never be reached).
    pub threshold: u32,

    /// Fitness target: the run stops once the best feasible objective
    /// reaches or crosses this value.
    pub fitness_stop: f64,

    /// Generation mark `n_gen_mark` scaling the focus narrowing schedule.
    ///
    /// Must be at least 1.
    pub stall_mark_window: u32,

    /// Stop after this many consecutive generations without improvement.
    ///
    /// Must be at least 1.
    pub impstop_window: u32,

    /// Stop after this many objective evaluations without improvement.
    ///
    /// Must be at least 1.
    pub evalstop_window: u64,

    /// Exploitation pressure: 0 disables it; larger values cap the kernel
    /// spread to an ever-narrower slice of each variable's range as
    /// generations elapse. Must be non-negative.
    pub focus: f64,

    /// Whether oracle state, stagnation counters, and the log persist
    /// across repeated `evolve` calls on the same engine.
    pub memory: bool,

    /// Fraction of the distance to the new best objective the oracle moves
    /// per generation. Must lie in `[0, 1]`.
    pub adaptation_rate: f64,

    /// Random seed for reproducibility.
    pub seed: u64,
}

impl Default for GacoConfig {
    fn default() -> Self {
        Self {
            generations: 100,
            kernel_size: 63,
            convergence_speed: 1.0,
            oracle_init: 0.0,
            accuracy: 0.01,
            threshold: 1,
            fitness_stop: f64::MIN,
            stall_mark_window: 7,
            impstop_window: 100_000,
            evalstop_window: 100_000,
            focus: 0.0,
            memory: false,
            adaptation_rate: 0.9,
            seed: 0,
        }
    }
}

impl GacoConfig {
    /// Sets the generation budget.
    pub fn with_generations(mut self, n: u32) -> Self {
        self.generations = n;
        self
    }

    /// Sets the kernel size.
    pub fn with_kernel_size(mut self, ker: u32) -> Self {
        self.kernel_size = ker;
        self
    }

    /// Sets the convergence speed `q`.
    pub fn with_convergence_speed(mut self, q: f64) -> Self {
        self.convergence_speed = q;
        self
    }

    /// Sets the initial oracle value.
    pub fn with_oracle(mut self, oracle: f64) -> Self {
        self.oracle_init = oracle;
        self
    }

    /// Sets the accuracy resolution.
    pub fn with_accuracy(mut self, acc: f64) -> Self {
        self.accuracy = acc;
        self
    }

    /// Sets the convergence-pressure threshold generation.
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the fitness target.
    pub fn with_fitness_stop(mut self, fstop: f64) -> Self {
        self.fitness_stop = fstop;
        self
    }

    /// Sets the generation mark for the focus schedule.
    pub fn with_stall_mark_window(mut self, n_gen_mark: u32) -> Self {
        self.stall_mark_window = n_gen_mark;
        self
    }

    /// Sets the improvement-stagnation window (generations).
    pub fn with_impstop_window(mut self, window: u32) -> Self {
        self.impstop_window = window;
        self
    }

    /// Sets the evaluation-stagnation window (objective evaluations).
    pub fn with_evalstop_window(mut self, window: u64) -> Self {
        self.evalstop_window = window;
        self
    }

    /// Sets the focus parameter.
    pub fn with_focus(mut self, focus: f64) -> Self {
        self.focus = focus;
        self
    }

    /// Enables or disables run-to-run memory.
    pub fn with_memory(mut self, memory: bool) -> Self {
        self.memory = memory;
        self
    }

    /// Sets the oracle adaptation rate.
    pub fn with_adaptation_rate(mut self, rate: f64) -> Self {
        self.adaptation_rate = rate;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the configuration.
    ///
    /// Checks run in a fixed order and the first violation wins, so a
    /// rejected configuration is never partially applied.
    pub fn validate(&self) -> Result<()> {
        if self.kernel_size < 2 {
            return Err(Error::InvalidConfiguration(format!(
                "kernel_size must be at least 2, got {}",
                self.kernel_size
            )));
        }
        if !self.accuracy.is_finite() || self.accuracy < 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "accuracy must be non-negative and finite, got {}",
                self.accuracy
            )));
        }
        if !self.focus.is_finite() || self.focus < 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "focus must be non-negative and finite, got {}",
                self.focus
            )));
        }
        if !(0.0..=1.0).contains(&self.adaptation_rate) {
            return Err(Error::InvalidConfiguration(format!(
                "adaptation_rate must lie in [0, 1], got {}",
                self.adaptation_rate
            )));
        }
        if !self.convergence_speed.is_finite() || self.convergence_speed < 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "convergence_speed must be non-negative and finite, got {}",
                self.convergence_speed
            )));
        }
        if self.threshold < 1 {
            return Err(Error::InvalidConfiguration(format!(
                "threshold must be at least 1, got {}",
                self.threshold
            )));
        }
        if !self.memory && self.generations >= 1 && self.threshold > self.generations {
            return Err(Error::InvalidConfiguration(format!(
                "threshold must lie in [1, generations] = [1, {}] when memory is off, got {}",
                self.generations, self.threshold
            )));
        }
        if self.stall_mark_window < 1 {
            return Err(Error::InvalidConfiguration(format!(
                "stall_mark_window must be at least 1, got {}",
                self.stall_mark_window
            )));
        }
        if self.impstop_window < 1 {
            return Err(Error::InvalidConfiguration(format!(
                "impstop_window must be at least 1, got {}",
                self.impstop_window
            )));
        }
        if self.evalstop_window < 1 {
            return Err(Error::InvalidConfiguration(format!(
                "evalstop_window must be at least 1, got {}",
                self.evalstop_window
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_config() {
        let config = GacoConfig::default();
        assert_eq!(config.generations, 100);
        assert_eq!(config.kernel_size, 63);
        assert!((config.convergence_speed - 1.0).abs() < 1e-15);
        assert!((config.accuracy - 0.01).abs() < 1e-15);
        assert_eq!(config.threshold, 1);
        assert_eq!(config.stall_mark_window, 7);
        assert_eq!(config.impstop_window, 100_000);
        assert_eq!(config.evalstop_window, 100_000);
        assert!((config.adaptation_rate - 0.9).abs() < 1e-15);
        assert!(!config.memory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GacoConfig::default()
            .with_generations(2)
            .with_kernel_size(13)
            .with_convergence_speed(1.0)
            .with_oracle(0.0)
            .with_accuracy(0.01)
            .with_threshold(1)
            .with_fitness_stop(1e-7)
            .with_stall_mark_window(7)
            .with_impstop_window(1000)
            .with_evalstop_window(1000)
            .with_focus(0.0)
            .with_memory(false)
            .with_adaptation_rate(0.9)
            .with_seed(23);
        assert!(config.validate().is_ok());
        assert_eq!(config.generations, 2);
        assert_eq!(config.kernel_size, 13);
        assert_eq!(config.seed, 23);
    }

    #[test]
    fn test_negative_accuracy_rejected() {
        let config = GacoConfig::default().with_accuracy(-0.01);
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration(msg)) if msg.contains("accuracy")
        ));
    }

    #[test]
    fn test_negative_focus_rejected() {
        let config = GacoConfig::default().with_focus(-0.1);
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration(msg)) if msg.contains("focus")
        ));
    }

    #[test]
    fn test_adaptation_rate_range() {
        for bad in [-0.1, 1.1, f64::NAN] {
            let config = GacoConfig::default().with_adaptation_rate(bad);
            assert!(
                matches!(
                    config.validate(),
                    Err(Error::InvalidConfiguration(msg)) if msg.contains("adaptation_rate")
                ),
                "adaptation_rate {bad} should be rejected"
            );
        }
        assert!(GacoConfig::default().with_adaptation_rate(0.0).validate().is_ok());
        assert!(GacoConfig::default().with_adaptation_rate(1.0).validate().is_ok());
    }

    #[test]
    fn test_threshold_zero_rejected() {
        let config = GacoConfig::default().with_threshold(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_threshold_above_generations_rejected() {
        let config = GacoConfig::default().with_generations(2).with_threshold(3);
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration(msg)) if msg.contains("threshold")
        ));
    }

    #[test]
    fn test_threshold_unbounded_with_memory() {
        let config = GacoConfig::default()
            .with_generations(2)
            .with_threshold(3)
            .with_memory(true);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_kernel_size_too_small() {
        assert!(GacoConfig::default().with_kernel_size(0).validate().is_err());
        assert!(GacoConfig::default().with_kernel_size(1).validate().is_err());
        assert!(GacoConfig::default().with_kernel_size(2).validate().is_ok());
    }

    #[test]
    fn test_zero_windows_rejected() {
        assert!(GacoConfig::default().with_impstop_window(0).validate().is_err());
        assert!(GacoConfig::default().with_evalstop_window(0).validate().is_err());
        assert!(GacoConfig::default().with_stall_mark_window(0).validate().is_err());
    }

    #[test]
    fn test_first_violation_wins() {
        // Both kernel_size and accuracy are invalid; the kernel_size check
        // runs first.
        let config = GacoConfig::default().with_kernel_size(1).with_accuracy(-1.0);
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration(msg)) if msg.contains("kernel_size")
        ));
    }

    proptest! {
        // The valid threshold range depends on the generation budget, not
        // on any fixed magic constant.
        #[test]
        fn prop_threshold_valid_iff_within_generations(
            generations in 1u32..500,
            threshold in 0u32..600,
        ) {
            let config = GacoConfig::default()
                .with_generations(generations)
                .with_threshold(threshold);
            let ok = config.validate().is_ok();
            prop_assert_eq!(ok, threshold >= 1 && threshold <= generations);
        }

        #[test]
        fn prop_threshold_only_lower_bounded_with_memory(
            generations in 1u32..500,
            threshold in 0u32..600,
        ) {
            let config = GacoConfig::default()
                .with_generations(generations)
                .with_threshold(threshold)
                .with_memory(true);
            prop_assert_eq!(config.validate().is_ok(), threshold >= 1);
        }
    }
}
