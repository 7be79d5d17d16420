//! Record and state types for the GACO engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One generation-summary entry of the engine log.
///
/// The three integer fields round-trip serialization bit-for-bit; the six
/// real fields round-trip within floating-point tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Generation counter (cumulative across runs when memory is on).
    pub generation: u32,
    /// Cumulative objective evaluations spent.
    pub evaluations: u64,
    /// Best objective found so far.
    pub best_fitness: f64,
    /// Population spread: mean per-variable range of the current batch.
    pub dx: f64,
    /// Feasible candidates in the current batch.
    pub feasible_count: u32,
    /// Aggregate constraint violation of the best solution so far.
    pub violation: f64,
    /// Current oracle reference value.
    pub oracle: f64,
    /// Mean per-variable standard deviation of the sampling kernel.
    pub kernel_spread: f64,
    /// Divisor applied by the focus schedule this generation (0 when
    /// focus is disabled).
    pub focus_effective: f64,
}

/// Why an `evolve` call terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// The generation budget was exhausted.
    MaxGenerations,
    /// No improvement for `impstop_window` consecutive generations.
    NoImprovementGenerations,
    /// No improvement within `evalstop_window` objective evaluations.
    NoImprovementEvaluations,
    /// The best feasible objective reached `fitness_stop`.
    FitnessTargetReached,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StopReason::MaxGenerations => "max-generations",
            StopReason::NoImprovementGenerations => "no-improvement-generations",
            StopReason::NoImprovementEvaluations => "no-improvement-evaluations",
            StopReason::FitnessTargetReached => "fitness-target-reached",
        };
        f.write_str(s)
    }
}

/// One sampled solution ("ant") within a run.
///
/// Created and dropped generation by generation; never shared across runs.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    /// Decision vector.
    pub x: Vec<f64>,
    /// Raw fitness vector `[objective, equalities..., inequalities...]`.
    pub f: Vec<f64>,
    /// Cached objective (`f[0]`).
    pub obj: f64,
    /// Aggregate constraint violation.
    pub violation: f64,
    /// Oracle-penalized ranking fitness.
    pub penalty: f64,
    /// Discovery index, used as the final ranking tie-break.
    pub birth: u64,
}

/// Mutable per-run context: oracle state and stagnation counters.
///
/// Lives on the engine only between `evolve` calls with memory enabled;
/// otherwise every run starts from a fresh instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct RunState {
    /// Current oracle reference value.
    pub oracle: f64,
    /// Best objective seen, paired with `best_violation`.
    pub best_obj: f64,
    /// Lowest aggregate violation seen.
    pub best_violation: f64,
    /// Generations executed (cumulative across runs with memory).
    pub generation: u32,
    /// Cumulative objective evaluations.
    pub fevals: u64,
    /// Generations since the last improvement.
    pub gens_since_improvement: u32,
    /// Objective evaluations since the last improvement.
    pub evals_since_improvement: u64,
}

impl RunState {
    /// A fresh context for a run starting from `fevals` already-spent
    /// evaluations (the initial population arrives evaluated).
    pub fn fresh(oracle_init: f64, fevals: u64) -> Self {
        Self {
            oracle: oracle_init,
            best_obj: f64::INFINITY,
            best_violation: f64::INFINITY,
            generation: 0,
            fevals,
            gens_since_improvement: 0,
            evals_since_improvement: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_reason_display() {
        assert_eq!(StopReason::MaxGenerations.to_string(), "max-generations");
        assert_eq!(
            StopReason::NoImprovementGenerations.to_string(),
            "no-improvement-generations"
        );
        assert_eq!(
            StopReason::NoImprovementEvaluations.to_string(),
            "no-improvement-evaluations"
        );
        assert_eq!(
            StopReason::FitnessTargetReached.to_string(),
            "fitness-target-reached"
        );
    }

    #[test]
    fn test_fresh_run_state() {
        let state = RunState::fresh(1e9, 15);
        assert_eq!(state.oracle, 1e9);
        assert_eq!(state.generation, 0);
        assert_eq!(state.fevals, 15);
        assert_eq!(state.gens_since_improvement, 0);
        assert!(state.best_obj.is_infinite());
    }

    #[test]
    fn test_log_record_roundtrip_integers() {
        let rec = LogRecord {
            generation: 7,
            evaluations: 140,
            best_fitness: 0.123456789,
            dx: 1.5,
            feasible_count: 20,
            violation: 0.0,
            oracle: 0.2,
            kernel_spread: 0.05,
            focus_effective: 0.0,
        };
        let json = serde_json::to_string(&rec).unwrap();
        let back: LogRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.generation, rec.generation);
        assert_eq!(back.evaluations, rec.evaluations);
        assert_eq!(back.feasible_count, rec.feasible_count);
    }
}
