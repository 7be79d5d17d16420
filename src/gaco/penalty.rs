//! Oracle penalty evaluation.
//!
//! Folds an (objective, constraint violation) pair into a single ranking
//! fitness relative to an adaptive "oracle" reference value, following
//! Schlüter & Gerdts (2010). Feasible solutions below the oracle are
//! rewarded by their distance to it; everything else pays a blend of
//! objective distance and violation whose mixing factor depends on which
//! of the two dominates. One rule ranks constrained and unconstrained
//! problems alike.

use crate::problem::Problem;

use super::types::RunState;

/// Aggregate constraint violation of a fitness vector.
///
/// Sums how far each equality constraint strays from 0 and each inequality
/// constraint rises above 0, after subtracting the problem's tolerance.
/// A return of 0 means feasible.
pub(crate) fn violation<P: Problem>(f: &[f64], problem: &P) -> f64 {
    let nec = problem.equality_constraints();
    let nic = problem.inequality_constraints();
    let tol = problem.constraint_tolerance();
    let mut total = 0.0;
    for &c in &f[1..1 + nec] {
        total += (c.abs() - tol).max(0.0);
    }
    for &c in &f[1 + nec..1 + nec + nic] {
        total += (c - tol).max(0.0);
    }
    total
}

/// Oracle-penalized ranking fitness.
///
/// `viol` is the aggregate violation from [`violation`]; `oracle` the
/// current reference value.
pub(crate) fn penalized_fitness(obj: f64, viol: f64, oracle: f64) -> f64 {
    let d = (obj - oracle).abs();
    if viol <= 0.0 && obj <= oracle {
        // Feasible at or below the oracle: negative, rewards proximity.
        return obj - oracle;
    }

    // Piecewise blending factor per Schlüter & Gerdts. The three regimes
    // compare the objective distance against the violation.
    let alpha = if obj > oracle {
        if viol < d / 3.0 {
            let num = d * (6.0 * 3f64.sqrt() - 2.0) / (6.0 * 3f64.sqrt()) - viol;
            num / (d - viol)
        } else if viol <= d {
            1.0 - 1.0 / (2.0 * (d / viol).sqrt())
        } else {
            0.5 * (d / viol).sqrt()
        }
    } else {
        0.0
    };

    alpha * d + (1.0 - alpha) * viol
}

/// Moves the oracle toward `target` (the generation's best feasible or
/// least-infeasible objective) by the configured fraction.
///
/// The oracle only tightens downward: a target above the current oracle
/// leaves it untouched.
pub(crate) fn adapt_oracle(state: &mut RunState, target: f64, rate: f64) {
    if target.is_finite() && target < state.oracle {
        state.oracle += rate * (target - state.oracle);
    }
}
