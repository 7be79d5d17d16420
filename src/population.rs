//! Population container.
//!
//! [`Population`] owns a problem instance together with the decision and
//! fitness vectors of its members. The engine reads the initial content and
//! writes back only the final best-known solutions, preserving size.

use crate::error::{Error, Result};
use crate::problem::Problem;
use crate::random::create_rng;
use rand::Rng;

/// A set of evaluated candidate solutions for one problem.
#[derive(Debug, Clone)]
pub struct Population<P: Problem> {
    problem: P,
    x: Vec<Vec<f64>>,
    f: Vec<Vec<f64>>,
    fevals: u64,
}

impl<P: Problem> Population<P> {
    /// Creates a population of `size` members drawn uniformly within the
    /// problem's box bounds and evaluates each of them.
    ///
    /// Fails when the problem's bounds are malformed (length mismatch with
    /// [`dim`](Problem::dim), non-finite values, or a lower bound above its
    /// upper bound).
    pub fn random(problem: P, size: usize, seed: u64) -> Result<Self> {
        let (lb, ub) = problem.bounds();
        if lb.len() != problem.dim() || ub.len() != problem.dim() {
            return Err(Error::NotApplicable(format!(
                "problem '{}' reports dim {} but bounds of length {}/{}",
                problem.name(),
                problem.dim(),
                lb.len(),
                ub.len()
            )));
        }
        for j in 0..lb.len() {
            if !lb[j].is_finite() || !ub[j].is_finite() || lb[j] > ub[j] {
                return Err(Error::NotApplicable(format!(
                    "problem '{}' has invalid bounds [{}, {}] for variable {}",
                    problem.name(),
                    lb[j],
                    ub[j],
                    j
                )));
            }
        }

        let mut rng = create_rng(seed);
        let mut x = Vec::with_capacity(size);
        let mut f = Vec::with_capacity(size);
        for _ in 0..size {
            let xi: Vec<f64> = (0..problem.dim())
                .map(|j| {
                    if lb[j] < ub[j] {
                        rng.random_range(lb[j]..ub[j])
                    } else {
                        lb[j]
                    }
                })
                .collect();
            let fi = problem.fitness(&xi);
            x.push(xi);
            f.push(fi);
        }

        Ok(Self {
            problem,
            x,
            f,
            fevals: size as u64,
        })
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the population has no members.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// The decision vector of member `i`.
    pub fn x(&self, i: usize) -> &[f64] {
        &self.x[i]
    }

    /// The fitness vector of member `i`.
    pub fn f(&self, i: usize) -> &[f64] {
        &self.f[i]
    }

    /// Cumulative objective evaluations spent on this population.
    pub fn fevals(&self) -> u64 {
        self.fevals
    }

    /// The owned problem.
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Overwrites member `i` with an already-evaluated pair.
    ///
    /// # Panics
    ///
    /// Panics when `i` is out of range or the vector lengths do not match
    /// the problem's dimensionality and fitness layout.
    pub fn set_xf(&mut self, i: usize, x: &[f64], f: &[f64]) {
        assert!(i < self.x.len(), "population index {i} out of range");
        assert_eq!(x.len(), self.problem.dim(), "decision vector length mismatch");
        assert_eq!(f.len(), self.problem.fitness_len(), "fitness vector length mismatch");
        self.x[i] = x.to_vec();
        self.f[i] = f.to_vec();
    }

    /// Index of the best member: lowest objective among members whose
    /// constraints are all within tolerance, or the least-violating member
    /// when none is feasible.
    pub fn best_idx(&self) -> Option<usize> {
        (0..self.len()).min_by(|&a, &b| {
            let va = crate::gaco::penalty::violation(&self.f[a], &self.problem);
            let vb = crate::gaco::penalty::violation(&self.f[b], &self.problem);
            va.partial_cmp(&vb)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    self.f[a][0]
                        .partial_cmp(&self.f[b][0])
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
        })
    }
}
