//! Benchmark problems.
//!
//! A small set of classic test functions used throughout the crate's tests
//! and benches: the unconstrained Rosenbrock and Sphere functions, and the
//! constrained Hock-Schittkowski problem 71.

use crate::problem::Problem;

/// The Rosenbrock function, box-bounded to `[-5, 10]^dim`.
///
/// Global minimum 0 at `(1, ..., 1)`. The narrow curved valley makes it a
/// standard stress test for continuous optimizers.
#[derive(Debug, Clone)]
pub struct Rosenbrock {
    /// Dimensionality, at least 2.
    pub dim: usize,
}

impl Problem for Rosenbrock {
    fn dim(&self) -> usize {
        self.dim
    }

    fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
        (vec![-5.0; self.dim], vec![10.0; self.dim])
    }

    fn fitness(&self, x: &[f64]) -> Vec<f64> {
        let mut f = 0.0;
        for i in 0..self.dim - 1 {
            f += 100.0 * (x[i + 1] - x[i] * x[i]).powi(2) + (1.0 - x[i]).powi(2);
        }
        vec![f]
    }

    fn name(&self) -> String {
        "Rosenbrock".into()
    }
}

/// The Sphere function, box-bounded to `[-5.12, 5.12]^dim`.
///
/// Global minimum 0 at the origin.
#[derive(Debug, Clone)]
pub struct Sphere {
    /// Dimensionality, at least 1.
    pub dim: usize,
}

impl Problem for Sphere {
    fn dim(&self) -> usize {
        self.dim
    }

    fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
        (vec![-5.12; self.dim], vec![5.12; self.dim])
    }

    fn fitness(&self, x: &[f64]) -> Vec<f64> {
        vec![x.iter().map(|v| v * v).sum()]
    }

    fn name(&self) -> String {
        "Sphere".into()
    }
}

/// Hock-Schittkowski problem 71: 4 variables in `[1, 5]`, one equality
/// and one inequality constraint.
///
/// Minimize `x1*x4*(x1 + x2 + x3) + x3` subject to
/// `x1^2 + x2^2 + x3^2 + x4^2 = 40` and `x1*x2*x3*x4 >= 25`.
/// Known optimum ~17.014 at `(1, 4.743, 3.821, 1.379)`.
#[derive(Debug, Clone, Default)]
pub struct HockSchittkowski71 {
    /// Constraint tolerance; 0 demands exact satisfaction.
    pub c_tol: f64,
}

impl Problem for HockSchittkowski71 {
    fn dim(&self) -> usize {
        4
    }

    fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
        (vec![1.0; 4], vec![5.0; 4])
    }

    fn fitness(&self, x: &[f64]) -> Vec<f64> {
        let obj = x[0] * x[3] * (x[0] + x[1] + x[2]) + x[2];
        let eq = x[0] * x[0] + x[1] * x[1] + x[2] * x[2] + x[3] * x[3] - 40.0;
        // <= 0 convention
        let ineq = 25.0 - x[0] * x[1] * x[2] * x[3];
        vec![obj, eq, ineq]
    }

    fn equality_constraints(&self) -> usize {
        1
    }

    fn inequality_constraints(&self) -> usize {
        1
    }

    fn constraint_tolerance(&self) -> f64 {
        self.c_tol
    }

    fn name(&self) -> String {
        "Hock-Schittkowski 71".into()
    }
}
