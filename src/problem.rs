//! Core trait definition for optimization problems.
//!
//! [`Problem`] is the capability contract between the generic GACO engine
//! and domain-specific problem implementations. The engine depends only on
//! these capabilities, never on concrete problem types.

/// Defines a box-bounded optimization problem.
///
/// # Fitness layout
///
/// [`fitness`](Problem::fitness) returns a vector laid out as
/// `[objective, equalities..., inequalities...]`. An equality constraint is
/// satisfied when its value is 0 within the tolerance reported by
/// [`constraint_tolerance`](Problem::constraint_tolerance); an inequality
/// constraint is satisfied when its value is at most the tolerance.
///
/// # Minimization
///
/// The engine minimizes the objective. For maximization, negate it.
///
/// # Engine requirements
///
/// GACO handles deterministic, single-objective, continuous problems only.
/// Problems reporting more than one objective, any integer-only decision
/// variable, or stochastic evaluation are rejected before any evaluation
/// budget is spent.
///
/// # Implementing
///
/// ```
/// use gaco::problem::Problem;
///
/// struct Parabola;
///
/// impl Problem for Parabola {
///     fn dim(&self) -> usize { 1 }
///     fn bounds(&self) -> (Vec<f64>, Vec<f64>) { (vec![-10.0], vec![10.0]) }
///     fn fitness(&self, x: &[f64]) -> Vec<f64> { vec![x[0] * x[0]] }
/// }
/// ```
pub trait Problem {
    /// Decision-vector dimensionality. Must be at least 1.
    fn dim(&self) -> usize;

    /// Box bounds as `(lower, upper)`, each of length [`dim`](Problem::dim).
    fn bounds(&self) -> (Vec<f64>, Vec<f64>);

    /// Evaluates a decision vector.
    ///
    /// Returns `[objective, equalities..., inequalities...]`. Must be
    /// repeatable: identical inputs produce identical outputs.
    fn fitness(&self, x: &[f64]) -> Vec<f64>;

    /// Number of objectives. The engine requires exactly 1.
    fn objectives(&self) -> usize {
        1
    }

    /// Number of integer-only decision variables. The engine requires 0.
    fn integer_dim(&self) -> usize {
        0
    }

    /// Number of equality constraints.
    fn equality_constraints(&self) -> usize {
        0
    }

    /// Number of inequality constraints.
    fn inequality_constraints(&self) -> usize {
        0
    }

    /// Tolerance below which a constraint counts as satisfied.
    fn constraint_tolerance(&self) -> f64 {
        0.0
    }

    /// Whether evaluation is non-repeatable. The engine requires `false`.
    fn is_stochastic(&self) -> bool {
        false
    }

    /// Human-readable problem name.
    fn name(&self) -> String {
        "unnamed problem".into()
    }

    /// Expected length of the fitness vector.
    fn fitness_len(&self) -> usize {
        self.objectives() + self.equality_constraints() + self.inequality_constraints()
    }
}
