//! Extended Ant Colony Optimization (GACO) for continuous domains.
//!
//! A population-based kernel-density optimizer for single-objective,
//! deterministic, box-bounded problems, optionally constrained:
//!
//! - **Kernel model**: each generation the top-ranked solutions form a
//!   per-variable weighted Gaussian mixture — the continuous analogue of a
//!   pheromone table — from which the next generation is sampled.
//! - **Oracle penalty**: objective value and constraint violation fold into
//!   one ranking fitness relative to an adaptively tightening oracle, so
//!   constrained and unconstrained problems share one ranking rule.
//! - **Stopping watchdogs**: a generation budget plus three independent
//!   criteria (generation stagnation, evaluation stagnation, fitness
//!   target).
//! - **Determinism**: a single seeded stream drives every stochastic step;
//!   identical seed, configuration, and input reproduce a run bit-for-bit.
//!
//! # Architecture
//!
//! The engine depends only on the [`problem::Problem`] capability trait and
//! the [`population::Population`] container; it contains no domain-specific
//! concepts. [`problems`] ships a few classic benchmark functions used by
//! the tests and benches.
//!
//! # Example
//!
//! ```
//! use gaco::{Gaco, GacoConfig, Population};
//! use gaco::problems::Rosenbrock;
//!
//! let config = GacoConfig::default()
//!     .with_generations(20)
//!     .with_kernel_size(10)
//!     .with_seed(23);
//! let mut engine = Gaco::new(config)?;
//! engine.set_verbosity(1);
//!
//! let pop = Population::random(Rosenbrock { dim: 2 }, 30, 23)?;
//! let pop = engine.evolve(pop)?;
//! assert_eq!(pop.len(), 30);
//! # Ok::<(), gaco::Error>(())
//! ```

pub mod error;
pub mod gaco;
pub mod population;
pub mod problem;
pub mod problems;
pub mod random;

pub use error::Error;
pub use gaco::{Gaco, GacoConfig, LogRecord, StopReason};
pub use population::Population;
pub use problem::Problem;
