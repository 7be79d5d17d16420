//! Extended Ant Colony Optimization (GACO).
//!
//! A population-based kernel-density optimizer for single-objective,
//! deterministic, box-bounded problems, optionally constrained. Each
//! generation the best-ranked solutions ("ants") form a per-variable
//! weighted Gaussian mixture — the continuous analogue of a pheromone
//! table — from which the next generation is sampled. Constraints are
//! folded into a single ranking fitness by an adaptive oracle penalty.
//!
//! # References
//!
//! Schlüter, Egea & Banga (2009), "Extended ant colony optimization for
//! non-convex mixed integer nonlinear programming"
//!
//! Schlüter & Gerdts (2010), "The oracle penalty method"

mod config;
mod kernel;
pub(crate) mod penalty;
mod runner;
mod types;

pub use config::GacoConfig;
pub use runner::Gaco;
pub use types::{LogRecord, StopReason};
