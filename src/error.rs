//! Crate error type.
//!
//! Two failure kinds surface to callers: a configuration that violates an
//! invariant (rejected atomically at construction), and a problem/population
//! combination the engine cannot evolve (rejected before any evaluation
//! budget is spent). Stagnation and reaching a fitness target are normal
//! termination, not errors.

use thiserror::Error;

/// Errors produced by the GACO engine.
#[derive(Debug, Error)]
pub enum Error {
    /// A constructor parameter violates its invariant.
    ///
    /// The message names the offending parameter and the violated bound.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The problem/population combination cannot be evolved by this engine.
    ///
    /// Raised before any objective evaluation occurs.
    #[error("cannot evolve: {0}")]
    NotApplicable(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
