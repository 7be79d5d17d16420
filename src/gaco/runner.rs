//! GACO engine and evolve loop.
//!
//! [`Gaco`] orchestrates one run: evaluate → rank → update kernel and
//! oracle → sample → re-evaluate → check stopping → log. The engine's
//! full observable state (configuration, oracle, seed, accumulated log)
//! serializes and round-trips.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::population::Population;
use crate::problem::Problem;
use crate::random::create_rng;

use super::config::GacoConfig;
use super::kernel::{rank_candidates, KernelModel};
use super::penalty::{adapt_oracle, penalized_fitness, violation};
use super::types::{Candidate, LogRecord, RunState, StopReason};

/// The GACO optimization engine.
///
/// Construct with a validated [`GacoConfig`], then call
/// [`evolve`](Gaco::evolve) with an initial [`Population`]. Repeated calls
/// start from a clean slate unless the configuration enables memory, in
/// which case the oracle, the stagnation counters, and the log carry over.
///
/// ```
/// use gaco::{Gaco, GacoConfig, Population};
/// use gaco::problems::Sphere;
///
/// let config = GacoConfig::default()
///     .with_generations(10)
///     .with_kernel_size(5)
///     .with_seed(23);
/// let mut engine = Gaco::new(config).unwrap();
/// engine.set_verbosity(1);
///
/// let pop = Population::random(Sphere { dim: 2 }, 20, 23).unwrap();
/// let pop = engine.evolve(pop).unwrap();
/// assert!(!engine.get_log().is_empty());
/// assert_eq!(pop.len(), 20);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gaco {
    config: GacoConfig,
    verbosity: u32,
    seed: u64,
    log: Vec<LogRecord>,
    state: Option<RunState>,
    last_stop: Option<StopReason>,
}

impl Gaco {
    /// Creates an engine from a configuration.
    ///
    /// Fails with [`Error::InvalidConfiguration`] naming the first violated
    /// invariant; no engine instance is produced on failure.
    pub fn new(config: GacoConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.seed;
        Ok(Self {
            config,
            verbosity: 0,
            seed,
            log: Vec::new(),
            state: None,
            last_stop: None,
        })
    }

    /// Sets the logging verbosity: 0 disables the log, `n > 0` records
    /// every `n`-th generation.
    pub fn set_verbosity(&mut self, verbosity: u32) {
        self.verbosity = verbosity;
    }

    /// Current verbosity.
    pub fn get_verbosity(&self) -> u32 {
        self.verbosity
    }

    /// Reseeds the random stream for the next run.
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
    }

    /// Current seed.
    pub fn get_seed(&self) -> u64 {
        self.seed
    }

    /// The ordered generation log. Never fails; empty when verbosity is 0
    /// or no run has happened.
    pub fn get_log(&self) -> &[LogRecord] {
        &self.log
    }

    /// Why the most recent `evolve` call stopped, if any has completed.
    pub fn last_stop_reason(&self) -> Option<StopReason> {
        self.last_stop
    }

    /// The engine configuration.
    pub fn config(&self) -> &GacoConfig {
        &self.config
    }

    /// Algorithm name.
    pub fn get_name(&self) -> String {
        "GACO: Ant Colony Optimization".into()
    }

    /// One formatted line per parameter, for diagnostics.
    pub fn get_extra_info(&self) -> String {
        format!(
            "\tGenerations: {}\n\tKernel size: {}\n\tConvergence speed parameter: {}\n\
             \tOracle parameter: {}\n\tAccuracy parameter: {}\n\tThreshold parameter: {}\n\
             \tStopping fitness: {}\n\tGeneration mark: {}\n\tImprovement stop: {}\n\
             \tEvaluation stop: {}\n\tFocus parameter: {}\n\tMemory: {}\n\
             \tAdaptation rate: {}\n\tSeed: {}\n\tVerbosity: {}",
            self.config.generations,
            self.config.kernel_size,
            self.config.convergence_speed,
            self.config.oracle_init,
            self.config.accuracy,
            self.config.threshold,
            self.config.fitness_stop,
            self.config.stall_mark_window,
            self.config.impstop_window,
            self.config.evalstop_window,
            self.config.focus,
            self.config.memory,
            self.config.adaptation_rate,
            self.seed,
            self.verbosity,
        )
    }

    /// Runs the evolution and returns the population with the final
    /// best-known solutions written back (size preserved).
    ///
    /// Fails with [`Error::NotApplicable`] before any evaluation when the
    /// problem is multi-objective, has integer decision variables, is
    /// stochastic, or the population is empty or smaller than the kernel.
    /// A zero-generation budget returns the population untouched.
    pub fn evolve<P: Problem>(&mut self, mut pop: Population<P>) -> Result<Population<P>> {
        self.check_applicability(&pop)?;
        if self.config.generations == 0 {
            return Ok(pop);
        }
        let ker = self.config.kernel_size as usize;
        if pop.len() < ker {
            return Err(Error::NotApplicable(format!(
                "population of size {} is smaller than the kernel size {}",
                pop.len(),
                ker
            )));
        }

        if !self.config.memory {
            self.log.clear();
            self.state = None;
            self.last_stop = None;
        }
        let mut state = self
            .state
            .take()
            .unwrap_or_else(|| RunState::fresh(self.config.oracle_init, pop.fevals()));

        let mut rng = create_rng(self.seed);
        let (lb, ub) = pop.problem().bounds();

        // The initial population arrives evaluated; no budget is spent on it.
        let mut birth = 0u64;
        let mut current: Vec<Candidate> = (0..pop.len())
            .map(|i| {
                let c = make_candidate(pop.x(i), pop.f(i), pop.problem(), birth);
                birth += 1;
                c
            })
            .collect();

        let mut basis: Vec<Candidate> = Vec::new();
        let mut stop: Option<StopReason> = None;

        for g in 1..=self.config.generations {
            state.generation += 1;
            let evals_this_gen = if g == 1 { 0 } else { pop.len() as u64 };

            // Rank the union of the kernel basis and the current batch
            // against the current oracle; the top slice becomes the new
            // basis, so best-so-far solutions persist.
            let mut pool = std::mem::take(&mut basis);
            pool.extend(current.iter().cloned());
            for c in &mut pool {
                c.penalty = penalized_fitness(c.obj, c.violation, state.oracle);
            }
            rank_candidates(&mut pool);
            pool.truncate(ker);
            basis = pool;

            let (best_viol, best_obj) = lexicographic_best(&basis);
            adapt_oracle(&mut state, best_obj, self.config.adaptation_rate);

            // Improvement: violation strictly drops, or ties while the
            // objective drops by more than the accuracy resolution.
            let improved = best_viol < state.best_violation
                || (best_viol == state.best_violation
                    && best_obj < state.best_obj - self.config.accuracy);
            if improved {
                state.best_violation = best_viol;
                state.best_obj = best_obj;
                state.gens_since_improvement = 0;
                state.evals_since_improvement = 0;
            } else {
                state.gens_since_improvement += 1;
                state.evals_since_improvement += evals_this_gen;
            }

            // Convergence pressure: q snaps down once the threshold
            // generation is reached.
            let q_eff = if state.generation >= self.config.threshold {
                0.01
            } else {
                self.config.convergence_speed
            };
            let model = KernelModel::build(
                &basis,
                q_eff,
                self.config.focus,
                state.generation,
                self.config.stall_mark_window,
                self.config.accuracy,
                &lb,
                &ub,
            );

            stop = if g == self.config.generations {
                Some(StopReason::MaxGenerations)
            } else if state.gens_since_improvement >= self.config.impstop_window {
                Some(StopReason::NoImprovementGenerations)
            } else if state.evals_since_improvement >= self.config.evalstop_window {
                Some(StopReason::NoImprovementEvaluations)
            } else if state.best_violation <= 0.0 && state.best_obj <= self.config.fitness_stop {
                Some(StopReason::FitnessTargetReached)
            } else {
                None
            };

            if self.verbosity > 0 && (g - 1) % self.verbosity == 0 {
                let feasible_count = current.iter().filter(|c| c.violation <= 0.0).count() as u32;
                let record = LogRecord {
                    generation: state.generation,
                    evaluations: state.fevals,
                    best_fitness: state.best_obj,
                    dx: batch_spread(&current),
                    feasible_count,
                    violation: state.best_violation,
                    oracle: state.oracle,
                    kernel_spread: model.spread(),
                    focus_effective: model.focus_divisor,
                };
                debug!(
                    "gen {:>5} fevals {:>8} best {:<12.6e} oracle {:<12.6e} spread {:.3e}",
                    record.generation,
                    record.evaluations,
                    record.best_fitness,
                    record.oracle,
                    record.kernel_spread
                );
                self.log.push(record);
            }

            if let Some(reason) = stop {
                info!(
                    "gaco stopped after generation {} ({}), best fitness {:e}",
                    state.generation, reason, state.best_obj
                );
                break;
            }

            current = (0..pop.len())
                .map(|_| {
                    let x = model.sample(&mut rng);
                    let f = pop.problem().fitness(&x);
                    state.fevals += 1;
                    let c = make_candidate(&x, &f, pop.problem(), birth);
                    birth += 1;
                    c
                })
                .collect();
        }

        // Write the final best-known solutions back, preserving size.
        let mut fin = basis;
        fin.extend(current);
        for c in &mut fin {
            c.penalty = penalized_fitness(c.obj, c.violation, state.oracle);
        }
        rank_candidates(&mut fin);
        fin.dedup_by_key(|c| c.birth);
        for (i, c) in fin.iter().take(pop.len()).enumerate() {
            pop.set_xf(i, &c.x, &c.f);
        }

        self.last_stop = stop;
        if self.config.memory {
            self.state = Some(state);
        }
        Ok(pop)
    }

    /// Rejects problem/population combinations the engine cannot handle,
    /// before any evaluation budget is spent.
    fn check_applicability<P: Problem>(&self, pop: &Population<P>) -> Result<()> {
        let prob = pop.problem();
        if prob.objectives() != 1 {
            return Err(Error::NotApplicable(format!(
                "'{}' has {} objectives, GACO handles exactly one",
                prob.name(),
                prob.objectives()
            )));
        }
        if prob.integer_dim() != 0 {
            return Err(Error::NotApplicable(format!(
                "'{}' has {} integer decision variables, GACO handles continuous variables only",
                prob.name(),
                prob.integer_dim()
            )));
        }
        if prob.is_stochastic() {
            return Err(Error::NotApplicable(format!(
                "'{}' is stochastic, GACO requires repeatable evaluation",
                prob.name()
            )));
        }
        if pop.is_empty() {
            return Err(Error::NotApplicable("the population is empty".into()));
        }
        Ok(())
    }
}

fn make_candidate<P: Problem>(x: &[f64], f: &[f64], problem: &P, birth: u64) -> Candidate {
    Candidate {
        x: x.to_vec(),
        obj: f[0],
        violation: violation(f, problem),
        penalty: 0.0,
        f: f.to_vec(),
        birth,
    }
}

/// Best (violation, objective) pair of the basis, violation first.
fn lexicographic_best(basis: &[Candidate]) -> (f64, f64) {
    let mut best = (f64::INFINITY, f64::INFINITY);
    for c in basis {
        if c.violation < best.0 || (c.violation == best.0 && c.obj < best.1) {
            best = (c.violation, c.obj);
        }
    }
    best
}

/// Mean per-variable range of a batch of candidates.
fn batch_spread(batch: &[Candidate]) -> f64 {
    if batch.is_empty() {
        return 0.0;
    }
    let dim = batch[0].x.len();
    let mut total = 0.0;
    for j in 0..dim {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for c in batch {
            lo = lo.min(c.x[j]);
            hi = hi.max(c.x[j]);
        }
        total += hi - lo;
    }
    total / dim as f64
}
