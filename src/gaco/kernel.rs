//! Kernel model construction and sampling.
//!
//! The pheromone analogue: a per-variable weighted Gaussian mixture built
//! from the top-ranked candidates of the current generation. Mixture
//! weights fall off with rank at a rate set by the convergence speed `q`;
//! the spread comes from the average pairwise distance among the kernel
//! coordinates and narrows as focus and elapsed generations grow.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::cmp::Ordering;

use super::types::Candidate;

/// Ranks candidates in place: penalized fitness ascending, ties broken by
/// lower violation, then by earlier discovery.
pub(crate) fn rank_candidates(pool: &mut [Candidate]) {
    pool.sort_by(|a, b| {
        a.penalty
            .partial_cmp(&b.penalty)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                a.violation
                    .partial_cmp(&b.violation)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| a.birth.cmp(&b.birth))
    });
}

/// The per-generation sampling model.
pub(crate) struct KernelModel {
    /// Kernel decision vectors, ranked best first.
    means: Vec<Vec<f64>>,
    /// Cumulative mixture weights, normalized to end at 1.
    cum_weights: Vec<f64>,
    /// Per-variable standard deviation.
    sd: Vec<f64>,
    /// Box bounds for clipping.
    lb: Vec<f64>,
    ub: Vec<f64>,
    /// Divisor applied by the focus schedule (0 when focus is off).
    pub focus_divisor: f64,
}

impl KernelModel {
    /// Builds the mixture from a ranked kernel basis.
    ///
    /// `q` is the effective convergence speed for this generation,
    /// `elapsed` the generation counter and `gen_mark` the `n_gen_mark`
    /// schedule parameter. The basis must hold at least two candidates.
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        basis: &[Candidate],
        q: f64,
        focus: f64,
        elapsed: u32,
        gen_mark: u32,
        accuracy: f64,
        lb: &[f64],
        ub: &[f64],
    ) -> Self {
        let k = basis.len();
        let dim = lb.len();

        let cum_weights = rank_weights(k, q);

        // Spread per variable: mean absolute pairwise difference among the
        // kernel coordinates, floored at the accuracy resolution.
        let focus_divisor = if focus > 0.0 {
            focus * (1.0 + f64::from(elapsed) / f64::from(gen_mark))
        } else {
            0.0
        };
        let mut sd = Vec::with_capacity(dim);
        for j in 0..dim {
            let mut total = 0.0;
            let mut pairs = 0u64;
            for a in 0..k {
                for b in a + 1..k {
                    total += (basis[a].x[j] - basis[b].x[j]).abs();
                    pairs += 1;
                }
            }
            let mut s = if pairs > 0 { total / pairs as f64 } else { 0.0 };
            s = s.max(accuracy);
            if focus_divisor > 0.0 {
                s = s.min((ub[j] - lb[j]) / focus_divisor);
            }
            sd.push(s);
        }

        Self {
            means: basis.iter().map(|c| c.x.clone()).collect(),
            cum_weights,
            sd,
            lb: lb.to_vec(),
            ub: ub.to_vec(),
            focus_divisor,
        }
    }

    /// Draws one decision vector.
    ///
    /// Each variable independently picks a mixture component by weight and
    /// samples its Gaussian, clipping to the box bounds.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        (0..self.lb.len())
            .map(|j| {
                let u: f64 = rng.random_range(0.0..1.0);
                let idx = self
                    .cum_weights
                    .iter()
                    .position(|&c| u <= c)
                    .unwrap_or(self.cum_weights.len() - 1);
                let mean = self.means[idx][j];
                let s = self.sd[j];
                let v = if s > 0.0 {
                    match Normal::new(mean, s) {
                        Ok(n) => n.sample(rng),
                        Err(_) => mean,
                    }
                } else {
                    mean
                };
                v.clamp(self.lb[j], self.ub[j])
            })
            .collect()
    }

    /// Mean per-variable standard deviation, reported in the log.
    pub fn spread(&self) -> f64 {
        if self.sd.is_empty() {
            0.0
        } else {
            self.sd.iter().sum::<f64>() / self.sd.len() as f64
        }
    }
}

/// Gaussian rank weights of the continuous ant colony model, returned as a
/// cumulative distribution. A vanishing `q` degenerates to all weight on
/// rank 1.
fn rank_weights(k: usize, q: f64) -> Vec<f64> {
    let mut weights = vec![0.0; k];
    if q <= f64::EPSILON {
        weights[0] = 1.0;
    } else {
        let qk = q * k as f64;
        for (i, w) in weights.iter_mut().enumerate() {
            let r = i as f64;
            *w = (-r * r / (2.0 * qk * qk)).exp() / (qk * (2.0 * std::f64::consts::PI).sqrt());
        }
        let total: f64 = weights.iter().sum();
        for w in &mut weights {
            *w /= total;
        }
    }
    let mut cum = 0.0;
    for w in &mut weights {
        cum += *w;
        *w = cum;
    }
    // Guard against the last entry landing a hair under 1.
    if let Some(last) = weights.last_mut() {
        *last = 1.0;
    }
    weights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn candidate(x: Vec<f64>, penalty: f64, violation: f64, birth: u64) -> Candidate {
        Candidate {
            obj: penalty,
            f: vec![penalty],
            x,
            violation,
            penalty,
            birth,
        }
    }

    #[test]
    fn test_ranking_order_and_ties() {
        let mut pool = vec![
            candidate(vec![0.0], 2.0, 0.0, 0),
            candidate(vec![1.0], 1.0, 0.5, 1),
            candidate(vec![2.0], 1.0, 0.1, 2),
            candidate(vec![3.0], 1.0, 0.1, 0),
        ];
        rank_candidates(&mut pool);
        // Equal penalty: lower violation wins; equal violation: earlier
        // discovery wins.
        assert_eq!(pool[0].birth, 0);
        assert_eq!(pool[0].x, vec![3.0]);
        assert_eq!(pool[1].birth, 2);
        assert_eq!(pool[2].birth, 1);
        assert_eq!(pool[3].x, vec![0.0]);
    }

    #[test]
    fn test_rank_weights_decrease_with_rank() {
        let cum = rank_weights(10, 0.1);
        // Cumulative and properly terminated.
        assert_eq!(*cum.last().unwrap(), 1.0);
        let mut prev = 0.0;
        let mut first_increment = None;
        for (i, &c) in cum.iter().enumerate() {
            let w = c - prev;
            assert!(w >= -1e-15, "negative weight at rank {i}");
            if let Some(f) = first_increment {
                assert!(w <= f + 1e-15, "weights must not grow with rank");
            } else {
                first_increment = Some(w);
            }
            prev = c;
        }
    }

    #[test]
    fn test_small_q_is_greedy() {
        let cum = rank_weights(10, 0.01);
        // Nearly all mass on the best rank.
        assert!(cum[0] > 0.99);
    }

    #[test]
    fn test_zero_q_degenerates() {
        let cum = rank_weights(5, 0.0);
        assert_eq!(cum[0], 1.0);
    }

    #[test]
    fn test_large_q_flattens() {
        let cum = rank_weights(10, 10.0);
        // First rank holds roughly 1/k of the mass.
        assert!(cum[0] < 0.2);
    }

    fn basis_2d() -> Vec<Candidate> {
        vec![
            candidate(vec![0.0, 1.0], 0.0, 0.0, 0),
            candidate(vec![1.0, 3.0], 1.0, 0.0, 1),
            candidate(vec![2.0, 5.0], 2.0, 0.0, 2),
        ]
    }

    #[test]
    fn test_spread_from_pairwise_distances() {
        let model = KernelModel::build(
            &basis_2d(),
            1.0,
            0.0,
            1,
            7,
            0.0,
            &[-10.0, -10.0],
            &[10.0, 10.0],
        );
        // Variable 0: pairwise diffs 1, 2, 1 -> mean 4/3.
        // Variable 1: pairwise diffs 2, 4, 2 -> mean 8/3.
        assert!((model.sd[0] - 4.0 / 3.0).abs() < 1e-12);
        assert!((model.sd[1] - 8.0 / 3.0).abs() < 1e-12);
        assert!((model.spread() - 2.0).abs() < 1e-12);
        assert_eq!(model.focus_divisor, 0.0);
    }

    #[test]
    fn test_focus_caps_spread_and_narrows_over_time() {
        let lb = [-10.0, -10.0];
        let ub = [10.0, 10.0];
        let early = KernelModel::build(&basis_2d(), 1.0, 10.0, 1, 7, 0.0, &lb, &ub);
        let late = KernelModel::build(&basis_2d(), 1.0, 10.0, 70, 7, 0.0, &lb, &ub);
        assert!(early.focus_divisor > 0.0);
        assert!(late.focus_divisor > early.focus_divisor);
        for j in 0..2 {
            assert!(late.sd[j] <= early.sd[j]);
            assert!(early.sd[j] <= (ub[j] - lb[j]) / early.focus_divisor + 1e-12);
        }
    }

    #[test]
    fn test_accuracy_floors_spread() {
        let degenerate = vec![
            candidate(vec![1.0], 0.0, 0.0, 0),
            candidate(vec![1.0], 0.0, 0.0, 1),
        ];
        let model = KernelModel::build(&degenerate, 1.0, 0.0, 1, 7, 0.05, &[-5.0], &[5.0]);
        assert!((model.sd[0] - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_samples_stay_in_bounds() {
        let mut rng = create_rng(23);
        let model = KernelModel::build(
            &basis_2d(),
            1.0,
            0.0,
            1,
            7,
            0.0,
            &[-1.0, -1.0],
            &[1.0, 1.0],
        );
        for _ in 0..500 {
            let x = model.sample(&mut rng);
            assert_eq!(x.len(), 2);
            for &v in &x {
                assert!((-1.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn test_sampling_is_deterministic() {
        let model = KernelModel::build(
            &basis_2d(),
            1.0,
            0.0,
            1,
            7,
            0.0,
            &[-10.0, -10.0],
            &[10.0, 10.0],
        );
        let mut a = create_rng(7);
        let mut b = create_rng(7);
        for _ in 0..50 {
            assert_eq!(model.sample(&mut a), model.sample(&mut b));
        }
    }

    #[test]
    fn test_zero_spread_collapses_to_means() {
        let degenerate = vec![
            candidate(vec![0.25], 0.0, 0.0, 0),
            candidate(vec![0.25], 0.0, 0.0, 1),
        ];
        let model = KernelModel::build(&degenerate, 1.0, 0.0, 1, 7, 0.0, &[0.0], &[1.0]);
        let mut rng = create_rng(23);
        for _ in 0..20 {
            assert_eq!(model.sample(&mut rng), vec![0.25]);
        }
    }
}
