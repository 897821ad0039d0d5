//! Parent selection for the EA.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use crate::search::Evaluated;
use rand::seq::index;
use rand::Rng;

/// Tournament selection: sample `k` distinct individuals, return the index
/// of the fittest. Ties go to the first one sampled.
///
/// `k` is clamped to `1..=population.len()`. Returns `None` for an empty
/// population.
pub(crate) fn tournament<R: Rng>(population: &[Evaluated], k: usize, rng: &mut R) -> Option<usize> {
    let n = population.len();
    if n == 0 {
        return None;
    }
    let k = k.clamp(1, n);

    let mut best: Option<usize> = None;
    for idx in index::sample(rng, n, k) {
        if best.is_none_or(|b| population[idx].fitness > population[b].fitness) {
            best = Some(idx);
        }
    }
    best
}
