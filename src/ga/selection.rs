//! Tournament selection.
//!
//! # References
//!
//! - Miller & Goldberg (1995), "Genetic Algorithms, Tournament Selection,
//!   and the Effects of Noise"

use rand::seq::index;
use rand::Rng;

/// Draws `tournament_size` distinct indices uniformly and returns the one
/// with the lowest fitness. Ties go to the earliest drawn.
///
/// # Panics
///
/// Panics if `tournament_size` is zero or exceeds `fitness.len()`;
/// [`GaConfig::validate`](super::GaConfig::validate) rules both out.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_cvrp::ga::tournament;
///
/// let fitness = [5.0, 1.0, 3.0];
/// let mut rng = StdRng::seed_from_u64(1);
/// // a full-size tournament always finds the global minimum
/// assert_eq!(tournament(&fitness, 3, &mut rng), 1);
/// ```
pub fn tournament<R: Rng>(fitness: &[f64], tournament_size: usize, rng: &mut R) -> usize {
    let picked = index::sample(rng, fitness.len(), tournament_size);
    let mut best = picked.index(0);
    for idx in picked.iter().skip(1) {
        if fitness[idx] < fitness[best] {
            best = idx;
        }
    }
    best
}
