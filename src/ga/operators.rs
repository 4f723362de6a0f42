//! Variation operators: order crossover and swap mutation.
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains" (OX)

use rand::seq::index;
use rand::Rng;

use crate::models::Solution;

/// Order crossover (OX) on two customer permutations.
///
/// Copies `parent1[cut1..cut2)` into the child at the same positions, then
/// fills the remaining slots left to right with `parent2`'s customers in
/// their original order, skipping those already placed.
///
/// Both parents must be permutations of the same customer set.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_cvrp::ga::order_crossover;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let p1 = vec![2, 3, 4, 5, 6];
/// let p2 = vec![6, 5, 4, 3, 2];
/// let mut child = order_crossover(&p1, &p2, &mut rng);
/// child.sort();
/// assert_eq!(child, vec![2, 3, 4, 5, 6]);
/// ```
pub fn order_crossover<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let n = parent1.len();
    debug_assert_eq!(n, parent2.len(), "parents must have equal length");
    if n == 0 {
        return Vec::new();
    }

    let mut cut1 = rng.random_range(0..n);
    let mut cut2 = rng.random_range(0..n);
    if cut1 > cut2 {
        std::mem::swap(&mut cut1, &mut cut2);
    }

    ox_build_child(parent1, parent2, cut1, cut2)
}

fn ox_build_child(parent1: &[usize], parent2: &[usize], cut1: usize, cut2: usize) -> Vec<usize> {
    let max_id = parent1
        .iter()
        .chain(parent2)
        .copied()
        .max()
        .unwrap_or(0);
    let mut used = vec![false; max_id + 1];
    let mut child: Vec<Option<usize>> = vec![None; parent1.len()];

    for i in cut1..cut2 {
        child[i] = Some(parent1[i]);
        used[parent1[i]] = true;
    }

    // single forward cursor into parent2
    let mut cursor = 0;
    for slot in child.iter_mut().filter(|s| s.is_none()) {
        while used[parent2[cursor]] {
            cursor += 1;
        }
        let gene = parent2[cursor];
        used[gene] = true;
        *slot = Some(gene);
    }

    child.into_iter().flatten().collect()
}

/// Swap mutation applied independently to every route.
///
/// Each route with more than one customer is mutated with probability
/// `mutation_rate`: two distinct customer positions are drawn uniformly and
/// exchanged. Depot endpoints are never touched.
pub fn swap_mutation<R: Rng>(solution: &mut Solution, mutation_rate: f64, rng: &mut R) {
    for route in solution.routes_mut() {
        if route.len() > 1 && rng.random_range(0.0..1.0) < mutation_rate {
            let picked = index::sample(rng, route.len(), 2);
            route.swap_customers(picked.index(0), picked.index(1));
        }
    }
}
