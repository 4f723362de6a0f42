//! Bounded FIFO of forbidden `(from, to)` moves.

use std::collections::VecDeque;

use crate::models::Solution;

/// Tabu list keyed by whole solutions.
///
/// A move is the pair of the solution being left and the solution being
/// entered. Once more than `tenure` moves are stored, the oldest is evicted.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Route, Solution};
/// use u_cvrp::tabu::TabuList;
///
/// let a = Solution::from_routes(vec![Route::from_customers(1, &[2, 3])]);
/// let b = Solution::from_routes(vec![Route::from_customers(1, &[3, 2])]);
///
/// let mut tabu = TabuList::new(1);
/// tabu.push(a.clone(), b.clone());
/// assert!(tabu.contains(&a, &b));
/// assert!(!tabu.contains(&b, &a));
///
/// tabu.push(b.clone(), a.clone());
/// assert!(!tabu.contains(&a, &b));
/// assert_eq!(tabu.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct TabuList {
    tenure: usize,
    moves: VecDeque<(Solution, Solution)>,
}

impl TabuList {
    /// Creates an empty list holding at most `tenure` moves.
    pub fn new(tenure: usize) -> Self {
        Self {
            tenure,
            moves: VecDeque::with_capacity(tenure + 1),
        }
    }

    /// Maximum number of stored moves.
    pub fn tenure(&self) -> usize {
        self.tenure
    }

    /// Records an accepted move, evicting from the front past the tenure.
    pub fn push(&mut self, from: Solution, to: Solution) {
        self.moves.push_back((from, to));
        while self.moves.len() > self.tenure {
            self.moves.pop_front();
        }
    }

    /// Returns true if moving from `from` to `to` is forbidden.
    pub fn contains(&self, from: &Solution, to: &Solution) -> bool {
        self.moves.iter().any(|(f, t)| f == from && t == to)
    }

    /// Solutions that are forbidden targets when leaving `from`.
    pub fn targets_from<'s>(&'s self, from: &'s Solution) -> impl Iterator<Item = &'s Solution> {
        self.moves
            .iter()
            .filter(move |(f, _)| f == from)
            .map(|(_, t)| t)
    }

    /// Number of stored moves.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns true if no move is stored.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Route;

    fn sol(customers: &[usize]) -> Solution {
        Solution::from_routes(vec![Route::from_customers(1, customers)])
    }

    #[test]
    fn test_fifo_eviction() {
        let mut tabu = TabuList::new(2);
        tabu.push(sol(&[2, 3, 4]), sol(&[3, 2, 4]));
        tabu.push(sol(&[3, 2, 4]), sol(&[4, 2, 3]));
        tabu.push(sol(&[4, 2, 3]), sol(&[2, 4, 3]));

        assert_eq!(tabu.len(), 2);
        assert!(!tabu.contains(&sol(&[2, 3, 4]), &sol(&[3, 2, 4])));
        assert!(tabu.contains(&sol(&[3, 2, 4]), &sol(&[4, 2, 3])));
        assert!(tabu.contains(&sol(&[4, 2, 3]), &sol(&[2, 4, 3])));
    }

    #[test]
    fn test_zero_tenure_keeps_nothing() {
        let mut tabu = TabuList::new(0);
        tabu.push(sol(&[2, 3]), sol(&[3, 2]));
        assert!(tabu.is_empty());
        assert!(!tabu.contains(&sol(&[2, 3]), &sol(&[3, 2])));
    }

    #[test]
    fn test_targets_from_filters_source() {
        let mut tabu = TabuList::new(5);
        let a = sol(&[2, 3, 4]);
        tabu.push(a.clone(), sol(&[3, 2, 4]));
        tabu.push(sol(&[3, 2, 4]), a.clone());
        tabu.push(a.clone(), sol(&[4, 3, 2]));

        let targets: Vec<_> = tabu.targets_from(&a).cloned().collect();
        assert_eq!(targets, vec![sol(&[3, 2, 4]), sol(&[4, 3, 2])]);
    }
}
