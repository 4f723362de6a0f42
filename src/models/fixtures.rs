//! Instances shared by unit tests.

use proptest::prelude::*;

use super::{Demand, Instance, NodeCoord};

/// Depot at (0,0), customers 2 at (2,0) and 3 at (4,0), demand 5 each, capacity 10.
pub(crate) fn two_on_a_line() -> Instance {
    Instance::new(
        3,
        10,
        vec![
            NodeCoord::new(1, 0.0, 0.0),
            NodeCoord::new(2, 2.0, 0.0),
            NodeCoord::new(3, 4.0, 0.0),
        ],
        vec![Demand::new(1, 0), Demand::new(2, 5), Demand::new(3, 5)],
        1,
    )
    .expect("valid instance")
}

/// Depot plus a single customer.
pub(crate) fn single_customer() -> Instance {
    Instance::new(
        2,
        10,
        vec![NodeCoord::new(1, 0.0, 0.0), NodeCoord::new(2, 3.0, 4.0)],
        vec![Demand::new(1, 0), Demand::new(2, 7)],
        1,
    )
    .expect("valid instance")
}

/// Depot at the origin and `n` customers on a ring, each of demand `demand`.
pub(crate) fn ring(n: usize, demand: u32, capacity: u32) -> Instance {
    let mut coords = vec![NodeCoord::new(1, 0.0, 0.0)];
    let mut demands = vec![Demand::new(1, 0)];
    for k in 0..n {
        let angle = k as f64 / n as f64 * std::f64::consts::TAU;
        coords.push(NodeCoord::new(k + 2, 10.0 * angle.cos(), 10.0 * angle.sin()));
        demands.push(Demand::new(k + 2, demand));
    }
    Instance::new(n + 1, capacity, coords, demands, 1).expect("valid instance")
}

/// Random feasible instances: 1..=12 customers, arbitrary depot position.
pub(crate) fn arb_instance() -> impl Strategy<Value = Instance> {
    (2usize..=13, 5u32..=30)
        .prop_flat_map(|(dimension, capacity)| {
            (
                Just(dimension),
                Just(capacity),
                prop::collection::vec((-50i32..50, -50i32..50), dimension),
                prop::collection::vec(1u32..=capacity, dimension),
                1usize..=dimension,
            )
        })
        .prop_map(|(dimension, capacity, points, loads, depot)| {
            let coords = points
                .iter()
                .enumerate()
                .map(|(i, &(x, y))| NodeCoord::new(i + 1, f64::from(x), f64::from(y)))
                .collect();
            let demands = loads
                .iter()
                .enumerate()
                .map(|(i, &d)| Demand::new(i + 1, if i + 1 == depot { 0 } else { d }))
                .collect();
            Instance::new(dimension, capacity, coords, demands, depot).expect("valid instance")
        })
}
