//! Dense Euclidean distance matrix keyed by node id.

use crate::models::{Instance, NodeCoord};

/// Symmetric n×n Euclidean distances, row-major, built once per instance.
///
/// Node ids are 1-based and positional, so id `k` is stored at row and
/// column `k - 1`. [`between`](DistanceMatrix::between) takes ids;
/// [`get`](DistanceMatrix::get) takes raw positions.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::NodeCoord;
/// use u_cvrp::distance::DistanceMatrix;
///
/// let coords = vec![
///     NodeCoord::new(1, 0.0, 0.0),
///     NodeCoord::new(2, 3.0, 4.0),
///     NodeCoord::new(3, 6.0, 8.0),
/// ];
/// let dm = DistanceMatrix::from_coords(&coords);
/// assert!((dm.between(1, 2) - 5.0).abs() < 1e-10);
/// assert!((dm.between(1, 3) - 10.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Computes pairwise distances for coordinates ordered by id.
    pub fn from_coords(coords: &[NodeCoord]) -> Self {
        let size = coords.len();
        let mut data = vec![0.0; size * size];
        for (i, a) in coords.iter().enumerate() {
            for (j, b) in coords.iter().enumerate().skip(i + 1) {
                let d = a.distance_to(b);
                data[i * size + j] = d;
                data[j * size + i] = d;
            }
        }
        Self { data, size }
    }

    /// Computes the matrix for every node of an instance.
    pub fn from_instance(instance: &Instance) -> Self {
        Self::from_coords(instance.node_coords())
    }

    /// Distance between 0-based positions.
    ///
    /// # Panics
    ///
    /// Panics if either position is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Distance between two 1-based node ids.
    ///
    /// # Panics
    ///
    /// Panics if either id is zero or exceeds [`size`](DistanceMatrix::size).
    pub fn between(&self, from_id: usize, to_id: usize) -> f64 {
        self.get(from_id - 1, to_id - 1)
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// True if `d(i, j)` and `d(j, i)` agree within `tol` for every pair.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        (0..self.size).all(|i| {
            ((i + 1)..self.size).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tol)
        })
    }
}
