//! Dense distance matrix.

use crate::models::{Coordinate, LocationSet};

/// A dense n×n distance matrix stored in row-major order.
///
/// Built from geographic coordinates with the haversine formula, or from
/// explicit values. Index 0 is the depot.
///
/// # Examples
///
/// ```
/// use vroutes::models::{Coordinate, LocationSet};
/// use vroutes::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_locations(&LocationSet::new(
///     Coordinate::new(0.0, 0.0),
///     vec![Coordinate::new(0.0, 1.0), Coordinate::new(1.0, 0.0)],
/// ));
/// assert_eq!(dm.size(), 3);
/// assert_eq!(dm.get(0, 0), 0.0);
/// assert!((dm.get(0, 1) - 111.19).abs() < 0.01);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Haversine distances in kilometers between every pair of nodes.
    ///
    /// Node 0 is the origin and node `i` is `destinations[i - 1]`.
    pub fn from_locations(locations: &LocationSet) -> Self {
        let nodes: Vec<Coordinate> = locations.coordinates().collect();
        Self::from_coordinates(&nodes)
    }

    /// Haversine distances over `nodes` in the given order.
    ///
    /// Only the upper triangle is computed; the lower one is mirrored.
    pub fn from_coordinates(nodes: &[Coordinate]) -> Self {
        let mut dm = Self::new(nodes.len());
        for (i, a) in nodes.iter().enumerate() {
            for (j, b) in nodes.iter().enumerate().skip(i + 1) {
                let d = a.haversine_km(b);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}
