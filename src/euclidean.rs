//! Straight-line distance in warehouse space.

use crate::models::Point3D;
use crate::traits::DistanceMatrixProvider;

/// Euclidean distance between two points.
pub fn distance(a: Point3D, b: Point3D) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z - b.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Euclidean distance matrix provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanMatrix;

impl DistanceMatrixProvider for EuclideanMatrix {
    fn matrix_for(&self, points: &[Point3D]) -> Vec<Vec<f64>> {
        let n = points.len();
        let mut matrix = vec![vec![0.0; n]; n];

        for i in 0..n {
            for j in (i + 1)..n {
                let d = distance(points[i], points[j]);
                matrix[i][j] = d;
                matrix[j][i] = d;
            }
        }

        matrix
    }
}
