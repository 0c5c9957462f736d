//! Brute-force picking route: every cluster, every visiting order.
//!
//! Factorial in the number of products. Useful as an oracle for small
//! orders; [`crate::optimizer::optimize`] is the production path.

use crate::adjacency::{AdjacencyMatrix, START};
use crate::clusters::ClusterEnumerator;
use crate::error::{OptimizeError, OptimizeResult};
use crate::euclidean::EuclideanMatrix;
use crate::models::{Node, OptimizedRoute, Point3D, ProductPositions};

/// Finds the shortest picking route by enumerating all permutations of
/// all clusters. The first route found with the minimum distance wins.
pub fn optimize_exhaustive(
    start: Point3D,
    products: &[ProductPositions],
) -> OptimizeResult<OptimizedRoute> {
    if let Some(empty) = products.iter().find(|p| p.candidates.is_empty()) {
        return Err(OptimizeError::NotInStock {
            product_id: empty.product_id.clone(),
        });
    }

    let matrix = AdjacencyMatrix::build(start, products, &EuclideanMatrix)?;
    let enumerator = ClusterEnumerator::new(matrix.product_nodes());

    let mut best: Option<(f64, Vec<usize>)> = None;
    for cluster in enumerator.iter() {
        let mut order: Vec<usize> = (0..cluster.members.len()).collect();
        loop {
            let path: Vec<usize> = order.iter().map(|&i| cluster.members[i]).collect();
            let distance = path_distance(&matrix, &path);
            if best.as_ref().is_none_or(|(d, _)| distance < *d) {
                best = Some((distance, path));
            }
            if !next_permutation(&mut order) {
                break;
            }
        }
    }

    let (distance, path) = best.ok_or_else(|| {
        OptimizeError::InternalInvariantViolation("no cluster was evaluated".to_string())
    })?;

    let positions = path
        .into_iter()
        .filter_map(|index| match matrix.node(index) {
            Some(Node::Position(position)) => Some((*position).clone()),
            _ => None,
        })
        .collect();

    Ok(OptimizedRoute {
        distance,
        positions,
    })
}

/// Start to first stop, then every consecutive leg.
fn path_distance(matrix: &AdjacencyMatrix<'_>, path: &[usize]) -> f64 {
    let mut total = 0.0;
    let mut previous = START;
    for &node in path {
        total += matrix.get(previous, node);
        previous = node;
    }
    total
}

/// Rearranges `items` into the next lexicographic permutation.
///
/// Returns `false` once the last permutation has been reached.
fn next_permutation(items: &mut [usize]) -> bool {
    if items.len() < 2 {
        return false;
    }

    let Some(pivot) = (0..items.len() - 1).rev().find(|&i| items[i] < items[i + 1]) else {
        return false;
    };
    let successor = (pivot + 1..items.len())
        .rev()
        .find(|&j| items[j] > items[pivot])
        .unwrap_or(pivot + 1);
    items.swap(pivot, successor);
    items[pivot + 1..].reverse();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;

    #[test]
    fn test_next_permutation_visits_all() {
        let mut items = vec![0, 1, 2];
        let mut seen = vec![items.clone()];
        while next_permutation(&mut items) {
            seen.push(items.clone());
        }
        assert_eq!(
            seen,
            vec![
                vec![0, 1, 2],
                vec![0, 2, 1],
                vec![1, 0, 2],
                vec![1, 2, 0],
                vec![2, 0, 1],
                vec![2, 1, 0],
            ]
        );
    }

    #[test]
    fn test_next_permutation_short() {
        assert!(!next_permutation(&mut []));
        assert!(!next_permutation(&mut [7]));
    }

    #[test]
    fn test_exhaustive_basic_case() {
        let products = vec![
            ProductPositions::new(
                "product-1",
                vec![Position::new("p1", "product-1", Point3D::new(1.0, 0.0, 0.0), 1)],
            ),
            ProductPositions::new(
                "product-2",
                vec![Position::new("p2", "product-2", Point3D::new(2.0, 0.0, 0.0), 1)],
            ),
        ];

        let route = optimize_exhaustive(Point3D::default(), &products).expect("route");
        assert!((route.distance - 2.0).abs() < 1e-12);
        assert_eq!(route.positions[0].position_id, "p1");
        assert_eq!(route.positions[1].position_id, "p2");
    }

    #[test]
    fn test_exhaustive_not_in_stock() {
        let products = vec![ProductPositions::new("ghost", Vec::new())];
        let result = optimize_exhaustive(Point3D::default(), &products);
        assert!(matches!(
            result,
            Err(OptimizeError::NotInStock { product_id }) if product_id == "ghost"
        ));
    }
}
