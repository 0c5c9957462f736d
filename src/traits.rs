//! Seams between the route optimizer and its collaborators.
//!
//! Kept minimal. Distance sources and position lookups are supplied by the
//! caller; the optimizer itself performs no I/O.

use crate::error::LookupError;
use crate::models::{Point3D, Position};

/// Provides a distance matrix for a set of points.
///
/// The matrix is indexed by the provided point order.
pub trait DistanceMatrixProvider {
    fn matrix_for(&self, points: &[Point3D]) -> Vec<Vec<f64>>;
}

/// Resolves a product id to the positions it is stocked at.
///
/// An empty list means the product is not stocked anywhere. Callers never
/// pass duplicate ids within one order.
pub trait PositionLookup: Sync {
    fn resolve_positions(&self, product_id: &str) -> Result<Vec<Position>, LookupError>;
}
