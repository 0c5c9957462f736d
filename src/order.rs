//! Order validation and product deduplication.

use std::collections::HashSet;

use crate::error::OrderError;
use crate::models::{Order, Point3D};

impl Order {
    pub fn new(products: Vec<String>, starting_position: Point3D) -> Self {
        Self {
            products,
            starting_position,
        }
    }

    /// Rejects orders with no products, blank product ids, or a starting
    /// coordinate that is negative or not a finite number.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.products.is_empty() {
            return Err(OrderError::NoProducts);
        }

        if let Some(index) = self.products.iter().position(|p| p.trim().is_empty()) {
            return Err(OrderError::EmptyProductId { index });
        }

        let point = self.starting_position;
        for (axis, value) in [('x', point.x), ('y', point.y), ('z', point.z)] {
            if !value.is_finite() || value < 0.0 {
                return Err(OrderError::InvalidStartingPosition { axis, value });
            }
        }

        Ok(())
    }

    /// Removes repeated product ids, keeping the first occurrence of each.
    ///
    /// Returns how many entries were dropped.
    pub fn dedup_products(&mut self) -> usize {
        let before = self.products.len();
        let mut seen = HashSet::with_capacity(before);
        self.products.retain(|product| seen.insert(product.clone()));
        before - self.products.len()
    }
}
