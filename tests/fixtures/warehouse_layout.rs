//! Synthetic warehouse rack layout.
//!
//! Aisles run along y, spaced 3 m apart on x. Each aisle has bays every
//! 1.2 m and shelf levels every 0.5 m. Products are spread across slots
//! deterministically so several products share aisles and some are
//! stocked in more than one place.

use pick_route::{Point3D, Position, ProductPositions};

pub const AISLE_SPACING: f64 = 3.0;
pub const BAY_SPACING: f64 = 1.2;
pub const LEVEL_HEIGHT: f64 = 0.5;

/// A rack slot address.
#[derive(Debug, Clone, Copy)]
pub struct Slot {
    pub aisle: u32,
    pub bay: u32,
    pub level: u32,
}

impl Slot {
    pub const fn new(aisle: u32, bay: u32, level: u32) -> Self {
        Self { aisle, bay, level }
    }

    pub fn point(&self) -> Point3D {
        Point3D::new(
            self.aisle as f64 * AISLE_SPACING,
            self.bay as f64 * BAY_SPACING,
            self.level as f64 * LEVEL_HEIGHT,
        )
    }

    pub fn position_id(&self) -> String {
        format!("A{:02}-B{:02}-L{}", self.aisle, self.bay, self.level)
    }
}

/// Dock door where pickers start.
pub fn dock() -> Point3D {
    Point3D::new(0.0, 0.0, 0.0)
}

/// Builder for one product and its candidate slots.
#[derive(Debug, Clone)]
pub struct TestProduct {
    id: String,
    positions: Vec<Position>,
}

impl TestProduct {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            positions: Vec::new(),
        }
    }

    /// Adds a candidate at raw coordinates with a generated position id.
    pub fn at(mut self, x: f64, y: f64, z: f64) -> Self {
        let position_id = format!("{}#{}", self.id, self.positions.len() + 1);
        self.positions
            .push(Position::new(position_id, self.id.clone(), Point3D::new(x, y, z), 10));
        self
    }

    /// Adds a candidate with an explicit position id.
    pub fn at_id(mut self, position_id: &str, x: f64, y: f64, z: f64) -> Self {
        self.positions
            .push(Position::new(position_id, self.id.clone(), Point3D::new(x, y, z), 10));
        self
    }

    /// Adds a candidate at a rack slot.
    pub fn in_slot(mut self, slot: Slot) -> Self {
        self.positions
            .push(Position::new(slot.position_id(), self.id.clone(), slot.point(), 10));
        self
    }

    pub fn build(self) -> ProductPositions {
        ProductPositions::new(self.id, self.positions)
    }
}

/// `count` products, product `i` stocked in `1 + i % max_candidates` slots
/// scattered over `aisles` aisles. Every slot is distinct.
pub fn rack_order(count: u32, max_candidates: u32, aisles: u32) -> Vec<ProductPositions> {
    (0..count)
        .map(|i| {
            let mut product = TestProduct::new(&format!("SKU-{:04}", 1000 + i));
            for c in 0..(1 + i % max_candidates) {
                let seed = i * 7 + c * 13;
                let bay = i * max_candidates + c;
                product = product.in_slot(Slot::new(seed % aisles, bay, seed % 4));
            }
            product.build()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rack_order_slots_unique() {
        let order = rack_order(6, 3, 5);
        let mut ids = HashSet::new();
        for product in &order {
            assert!(!product.candidates.is_empty());
            for position in &product.candidates {
                assert!(
                    ids.insert(position.position_id.clone()),
                    "duplicate slot {}",
                    position.position_id
                );
            }
        }
    }
}
