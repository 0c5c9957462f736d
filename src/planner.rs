//! End-to-end order planning: validate, resolve positions, optimize.

use rayon::prelude::*;
use tracing::warn;

use crate::error::{LookupError, PlanError};
use crate::models::{Order, PickingOrder, ProductPositions};
use crate::optimizer::{optimize, OptimizeOptions};
use crate::traits::PositionLookup;

/// Plans the picking order for a client order.
///
/// Duplicate product ids are dropped with a warning. Positions for each
/// product are resolved concurrently; a product with no positions fails the
/// whole order as not in stock.
pub fn plan_order<L: PositionLookup>(
    mut order: Order,
    lookup: &L,
    options: &OptimizeOptions,
) -> Result<PickingOrder, PlanError> {
    order.validate()?;

    let removed = order.dedup_products();
    if removed > 0 {
        warn!(
            removed = removed,
            products = ?order.products,
            "Order contains duplicate products. Duplicates were removed."
        );
    }

    let products = resolve_all(&order.products, lookup)?;
    let route = optimize(order.starting_position, &products, options)?;

    Ok(route.into())
}

/// Resolves every product id, keeping request order.
pub fn resolve_all<L: PositionLookup>(
    product_ids: &[String],
    lookup: &L,
) -> Result<Vec<ProductPositions>, LookupError> {
    product_ids
        .par_iter()
        .map(|product_id| {
            lookup
                .resolve_positions(product_id)
                .map(|candidates| ProductPositions::new(product_id.clone(), candidates))
        })
        .collect()
}
