//! Warehouse picking data model.

use serde::{Deserialize, Serialize};

/// A point in warehouse space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A physical storage slot holding some quantity of one product.
///
/// Serialized flat, as the warehouse API returns it:
/// `{positionId, productId, x, y, z, quantity}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub position_id: String,
    pub product_id: String,
    #[serde(flatten)]
    pub point: Point3D,
    #[serde(default)]
    pub quantity: u32,
}

impl Position {
    pub fn new(
        position_id: impl Into<String>,
        product_id: impl Into<String>,
        point: Point3D,
        quantity: u32,
    ) -> Self {
        Self {
            position_id: position_id.into(),
            product_id: product_id.into(),
            point,
            quantity,
        }
    }
}

/// Every candidate position for one requested product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPositions {
    pub product_id: String,
    pub candidates: Vec<Position>,
}

impl ProductPositions {
    pub fn new(product_id: impl Into<String>, candidates: Vec<Position>) -> Self {
        Self {
            product_id: product_id.into(),
            candidates,
        }
    }
}

/// Identity of a node in the working set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKey {
    Start,
    Position(String),
}

/// A node of the working set: the synthetic start or a product position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    Start(Point3D),
    Position(&'a Position),
}

impl Node<'_> {
    pub fn point(&self) -> Point3D {
        match self {
            Node::Start(point) => *point,
            Node::Position(position) => position.point,
        }
    }

    pub fn key(&self) -> NodeKey {
        match self {
            Node::Start(_) => NodeKey::Start,
            Node::Position(position) => NodeKey::Position(position.position_id.clone()),
        }
    }

    pub fn is_start(&self) -> bool {
        matches!(self, Node::Start(_))
    }
}

/// A picking order as submitted by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub products: Vec<String>,
    pub starting_position: Point3D,
}

/// The optimal route through one position per product.
///
/// `positions` excludes the start node and is in visiting order.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizedRoute {
    pub distance: f64,
    pub positions: Vec<Position>,
}

/// One stop of the public picking order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickStop {
    pub position_id: String,
    pub product_id: String,
}

/// Public result shape: `{pickingOrder, distance}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickingOrder {
    pub picking_order: Vec<PickStop>,
    pub distance: f64,
}

impl From<OptimizedRoute> for PickingOrder {
    fn from(route: OptimizedRoute) -> Self {
        Self {
            picking_order: route
                .positions
                .into_iter()
                .map(|position| PickStop {
                    position_id: position.position_id,
                    product_id: position.product_id,
                })
                .collect(),
            distance: route.distance,
        }
    }
}
