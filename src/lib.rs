//! pick-route
//!
//! Exact shortest picking routes through a warehouse: one storage position
//! per requested product, visited in the order that minimizes travel.

pub mod adjacency;
pub mod clusters;
pub mod error;
pub mod euclidean;
pub mod exhaustive;
pub mod models;
pub mod optimizer;
pub mod order;
pub mod planner;
pub mod solver;
pub mod traits;
pub mod warehouse;

pub use error::{LookupError, OptimizeError, OrderError, PlanError};
pub use models::{
    OptimizedRoute, Order, PickStop, PickingOrder, Point3D, Position, ProductPositions,
};
pub use optimizer::{optimize, optimize_with, OptimizeOptions};
pub use planner::plan_order;
