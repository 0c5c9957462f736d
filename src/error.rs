//! Error types for route optimization and order planning.

use thiserror::Error;

/// Errors returned by the route optimizer.
#[derive(Debug, Error)]
pub enum OptimizeError {
    /// A requested product resolved to zero candidate positions.
    #[error("Product {product_id} is not in stock")]
    NotInStock { product_id: String },

    /// The search would exceed a configured ceiling.
    #[error("Search too large: {measure} is {size}, limit is {limit}")]
    ComplexityBudgetExceeded {
        measure: &'static str,
        size: u128,
        limit: u128,
    },

    /// The same position id appears twice in the working set.
    #[error("Position {position_id} appears more than once in the working set")]
    DuplicatePosition { position_id: String },

    /// A builder or cache invariant was broken. Indicates a defect.
    #[error("Internal invariant violated: {0}")]
    InternalInvariantViolation(String),
}

/// Result type for optimizer operations.
pub type OptimizeResult<T> = std::result::Result<T, OptimizeError>;

/// Errors from validating an incoming order.
#[derive(Debug, Error, PartialEq)]
pub enum OrderError {
    #[error("Order contains no products")]
    NoProducts,

    #[error("Product id at index {index} is empty")]
    EmptyProductId { index: usize },

    #[error("Starting position {axis} must be a non-negative number, got {value}")]
    InvalidStartingPosition { axis: char, value: f64 },
}

/// Errors from resolving product positions.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Environment variable {var} is not set")]
    MissingConfig { var: &'static str },

    #[error("Invalid warehouse API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Position lookup request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Position lookup for {product_id} returned status {status}")]
    Status { product_id: String, status: u16 },

    #[error("Position lookup for {product_id} failed after {attempts} attempts: {last}")]
    Exhausted {
        product_id: String,
        attempts: u32,
        #[source]
        last: Box<LookupError>,
    },
}

/// Errors from planning an order end to end.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Invalid order: {0}")]
    Order(#[from] OrderError),

    #[error("Failed to fetch product positions: {0}")]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Optimize(#[from] OptimizeError),
}
