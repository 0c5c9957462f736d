//! Picking route optimizer.
//!
//! Chooses one position per product and the visiting order that together
//! minimize travel distance from the starting point. Every cluster is
//! solved exactly and the global minimum is kept.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::adjacency::{AdjacencyMatrix, START};
use crate::clusters::{cardinality_of, ClusterEnumerator};
use crate::error::{OptimizeError, OptimizeResult};
use crate::euclidean::EuclideanMatrix;
use crate::models::{Node, OptimizedRoute, Point3D, ProductPositions};
use crate::solver::{RouteSolver, SearchCache};
use crate::traits::DistanceMatrixProvider;

#[derive(Debug, Clone)]
pub struct OptimizeOptions {
    /// Maximum number of distinct products in one order.
    pub max_products: usize,
    /// Maximum number of clusters (product of candidate counts).
    pub max_clusters: u128,
    /// Ceiling on estimated search work: clusters × k² × 2^k.
    pub max_search_work: u128,
    /// Evaluate clusters on the rayon pool.
    pub parallel: bool,
    /// Below this many clusters the search stays on the calling thread.
    pub parallel_min_clusters: usize,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            max_products: 16,
            max_clusters: 1_000_000,
            max_search_work: 100_000_000,
            parallel: true,
            parallel_min_clusters: 64,
        }
    }
}

/// Best route seen so far, with the ordinal of the cluster it came from.
#[derive(Debug, Clone)]
struct Candidate {
    distance: f64,
    ordinal: u128,
    path: Vec<usize>,
}

impl Candidate {
    /// Shorter wins; equal distances go to the earlier cluster.
    fn beats(&self, other: &Candidate) -> bool {
        self.distance < other.distance
            || (self.distance == other.distance && self.ordinal < other.ordinal)
    }
}

/// Optimizes a picking route using straight-line distances.
pub fn optimize(
    start: Point3D,
    products: &[ProductPositions],
    options: &OptimizeOptions,
) -> OptimizeResult<OptimizedRoute> {
    optimize_with(start, products, &EuclideanMatrix, options)
}

/// Optimizes a picking route with distances from `provider`.
///
/// Fails with [`OptimizeError::NotInStock`] if any product has no
/// candidates, and with [`OptimizeError::ComplexityBudgetExceeded`] before
/// any search work if the order is too large for `options`.
pub fn optimize_with<M: DistanceMatrixProvider>(
    start: Point3D,
    products: &[ProductPositions],
    provider: &M,
    options: &OptimizeOptions,
) -> OptimizeResult<OptimizedRoute> {
    if let Some(empty) = products.iter().find(|p| p.candidates.is_empty()) {
        return Err(OptimizeError::NotInStock {
            product_id: empty.product_id.clone(),
        });
    }

    let clusters = check_budget(products, options)?;

    let matrix = AdjacencyMatrix::build(start, products, provider)?;
    let enumerator = ClusterEnumerator::new(matrix.product_nodes());

    debug!(
        products = products.len(),
        working_set = matrix.len(),
        clusters = %clusters,
        "Starting picking route search"
    );

    let (best, cache_entries) = if runs_parallel(options, clusters) {
        search_parallel(&matrix, &enumerator, clusters)?
    } else {
        let mut cache = SearchCache::new();
        let best = search_range(&matrix, &enumerator, 0, clusters, &mut cache)?;
        (best, cache.len())
    };

    let best = best.ok_or_else(|| {
        OptimizeError::InternalInvariantViolation("no cluster was evaluated".to_string())
    })?;

    let positions = best
        .path
        .iter()
        .filter_map(|&index| match matrix.node(index) {
            Some(Node::Position(position)) => Some((*position).clone()),
            _ => None,
        })
        .collect::<Vec<_>>();

    info!(
        distance = best.distance,
        stops = positions.len(),
        cluster = %best.ordinal,
        cache_entries = cache_entries,
        "Found shortest picking route"
    );

    Ok(OptimizedRoute {
        distance: best.distance,
        positions,
    })
}

/// Estimated search work for `clusters` clusters of `k` products.
///
/// Each cluster has about k·2^(k-1) `(current, remaining)` states and each
/// state scans up to k successors.
fn search_work(clusters: u128, k: usize) -> u128 {
    let k = k as u128;
    clusters
        .saturating_mul(k.saturating_mul(k))
        .saturating_mul(1u128.checked_shl(k as u32).unwrap_or(u128::MAX))
}

/// Whether the cluster range goes to the rayon pool. A single-thread pool
/// would only split the cache without running anything concurrently.
fn runs_parallel(options: &OptimizeOptions, clusters: u128) -> bool {
    options.parallel
        && rayon::current_num_threads() > 1
        && clusters >= options.parallel_min_clusters as u128
}

/// Checks the order against the configured ceilings and returns the
/// cluster count.
fn check_budget(
    products: &[ProductPositions],
    options: &OptimizeOptions,
) -> OptimizeResult<u128> {
    let k = products.len();
    let clusters = cardinality_of(products.iter().map(|p| p.candidates.len()));
    let work = search_work(clusters, k);

    let exceeded = if k > options.max_products {
        Some(("products", k as u128, options.max_products as u128))
    } else if clusters > options.max_clusters {
        Some(("clusters", clusters, options.max_clusters))
    } else if work > options.max_search_work {
        Some(("search work", work, options.max_search_work))
    } else {
        None
    };

    if let Some((measure, size, limit)) = exceeded {
        warn!(
            measure = measure,
            size = %size,
            limit = %limit,
            "Picking route search rejected by complexity budget"
        );
        return Err(OptimizeError::ComplexityBudgetExceeded {
            measure,
            size,
            limit,
        });
    }

    Ok(clusters)
}

/// Solves clusters `start..end` sequentially against one cache.
fn search_range(
    matrix: &AdjacencyMatrix<'_>,
    enumerator: &ClusterEnumerator<'_, usize>,
    start: u128,
    end: u128,
    cache: &mut SearchCache,
) -> OptimizeResult<Option<Candidate>> {
    let mut solver = RouteSolver::new(matrix, cache);
    let mut best: Option<Candidate> = None;

    for cluster in enumerator.range(start, end) {
        let route = solver.solve(START, &cluster.members)?;
        if best.as_ref().is_none_or(|b| route.distance < b.distance) {
            best = Some(Candidate {
                distance: route.distance,
                ordinal: cluster.ordinal,
                path: route.path,
            });
        }
    }

    Ok(best)
}

/// Splits the cluster range across the rayon pool. Each worker keeps its own
/// cache; local bests are reduced so the result matches a sequential scan.
fn search_parallel(
    matrix: &AdjacencyMatrix<'_>,
    enumerator: &ClusterEnumerator<'_, usize>,
    clusters: u128,
) -> OptimizeResult<(Option<Candidate>, usize)> {
    let chunks = (rayon::current_num_threads() as u128 * 4).clamp(1, clusters.max(1));
    let chunk_size = clusters.div_ceil(chunks);

    let locals = (0..chunks as usize)
        .into_par_iter()
        .map(|chunk| -> OptimizeResult<(Option<Candidate>, usize)> {
            let start = chunk as u128 * chunk_size;
            let end = (start + chunk_size).min(clusters);
            let mut cache = SearchCache::new();
            let best = search_range(matrix, enumerator, start, end, &mut cache)?;
            debug!(
                chunk = chunk,
                clusters = %(end.saturating_sub(start)),
                cache_entries = cache.len(),
                cache_hits = cache.hits(),
                "Cluster range searched"
            );
            Ok((best, cache.len()))
        })
        .collect::<OptimizeResult<Vec<_>>>()?;

    let mut best: Option<Candidate> = None;
    let mut cache_entries = 0;
    for (local, entries) in locals {
        cache_entries += entries;
        if let Some(local) = local {
            if best.as_ref().is_none_or(|b| local.beats(b)) {
                best = Some(local);
            }
        }
    }

    Ok((best, cache_entries))
}
