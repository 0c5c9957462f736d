//! Exact open-path search through one cluster.
//!
//! For a start node and a set of nodes to visit, finds the minimum-distance
//! path that starts at the start node and visits every member exactly once,
//! with no return leg. Memoized recursion over `(current, remaining)`
//! states, in the manner of Held–Karp.
//!
//! The cache stores only the distance of each subproblem and the node taken
//! next, so the path is rebuilt by walking the cache forward. Keys hold the
//! remaining set as a sorted slice, which makes a state reached through
//! different clusters or branch orders hit the same entry.

use std::collections::HashMap;

use crate::adjacency::AdjacencyMatrix;
use crate::error::{OptimizeError, OptimizeResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SearchKey {
    current: usize,
    remaining: Box<[usize]>,
}

#[derive(Debug, Clone, Copy)]
struct Step {
    distance: f64,
    next: Option<usize>,
}

const DONE: Step = Step {
    distance: 0.0,
    next: None,
};

/// Memoized subproblem results, scoped to one request.
///
/// Entries are only valid for the [`AdjacencyMatrix`] they were computed
/// against; create a fresh cache per request.
#[derive(Debug, Default)]
pub struct SearchCache {
    entries: HashMap<SearchKey, Step>,
    hits: u64,
    misses: u64,
}

impl SearchCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

/// Best path found for one cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterRoute {
    pub distance: f64,
    /// Node indices in visiting order, starting with the start node.
    pub path: Vec<usize>,
}

/// Solves clusters against a shared matrix and cache.
pub struct RouteSolver<'m, 'a> {
    matrix: &'m AdjacencyMatrix<'a>,
    cache: &'m mut SearchCache,
}

impl<'m, 'a> RouteSolver<'m, 'a> {
    pub fn new(matrix: &'m AdjacencyMatrix<'a>, cache: &'m mut SearchCache) -> Self {
        Self { matrix, cache }
    }

    /// Finds the shortest open path from `start` through every node of `cluster`.
    ///
    /// Ties between equally short branches keep the branch whose next node has
    /// the lowest working-set index.
    pub fn solve(&mut self, start: usize, cluster: &[usize]) -> OptimizeResult<ClusterRoute> {
        let mut remaining = cluster.to_vec();
        remaining.sort_unstable();
        self.check_cluster(start, &remaining)?;

        let head = self.search(start, &remaining);

        let mut path = Vec::with_capacity(remaining.len() + 1);
        path.push(start);
        let mut step = head;
        while let Some(next) = step.next {
            let Ok(slot) = remaining.binary_search(&next) else {
                return Err(OptimizeError::InternalInvariantViolation(format!(
                    "cached step moves to node {next} which is not pending"
                )));
            };
            remaining.remove(slot);
            path.push(next);
            step = self.search(next, &remaining);
        }

        if path.len() != cluster.len() + 1 {
            return Err(OptimizeError::InternalInvariantViolation(format!(
                "rebuilt path visits {} of {} nodes",
                path.len() - 1,
                cluster.len()
            )));
        }

        Ok(ClusterRoute {
            distance: head.distance,
            path,
        })
    }

    fn check_cluster(&self, start: usize, sorted: &[usize]) -> OptimizeResult<()> {
        let n = self.matrix.len();
        if start >= n {
            return Err(OptimizeError::InternalInvariantViolation(format!(
                "start node {start} outside working set of {n}"
            )));
        }
        if let Some(&node) = sorted.iter().find(|&&node| node >= n || node == start) {
            return Err(OptimizeError::InternalInvariantViolation(format!(
                "cluster member {node} is not a position of the working set"
            )));
        }
        if sorted.windows(2).any(|pair| pair[0] == pair[1]) {
            return Err(OptimizeError::InternalInvariantViolation(
                "cluster lists a node twice".to_string(),
            ));
        }
        Ok(())
    }

    fn search(&mut self, current: usize, remaining: &[usize]) -> Step {
        if remaining.is_empty() {
            return DONE;
        }

        let key = SearchKey {
            current,
            remaining: remaining.into(),
        };
        if let Some(&step) = self.cache.entries.get(&key) {
            self.cache.hits += 1;
            return step;
        }
        self.cache.misses += 1;

        let mut best = Step {
            distance: f64::INFINITY,
            next: None,
        };
        let mut rest = Vec::with_capacity(remaining.len() - 1);
        for (i, &next) in remaining.iter().enumerate() {
            rest.clear();
            rest.extend_from_slice(&remaining[..i]);
            rest.extend_from_slice(&remaining[i + 1..]);

            let tail = self.search(next, &rest);
            let total = self.matrix.get(current, next) + tail.distance;
            if best.next.is_none() || total < best.distance {
                best = Step {
                    distance: total,
                    next: Some(next),
                };
            }
        }

        self.cache.entries.insert(key, best);
        best
    }
}
