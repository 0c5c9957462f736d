//! Pairwise distance table over one request's working set.
//!
//! The working set is the synthetic start node followed by every candidate
//! position of every requested product, in request order. Node 0 is always
//! the start.

use std::collections::HashMap;

use crate::error::{OptimizeError, OptimizeResult};
use crate::models::{Node, NodeKey, Point3D, ProductPositions};
use crate::traits::DistanceMatrixProvider;

/// Index of the start node in every working set.
pub const START: usize = 0;

/// Dense distance table keyed by working-set node.
#[derive(Debug, Clone)]
pub struct AdjacencyMatrix<'a> {
    nodes: Vec<Node<'a>>,
    index: HashMap<NodeKey, usize>,
    product_nodes: Vec<Vec<usize>>,
    distances: Vec<f64>,
}

impl<'a> AdjacencyMatrix<'a> {
    /// Builds the working set and its full distance table.
    ///
    /// Fails if a position id appears twice, or if the provider hands back a
    /// table that does not cover every pair.
    pub fn build<M: DistanceMatrixProvider>(
        start: Point3D,
        products: &'a [ProductPositions],
        provider: &M,
    ) -> OptimizeResult<Self> {
        let mut nodes = vec![Node::Start(start)];
        let mut index = HashMap::new();
        index.insert(NodeKey::Start, START);

        let mut product_nodes = Vec::with_capacity(products.len());
        for product in products {
            let mut group = Vec::with_capacity(product.candidates.len());
            for position in &product.candidates {
                let node = Node::Position(position);
                let node_index = nodes.len();
                if index.insert(node.key(), node_index).is_some() {
                    return Err(OptimizeError::DuplicatePosition {
                        position_id: position.position_id.clone(),
                    });
                }
                nodes.push(node);
                group.push(node_index);
            }
            product_nodes.push(group);
        }

        let points: Vec<Point3D> = nodes.iter().map(Node::point).collect();
        let table = provider.matrix_for(&points);
        let distances = flatten(table, nodes.len())?;

        Ok(Self {
            nodes,
            index,
            product_nodes,
            distances,
        })
    }

    /// Number of nodes in the working set, start included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index: usize) -> Option<&Node<'a>> {
        self.nodes.get(index)
    }

    pub fn index_of(&self, key: &NodeKey) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Candidate node indices per product, in request order.
    pub fn product_nodes(&self) -> &[Vec<usize>] {
        &self.product_nodes
    }

    /// Distance between two node indices.
    ///
    /// # Panics
    ///
    /// Panics if either index is outside the working set.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.distances[from * self.nodes.len() + to]
    }

    /// Distance between two nodes looked up by key.
    pub fn distance(&self, from: &NodeKey, to: &NodeKey) -> OptimizeResult<f64> {
        match (self.index_of(from), self.index_of(to)) {
            (Some(i), Some(j)) => Ok(self.get(i, j)),
            _ => Err(OptimizeError::InternalInvariantViolation(format!(
                "no adjacency entry for {from:?} -> {to:?}"
            ))),
        }
    }
}

fn flatten(table: Vec<Vec<f64>>, n: usize) -> OptimizeResult<Vec<f64>> {
    if table.len() != n {
        return Err(OptimizeError::InternalInvariantViolation(format!(
            "distance table has {} rows for {} nodes",
            table.len(),
            n
        )));
    }

    let mut distances = Vec::with_capacity(n * n);
    for (i, row) in table.into_iter().enumerate() {
        if row.len() != n {
            return Err(OptimizeError::InternalInvariantViolation(format!(
                "distance table row {} has {} entries for {} nodes",
                i,
                row.len(),
                n
            )));
        }
        for (j, d) in row.into_iter().enumerate() {
            if !(d.is_finite() && d >= 0.0) || (i == j && d != 0.0) {
                return Err(OptimizeError::InternalInvariantViolation(format!(
                    "invalid distance {d} between nodes {i} and {j}"
                )));
            }
            distances.push(d);
        }
    }

    Ok(distances)
}
