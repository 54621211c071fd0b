//! Node-link graph space.

use std::fmt;

use leyline_core::{GraphValue, NodeId, Value};
use rand::Rng;

use crate::boxspace::BoxSpace;

/// Largest node count [`GraphSpace::sample`] will draw.
const MAX_SAMPLE_NODES: u32 = 8;

/// A space of node-link graphs with per-node feature vectors.
///
/// Nodes carry features drawn from a shared [`BoxSpace`]; edges are
/// index pairs into the node list. Edge count is unconstrained, but
/// every endpoint must name an existing node.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphSpace {
    node_space: BoxSpace,
}

impl GraphSpace {
    /// Graphs whose nodes are unbounded planar coordinates.
    pub fn planar() -> Self {
        Self {
            node_space: BoxSpace::unbounded_vector(2),
        }
    }

    /// The per-node feature space.
    pub fn node_space(&self) -> &BoxSpace {
        &self.node_space
    }

    /// Whether `value` is a graph whose node features inhabit the node
    /// space and whose edges stay in range.
    pub fn contains(&self, value: &Value) -> bool {
        let Value::Graph(graph) = value else {
            return false;
        };
        let in_node_space = graph.positions.iter().all(|pos| {
            let features = Value::List(pos.iter().copied().map(Value::Real).collect());
            self.node_space.contains(&features)
        });
        if !in_node_space {
            return false;
        }
        let node_count = graph.node_count() as u32;
        graph
            .edges
            .iter()
            .all(|(from, to)| from.0 < node_count && to.0 < node_count)
    }

    /// Draw a random graph of up to `MAX_SAMPLE_NODES` nodes.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Value {
        let node_count = rng.random_range(0..=MAX_SAMPLE_NODES);
        let positions = (0..node_count)
            .map(|_| {
                [
                    self.node_space.sample_element(rng),
                    self.node_space.sample_element(rng),
                ]
            })
            .collect();
        let edge_count = if node_count == 0 {
            0
        } else {
            rng.random_range(0..=node_count * 2)
        };
        let edges = (0..edge_count)
            .map(|_| {
                (
                    NodeId(rng.random_range(0..node_count)),
                    NodeId(rng.random_range(0..node_count)),
                )
            })
            .collect();
        Value::Graph(GraphValue { positions, edges })
    }
}

impl fmt::Display for GraphSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Graph<{}>", self.node_space)
    }
}
