//! Constellation graph: orbiting nodes, inter-satellite links and
//! per-node congestion costs

use hashbrown::HashMap;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

use super::Position;

/// Layer pairing of a link, decides the distance metric,
/// reachability threshold and weight multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkClass {
    LeoLeo,
    MeoMeo,
    /// LEO to MEO, or any pair not sharing a known layer
    Mixed,
}

/// Link stored on a graph edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub weight: f64,
    pub class: LinkClass,
}

/// Undirected edge in canonical form, `a < b`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub a: Position,
    pub b: Position,
    pub weight: f64,
    pub class: LinkClass,
}

/// Reachability graph of one routing request.
///
/// Owns the deduplicated edge set and the node cost mapping.
/// Node indices follow insertion order, which is also the order the
/// shortest path engine uses to break ties.
#[derive(Debug, Clone, Default)]
pub struct ConstellationGraph {
    pub(crate) graph: UnGraph<Position, Link>,
    index: HashMap<Position, NodeIndex>,
    node_costs: Vec<f64>,
}

impl ConstellationGraph {
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: UnGraph::with_capacity(nodes, edges),
            index: HashMap::with_capacity(nodes),
            node_costs: Vec::with_capacity(nodes),
        }
    }

    /// Adds a node with infinite cost.
    /// Returns `None` if a node at the same position already exists.
    pub(crate) fn add_node(&mut self, position: Position) -> Option<NodeIndex> {
        if self.index.contains_key(&position) {
            return None;
        }
        let node = self.graph.add_node(position);
        self.index.insert(position, node);
        self.node_costs.push(f64::INFINITY);
        Some(node)
    }

    /// Adds a link between two distinct nodes, stored with the smaller
    /// position as source. Returns `false` if the pair is already linked.
    pub(crate) fn add_link(&mut self, u: NodeIndex, v: NodeIndex, link: Link) -> bool {
        if u == v || self.graph.find_edge(u, v).is_some() {
            return false;
        }
        let (source, target) = if self.graph[u] <= self.graph[v] {
            (u, v)
        } else {
            (v, u)
        };
        self.graph.add_edge(source, target, link);
        true
    }

    pub(crate) fn set_node_cost(&mut self, node: NodeIndex, cost: f64) {
        self.node_costs[node.index()] = cost;
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, position: &Position) -> bool {
        self.index.contains_key(position)
    }

    pub fn node_index(&self, position: &Position) -> Option<NodeIndex> {
        self.index.get(position).copied()
    }

    pub fn position(&self, node: NodeIndex) -> Option<Position> {
        self.graph.node_weight(node).copied()
    }

    /// Node positions in insertion order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.graph.node_weights().copied()
    }

    pub fn node_cost(&self, position: &Position) -> Option<f64> {
        self.node_index(position)
            .map(|node| self.node_costs[node.index()])
    }

    pub(crate) fn node_cost_by_index(&self, node: NodeIndex) -> f64 {
        self.node_costs[node.index()]
    }

    /// One `(position, cost)` entry per node, in insertion order
    pub fn node_costs(&self) -> impl Iterator<Item = (Position, f64)> + '_ {
        self.positions().zip(self.node_costs.iter().copied())
    }

    /// Edges in insertion order, each in canonical form
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.graph.edge_references().map(|edge| Edge {
            a: self.graph[edge.source()],
            b: self.graph[edge.target()],
            weight: edge.weight().weight,
            class: edge.weight().class,
        })
    }

    /// Weight of the link between two positions, in either direction
    pub fn edge_weight(&self, a: &Position, b: &Position) -> Option<f64> {
        let u = self.node_index(a)?;
        let v = self.node_index(b)?;
        self.graph
            .find_edge(u, v)
            .and_then(|edge| self.graph.edge_weight(edge))
            .map(|link| link.weight)
    }

    pub fn has_edge(&self, a: &Position, b: &Position) -> bool {
        self.edge_weight(a, b).is_some()
    }

    /// Adjacent nodes with link weights
    pub fn neighbors(&self, position: &Position) -> Vec<(Position, f64)> {
        self.node_index(position)
            .map(|node| {
                self.adjacent(node)
                    .map(|(other, weight)| (self.graph[other], weight))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn adjacent(&self, node: NodeIndex) -> impl Iterator<Item = (NodeIndex, f64)> + '_ {
        self.graph.edges(node).map(move |edge| {
            let other = if edge.source() == node {
                edge.target()
            } else {
                edge.source()
            };
            (other, edge.weight().weight)
        })
    }

    /// Whether every consecutive pair in `path` is a link of this graph
    pub fn is_continuous(&self, path: &[Position]) -> bool {
        path.windows(2).all(|pair| self.has_edge(&pair[0], &pair[1]))
    }
}
