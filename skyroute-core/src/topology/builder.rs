use log::{debug, info, warn};
use petgraph::graph::NodeIndex;

use super::config::{NodeCostModel, RoutingConfig};
use crate::{CongestionMap, ConstellationGraph, Error, Link, Position};

/// Builds the reachability graph of the orbiting nodes.
///
/// Every unordered pair of nodes is classified by layer and linked when
/// its classified distance is within the layer's reach. The link weight
/// is that distance scaled by the layer multiplier. Once all partners of
/// a node have been evaluated, the node's cost is derived from the first
/// congestion cell containing it. Nodes outside every cell keep an
/// infinite cost and can only ever be the source of a path.
///
/// `nodes` must not contain duplicate positions. Duplicates are collapsed
/// into the first occurrence.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub fn build_constellation_graph(
    nodes: &[Position],
    congestion: &CongestionMap,
    config: &RoutingConfig,
) -> Result<ConstellationGraph, Error> {
    config.validate()?;

    let mut graph = ConstellationGraph::with_capacity(nodes.len(), nodes.len() * 4);
    let indices: Vec<NodeIndex> = nodes
        .iter()
        .filter_map(|&position| {
            let node = graph.add_node(position);
            if node.is_none() {
                warn!("Duplicate node position {position} collapsed into its first occurrence");
            }
            node
        })
        .collect();

    // Distance of the most recently evaluated pair. The congestion cost of
    // a node is scaled by it, including for the last node which has no
    // partners of its own left to evaluate.
    let mut last_distance = 0.0;

    for (i, &u) in indices.iter().enumerate() {
        let a = graph.graph[u];

        for &v in &indices[i + 1..] {
            let b = graph.graph[v];
            let class = config.classify(&a, &b);
            let distance = config.link_distance(class, &a, &b);
            last_distance = distance;

            if distance <= config.reach(class) {
                let link = Link {
                    weight: distance * config.multiplier(class),
                    class,
                };
                graph.add_link(u, v, link);
            }
        }

        if let Some(level) = congestion.level_at(a.planar()) {
            let cost = match config.node_cost {
                NodeCostModel::TrailingDistance => last_distance * level - 1.0,
                NodeCostModel::Scaled { factor } => factor * level,
            };
            graph.set_node_cost(u, cost);
        } else {
            debug!("Node {a} lies outside every congestion cell, it cannot relay traffic");
        }
    }

    info!(
        "Built constellation graph with {} nodes and {} links",
        graph.node_count(),
        graph.edge_count()
    );

    Ok(graph)
}
