use log::trace;
use serde::{Deserialize, Serialize};

use super::config::RoutingConfig;
use crate::{CongestionMap, Error, Position};

/// Ground endpoint and the LEO node it enters the constellation through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EndpointLink {
    pub node: Position,
    pub endpoint: Position,
}

/// Links every endpoint to the LEO node with the lowest
/// `distance * congestion level` score.
///
/// LEO nodes outside every congestion cell are scored with a level of
/// `1.0`. Ties go to the node listed first. Links are independent of each
/// other, so several endpoints may share a node. The result preserves the
/// order of `endpoints`.
///
/// # Errors
///
/// Returns [`Error::NoLinkCandidate`] if an endpoint has no LEO node to
/// link to, either because `leo_nodes` is empty or because every node is
/// beyond `config.max_link_distance`.
pub fn link_endpoints(
    endpoints: &[Position],
    leo_nodes: &[Position],
    congestion: &CongestionMap,
    config: &RoutingConfig,
) -> Result<Vec<EndpointLink>, Error> {
    // Congestion levels do not depend on the endpoint
    let levels: Vec<f64> = leo_nodes
        .iter()
        .map(|node| congestion.level_at(node.planar()).unwrap_or(1.0))
        .collect();

    endpoints
        .iter()
        .map(|&endpoint| {
            let node = best_link(endpoint, leo_nodes, &levels, config.max_link_distance)
                .ok_or(Error::NoLinkCandidate { endpoint })?;
            trace!("Endpoint {endpoint} linked to {node}");
            Ok(EndpointLink { node, endpoint })
        })
        .collect()
}

fn best_link(
    endpoint: Position,
    leo_nodes: &[Position],
    levels: &[f64],
    max_distance: Option<f64>,
) -> Option<Position> {
    leo_nodes
        .iter()
        .zip(levels)
        .filter_map(|(node, level)| {
            let distance = endpoint.distance(node);
            match max_distance {
                Some(limit) if distance >= limit => None,
                _ => Some((*node, distance * level)),
            }
        })
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(node, _)| node)
}
