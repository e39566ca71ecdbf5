//! Congestion-aware shortest path routing through the constellation

pub(crate) mod dijkstra;
mod route;

use log::{info, warn};
use rayon::prelude::*;

use crate::{
    CongestionMap, ConstellationGraph, EndpointLink, Error, Position, RoutingConfig,
    build_constellation_graph, link_endpoints,
};
use dijkstra::{congestion_dijkstra, reconstruct_path};

pub use route::{PathStatus, Route};

/// Finds the lowest cost path between two nodes of the graph.
///
/// An unreachable destination is not an error: the returned route has
/// [`PathStatus::Unreachable`], an infinite cost, and a path made of the
/// source followed by whatever tail the parent walk produced.
///
/// # Errors
///
/// Returns [`Error::UnknownNode`] if either position is not a graph node.
pub fn shortest_path(
    graph: &ConstellationGraph,
    source: &Position,
    destination: &Position,
) -> Result<Route, Error> {
    let source_idx = graph
        .node_index(source)
        .ok_or(Error::UnknownNode(*source))?;
    let destination_idx = graph
        .node_index(destination)
        .ok_or(Error::UnknownNode(*destination))?;

    let state = congestion_dijkstra(graph, source_idx);
    let (nodes, reached) = reconstruct_path(&state, source_idx, destination_idx);

    let path = nodes.into_iter().map(|node| graph.graph[node]).collect();
    let status = if reached {
        PathStatus::Complete
    } else {
        warn!("Destination {destination} is not reachable from {source}");
        PathStatus::Unreachable
    };
    let cost = if reached {
        state.distances[destination_idx.index()]
    } else {
        f64::INFINITY
    };

    Ok(Route {
        path,
        cost,
        status,
        links: None,
    })
}

/// Routes between two already linked endpoints
///
/// # Errors
///
/// Returns [`Error::UnknownNode`] if a linked node is not part of the graph.
pub fn route_between_links(
    graph: &ConstellationGraph,
    source: &EndpointLink,
    destination: &EndpointLink,
) -> Result<Route, Error> {
    let mut route = shortest_path(graph, &source.node, &destination.node)?;
    route.links = Some((*source, *destination));
    Ok(route)
}

/// Runs a full routing request.
///
/// Builds the graph over `leo_nodes` followed by `meo_nodes`, links every
/// endpoint to a LEO node and routes from the first endpoint to the last.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, no endpoints are
/// given, or an endpoint cannot be linked to any LEO node.
pub fn constellation_routing(
    leo_nodes: &[Position],
    meo_nodes: &[Position],
    endpoints: &[Position],
    congestion: &CongestionMap,
    config: &RoutingConfig,
) -> Result<Route, Error> {
    if endpoints.is_empty() {
        return Err(Error::NotEnoughEndpoints(0));
    }

    let nodes: Vec<Position> = leo_nodes.iter().chain(meo_nodes).copied().collect();
    let graph = build_constellation_graph(&nodes, congestion, config)?;
    let links = link_endpoints(endpoints, leo_nodes, congestion, config)?;

    let (Some(source), Some(destination)) = (links.first(), links.last()) else {
        return Err(Error::NotEnoughEndpoints(endpoints.len()));
    };

    let route = route_between_links(&graph, source, destination)?;
    info!(
        "Routed {} -> {}: {} nodes, cost {:.2}",
        source.endpoint,
        destination.endpoint,
        route.path.len(),
        route.cost
    );
    Ok(route)
}

/// Routes many endpoint pairs against one shared graph in parallel.
///
/// Every pair is linked and routed independently, results keep the order
/// of `pairs` and match what a serial run would produce.
pub fn route_pairs(
    graph: &ConstellationGraph,
    leo_nodes: &[Position],
    pairs: &[(Position, Position)],
    congestion: &CongestionMap,
    config: &RoutingConfig,
) -> Vec<Result<Route, Error>> {
    info!("Routing {} endpoint pairs", pairs.len());

    pairs
        .par_iter()
        .map(|&(start, end)| {
            let links = link_endpoints(&[start, end], leo_nodes, congestion, config)?;
            route_between_links(graph, &links[0], &links[1])
        })
        .collect()
}
