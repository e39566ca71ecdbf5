//! Congestion-aware packet routing through a two-layer (LEO and MEO)
//! satellite constellation.
//!
//! A routing request runs three steps, each one an explicit value handed
//! to the next:
//!
//! 1. [`build_constellation_graph`] links orbiting nodes within their
//!    layer's reach and derives per-node congestion costs,
//! 2. [`link_endpoints`] attaches ground endpoints to LEO gateway nodes,
//! 3. [`shortest_path`] runs a congestion-aware Dijkstra between the
//!    gateways.
//!
//! [`constellation_routing`] chains all three.

pub mod error;
pub mod model;
pub mod prelude;
pub mod routing;
pub mod simulation;
pub mod topology;

pub use error::Error;
pub use model::{CongestionCell, CongestionMap, ConstellationGraph, Edge, Link, LinkClass, Position};
pub use routing::{
    PathStatus, Route, constellation_routing, route_between_links, route_pairs, shortest_path,
};
pub use topology::{
    EndpointLink, NodeCostModel, RoutingConfig, build_constellation_graph, link_endpoints,
};

/// Graph node handle, assigned in insertion order
pub type NodeId = petgraph::graph::NodeIndex;
