//! This module is responsible for building the per-request routing
//! topology: the reachability graph between orbiting nodes and the links
//! connecting ground endpoints to it.

mod builder;
mod config;
mod linker;

pub use builder::build_constellation_graph;
pub use config::{
    DEFAULT_LEO_HEIGHT, DEFAULT_LEO_MAX_REACH, DEFAULT_MEO_HEIGHT, DEFAULT_MEO_MAX_REACH,
    NodeCostModel, RoutingConfig,
};
pub use linker::{EndpointLink, link_endpoints};
