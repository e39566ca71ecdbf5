// Re-export key components
pub use crate::model::{
    CongestionCell, CongestionMap, ConstellationGraph, Edge, LinkClass, Position,
};
pub use crate::routing::{
    PathStatus, Route, constellation_routing, route_between_links, route_pairs, shortest_path,
};
pub use crate::simulation::{
    CongestionHeatmap, ConstellationLayout, Frame, HeatmapConfig, OrbitalShell,
};
pub use crate::topology::{
    DEFAULT_LEO_HEIGHT, DEFAULT_LEO_MAX_REACH, DEFAULT_MEO_HEIGHT, DEFAULT_MEO_MAX_REACH,
    EndpointLink, NodeCostModel, RoutingConfig, build_constellation_graph, link_endpoints,
};

pub use crate::Error;
pub use crate::NodeId;
