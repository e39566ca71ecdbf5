//! Data model for constellation routing
//!
//! Contains node positions, congestion cells and the reachability graph.

pub mod congestion;
pub mod graph;
pub mod position;

pub use congestion::{CongestionCell, CongestionMap};
pub use graph::{ConstellationGraph, Edge, Link, LinkClass};
pub use position::Position;
