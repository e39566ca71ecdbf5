//! Scenario generators feeding the routing core: satellite ground tracks
//! and congestion heatmaps.

pub mod ground_track;
pub mod heatmap;

pub use ground_track::{ConstellationLayout, Frame, OrbitalShell};
pub use heatmap::{CongestionHeatmap, HeatmapConfig};
