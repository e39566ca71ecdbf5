use serde::{Deserialize, Serialize};

use crate::{ConstellationGraph, EndpointLink, Error, Position};

/// Outcome of a shortest path search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathStatus {
    /// Every consecutive pair of the path is a link
    Complete,
    /// The destination could not be reached, the path is the source
    /// followed by a disconnected tail
    Unreachable,
}

/// Shortest path between two linked endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Nodes from the source's linked node to the destination's
    pub path: Vec<Position>,
    /// Accumulated link weights and node costs, infinite when unreachable
    pub cost: f64,
    pub status: PathStatus,
    /// Gateway links of the source and destination endpoints, if the
    /// route was computed from endpoints
    pub links: Option<(EndpointLink, EndpointLink)>,
}

impl Route {
    pub fn is_reachable(&self) -> bool {
        self.status == PathStatus::Complete
    }

    pub fn source(&self) -> Option<&Position> {
        self.path.first()
    }

    pub fn destination(&self) -> Option<&Position> {
        self.path.last()
    }

    /// Number of inter-satellite links on a complete path
    pub fn hop_count(&self) -> Option<usize> {
        self.is_reachable().then(|| self.path.len().saturating_sub(1))
    }

    /// Checks the path against the graph it was computed on
    pub fn is_continuous(&self, graph: &ConstellationGraph) -> bool {
        graph.is_continuous(&self.path)
    }

    /// Serializes the route, an infinite cost is written as `null`
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }
}
