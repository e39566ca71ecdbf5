use thiserror::Error;

use crate::Position;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Node {0} is not part of the constellation graph")]
    UnknownNode(Position),
    #[error("No LEO node can be linked to endpoint {endpoint}")]
    NoLinkCandidate { endpoint: Position },
    #[error("Routing needs at least one endpoint, got {0}")]
    NotEnoughEndpoints(usize),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
