//! Node positions and the distance functions used by the graph builder

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use geo::Coord;
use serde::{Deserialize, Serialize};

/// Position of a node in the simulation frame.
///
/// `z` is an altitude class rather than a physical altitude: ground
/// endpoints sit at `0`, orbiting nodes at the configured LEO or MEO
/// height. Positions double as node identity, so equality and hashing
/// are defined on the coordinate values themselves.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Ground-level position
    pub const fn ground(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Planar projection of the position
    pub fn planar(&self) -> Coord<f64> {
        Coord {
            x: self.x,
            y: self.y,
        }
    }

    /// Full 3D Euclidean distance
    pub fn distance(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Euclidean distance of the planar projections, altitude ignored
    pub fn planar_distance(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    // `-0.0 + 0.0` is `+0.0`, so both zeroes share one bit pattern
    fn key(&self) -> [u64; 3] {
        [
            (self.x + 0.0).to_bits(),
            (self.y + 0.0).to_bits(),
            (self.z + 0.0).to_bits(),
        ]
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// Lexicographic total order on `(x, y, z)`, used to store undirected
/// edges canonically.
impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.x + 0.0)
            .total_cmp(&(other.x + 0.0))
            .then_with(|| (self.y + 0.0).total_cmp(&(other.y + 0.0)))
            .then_with(|| (self.z + 0.0).total_cmp(&(other.z + 0.0)))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<(f64, f64, f64)> for Position {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self::ground(x, y)
    }
}

impl From<Position> for (f64, f64, f64) {
    fn from(position: Position) -> Self {
        (position.x, position.y, position.z)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
