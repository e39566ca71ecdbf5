//! Parametric ground tracks for constellation scenarios.
//!
//! Satellites sweep the frame horizontally while following a sine wave
//! vertically, which is a cheap stand-in for a Mercator-projected orbit.
//! This is not orbital mechanics: positions are a pure function of
//! elapsed time and are only meant to feed the routing core.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::Position;
use crate::topology::{DEFAULT_LEO_HEIGHT, DEFAULT_MEO_HEIGHT};

/// Simulation frame the ground tracks are laid out in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 960.0,
        }
    }
}

impl Frame {
    /// Vertical half-range of the tracks around the frame's center line
    pub fn amplitude(&self) -> f64 {
        self.height / 2.0 - self.width / 10.0
    }

    /// Rows `[height / 2 - amplitude, height / 2 + amplitude)` are the
    /// band satellites can reach.
    pub fn in_band(&self, y: f64) -> bool {
        let center = self.height / 2.0;
        let amplitude = self.amplitude();
        y >= center - amplitude && y < center + amplitude
    }
}

/// One orbital layer of evenly spaced satellites
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalShell {
    pub count: usize,
    /// Altitude class assigned to every satellite of the shell
    pub height: f64,
    /// Relative angular speed of the shell
    pub speed: f64,
    /// Sine periods per frame width
    pub cycles: f64,
    /// Multiplier of the per-satellite time offset
    pub spacing: f64,
    /// Phase shift in degrees
    pub phase: f64,
}

impl OrbitalShell {
    pub fn leo(count: usize) -> Self {
        Self {
            count,
            height: DEFAULT_LEO_HEIGHT,
            speed: 1.0,
            cycles: 13.0 / 12.0,
            spacing: 12.0,
            phase: 0.0,
        }
    }

    pub fn meo(count: usize) -> Self {
        Self {
            count,
            height: DEFAULT_MEO_HEIGHT,
            speed: 0.5,
            cycles: 8.0 / 7.0,
            spacing: 7.0,
            phase: 0.0,
        }
    }
}

/// LEO and MEO shells moving over a shared frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstellationLayout {
    pub frame: Frame,
    /// Scales elapsed milliseconds into track time
    pub speed_multiplier: f64,
    pub leo: OrbitalShell,
    pub meo: OrbitalShell,
}

impl Default for ConstellationLayout {
    fn default() -> Self {
        Self {
            frame: Frame::default(),
            speed_multiplier: 1.0 / 500.0,
            leo: OrbitalShell::leo(500),
            meo: OrbitalShell::meo(125),
        }
    }
}

impl ConstellationLayout {
    pub fn leo_positions(&self, elapsed_ms: f64) -> Vec<Position> {
        self.shell_positions(&self.leo, elapsed_ms)
    }

    pub fn meo_positions(&self, elapsed_ms: f64) -> Vec<Position> {
        self.shell_positions(&self.meo, elapsed_ms)
    }

    /// Positions of every satellite of `shell` after `elapsed_ms`
    pub fn shell_positions(&self, shell: &OrbitalShell, elapsed_ms: f64) -> Vec<Position> {
        if shell.count == 0 {
            return Vec::new();
        }

        let width = self.frame.width;
        let frequency = shell.cycles / width;
        let amplitude = self.frame.amplitude();
        let center = self.frame.height / 2.0;
        let slot = width / shell.count as f64;

        (0..shell.count)
            .map(|i| {
                let delay = slot * i as f64 * shell.spacing;
                let time = elapsed_ms * shell.speed * self.speed_multiplier + delay;
                let y =
                    amplitude * (2.0 * PI * frequency * time + shell.phase.to_radians()).sin()
                        + center;
                Position::new(time.rem_euclid(width), y, shell.height)
            })
            .collect()
    }
}
