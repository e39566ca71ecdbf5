//! Randomised congestion heatmaps over the satellite band

use itertools::iproduct;
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ground_track::Frame;
use crate::{CongestionMap, Error};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapConfig {
    pub frame: Frame,
    /// Number of grid rows covering the frame height
    pub grid_density: u32,
    /// Highest level above the baseline of `1`
    pub complexity: f64,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            frame: Frame::default(),
            grid_density: 30,
            complexity: 10.0,
        }
    }
}

/// Square grid of congestion cells covering the band satellites travel in
#[derive(Debug, Clone)]
pub struct CongestionHeatmap {
    config: HeatmapConfig,
    cell_size: f64,
    columns: usize,
    rows: usize,
    map: CongestionMap,
}

impl CongestionHeatmap {
    /// Lays out an empty grid, call [`CongestionHeatmap::generate`] to
    /// populate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid density is zero, the frame is
    /// degenerate, or the complexity is negative.
    pub fn new(config: HeatmapConfig) -> Result<Self, Error> {
        if config.grid_density == 0 {
            return Err(Error::InvalidConfig(
                "Heatmap grid density must be above 0".to_string(),
            ));
        }
        let Frame { width, height } = config.frame;
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "Heatmap frame must be positive, got {width}x{height}"
            )));
        }
        if !config.complexity.is_finite() || config.complexity < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "Heatmap complexity must be non-negative, got {}",
                config.complexity
            )));
        }

        let aspect_ratio = width / height;
        let cell_size = width / aspect_ratio / f64::from(config.grid_density);

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (columns, rows) = (
            (width / cell_size) as usize,
            (height / cell_size) as usize,
        );

        Ok(Self {
            config,
            cell_size,
            columns,
            rows,
            map: CongestionMap::new(),
        })
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn map(&self) -> &CongestionMap {
        &self.map
    }

    pub fn into_map(self) -> CongestionMap {
        self.map
    }

    /// Assigns a fresh level to every grid cell inside the band,
    /// column by column.
    ///
    /// # Errors
    ///
    /// Returns an error if a drawn level cannot be stored.
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), Error> {
        let mut levels = draw_levels(rng, self.columns * self.rows, self.config.complexity);

        for (column, row) in iproduct!(0..self.columns, 0..self.rows) {
            if !self.row_in_band(row) {
                continue;
            }
            let level = levels.pop().unwrap_or(1.0);
            self.set_cell(column, row, level)?;
        }

        debug!(
            "Generated congestion heatmap with {} cells ({}x{} grid)",
            self.map.len(),
            self.columns,
            self.rows
        );
        Ok(())
    }

    /// Redraws the level of up to 2% of the grid positions.
    /// Positions outside the band are drawn but left untouched.
    ///
    /// Returns the number of cells that received a new level.
    ///
    /// # Errors
    ///
    /// Returns an error if a drawn level cannot be stored.
    pub fn refresh<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize, Error> {
        let grid_size = self.columns * self.rows;
        let limit = grid_size / 50;
        if limit == 0 {
            return Ok(0);
        }

        let attempts = rng.gen_range(0..limit);
        let mut changed = 0;
        for _ in 0..attempts {
            let row = rng.gen_range(0..self.rows);
            let column = rng.gen_range(0..self.columns);
            if !self.row_in_band(row) {
                continue;
            }

            let levels = draw_levels(rng, grid_size, self.config.complexity);
            let level = levels[rng.gen_range(0..levels.len())];
            self.set_cell(column, row, level)?;
            changed += 1;
        }

        Ok(changed)
    }

    #[allow(clippy::cast_precision_loss)]
    fn row_in_band(&self, row: usize) -> bool {
        self.config.frame.in_band(row as f64 * self.cell_size)
    }

    #[allow(clippy::cast_precision_loss)]
    fn set_cell(&mut self, column: usize, row: usize, level: f64) -> Result<(), Error> {
        let size = self.cell_size;
        let (x, y) = (column as f64 * size, row as f64 * size);
        self.map.insert((x, y), (x + size, y + size), level)
    }
}

/// Exponential(1) samples scaled into `1..=complexity + 1` and rounded
/// half to even.
fn draw_levels<R: Rng + ?Sized>(rng: &mut R, count: usize, complexity: f64) -> Vec<f64> {
    let samples: Vec<f64> = (0..count.max(1))
        .map(|_| {
            let u: f64 = rng.gen_range(0.0..1.0);
            -(1.0 - u).ln()
        })
        .collect();
    let max = samples.iter().copied().fold(0.0, f64::max);

    samples
        .into_iter()
        .map(|sample| {
            let scaled = if max > 0.0 { sample / max } else { 0.0 };
            (scaled * complexity + 1.0).round_ties_even()
        })
        .collect()
}
