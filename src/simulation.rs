use pyo3::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use skyroute_core::prelude::*;

#[cfg(feature = "stubgen")]
use pyo3_stub_gen::derive::{gen_stub_pyclass, gen_stub_pymethods};

use crate::model::{PyCongestionMap, PyPosition, tuples};

/// ConstellationLayout
///
/// Sine ground tracks for the LEO and MEO shells over a rectangular frame.
///
/// Parameters
/// ----------
/// leo_count : int, default=500
///     Number of LEO satellites
/// meo_count : int, default=125
///     Number of MEO satellites
/// width : float, default=1920
/// height : float, default=960
#[cfg_attr(feature = "stubgen", gen_stub_pyclass)]
#[pyclass(name = "ConstellationLayout")]
pub struct PyConstellationLayout {
    inner: ConstellationLayout,
}

#[cfg_attr(feature = "stubgen", gen_stub_pymethods)]
#[pymethods]
impl PyConstellationLayout {
    #[new]
    #[pyo3(signature = (leo_count = 500, meo_count = 125, width = 1920.0, height = 960.0))]
    pub fn new(leo_count: usize, meo_count: usize, width: f64, height: f64) -> Self {
        Self {
            inner: ConstellationLayout {
                frame: Frame { width, height },
                leo: OrbitalShell::leo(leo_count),
                meo: OrbitalShell::meo(meo_count),
                ..ConstellationLayout::default()
            },
        }
    }

    /// LEO positions after `elapsed_ms` milliseconds
    pub fn leo_positions(&self, elapsed_ms: f64) -> Vec<PyPosition> {
        tuples(&self.inner.leo_positions(elapsed_ms))
    }

    /// MEO positions after `elapsed_ms` milliseconds
    pub fn meo_positions(&self, elapsed_ms: f64) -> Vec<PyPosition> {
        tuples(&self.inner.meo_positions(elapsed_ms))
    }

    fn __repr__(&self) -> String {
        format!(
            "ConstellationLayout(leo={}, meo={})",
            self.inner.leo.count, self.inner.meo.count
        )
    }
}

/// CongestionHeatmap
///
/// Randomised grid of congestion cells over the satellite band.
///
/// Parameters
/// ----------
/// seed : int, optional
///     Seed for reproducible heatmaps, drawn from the OS if omitted
/// grid_density : int, default=30
///     Number of grid rows covering the frame height
/// complexity : float, default=10
///     Highest level above the baseline of 1
/// width : float, default=1920
/// height : float, default=960
#[cfg_attr(feature = "stubgen", gen_stub_pyclass)]
#[pyclass(name = "CongestionHeatmap")]
pub struct PyCongestionHeatmap {
    heatmap: CongestionHeatmap,
    rng: StdRng,
}

#[cfg_attr(feature = "stubgen", gen_stub_pymethods)]
#[pymethods]
impl PyCongestionHeatmap {
    #[new]
    #[pyo3(signature = (seed = None, grid_density = 30, complexity = 10.0, width = 1920.0, height = 960.0))]
    pub fn new(
        seed: Option<u64>,
        grid_density: u32,
        complexity: f64,
        width: f64,
        height: f64,
    ) -> PyResult<Self> {
        let config = HeatmapConfig {
            frame: Frame { width, height },
            grid_density,
            complexity,
        };
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let heatmap = CongestionHeatmap::new(config)
            .and_then(|mut heatmap| {
                heatmap.generate(&mut rng)?;
                Ok(heatmap)
            })
            .map_err(|e| {
                PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                    "Failed to generate heatmap: {e}"
                ))
            })?;

        Ok(Self { heatmap, rng })
    }

    /// Redraws a few cells, returns how many changed
    pub fn refresh(&mut self) -> PyResult<usize> {
        self.heatmap
            .refresh(&mut self.rng)
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(e.to_string()))
    }

    #[getter]
    fn cell_size(&self) -> f64 {
        self.heatmap.cell_size()
    }

    /// Snapshot of the current cells
    pub fn congestion_map(&self) -> PyCongestionMap {
        PyCongestionMap {
            inner: self.heatmap.map().clone(),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "CongestionHeatmap({}x{} grid, {} cells)",
            self.heatmap.columns(),
            self.heatmap.rows(),
            self.heatmap.map().len()
        )
    }
}
