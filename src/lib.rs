use pyo3::prelude::*;

#[cfg(feature = "stubgen")]
use pyo3_stub_gen::define_stub_info_gatherer;

use matrix::cost_matrix;
use model::{PyCongestionMap, PyConstellationGraph, PyRoutingConfig, py_build_constellation_graph};
use routing::{PyRoute, find_route, py_link_endpoints, py_route_pairs, py_shortest_path};
use simulation::{PyCongestionHeatmap, PyConstellationLayout};

pub mod matrix;
pub mod model;
pub mod routing;
pub mod simulation;

/// Congestion-aware routing over LEO and MEO satellite constellations.
#[pymodule]
fn skyroute(m: &Bound<'_, PyModule>) -> PyResult<()> {
    pyo3_log::init();

    m.add_class::<PyRoutingConfig>()?;
    m.add_class::<PyCongestionMap>()?;
    m.add_class::<PyConstellationGraph>()?;
    m.add_function(wrap_pyfunction!(py_build_constellation_graph, m)?)?;

    m.add_class::<PyRoute>()?;
    m.add_function(wrap_pyfunction!(find_route, m)?)?;
    m.add_function(wrap_pyfunction!(py_shortest_path, m)?)?;
    m.add_function(wrap_pyfunction!(py_link_endpoints, m)?)?;
    m.add_function(wrap_pyfunction!(py_route_pairs, m)?)?;

    m.add_function(wrap_pyfunction!(cost_matrix, m)?)?;

    m.add_class::<PyConstellationLayout>()?;
    m.add_class::<PyCongestionHeatmap>()?;
    Ok(())
}

#[cfg(feature = "stubgen")]
define_stub_info_gatherer!(stub_info);
