use pyo3::prelude::*;
use rayon::prelude::*;
use skyroute_core::prelude::*;

#[cfg(feature = "stubgen")]
use pyo3_stub_gen::derive::gen_stub_pyfunction;

use crate::model::{
    PyCongestionMap, PyConstellationGraph, PyPosition, PyRoutingConfig, config_or_default,
    positions,
};

/// Route costs between every pair of ground endpoints
///
/// Every endpoint is linked once, then each row is routed in parallel
/// against the shared graph.
///
/// Returns
/// -------
/// list[list[float | None]]
///     `matrix[i][j]` is the cost from endpoint `i` to endpoint `j`, `None`
///     if `j` is unreachable from `i`
///
/// Notes
/// -----
/// The function releases the GIL during processing.
#[cfg_attr(feature = "stubgen", gen_stub_pyfunction)]
#[pyfunction]
#[pyo3(signature = (graph, leo_nodes, endpoints, congestion, config = None))]
pub fn cost_matrix(
    py: Python<'_>,
    graph: &PyConstellationGraph,
    leo_nodes: Vec<PyPosition>,
    endpoints: Vec<(f64, f64)>,
    congestion: &PyCongestionMap,
    config: Option<PyRef<'_, PyRoutingConfig>>,
) -> PyResult<Vec<Vec<Option<f64>>>> {
    let config = config_or_default(config);
    let endpoints: Vec<Position> = endpoints
        .into_iter()
        .map(|(x, y)| Position::ground(x, y))
        .collect();

    let links = link_endpoints(
        &endpoints,
        &positions(leo_nodes),
        &congestion.inner,
        &config,
    )
    .map_err(|e| {
        PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("Linking failed: {e}"))
    })?;

    let matrix = py.detach(|| {
        links
            .par_iter()
            .map(|source| {
                links
                    .iter()
                    .map(|destination| {
                        match route_between_links(&graph.graph, source, destination) {
                            Ok(route) if route.is_reachable() => Some(route.cost),
                            Ok(_) => None,
                            Err(e) => {
                                log::warn!(
                                    "Routing failed for endpoint {}, error: {e}",
                                    source.endpoint
                                );
                                None
                            }
                        }
                    })
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>()
    });

    Ok(matrix)
}
