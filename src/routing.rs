use pyo3::prelude::*;
use skyroute_core::prelude::*;

#[cfg(feature = "stubgen")]
use pyo3_stub_gen::derive::{gen_stub_pyclass, gen_stub_pyfunction, gen_stub_pymethods};

use crate::model::{
    PyCongestionMap, PyConstellationGraph, PyPosition, PyRoutingConfig, config_or_default,
    positions, tuples,
};

type PyLink = (PyPosition, PyPosition);

fn ground_points(points: Vec<(f64, f64)>) -> Vec<Position> {
    points
        .into_iter()
        .map(|(x, y)| Position::ground(x, y))
        .collect()
}

fn link_tuple(link: &EndpointLink) -> PyLink {
    (link.endpoint.into(), link.node.into())
}

/// Route
///
/// Result of a routing request. Unreachable routes keep the source and
/// destination nodes in `path` and report an infinite `cost`.
#[cfg_attr(feature = "stubgen", gen_stub_pyclass)]
#[pyclass(name = "Route")]
pub struct PyRoute {
    pub(crate) inner: Route,
}

#[cfg_attr(feature = "stubgen", gen_stub_pymethods)]
#[pymethods]
impl PyRoute {
    /// Node positions from the source node to the destination node
    #[getter]
    fn path(&self) -> Vec<PyPosition> {
        tuples(&self.inner.path)
    }

    #[getter]
    fn cost(&self) -> f64 {
        self.inner.cost
    }

    #[getter]
    fn reachable(&self) -> bool {
        self.inner.is_reachable()
    }

    #[getter]
    fn hop_count(&self) -> Option<usize> {
        self.inner.hop_count()
    }

    /// `(endpoint, node)` pairs of the source and destination uplinks
    #[getter]
    fn links(&self) -> Option<(PyLink, PyLink)> {
        self.inner
            .links
            .as_ref()
            .map(|(source, destination)| (link_tuple(source), link_tuple(destination)))
    }

    pub fn as_json(&self) -> PyResult<String> {
        self.inner.to_json().map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!(
                "Failed to serialize Route to JSON: {e}"
            ))
        })
    }

    fn __len__(&self) -> usize {
        self.inner.path.len()
    }

    fn __repr__(&self) -> String {
        if self.inner.is_reachable() {
            format!(
                "Route({} nodes, cost={:.2})",
                self.inner.path.len(),
                self.inner.cost
            )
        } else {
            "Route(unreachable)".to_string()
        }
    }
}

/// Find a congestion-aware route between ground endpoints
///
/// Builds the constellation graph, links every endpoint to its best LEO
/// satellite and routes from the first endpoint to the last.
///
/// Parameters
/// ----------
/// leo_nodes : list[tuple[float, float, float]]
///     LEO satellite positions
/// meo_nodes : list[tuple[float, float, float]]
///     MEO satellite positions
/// endpoints : list[tuple[float, float]]
///     Ground endpoints, at least one
/// congestion : CongestionMap
///     Congestion cells
/// config : RoutingConfig, optional
///     Layer constants, defaults are used if omitted
///
/// Returns
/// -------
/// Route
///
/// Raises
/// ------
/// ValueError
///     If no endpoints are given or an endpoint cannot be linked
///
/// Notes
/// -----
/// The function releases the GIL during processing.
#[cfg_attr(feature = "stubgen", gen_stub_pyfunction)]
#[pyfunction]
#[pyo3(signature = (leo_nodes, meo_nodes, endpoints, congestion, config = None))]
pub fn find_route(
    py: Python<'_>,
    leo_nodes: Vec<PyPosition>,
    meo_nodes: Vec<PyPosition>,
    endpoints: Vec<(f64, f64)>,
    congestion: &PyCongestionMap,
    config: Option<PyRef<'_, PyRoutingConfig>>,
) -> PyResult<PyRoute> {
    let config = config_or_default(config);
    let leo_nodes = positions(leo_nodes);
    let meo_nodes = positions(meo_nodes);
    let endpoints = ground_points(endpoints);

    py.detach(|| {
        constellation_routing(
            &leo_nodes,
            &meo_nodes,
            &endpoints,
            &congestion.inner,
            &config,
        )
        .map(|inner| PyRoute { inner })
        .map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("Routing failed: {e}"))
        })
    })
}

/// Route between two nodes of an already built graph
#[cfg_attr(feature = "stubgen", gen_stub_pyfunction)]
#[pyfunction(name = "shortest_path")]
pub fn py_shortest_path(
    py: Python<'_>,
    graph: &PyConstellationGraph,
    source: PyPosition,
    destination: PyPosition,
) -> PyResult<PyRoute> {
    py.detach(|| {
        shortest_path(&graph.graph, &source.into(), &destination.into())
            .map(|inner| PyRoute { inner })
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyKeyError, _>(e.to_string()))
    })
}

/// Link ground endpoints to LEO satellites
///
/// Returns
/// -------
/// list[tuple[tuple[float, float, float], tuple[float, float, float]]]
///     `(endpoint, node)` pairs in the order of `endpoints`
#[cfg_attr(feature = "stubgen", gen_stub_pyfunction)]
#[pyfunction(name = "link_endpoints")]
#[pyo3(signature = (endpoints, leo_nodes, congestion, config = None))]
pub fn py_link_endpoints(
    endpoints: Vec<(f64, f64)>,
    leo_nodes: Vec<PyPosition>,
    congestion: &PyCongestionMap,
    config: Option<PyRef<'_, PyRoutingConfig>>,
) -> PyResult<Vec<PyLink>> {
    let config = config_or_default(config);
    let links = link_endpoints(
        &ground_points(endpoints),
        &positions(leo_nodes),
        &congestion.inner,
        &config,
    )
    .map_err(|e| {
        PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("Linking failed: {e}"))
    })?;

    Ok(links.iter().map(link_tuple).collect())
}

/// Route many endpoint pairs against one graph in parallel
///
/// Parameters
/// ----------
/// graph : ConstellationGraph
///     Graph built from the same satellites as `leo_nodes`
/// leo_nodes : list[tuple[float, float, float]]
///     LEO satellites endpoints may link to
/// pairs : list[tuple[tuple[float, float], tuple[float, float]]]
///     `(start, end)` ground endpoints
/// congestion : CongestionMap
/// config : RoutingConfig, optional
///
/// Returns
/// -------
/// list[Route | None]
///     One entry per pair, `None` where linking or routing failed
#[cfg_attr(feature = "stubgen", gen_stub_pyfunction)]
#[pyfunction(name = "route_pairs")]
#[pyo3(signature = (graph, leo_nodes, pairs, congestion, config = None))]
pub fn py_route_pairs(
    py: Python<'_>,
    graph: &PyConstellationGraph,
    leo_nodes: Vec<PyPosition>,
    pairs: Vec<((f64, f64), (f64, f64))>,
    congestion: &PyCongestionMap,
    config: Option<PyRef<'_, PyRoutingConfig>>,
) -> PyResult<Vec<Option<PyRoute>>> {
    let config = config_or_default(config);
    let leo_nodes = positions(leo_nodes);
    let pairs: Vec<(Position, Position)> = pairs
        .into_iter()
        .map(|((sx, sy), (ex, ey))| (Position::ground(sx, sy), Position::ground(ex, ey)))
        .collect();

    let results = py.detach(|| {
        route_pairs(
            &graph.graph,
            &leo_nodes,
            &pairs,
            &congestion.inner,
            &config,
        )
    });

    Ok(results
        .into_iter()
        .zip(&pairs)
        .map(|(result, (start, end))| match result {
            Ok(inner) => Some(PyRoute { inner }),
            Err(e) => {
                log::warn!("Routing failed for pair {start} -> {end}, error: {e}");
                None
            }
        })
        .collect())
}
