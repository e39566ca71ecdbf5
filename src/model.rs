use pyo3::prelude::*;
use skyroute_core::prelude::*;

#[cfg(feature = "stubgen")]
use pyo3_stub_gen::derive::{gen_stub_pyclass, gen_stub_pyfunction, gen_stub_pymethods};

pub(crate) type PyPosition = (f64, f64, f64);
pub(crate) type CellTuple = ((f64, f64), (f64, f64), f64);

pub(crate) fn positions(points: Vec<PyPosition>) -> Vec<Position> {
    points.into_iter().map(Position::from).collect()
}

pub(crate) fn tuples(positions: &[Position]) -> Vec<PyPosition> {
    positions.iter().copied().map(PyPosition::from).collect()
}

pub(crate) fn config_or_default(config: Option<PyRef<'_, PyRoutingConfig>>) -> RoutingConfig {
    config.map(|c| c.inner.clone()).unwrap_or_default()
}

/// RoutingConfig
///
/// Layer constants and cost parameters shared by graph construction,
/// endpoint linking and routing.
///
/// Parameters
/// ----------
/// leo_height : float, default=45
///     Altitude class (z coordinate) of LEO satellites
/// meo_height : float, default=450
///     Altitude class (z coordinate) of MEO satellites
/// leo_max_reach : float, default=75
///     Maximum LEO to LEO link distance
/// meo_max_reach : float, default=225
///     Maximum MEO to MEO and LEO to MEO link distance
/// node_cost_factor : float, optional
///     If set, node cost is ``factor * level`` instead of the default
///     ``last pair distance * level - 1``
/// max_link_distance : float, optional
///     Endpoints only link to LEO satellites strictly closer than this
#[cfg_attr(feature = "stubgen", gen_stub_pyclass)]
#[pyclass(name = "RoutingConfig")]
pub struct PyRoutingConfig {
    pub(crate) inner: RoutingConfig,
}

#[cfg_attr(feature = "stubgen", gen_stub_pymethods)]
#[pymethods]
impl PyRoutingConfig {
    #[new]
    #[pyo3(signature = (
        leo_height = DEFAULT_LEO_HEIGHT,
        meo_height = DEFAULT_MEO_HEIGHT,
        leo_max_reach = DEFAULT_LEO_MAX_REACH,
        meo_max_reach = DEFAULT_MEO_MAX_REACH,
        node_cost_factor = None,
        max_link_distance = None,
    ))]
    pub fn new(
        leo_height: f64,
        meo_height: f64,
        leo_max_reach: f64,
        meo_max_reach: f64,
        node_cost_factor: Option<f64>,
        max_link_distance: Option<f64>,
    ) -> PyResult<Self> {
        let node_cost = node_cost_factor
            .map(|factor| NodeCostModel::Scaled { factor })
            .unwrap_or_default();

        let inner = RoutingConfig {
            leo_height,
            meo_height,
            leo_max_reach,
            meo_max_reach,
            node_cost,
            max_link_distance,
            ..RoutingConfig::default()
        };
        inner.validate().map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("Invalid routing config: {e}"))
        })?;

        Ok(Self { inner })
    }

    #[staticmethod]
    pub fn from_json(json: &str) -> PyResult<Self> {
        let inner = RoutingConfig::from_json(json).map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "Failed to parse routing config: {e}"
            ))
        })?;
        Ok(Self { inner })
    }

    pub fn as_json(&self) -> PyResult<String> {
        self.inner.to_json().map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!(
                "Failed to serialize RoutingConfig to JSON: {e}"
            ))
        })
    }

    #[getter]
    fn leo_height(&self) -> f64 {
        self.inner.leo_height
    }

    #[getter]
    fn meo_height(&self) -> f64 {
        self.inner.meo_height
    }

    #[getter]
    fn leo_max_reach(&self) -> f64 {
        self.inner.leo_max_reach
    }

    #[getter]
    fn meo_max_reach(&self) -> f64 {
        self.inner.meo_max_reach
    }

    fn __repr__(&self) -> PyResult<String> {
        self.as_json()
    }
}

/// CongestionMap
///
/// Ordered rectangular cells with congestion levels. Lookups resolve to
/// the first cell containing a point, boundaries included.
///
/// Example:
///
/// .. code-block:: python
///
///     congestion = CongestionMap([((0, 0), (32, 32), 3.0)])
///     congestion.insert((32, 0), (64, 32), 1.0)
#[cfg_attr(feature = "stubgen", gen_stub_pyclass)]
#[pyclass(name = "CongestionMap")]
#[derive(Default)]
pub struct PyCongestionMap {
    pub(crate) inner: CongestionMap,
}

#[cfg_attr(feature = "stubgen", gen_stub_pymethods)]
#[pymethods]
impl PyCongestionMap {
    #[new]
    #[pyo3(signature = (cells = None))]
    pub fn new(cells: Option<Vec<CellTuple>>) -> PyResult<Self> {
        let mut map = Self::default();
        for (top_left, bottom_right, level) in cells.unwrap_or_default() {
            map.insert(top_left, bottom_right, level)?;
        }
        Ok(map)
    }

    pub fn insert(
        &mut self,
        top_left: (f64, f64),
        bottom_right: (f64, f64),
        level: f64,
    ) -> PyResult<()> {
        self.inner
            .insert(top_left, bottom_right, level)
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))
    }

    pub fn level_at(&self, x: f64, y: f64) -> Option<f64> {
        self.inner.level_at(geo_coord(x, y))
    }

    pub fn cells(&self) -> Vec<CellTuple> {
        self.inner
            .cells()
            .iter()
            .map(|cell| {
                let (top_left, bottom_right) = (cell.top_left(), cell.bottom_right());
                (
                    (top_left.x, top_left.y),
                    (bottom_right.x, bottom_right.y),
                    cell.level,
                )
            })
            .collect()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        format!("CongestionMap with {} cells", self.inner.len())
    }
}

fn geo_coord(x: f64, y: f64) -> geo::Coord<f64> {
    geo::Coord { x, y }
}

/// ConstellationGraph
///
/// Reachability graph between LEO and MEO satellites for one routing
/// request, with per-node congestion costs.
#[cfg_attr(feature = "stubgen", gen_stub_pyclass)]
#[pyclass(name = "ConstellationGraph")]
pub struct PyConstellationGraph {
    pub(crate) graph: ConstellationGraph,
}

#[cfg_attr(feature = "stubgen", gen_stub_pymethods)]
#[pymethods]
impl PyConstellationGraph {
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Congestion cost of the node at `position`, ``inf`` if it lies in no
    /// congestion cell, ``None`` if there is no such node
    pub fn node_cost(&self, position: PyPosition) -> Option<f64> {
        self.graph.node_cost(&position.into())
    }

    /// Links as ``(a, b, weight)`` with ``a < b``
    pub fn edges(&self) -> Vec<(PyPosition, PyPosition, f64)> {
        self.graph
            .edges()
            .map(|edge| (edge.a.into(), edge.b.into(), edge.weight))
            .collect()
    }

    pub fn neighbors(&self, position: PyPosition) -> Vec<(PyPosition, f64)> {
        self.graph
            .neighbors(&position.into())
            .into_iter()
            .map(|(other, weight)| (other.into(), weight))
            .collect()
    }

    /// Whether every consecutive pair of `path` is a link of the graph
    pub fn is_continuous(&self, path: Vec<PyPosition>) -> bool {
        self.graph.is_continuous(&positions(path))
    }

    fn __repr__(&self) -> String {
        format!(
            "ConstellationGraph with {} nodes and {} links",
            self.graph.node_count(),
            self.graph.edge_count()
        )
    }
}

/// Build the reachability graph between orbiting satellites
///
/// Parameters
/// ----------
/// leo_nodes : list[tuple[float, float, float]]
///     LEO satellite positions, without duplicates
/// meo_nodes : list[tuple[float, float, float]]
///     MEO satellite positions, without duplicates
/// congestion : CongestionMap
///     Congestion cells used to derive per-node costs
/// config : RoutingConfig, optional
///     Layer constants, defaults are used if omitted
///
/// Returns
/// -------
/// ConstellationGraph
///
/// Notes
/// -----
/// The function releases the GIL during processing.
#[cfg_attr(feature = "stubgen", gen_stub_pyfunction)]
#[pyfunction(name = "build_constellation_graph")]
#[pyo3(signature = (leo_nodes, meo_nodes, congestion, config = None))]
pub fn py_build_constellation_graph(
    py: Python<'_>,
    leo_nodes: Vec<PyPosition>,
    meo_nodes: Vec<PyPosition>,
    congestion: &PyCongestionMap,
    config: Option<PyRef<'_, PyRoutingConfig>>,
) -> PyResult<PyConstellationGraph> {
    let config = config_or_default(config);
    let nodes: Vec<Position> = positions(leo_nodes)
        .into_iter()
        .chain(positions(meo_nodes))
        .collect();

    py.detach(|| {
        let graph = build_constellation_graph(&nodes, &congestion.inner, &config).map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "Failed to build constellation graph: {e}"
            ))
        })?;

        Ok(PyConstellationGraph { graph })
    })
}
