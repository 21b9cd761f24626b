//! PyO3 bindings.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::cost::{HeuristicMode, UnitCost};
use crate::error::RouteError;
use crate::frontier::Frontier;
use crate::grid::{Grid, RoutingGrid};
use crate::router::MazeRouter;
use crate::rules::{LayerRule, RouterConfig};
use crate::types::{BoundingBox, Capacity, Cost, EdgeId, Net, Point};

impl From<RouteError> for PyErr {
    fn from(err: RouteError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[inline]
fn point((x, y, z): (u32, u32, u32)) -> Point {
    Point::new(x, y, z)
}

#[inline]
fn unpack(p: Point) -> (u32, u32, u32) {
    (p.x, p.y, p.z)
}

/// Routing grid with per-edge usage and capacity
#[pyclass(name = "Grid")]
pub struct PyGrid {
    inner: Grid,
}

#[pymethods]
impl PyGrid {
    #[new]
    fn new(size_x: u32, size_y: u32, layers: u32, capacity: Capacity) -> PyResult<Self> {
        Ok(Self {
            inner: Grid::new(size_x, size_y, layers, capacity)?,
        })
    }

    fn num_cells(&self) -> usize {
        self.inner.num_cells()
    }

    fn num_edges(&self) -> usize {
        self.inner.num_edges()
    }

    /// Edge id joining two adjacent (x, y, z) cells, or None
    fn edge_between(&self, a: (u32, u32, u32), b: (u32, u32, u32)) -> Option<u32> {
        let a = self.inner.cell_id(point(a))?;
        let b = self.inner.cell_id(point(b))?;
        self.inner.edge_between(a, b).map(|e| e.0)
    }

    /// Endpoints of an edge as ((x, y, z), (x, y, z))
    fn edge_cells(&self, edge: u32) -> PyResult<((u32, u32, u32), (u32, u32, u32))> {
        let edge = self.edge(edge)?;
        let (a, b) = edge.cells;
        Ok((unpack(self.inner.coord(a)), unpack(self.inner.coord(b))))
    }

    fn usage(&self, edge: u32) -> PyResult<Capacity> {
        Ok(self.edge(edge)?.usage)
    }

    fn capacity(&self, edge: u32) -> PyResult<Capacity> {
        Ok(self.edge(edge)?.capacity)
    }

    fn set_usage(&mut self, edge: u32, usage: Capacity) -> PyResult<()> {
        self.edge_mut(edge)?.usage = usage;
        Ok(())
    }

    fn set_capacity(&mut self, edge: u32, capacity: Capacity) -> PyResult<()> {
        self.edge_mut(edge)?.capacity = capacity;
        Ok(())
    }
}

impl PyGrid {
    fn edge(&self, edge: u32) -> PyResult<&crate::grid::Edge> {
        self.inner
            .get_edge(EdgeId(edge))
            .ok_or_else(|| PyValueError::new_err(format!("no edge {edge}")))
    }

    fn edge_mut(&mut self, edge: u32) -> PyResult<&mut crate::grid::Edge> {
        self.inner
            .edge_mut(EdgeId(edge))
            .ok_or_else(|| PyValueError::new_err(format!("no edge {edge}")))
    }
}

/// A* maze router holding its own frontier
#[pyclass(name = "MazeRouter")]
pub struct PyMazeRouter {
    config: RouterConfig,
    frontier: Frontier,
}

#[pymethods]
impl PyMazeRouter {
    /// min_widths / min_spacings: per-layer rules, same length
    #[new]
    #[pyo3(signature = (min_widths, min_spacings, spatial_heuristic=false))]
    fn new(
        min_widths: Vec<Capacity>,
        min_spacings: Vec<Capacity>,
        spatial_heuristic: bool,
    ) -> PyResult<Self> {
        if min_widths.len() != min_spacings.len() {
            return Err(PyValueError::new_err(
                "min_widths and min_spacings must have the same length",
            ));
        }
        let heuristic = if spatial_heuristic {
            HeuristicMode::Spatial
        } else {
            HeuristicMode::Planar
        };
        let config = RouterConfig {
            heuristic,
            layers: min_widths
                .into_iter()
                .zip(min_spacings)
                .map(|(w, s)| LayerRule::new(w, s))
                .collect(),
        };
        config.validate()?;
        Ok(Self {
            config,
            frontier: Frontier::new(),
        })
    }

    /// Load rules from a TOML document
    #[staticmethod]
    fn from_toml(text: &str) -> PyResult<Self> {
        Ok(Self {
            config: RouterConfig::from_toml_str(text)?,
            frontier: Frontier::new(),
        })
    }

    /// Route source -> sink inside the XY box [bbox_min, bbox_max].
    /// Returns (cost, edge ids); cost is inf and the list empty when unreachable.
    /// edge_costs: optional per-edge cost list, otherwise every edge costs 1.
    #[pyo3(signature = (grid, source, sink, allow_overflow, bbox_min, bbox_max, edge_costs=None))]
    #[allow(clippy::too_many_arguments)]
    fn route(
        &mut self,
        grid: PyRef<'_, PyGrid>,
        source: (u32, u32, u32),
        sink: (u32, u32, u32),
        allow_overflow: bool,
        bbox_min: (u32, u32),
        bbox_max: (u32, u32),
        edge_costs: Option<Vec<Cost>>,
    ) -> PyResult<(Cost, Vec<u32>)> {
        let grid = &grid.inner;
        let net = Net::new("py", point(source), point(sink));
        let bbox = BoundingBox::new(
            Point::new(bbox_min.0, bbox_min.1, 0),
            Point::new(bbox_max.0, bbox_max.1, 0),
        );
        let router = MazeRouter::new(grid, &self.config);

        let route = match edge_costs {
            Some(costs) => {
                if costs.len() != grid.num_edges() {
                    return Err(PyValueError::new_err(format!(
                        "edge_costs has {} entries, grid has {} edges",
                        costs.len(),
                        grid.num_edges()
                    )));
                }
                let lookup = |e: EdgeId| costs[e.index()];
                router.route(&mut self.frontier, &net, allow_overflow, &bbox, &lookup)?
            }
            None => router.route(&mut self.frontier, &net, allow_overflow, &bbox, &UnitCost)?,
        };

        let cost = if route.is_reachable() { route.cost } else { Cost::INFINITY };
        Ok((cost, route.path.into_iter().map(|e| e.0).collect()))
    }
}

/// Python module
#[pymodule]
fn maze_router(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add_class::<PyGrid>()?;
    m.add_class::<PyMazeRouter>()?;
    Ok(())
}
