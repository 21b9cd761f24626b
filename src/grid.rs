//! Grid model: cells and edges of the 3D routing lattice.
//!
//! The router only needs read access through [`RoutingGrid`]. [`Grid`] is an
//! arena-backed implementation where cells and edges refer to each other by
//! index.

use crate::error::{Result, RouteError};
use crate::types::{BoundingBox, Capacity, CellId, Direction, EdgeId, EdgeKind, Point};

/// A node of the routing grid.
#[derive(Clone, Debug)]
pub struct GCell {
    pub id: CellId,
    pub point: Point,
    /// Neighbor edges indexed by [`Direction::index`]; `None` on the boundary
    edges: [Option<EdgeId>; 6],
}

impl GCell {
    #[inline]
    pub fn edge(&self, dir: Direction) -> Option<EdgeId> {
        self.edges[dir.index()]
    }

    /// Present edges in [`Direction::ALL`] order.
    #[inline]
    pub fn connected_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.iter().flatten().copied()
    }
}

/// Connection between two adjacent cells.
#[derive(Clone, Debug)]
pub struct Edge {
    pub id: EdgeId,
    pub cells: (CellId, CellId),
    pub layer: u32,
    pub kind: EdgeKind,
    pub usage: Capacity,
    pub capacity: Capacity,
}

impl Edge {
    #[inline]
    pub fn touches(&self, cell: CellId) -> bool {
        self.cells.0 == cell || self.cells.1 == cell
    }

    /// The endpoint across from `from`. `from` must be one of the endpoints.
    #[inline]
    pub fn opposite(&self, from: CellId) -> CellId {
        if self.cells.0 == from {
            self.cells.1
        } else {
            self.cells.0
        }
    }
}

/// Read-only grid interface consumed by the router.
///
/// `cell`, `edge` and `coord` may panic when handed an id that did not come
/// from this grid, the same way slice indexing does.
pub trait RoutingGrid {
    /// Id of the cell at `point`, if it lies on the grid.
    fn cell_id(&self, point: Point) -> Option<CellId>;
    fn cell(&self, id: CellId) -> &GCell;
    fn edge(&self, id: EdgeId) -> &Edge;

    #[inline]
    fn coord(&self, id: CellId) -> Point {
        self.cell(id).point
    }

    /// Edge joining two adjacent cells, found through the direction slot of
    /// `a` that points toward `b`.
    fn edge_between(&self, a: CellId, b: CellId) -> Option<EdgeId> {
        let dir = Direction::between(self.coord(a), self.coord(b))?;
        let edge = self.cell(a).edge(dir)?;
        let e = self.edge(edge);
        (e.touches(a) && e.opposite(a) == b).then_some(edge)
    }
}

/// Arena-backed full lattice.
///
/// Cell ids follow `x + size_x * (y + size_y * z)`. Wire edges run in X and Y
/// on every layer and carry that layer's index; vias join `z` and `z + 1` and
/// carry the lower layer's index.
#[derive(Clone, Debug)]
pub struct Grid {
    size: Point,
    cells: Vec<GCell>,
    edges: Vec<Edge>,
}

impl Grid {
    /// Build a `size_x` by `size_y` grid with `layers` routing layers, every
    /// edge starting with zero usage and the given capacity.
    pub fn new(size_x: u32, size_y: u32, layers: u32, capacity: Capacity) -> Result<Self> {
        if size_x == 0 || size_y == 0 || layers == 0 {
            return Err(RouteError::InvalidGrid(format!(
                "dimensions must be non-zero, got {size_x}x{size_y}x{layers}"
            )));
        }
        let num_cells = u64::from(size_x) * u64::from(size_y) * u64::from(layers);
        if num_cells > u64::from(u32::MAX) {
            return Err(RouteError::InvalidGrid(format!(
                "{num_cells} cells exceed the id space"
            )));
        }

        let size = Point::new(size_x, size_y, layers);
        let mut grid = Self {
            size,
            cells: Vec::with_capacity(num_cells as usize),
            edges: Vec::new(),
        };

        for z in 0..layers {
            for y in 0..size_y {
                for x in 0..size_x {
                    let id = CellId(grid.cells.len() as u32);
                    grid.cells.push(GCell {
                        id,
                        point: Point::new(x, y, z),
                        edges: [None; 6],
                    });
                }
            }
        }

        // Only the increasing directions create edges; the neighbor gets the
        // mirrored slot.
        for idx in 0..grid.cells.len() {
            let point = grid.cells[idx].point;
            for (dir, kind) in [
                (Direction::IncX, EdgeKind::Wire),
                (Direction::IncY, EdgeKind::Wire),
                (Direction::IncZ, EdgeKind::Via),
            ] {
                let Some(next) = point.step(dir).and_then(|p| grid.cell_id(p)) else {
                    continue;
                };
                let a = CellId(idx as u32);
                let id = EdgeId(grid.edges.len() as u32);
                grid.edges.push(Edge {
                    id,
                    cells: (a, next),
                    layer: point.z,
                    kind,
                    usage: 0,
                    capacity,
                });
                grid.cells[idx].edges[dir.index()] = Some(id);
                grid.cells[next.index()].edges[dir.opposite().index()] = Some(id);
            }
        }

        Ok(grid)
    }

    /// Grid extent as (size_x, size_y, layers).
    pub fn size(&self) -> Point {
        self.size
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn cells(&self) -> &[GCell] {
        &self.cells
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x < self.size.x && p.y < self.size.y && p.z < self.size.z
    }

    pub fn get_cell(&self, id: CellId) -> Option<&GCell> {
        self.cells.get(id.index())
    }

    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    /// Mutable edge access for setting usage and capacity between queries.
    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(id.index())
    }

    /// Edge between two cells found by scanning every slot of `a`. Slower than
    /// [`RoutingGrid::edge_between`] but independent of coordinate order.
    pub fn find_edge_between(&self, a: CellId, b: CellId) -> Option<EdgeId> {
        let cell = self.get_cell(a)?;
        cell.connected_edges().find(|&e| {
            let edge = &self.edges[e.index()];
            edge.touches(a) && edge.opposite(a) == b
        })
    }

    #[inline]
    pub fn within_bounding_box(&self, cell: CellId, bbox: &BoundingBox) -> bool {
        self.get_cell(cell).is_some_and(|c| bbox.contains(c.point))
    }
}

impl RoutingGrid for Grid {
    #[inline]
    fn cell_id(&self, p: Point) -> Option<CellId> {
        if !self.contains(p) {
            return None;
        }
        Some(CellId(p.x + self.size.x * (p.y + self.size.y * p.z)))
    }

    #[inline]
    fn cell(&self, id: CellId) -> &GCell {
        &self.cells[id.index()]
    }

    #[inline]
    fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }
}
