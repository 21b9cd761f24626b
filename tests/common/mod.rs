#![allow(dead_code)]

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use maze_router::{BoundingBox, CellId, EdgeId, Grid, LayerRule, Point, RouterConfig, RoutingGrid};

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Grid whose edges all have room for exactly one wire under `rules()`.
pub fn grid(x: u32, y: u32, z: u32) -> Grid {
    Grid::new(x, y, z, 2).unwrap()
}

pub fn rules(layers: usize) -> RouterConfig {
    RouterConfig::uniform(layers, LayerRule::new(1, 1))
}

pub fn cell(grid: &Grid, x: u32, y: u32, z: u32) -> CellId {
    grid.cell_id(Point::new(x, y, z)).unwrap()
}

pub fn edge(grid: &Grid, a: (u32, u32, u32), b: (u32, u32, u32)) -> EdgeId {
    let a = cell(grid, a.0, a.1, a.2);
    let b = cell(grid, b.0, b.1, b.2);
    grid.edge_between(a, b).unwrap()
}

/// Fill an edge to capacity.
pub fn saturate(grid: &mut Grid, id: EdgeId) {
    let e = grid.edge_mut(id).unwrap();
    e.usage = e.capacity;
}

/// Walk `path` from `source` and return the cells visited, asserting that
/// each edge continues from the previous cell, that it ends at `sink` and
/// that no edge repeats.
pub fn walk(grid: &Grid, source: Point, sink: Point, path: &[EdgeId]) -> Vec<Point> {
    let mut current = grid.cell_id(source).unwrap();
    let mut cells = vec![source];
    let mut seen = HashSet::new();
    for &id in path {
        assert!(seen.insert(id), "edge {id} repeated");
        let e = grid.edge(id);
        assert!(e.touches(current), "edge {id} does not continue from {current}");
        current = e.opposite(current);
        cells.push(grid.coord(current));
    }
    assert_eq!(grid.coord(current), sink, "path does not end at the sink");
    cells
}

/// Plain Dijkstra over the same pruning rules, for cross-checking costs.
pub fn reference_cost(
    grid: &Grid,
    config: &RouterConfig,
    source: Point,
    sink: Point,
    allow_overflow: bool,
    bbox: &BoundingBox,
    cost: impl Fn(EdgeId) -> f64,
) -> Option<f64> {
    let source = grid.cell_id(source)?;
    let sink = grid.cell_id(sink)?;
    let mut dist = vec![u64::MAX; grid.num_cells()];
    let mut heap = BinaryHeap::new();
    dist[source.index()] = 0;
    heap.push(Reverse((0u64, source.0)));

    while let Some(Reverse((d, c))) = heap.pop() {
        let c = CellId(c);
        if c == sink {
            return Some(d as f64);
        }
        if d > dist[c.index()] {
            continue;
        }
        for id in grid.cell(c).connected_edges() {
            let e = grid.edge(id);
            if !allow_overflow && maze_router::cost::would_overflow(e, config).unwrap() {
                continue;
            }
            let n = e.opposite(c);
            if !bbox.contains(grid.coord(n)) {
                continue;
            }
            // Test costs are whole numbers
            let nd = d + cost(id) as u64;
            if nd < dist[n.index()] {
                dist[n.index()] = nd;
                heap.push(Reverse((nd, n.0)));
            }
        }
    }
    None
}
