//! A* maze router: search kernel and top-level query.

use tracing::{debug, trace, warn};

use crate::backtrace::backtrace;
use crate::cost::{would_overflow, EdgeCost, Manhattan};
use crate::error::{Endpoint, Result, RouteError};
use crate::frontier::Frontier;
use crate::grid::RoutingGrid;
use crate::rules::RouterConfig;
use crate::types::{BoundingBox, CellId, Cost, EdgeId, Net, Point, UNREACHABLE};

/// Counters collected over one query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Cells taken off the frontier
    pub expanded: u64,
    /// `set_cost` calls after the source
    pub relaxed: u64,
    /// Edges skipped because they would overflow
    pub pruned_overflow: u64,
    /// Edges skipped because the neighbor lies outside the bounding box
    pub pruned_outside: u64,
}

/// Result of [`MazeRouter::route`].
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    /// Path cost of the sink, or [`UNREACHABLE`]
    pub cost: Cost,
    /// Edges from source to sink; empty when unreachable
    pub path: Vec<EdgeId>,
    pub stats: SearchStats,
}

impl Route {
    #[inline]
    pub fn is_reachable(&self) -> bool {
        self.cost != UNREACHABLE
    }
}

/// Single-net A* router over a read-only grid.
///
/// Every neighbor of the extracted cell is relaxed each iteration; a cell
/// whose total cost improves after extraction goes back on the frontier.
pub struct MazeRouter<'a, G: RoutingGrid + ?Sized> {
    grid: &'a G,
    config: &'a RouterConfig,
    heuristic: Manhattan,
}

impl<'a, G: RoutingGrid + ?Sized> MazeRouter<'a, G> {
    pub fn new(grid: &'a G, config: &'a RouterConfig) -> Self {
        Self {
            grid,
            config,
            heuristic: Manhattan::new(config.heuristic),
        }
    }

    pub fn heuristic(&self) -> &Manhattan {
        &self.heuristic
    }

    /// Route `net` inside `bbox` and return the cost, path and counters.
    pub fn route<C: EdgeCost + ?Sized>(
        &self,
        frontier: &mut Frontier,
        net: &Net,
        allow_overflow: bool,
        bbox: &BoundingBox,
        edge_cost: &C,
    ) -> Result<Route> {
        let mut path = Vec::new();
        let (cost, stats) =
            self.route_into(frontier, net, allow_overflow, bbox, edge_cost, &mut path)?;
        Ok(Route { cost, path, stats })
    }

    /// Route `net` inside `bbox`, writing the edges to `path`.
    ///
    /// Returns the sink's path cost, or [`UNREACHABLE`] with `path` left
    /// empty. Pins off the grid or outside `bbox` are rejected up front. The
    /// frontier is reset on entry and again before returning, errors
    /// included.
    pub fn route_into<C: EdgeCost + ?Sized>(
        &self,
        frontier: &mut Frontier,
        net: &Net,
        allow_overflow: bool,
        bbox: &BoundingBox,
        edge_cost: &C,
        path: &mut Vec<EdgeId>,
    ) -> Result<(Cost, SearchStats)> {
        path.clear();
        frontier.reset();
        let (source, sink) = self.check_query(net, bbox).inspect_err(|e| {
            warn!(net = %net.name, error = %e, "rejected routing query");
        })?;

        debug!(
            net = %net.name,
            source = %net.source,
            sink = %net.sink,
            allow_overflow,
            "routing net"
        );

        let mut stats = SearchStats::default();
        let result = self
            .search(frontier, source, sink, allow_overflow, bbox, edge_cost, &mut stats)
            .and_then(|_| {
                if !frontier.is_discovered(sink) {
                    return Ok(UNREACHABLE);
                }
                backtrace(self.grid, frontier, &self.heuristic, source, sink, path)?;
                Ok(frontier.record_of(sink)?.path_cost)
            });
        frontier.reset();

        let cost = result.inspect_err(|_| path.clear())?;
        if cost == UNREACHABLE {
            debug!(net = %net.name, ?stats, "sink unreachable");
        } else {
            debug!(net = %net.name, cost, edges = path.len(), ?stats, "routed net");
        }
        Ok((cost, stats))
    }

    /// Resolve pins to cells and make sure the box holds both of them.
    fn check_query(&self, net: &Net, bbox: &BoundingBox) -> Result<(CellId, CellId)> {
        if !bbox.is_valid() {
            return Err(RouteError::InvalidBoundingBox {
                min: bbox.min,
                max: bbox.max,
            });
        }
        let resolve = |endpoint: Endpoint, point: Point| -> Result<CellId> {
            let cell = self
                .grid
                .cell_id(point)
                .ok_or(RouteError::CellOutOfGrid { endpoint, point })?;
            if !bbox.contains(point) {
                return Err(RouteError::OutsideBoundingBox { endpoint, point });
            }
            Ok(cell)
        };
        Ok((
            resolve(Endpoint::Source, net.source)?,
            resolve(Endpoint::Sink, net.sink)?,
        ))
    }

    /// Best-first expansion until the sink is extracted or the frontier runs
    /// dry. Returns whether the sink was reached.
    #[allow(clippy::too_many_arguments)]
    fn search<C: EdgeCost + ?Sized>(
        &self,
        frontier: &mut Frontier,
        source: CellId,
        sink: CellId,
        allow_overflow: bool,
        bbox: &BoundingBox,
        edge_cost: &C,
        stats: &mut SearchStats,
    ) -> Result<bool> {
        let sink_point = self.grid.coord(sink);

        frontier.reset();
        frontier.set_cost(
            source,
            0.0,
            self.heuristic.distance(self.grid.coord(source), sink_point),
            None,
        );

        while !frontier.is_empty() {
            let current = frontier.extract_best()?;
            stats.expanded += 1;
            if current == sink {
                return Ok(true);
            }

            let current_cost = frontier.record_of(current)?.path_cost;
            trace!(cell = %current, current_cost, "expanding");

            for edge_id in self.grid.cell(current).connected_edges() {
                let edge = self.grid.edge(edge_id);
                if !allow_overflow && would_overflow(edge, self.config)? {
                    stats.pruned_overflow += 1;
                    continue;
                }

                let next = edge.opposite(current);
                let next_point = self.grid.coord(next);
                if !bbox.contains(next_point) {
                    stats.pruned_outside += 1;
                    continue;
                }

                let step = edge_cost.cost(edge_id);
                if !step.is_finite() || step < 0.0 {
                    return Err(RouteError::InvalidEdgeCost {
                        edge: edge_id,
                        cost: step,
                    });
                }
                let path_cost = current_cost + step;
                if path_cost >= UNREACHABLE {
                    return Err(RouteError::PathCostOverflow { cell: next });
                }
                let total_cost = path_cost + self.heuristic.distance(next_point, sink_point);

                let improves = match frontier.get(next) {
                    None => true,
                    Some(record) => total_cost < record.total_cost,
                };
                if improves {
                    frontier.set_cost(next, path_cost, total_cost, Some(current));
                    stats.relaxed += 1;
                }
            }
        }

        Ok(false)
    }
}
