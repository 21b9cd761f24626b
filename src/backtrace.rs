//! Path reconstruction from the frontier's parent links.

use tracing::error;

use crate::cost::Manhattan;
use crate::error::{Result, RouteError};
use crate::frontier::Frontier;
use crate::grid::RoutingGrid;
use crate::types::{CellId, EdgeId};

/// Walk parents from `sink` back to `source`, writing the connecting edges to
/// `path` in source→sink order. `sink` must have been discovered.
pub(crate) fn backtrace<G: RoutingGrid + ?Sized>(
    grid: &G,
    frontier: &Frontier,
    heuristic: &Manhattan,
    source: CellId,
    sink: CellId,
    path: &mut Vec<EdgeId>,
) -> Result<()> {
    let estimate = heuristic.distance(grid.coord(source), grid.coord(sink));
    path.clear();
    path.reserve(estimate as usize * 2);

    // A chain longer than the number of discovered cells has a cycle
    let limit = frontier.discovered_len();
    let mut current = sink;
    while current != source {
        let parent = frontier.record_of(current)?.parent;
        let edge = match parent {
            Some(parent) if path.len() < limit => grid.edge_between(current, parent),
            _ => None,
        };
        let (Some(parent), Some(edge)) = (parent, edge) else {
            error!(cell = %current, ?parent, "parent chain disagrees with grid");
            return Err(RouteError::InconsistentBacktrace { cell: current, parent });
        };
        path.push(edge);
        current = parent;
    }

    path.reverse();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::types::Point;

    fn id(grid: &Grid, x: u32, y: u32, z: u32) -> CellId {
        grid.cell_id(Point::new(x, y, z)).unwrap()
    }

    #[test]
    fn follows_parents_and_reverses() {
        let grid = Grid::new(3, 3, 1, 1).unwrap();
        let (a, b, c) = (id(&grid, 0, 0, 0), id(&grid, 1, 0, 0), id(&grid, 1, 1, 0));
        let mut frontier = Frontier::new();
        frontier.set_cost(a, 0.0, 2.0, None);
        frontier.set_cost(b, 1.0, 2.0, Some(a));
        frontier.set_cost(c, 2.0, 2.0, Some(b));

        let mut path = vec![EdgeId(42)];
        backtrace(&grid, &frontier, &Manhattan::default(), a, c, &mut path).unwrap();
        assert_eq!(
            path,
            vec![grid.edge_between(a, b).unwrap(), grid.edge_between(b, c).unwrap()]
        );
    }

    #[test]
    fn source_equals_sink_gives_empty_path() {
        let grid = Grid::new(2, 2, 1, 1).unwrap();
        let a = id(&grid, 1, 1, 0);
        let mut frontier = Frontier::new();
        frontier.set_cost(a, 0.0, 0.0, None);
        let mut path = vec![EdgeId(1)];
        backtrace(&grid, &frontier, &Manhattan::default(), a, a, &mut path).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn non_adjacent_parent_is_fatal() {
        let grid = Grid::new(4, 1, 1, 1).unwrap();
        let (a, far) = (id(&grid, 0, 0, 0), id(&grid, 3, 0, 0));
        let mut frontier = Frontier::new();
        frontier.set_cost(a, 0.0, 3.0, None);
        frontier.set_cost(far, 1.0, 1.0, Some(a));

        let mut path = Vec::new();
        let err =
            backtrace(&grid, &frontier, &Manhattan::default(), a, far, &mut path).unwrap_err();
        assert!(matches!(
            err,
            RouteError::InconsistentBacktrace { cell, parent: Some(p) } if cell == far && p == a
        ));
    }

    #[test]
    fn missing_parent_is_fatal() {
        let grid = Grid::new(2, 1, 1, 1).unwrap();
        let (a, b) = (id(&grid, 0, 0, 0), id(&grid, 1, 0, 0));
        let mut frontier = Frontier::new();
        frontier.set_cost(a, 0.0, 1.0, None);
        frontier.set_cost(b, 1.0, 1.0, None);
        let mut path = Vec::new();
        assert!(matches!(
            backtrace(&grid, &frontier, &Manhattan::default(), a, b, &mut path),
            Err(RouteError::InconsistentBacktrace { parent: None, .. })
        ));
    }

    #[test]
    fn parent_cycle_is_fatal() {
        let grid = Grid::new(3, 1, 1, 1).unwrap();
        let (a, b, c) = (id(&grid, 0, 0, 0), id(&grid, 1, 0, 0), id(&grid, 2, 0, 0));
        let mut frontier = Frontier::new();
        frontier.set_cost(b, 1.0, 1.0, Some(c));
        frontier.set_cost(c, 1.0, 1.0, Some(b));
        let mut path = Vec::new();
        assert!(matches!(
            backtrace(&grid, &frontier, &Manhattan::default(), a, c, &mut path),
            Err(RouteError::InconsistentBacktrace { .. })
        ));
    }
}
