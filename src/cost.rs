//! Cost model: Manhattan heuristic, caller edge costs, overflow demand.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grid::Edge;
use crate::rules::RouterConfig;
use crate::types::{Cost, EdgeId, EdgeKind, Point};

/// Axes included in the heuristic distance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicMode {
    /// |dx| + |dy|. Admissible for any non-negative via cost.
    #[default]
    Planar,
    /// |dx| + |dy| + |dz|. Needs vias to cost at least 1.
    Spatial,
}

/// Manhattan distance estimator.
#[derive(Clone, Copy, Debug, Default)]
pub struct Manhattan {
    mode: HeuristicMode,
}

impl Manhattan {
    pub const fn new(mode: HeuristicMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> HeuristicMode {
        self.mode
    }

    #[inline]
    pub fn distance(&self, a: Point, b: Point) -> Cost {
        let planar = a.x.abs_diff(b.x) as Cost + a.y.abs_diff(b.y) as Cost;
        match self.mode {
            HeuristicMode::Planar => planar,
            HeuristicMode::Spatial => planar + a.z.abs_diff(b.z) as Cost,
        }
    }
}

/// Caller-supplied traversal cost. Must be non-negative.
pub trait EdgeCost {
    fn cost(&self, edge: EdgeId) -> Cost;
}

impl<F> EdgeCost for F
where
    F: Fn(EdgeId) -> Cost,
{
    #[inline]
    fn cost(&self, edge: EdgeId) -> Cost {
        self(edge)
    }
}

/// Every edge costs 1.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnitCost;

impl EdgeCost for UnitCost {
    #[inline]
    fn cost(&self, _edge: EdgeId) -> Cost {
        1.0
    }
}

/// Tracks a new route would consume on `edge`: nothing for a via, width plus
/// spacing of the edge's layer for a wire.
pub fn demand(edge: &Edge, config: &RouterConfig) -> Result<u64> {
    match edge.kind {
        EdgeKind::Via => Ok(0),
        EdgeKind::Wire => Ok(config.layer(edge.layer)?.wire_demand()),
    }
}

/// `usage + demand > capacity`
pub fn would_overflow(edge: &Edge, config: &RouterConfig) -> Result<bool> {
    let demand = demand(edge, config)?;
    Ok(u64::from(edge.usage) + demand > u64::from(edge.capacity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RouteError;
    use crate::rules::LayerRule;
    use crate::types::{Capacity, CellId};

    fn edge(kind: EdgeKind, layer: u32, usage: Capacity, capacity: Capacity) -> Edge {
        Edge {
            id: EdgeId(0),
            cells: (CellId(0), CellId(1)),
            layer,
            kind,
            usage,
            capacity,
        }
    }

    #[test]
    fn manhattan_modes() {
        let a = Point::new(1, 5, 0);
        let b = Point::new(4, 2, 3);
        assert_eq!(Manhattan::new(HeuristicMode::Planar).distance(a, b), 6.0);
        assert_eq!(Manhattan::new(HeuristicMode::Spatial).distance(a, b), 9.0);
        assert_eq!(Manhattan::default().distance(b, b), 0.0);
    }

    #[test]
    fn closures_are_edge_costs() {
        let double = |e: EdgeId| 2.0 * e.0 as Cost;
        assert_eq!(double.cost(EdgeId(3)), 6.0);
        let table = [0.5, 1.5];
        let lookup = |e: EdgeId| table[e.index()];
        assert_eq!(lookup.cost(EdgeId(1)), 1.5);
        assert_eq!(UnitCost.cost(EdgeId(99)), 1.0);
    }

    #[test]
    fn via_demand_is_zero() {
        let config = RouterConfig::uniform(1, LayerRule::new(2, 3));
        assert_eq!(demand(&edge(EdgeKind::Via, 0, 0, 0), &config).unwrap(), 0);
        assert!(!would_overflow(&edge(EdgeKind::Via, 0, 4, 4), &config).unwrap());
    }

    #[test]
    fn wire_overflow_threshold() {
        let config = RouterConfig::uniform(2, LayerRule::new(1, 1));
        assert_eq!(demand(&edge(EdgeKind::Wire, 1, 0, 0), &config).unwrap(), 2);
        assert!(!would_overflow(&edge(EdgeKind::Wire, 0, 2, 4), &config).unwrap());
        assert!(would_overflow(&edge(EdgeKind::Wire, 0, 3, 4), &config).unwrap());
    }

    #[test]
    fn oversized_rule_always_overflows() {
        let config = RouterConfig::uniform(1, LayerRule::new(Capacity::MAX, 1));
        assert_eq!(
            demand(&edge(EdgeKind::Wire, 0, 0, 0), &config).unwrap(),
            u64::from(Capacity::MAX) + 1
        );
        assert!(would_overflow(&edge(EdgeKind::Wire, 0, 0, Capacity::MAX), &config).unwrap());
    }

    #[test]
    fn wire_on_unknown_layer() {
        let config = RouterConfig::uniform(1, LayerRule::new(1, 1));
        assert!(matches!(
            would_overflow(&edge(EdgeKind::Wire, 5, 0, 4), &config),
            Err(RouteError::UnknownLayer { layer: 5 })
        ));
    }
}
