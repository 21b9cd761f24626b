//! Grid-based A* maze router for global routing.
//!
//! Finds a minimum-cost path of grid edges between two cells of a 3D routing
//! grid, restricted to an XY bounding box and optionally refusing edges that
//! would exceed their capacity. Multi-net scheduling, rip-up and committing
//! routes into the grid are left to the caller.
//!
//! ```
//! use maze_router::{
//!     BoundingBox, Frontier, Grid, LayerRule, MazeRouter, Net, Point, RouterConfig, UnitCost,
//! };
//!
//! let grid = Grid::new(8, 8, 2, 2).unwrap();
//! let config = RouterConfig::uniform(2, LayerRule::new(1, 1));
//! let router = MazeRouter::new(&grid, &config);
//! let mut frontier = Frontier::new();
//!
//! let net = Net::new("clk", Point::new(1, 1, 0), Point::new(6, 3, 0));
//! let route = router
//!     .route(&mut frontier, &net, false, &BoundingBox::around(&net, 2), &UnitCost)
//!     .unwrap();
//! assert_eq!(route.cost, 7.0);
//! assert_eq!(route.path.len(), 7);
//! ```
//!
//! With the `python` feature the crate builds as a PyO3 extension module.

mod backtrace;
pub mod cost;
pub mod error;
pub mod frontier;
pub mod grid;
pub mod router;
pub mod rules;
pub mod types;

#[cfg(feature = "python")]
mod python;

pub use cost::{EdgeCost, HeuristicMode, Manhattan, UnitCost};
pub use error::{Endpoint, Result, RouteError};
pub use frontier::{Frontier, FrontierRecord};
pub use grid::{Edge, GCell, Grid, RoutingGrid};
pub use router::{MazeRouter, Route, SearchStats};
pub use rules::{LayerRule, RouterConfig};
pub use types::{
    BoundingBox, Capacity, CellId, Cost, Direction, EdgeId, EdgeKind, Net, Point, UNREACHABLE,
};
