//! Error types for maze routing queries

use crate::types::{CellId, Cost, EdgeId, Point};
use std::fmt;
use thiserror::Error;

/// Which pin of a net a precondition error refers to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Endpoint {
    Source,
    Sink,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => f.write_str("source"),
            Endpoint::Sink => f.write_str("sink"),
        }
    }
}

/// Errors raised by the router and its collaborators.
///
/// An unreachable sink is not an error; it is reported through
/// [`UNREACHABLE`](crate::types::UNREACHABLE) and an empty path.
#[derive(Debug, Error)]
pub enum RouteError {
    /// Extraction attempted on a frontier with no open cells
    #[error("frontier is empty")]
    EmptyFrontier,

    /// Record requested for a cell that was never discovered
    #[error("cell {cell} has not been discovered")]
    NotDiscovered { cell: CellId },

    /// Pin location does not name a grid cell
    #[error("{endpoint} {point} lies outside the routing grid")]
    CellOutOfGrid { endpoint: Endpoint, point: Point },

    /// Pin location excluded by the search window
    #[error("{endpoint} {point} lies outside the bounding box")]
    OutsideBoundingBox { endpoint: Endpoint, point: Point },

    /// Bounding box with min > max in x or y
    #[error("bounding box {min} .. {max} is empty")]
    InvalidBoundingBox { min: Point, max: Point },

    /// Parent chain and grid topology disagree
    #[error("backtrace broken at cell {cell}: no edge leads to parent {parent:?}")]
    InconsistentBacktrace { cell: CellId, parent: Option<CellId> },

    /// Wire edge on a layer without width/spacing rules
    #[error("no layer rule for layer {layer}")]
    UnknownLayer { layer: u32 },

    /// Caller cost function returned a negative or non-finite cost
    #[error("edge {edge} has invalid cost {cost}")]
    InvalidEdgeCost { edge: EdgeId, cost: Cost },

    /// Accumulated path cost reached the unreachable sentinel
    #[error("path cost to cell {cell} is too large to represent")]
    PathCostOverflow { cell: CellId },

    /// Grid construction failure
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// Configuration parse or validation failure
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for routing operations
pub type Result<T> = std::result::Result<T, RouteError>;
