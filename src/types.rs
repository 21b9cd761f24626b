//! Shared data types for the maze router.

use std::fmt;

/// Real-valued path cost.
pub type Cost = f64;

/// Sentinel cost reported when no path exists under the query's constraints.
/// Larger than any attainable real cost.
pub const UNREACHABLE: Cost = Cost::MAX;

/// Edge usage, capacity and demand are all counted in routing tracks.
pub type Capacity = u32;

/// Stable identifier of a grid cell (GCell).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct CellId(pub u32);

impl CellId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Stable identifier of a grid edge.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub u32);

impl EdgeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Integer lattice coordinate. `z` is the routing layer.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Point {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl Point {
    #[inline]
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// Neighboring point one step in `dir`, or `None` when that would leave
    /// the non-negative quadrant.
    #[inline]
    pub fn step(self, dir: Direction) -> Option<Self> {
        let Point { x, y, z } = self;
        Some(match dir {
            Direction::IncX => Point::new(x.checked_add(1)?, y, z),
            Direction::DecX => Point::new(x.checked_sub(1)?, y, z),
            Direction::IncY => Point::new(x, y.checked_add(1)?, z),
            Direction::DecY => Point::new(x, y.checked_sub(1)?, z),
            Direction::IncZ => Point::new(x, y, z.checked_add(1)?),
            Direction::DecZ => Point::new(x, y, z.checked_sub(1)?),
        })
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// The six neighbor-edge slots of a cell.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    IncX,
    DecX,
    IncY,
    DecY,
    IncZ,
    DecZ,
}

impl Direction {
    /// Slot order used for neighbor expansion.
    pub const ALL: [Direction; 6] = [
        Direction::IncX,
        Direction::DecX,
        Direction::IncY,
        Direction::DecY,
        Direction::IncZ,
        Direction::DecZ,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::IncX => Direction::DecX,
            Direction::DecX => Direction::IncX,
            Direction::IncY => Direction::DecY,
            Direction::DecY => Direction::IncY,
            Direction::IncZ => Direction::DecZ,
            Direction::DecZ => Direction::IncZ,
        }
    }

    /// Direction of travel from `from` toward `to`, judged by the first axis
    /// (x, then y, then z) on which the two differ. `None` for equal points.
    pub fn between(from: Point, to: Point) -> Option<Self> {
        use std::cmp::Ordering::*;
        match (from.x.cmp(&to.x), from.y.cmp(&to.y), from.z.cmp(&to.z)) {
            (Less, _, _) => Some(Direction::IncX),
            (Greater, _, _) => Some(Direction::DecX),
            (Equal, Less, _) => Some(Direction::IncY),
            (Equal, Greater, _) => Some(Direction::DecY),
            (Equal, Equal, Less) => Some(Direction::IncZ),
            (Equal, Equal, Greater) => Some(Direction::DecZ),
            (Equal, Equal, Equal) => None,
        }
    }
}

/// Edge type tag.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum EdgeKind {
    /// In-layer wire segment
    Wire,
    /// Inter-layer via
    Via,
}

/// Two-pin net: the source/sink pair of a single routing query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Net {
    pub name: String,
    pub source: Point,
    pub sink: Point,
}

impl Net {
    pub fn new(name: impl Into<String>, source: Point, sink: Point) -> Self {
        Self {
            name: name.into(),
            source,
            sink,
        }
    }
}

/// Inclusive search window in the XY plane. The z components of `min` and
/// `max` are carried but never tested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    pub const fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Box covering the whole non-negative XY quadrant.
    pub const fn unbounded() -> Self {
        Self {
            min: Point::new(0, 0, 0),
            max: Point::new(u32::MAX, u32::MAX, 0),
        }
    }

    /// Smallest box holding both pins of `net`, grown by `margin` cells on
    /// every side (clamped at zero).
    pub fn around(net: &Net, margin: u32) -> Self {
        let (a, b) = (net.source, net.sink);
        Self {
            min: Point::new(
                a.x.min(b.x).saturating_sub(margin),
                a.y.min(b.y).saturating_sub(margin),
                0,
            ),
            max: Point::new(
                a.x.max(b.x).saturating_add(margin),
                a.y.max(b.y).saturating_add(margin),
                0,
            ),
        }
    }

    /// `min` does not exceed `max` in x or y.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        (self.min.x <= p.x && p.x <= self.max.x) && (self.min.y <= p.y && p.y <= self.max.y)
    }
}
