//! Frontier (open set) for the maze search.
//!
//! Records live in a hash map keyed by cell; extraction order comes from a
//! binary heap with lazy deletion. Every `set_cost` pushes a fresh heap entry
//! tagged with a monotonically increasing stamp, and only the entry whose
//! stamp matches the cell's current record is live. Superseded entries are
//! dropped when they surface.
//!
//! There is no closed set: a cell improved after extraction becomes
//! extractable again.
//!
//! Ties on total cost go to the entry stamped first (FIFO).

use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{Result, RouteError};
use crate::types::{CellId, Cost};

/// Best known costs for one discovered cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrontierRecord {
    /// Accumulated edge cost from the source
    pub path_cost: Cost,
    /// `path_cost` plus the heuristic estimate to the sink
    pub total_cost: Cost,
    /// Predecessor on the best known path; `None` for the source
    pub parent: Option<CellId>,
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    record: FrontierRecord,
    stamp: u64,
    open: bool,
}

/// Heap entry with reverse ordering for min-heap
#[derive(Clone, Copy, Debug)]
struct OpenEntry {
    total_cost: Cost,
    stamp: u64,
    cell: CellId,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Lowest total first, then earliest stamp
        other
            .total_cost
            .total_cmp(&self.total_cost)
            .then_with(|| other.stamp.cmp(&self.stamp))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

/// Resettable open set owned by the caller of a routing query.
///
/// One instance per in-flight query; reuse is fine once [`Frontier::reset`]
/// has run.
#[derive(Debug, Default)]
pub struct Frontier {
    slots: FxHashMap<CellId, Slot>,
    heap: BinaryHeap<OpenEntry>,
    open: usize,
    stamp: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard every record.
    pub fn reset(&mut self) {
        self.slots.clear();
        self.heap.clear();
        self.open = 0;
        self.stamp = 0;
    }

    /// Create or overwrite the record of `cell` and make it extractable.
    /// The caller decides whether the new cost is an improvement.
    pub fn set_cost(
        &mut self,
        cell: CellId,
        path_cost: Cost,
        total_cost: Cost,
        parent: Option<CellId>,
    ) {
        self.stamp += 1;
        let record = FrontierRecord {
            path_cost,
            total_cost,
            parent,
        };
        let slot = self.slots.entry(cell).or_insert(Slot {
            record,
            stamp: 0,
            open: false,
        });
        if !slot.open {
            self.open += 1;
        }
        *slot = Slot {
            record,
            stamp: self.stamp,
            open: true,
        };
        self.heap.push(OpenEntry {
            total_cost,
            stamp: self.stamp,
            cell,
        });
    }

    /// Remove and return the open cell with the lowest total cost.
    pub fn extract_best(&mut self) -> Result<CellId> {
        while let Some(entry) = self.heap.pop() {
            let Some(slot) = self.slots.get_mut(&entry.cell) else {
                continue;
            };
            if slot.open && slot.stamp == entry.stamp {
                slot.open = false;
                self.open -= 1;
                return Ok(entry.cell);
            }
        }
        Err(RouteError::EmptyFrontier)
    }

    #[inline]
    pub fn is_discovered(&self, cell: CellId) -> bool {
        self.slots.contains_key(&cell)
    }

    #[inline]
    pub fn get(&self, cell: CellId) -> Option<&FrontierRecord> {
        self.slots.get(&cell).map(|slot| &slot.record)
    }

    pub fn record_of(&self, cell: CellId) -> Result<FrontierRecord> {
        self.get(cell)
            .copied()
            .ok_or(RouteError::NotDiscovered { cell })
    }

    /// No extractable cells remain.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.open == 0
    }

    /// Number of extractable cells.
    #[inline]
    pub fn open_len(&self) -> usize {
        self.open
    }

    /// Number of discovered cells, extracted or not.
    #[inline]
    pub fn discovered_len(&self) -> usize {
        self.slots.len()
    }
}
