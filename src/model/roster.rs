//! Roster representation.

use std::fmt;
use std::ops::Index;

/// 1-based worker identifier.
pub type WorkerId = usize;

/// A complete assignment of workers to roster positions.
///
/// Positions are ordered day by day, shift by shift; see
/// [`StructuralParams`](super::StructuralParams) for the layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    slots: Vec<WorkerId>,
}

impl Roster {
    /// Wraps a position-ordered id list without checking it.
    pub fn new(slots: Vec<WorkerId>) -> Self {
        Self { slots }
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// `true` for a roster with no positions.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Worker ids in position order.
    pub fn as_slice(&self) -> &[WorkerId] {
        &self.slots
    }

    /// Unwraps the id list.
    pub fn into_inner(self) -> Vec<WorkerId> {
        self.slots
    }

    /// Overwrites one position.
    pub fn assign(&mut self, slot: usize, worker: WorkerId) {
        self.slots[slot] = worker;
    }

    /// Exchanges two positions.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
    }

    /// Iterates shift-instances of `workers_per_shift` consecutive slots.
    pub fn shift_instances(&self, workers_per_shift: usize) -> std::slice::Chunks<'_, WorkerId> {
        self.slots.chunks(workers_per_shift)
    }

    /// Number of positions held by `worker`.
    pub fn count_of(&self, worker: WorkerId) -> usize {
        self.slots.iter().filter(|&&w| w == worker).count()
    }
}

impl From<Vec<WorkerId>> for Roster {
    fn from(slots: Vec<WorkerId>) -> Self {
        Self::new(slots)
    }
}

impl AsRef<[WorkerId]> for Roster {
    fn as_ref(&self) -> &[WorkerId] {
        &self.slots
    }
}

impl Index<usize> for Roster {
    type Output = WorkerId;

    fn index(&self, slot: usize) -> &WorkerId {
        &self.slots[slot]
    }
}

/// Formats as a bracketed id list, e.g. `[3, 1, 2]`.
impl fmt::Display for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, w) in self.slots.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{w}")?;
        }
        write!(f, "]")
    }
}
