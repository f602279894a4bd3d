//! Structural parameters of a roster horizon.

use crate::error::{Result, RosterError};

/// Maximum number of shift-instances a single worker may cover over the
/// whole horizon.
pub const MAX_SHIFTS_PER_WORKER: usize = 5;

/// Fixed shape of a rostering problem, loaded once and immutable for a run.
///
/// A roster is laid out day by day. Each day is a block of
/// `shifts_per_day` shift-instances, each holding `workers_per_shift`
/// consecutive slots.
///
/// # Examples
///
/// ```
/// use u_roster::model::StructuralParams;
///
/// let params = StructuralParams::new(2, 3, 10, 7).unwrap();
/// assert_eq!(params.slot_count(), 42);
/// assert_eq!(params.block_size(), 6);
/// assert_eq!(params.codes_per_worker(), 14);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StructuralParams {
    /// Shift-instances per calendar day.
    pub shifts_per_day: usize,
    /// Distinct workers required on each shift-instance.
    pub workers_per_shift: usize,
    /// Number of workers; ids are `1..=worker_count`.
    pub worker_count: usize,
    /// Number of days in the horizon.
    pub day_count: usize,
}

impl StructuralParams {
    /// Creates parameters, rejecting any zero dimension.
    pub fn new(
        shifts_per_day: usize,
        workers_per_shift: usize,
        worker_count: usize,
        day_count: usize,
    ) -> Result<Self> {
        let params = Self {
            shifts_per_day,
            workers_per_shift,
            worker_count,
            day_count,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks that every dimension is positive and that the derived sizes
    /// fit in `usize`.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("shifts_per_day", self.shifts_per_day),
            ("workers_per_shift", self.workers_per_shift),
            ("worker_count", self.worker_count),
            ("day_count", self.day_count),
        ];
        for (name, value) in fields {
            if value == 0 {
                return Err(RosterError::InvalidConfig(format!(
                    "{name} must be positive"
                )));
            }
        }
        // block_size and codes_per_worker divide slot_count, so bounding
        // slot_count bounds every derived size.
        let slots = self
            .shifts_per_day
            .checked_mul(self.workers_per_shift)
            .and_then(|block| block.checked_mul(self.day_count));
        if slots.is_none() {
            return Err(RosterError::InvalidConfig(
                "shifts_per_day * workers_per_shift * day_count overflows".into(),
            ));
        }
        // Per-worker tables are indexed by id, one past worker_count.
        if self.worker_count.checked_add(1).is_none() {
            return Err(RosterError::InvalidConfig("worker_count is too large".into()));
        }
        Ok(())
    }

    /// Total number of roster positions.
    pub fn slot_count(&self) -> usize {
        self.shifts_per_day * self.workers_per_shift * self.day_count
    }

    /// Number of positions belonging to one calendar day.
    pub fn block_size(&self) -> usize {
        self.shifts_per_day * self.workers_per_shift
    }

    /// Number of shift-instances over the horizon.
    pub fn shift_instance_count(&self) -> usize {
        self.shifts_per_day * self.day_count
    }

    /// Length of one worker's preference row.
    pub fn codes_per_worker(&self) -> usize {
        self.day_count * self.shifts_per_day
    }

    /// Day index of a roster position.
    pub fn day_of(&self, slot: usize) -> usize {
        slot / self.block_size()
    }

    /// Shift index within its day of a roster position.
    pub fn shift_of(&self, slot: usize) -> usize {
        (slot % self.block_size()) / self.workers_per_shift
    }

    /// Index into a worker's preference row for a roster position.
    pub fn code_index(&self, slot: usize) -> usize {
        self.day_of(slot) * self.shifts_per_day + self.shift_of(slot)
    }

    /// Returns a reason when the shape rules out every feasible roster.
    ///
    /// These are necessary conditions only: passing them does not prove
    /// a feasible roster exists.
    pub fn structural_infeasibility(&self) -> Option<String> {
        if self.workers_per_shift > self.worker_count {
            return Some(format!(
                "{} distinct workers needed per shift but only {} exist",
                self.workers_per_shift, self.worker_count
            ));
        }
        if self.block_size() > self.worker_count {
            return Some(format!(
                "{} distinct workers needed per day but only {} exist",
                self.block_size(),
                self.worker_count
            ));
        }
        let capacity = self.worker_count.saturating_mul(MAX_SHIFTS_PER_WORKER);
        if self.slot_count() > capacity {
            return Some(format!(
                "{} slots exceed the capacity of {} workers at {} shifts each",
                self.slot_count(),
                self.worker_count,
                MAX_SHIFTS_PER_WORKER
            ));
        }
        None
    }
}
