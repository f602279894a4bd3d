//! Roster feasibility rules.
//!
//! A complete roster is feasible when:
//!
//! 1. every shift-instance holds pairwise-distinct workers,
//! 2. no worker covers two shift-instances of the same day,
//! 3. no worker covers more than [`MAX_SHIFTS_PER_WORKER`] positions overall.
//!
//! Worker ids must also lie in `1..=worker_count` and the roster must have
//! exactly `slot_count` positions.
//!
//! The check is a single pass over the roster, stopping at the first
//! violation.

use std::fmt;

use crate::model::{StructuralParams, WorkerId, MAX_SHIFTS_PER_WORKER};

/// First rule broken by a roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// The roster does not have one entry per position.
    LengthMismatch { expected: usize, actual: usize },
    /// A position holds an id outside `1..=worker_count`.
    UnknownWorker { slot: usize, worker: WorkerId },
    /// A worker appears twice in one shift-instance.
    DuplicateInShift { shift: usize, worker: WorkerId },
    /// A worker covers two shift-instances of one day.
    SameDayDoubleShift { day: usize, worker: WorkerId },
    /// A worker exceeds the horizon-wide shift cap.
    WeeklyCapExceeded { worker: WorkerId, count: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Violation::LengthMismatch { expected, actual } => {
                write!(f, "roster has {actual} positions, expected {expected}")
            }
            Violation::UnknownWorker { slot, worker } => {
                write!(f, "position {slot} holds unknown worker {worker}")
            }
            Violation::DuplicateInShift { shift, worker } => {
                write!(f, "worker {worker} appears twice in shift-instance {shift}")
            }
            Violation::SameDayDoubleShift { day, worker } => {
                write!(f, "worker {worker} covers two shifts on day {day}")
            }
            Violation::WeeklyCapExceeded { worker, count } => write!(
                f,
                "worker {worker} covers {count} shifts, cap is {MAX_SHIFTS_PER_WORKER}"
            ),
        }
    }
}

/// Returns `true` if `roster` satisfies every feasibility rule.
pub fn is_feasible(roster: &[WorkerId], params: &StructuralParams) -> bool {
    check(roster, params).is_ok()
}

/// Checks `roster`, reporting the first rule it breaks.
///
/// # Examples
///
/// ```
/// use u_roster::constraints::{check, Violation};
/// use u_roster::model::StructuralParams;
///
/// let params = StructuralParams::new(2, 2, 4, 1).unwrap();
/// assert!(check(&[1, 2, 3, 4], &params).is_ok());
/// assert_eq!(
///     check(&[1, 2, 3, 1], &params),
///     Err(Violation::SameDayDoubleShift { day: 0, worker: 1 })
/// );
/// ```
pub fn check(roster: &[WorkerId], params: &StructuralParams) -> Result<(), Violation> {
    let expected = params.slot_count();
    if roster.len() != expected {
        return Err(Violation::LengthMismatch {
            expected,
            actual: roster.len(),
        });
    }

    // Global shift-instance index of each worker's latest occurrence.
    // Positions are scanned in order, so an earlier occurrence on the same
    // day is always the latest one seen.
    let mut last_shift: Vec<Option<usize>> = vec![None; params.worker_count + 1];
    let mut counts = vec![0usize; params.worker_count + 1];

    for (slot, &worker) in roster.iter().enumerate() {
        if worker == 0 || worker > params.worker_count {
            return Err(Violation::UnknownWorker { slot, worker });
        }

        let shift = slot / params.workers_per_shift;
        let day = shift / params.shifts_per_day;

        if let Some(prev) = last_shift[worker] {
            if prev == shift {
                return Err(Violation::DuplicateInShift { shift, worker });
            }
            if prev / params.shifts_per_day == day {
                return Err(Violation::SameDayDoubleShift { day, worker });
            }
        }
        last_shift[worker] = Some(shift);

        counts[worker] += 1;
        if counts[worker] > MAX_SHIFTS_PER_WORKER {
            return Err(Violation::WeeklyCapExceeded {
                worker,
                count: counts[worker],
            });
        }
    }

    Ok(())
}
