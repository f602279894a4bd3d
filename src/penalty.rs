//! Preference-violation penalty.
//!
//! Each position costs the assigned worker's preference code for that
//! (day, shift); the roster penalty is the sum over all positions. Zero
//! means every worker is where they are fully available.

use crate::model::{AvailabilityMatrix, Preference, WorkerId};

/// Preference of the worker placed at `slot`.
///
/// Reporting uses this to colour individual cells.
///
/// # Panics
///
/// Panics if `slot` is out of range or holds an id outside
/// `1..=worker_count`.
pub fn slot_preference(
    roster: &[WorkerId],
    availability: &AvailabilityMatrix,
    slot: usize,
) -> Preference {
    let code_index = availability.params().code_index(slot);
    availability.preference(roster[slot], code_index)
}

/// Total penalty of a complete roster.
///
/// Feasibility is not checked; any roster whose ids are all known
/// workers can be evaluated.
///
/// # Examples
///
/// ```
/// use u_roster::model::{AvailabilityMatrix, Preference, StructuralParams};
/// use u_roster::penalty::penalty_of;
///
/// let params = StructuralParams::new(1, 1, 2, 1).unwrap();
/// let m = AvailabilityMatrix::new(
///     params,
///     vec![vec![Preference::Available], vec![Preference::Unavailable]],
/// )
/// .unwrap();
/// assert_eq!(penalty_of(&[1], &m), 0);
/// assert_eq!(penalty_of(&[2], &m), 2);
/// ```
pub fn penalty_of(roster: &[WorkerId], availability: &AvailabilityMatrix) -> u32 {
    (0..roster.len())
        .map(|slot| slot_preference(roster, availability, slot).cost())
        .sum()
}
