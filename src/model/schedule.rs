//! Roster plus its cached penalty.

use super::availability::AvailabilityMatrix;
use super::roster::Roster;
use crate::constraints;
use crate::error::{Result, RosterError};
use crate::penalty::penalty_of;

/// The current roster and its total penalty.
///
/// The stored roster is always feasible for the matrix it was checked
/// against, and the cached penalty always equals [`penalty_of`] for it:
/// every way of changing the roster also sets the matching penalty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleState {
    roster: Roster,
    penalty: u32,
}

impl ScheduleState {
    /// Wraps `roster`, evaluating its penalty against `availability`.
    ///
    /// Fails with [`RosterError::InfeasibleRoster`] when the roster breaks a
    /// feasibility rule or names a worker outside the matrix.
    pub fn new(roster: Roster, availability: &AvailabilityMatrix) -> Result<Self> {
        constraints::check(roster.as_slice(), availability.params())
            .map_err(RosterError::InfeasibleRoster)?;
        let penalty = penalty_of(roster.as_slice(), availability);
        Ok(Self { roster, penalty })
    }

    /// Current roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Cached penalty of the current roster.
    pub fn penalty(&self) -> u32 {
        self.penalty
    }

    /// Replaces the roster and recomputes the penalty.
    ///
    /// An infeasible roster is rejected and the state is left untouched.
    pub fn replace(&mut self, roster: Roster, availability: &AvailabilityMatrix) -> Result<()> {
        constraints::check(roster.as_slice(), availability.params())
            .map_err(RosterError::InfeasibleRoster)?;
        self.penalty = penalty_of(roster.as_slice(), availability);
        self.roster = roster;
        Ok(())
    }

    /// Recomputes the penalty, e.g. after an availability row changed.
    pub fn refresh(&mut self, availability: &AvailabilityMatrix) {
        self.penalty = penalty_of(self.roster.as_slice(), availability);
    }

    /// Installs a roster whose penalty the caller has just evaluated.
    pub(crate) fn accept(&mut self, roster: Roster, penalty: u32) {
        self.roster = roster;
        self.penalty = penalty;
    }

    /// Unwraps the roster, dropping the cached penalty.
    pub fn into_roster(self) -> Roster {
        self.roster
    }
}
