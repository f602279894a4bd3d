//! Data model: structural parameters, availability, rosters and state.

mod availability;
mod params;
mod registry;
mod roster;
mod schedule;

pub use availability::{AvailabilityMatrix, Preference};
pub use params::{StructuralParams, MAX_SHIFTS_PER_WORKER};
pub use registry::WorkerRegistry;
pub use roster::{Roster, WorkerId};
pub use schedule::ScheduleState;
