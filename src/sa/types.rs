//! Progress observation for annealing runs.

use std::io;

/// An accepted transition of the schedule state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceptEvent {
    /// Proposal counter at acceptance (infeasible proposals included).
    pub attempt: usize,
    /// Penalty before the move.
    pub previous: u32,
    /// Penalty after the move.
    pub penalty: u32,
    /// Temperature at which the move was accepted.
    pub temperature: f64,
}

impl AcceptEvent {
    /// Whether the move strictly lowered the penalty.
    pub fn improved(&self) -> bool {
        self.penalty < self.previous
    }
}

/// Receives every accepted move of an annealing run.
///
/// A write failure aborts the run and is returned to the caller.
pub trait AnnealMonitor {
    fn on_accept(&mut self, event: &AcceptEvent) -> io::Result<()>;
}

/// Monitor that ignores all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMonitor;

impl AnnealMonitor for NoopMonitor {
    fn on_accept(&mut self, _event: &AcceptEvent) -> io::Result<()> {
        Ok(())
    }
}

/// Collects every event in memory.
impl AnnealMonitor for Vec<AcceptEvent> {
    fn on_accept(&mut self, event: &AcceptEvent) -> io::Result<()> {
        self.push(*event);
        Ok(())
    }
}
