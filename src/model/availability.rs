//! Per-worker preference codes.

use super::params::StructuralParams;
use super::roster::WorkerId;
use crate::error::{Result, RosterError};

/// A worker's stated preference for one (day, shift) slot.
///
/// The discriminant is the penalty incurred by placing the worker there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Preference {
    /// Fully available (code `0`).
    Available = 0,
    /// Would rather not (code `1`).
    Reluctant = 1,
    /// Unavailable (code `2`).
    Unavailable = 2,
}

impl Preference {
    /// Parses a single code digit.
    pub fn from_digit(c: char) -> Option<Self> {
        match c {
            '0' => Some(Preference::Available),
            '1' => Some(Preference::Reluctant),
            '2' => Some(Preference::Unavailable),
            _ => None,
        }
    }

    /// Numeric code, also the penalty cost.
    pub fn cost(self) -> u32 {
        self as u32
    }

    /// Code digit as written in the availability source.
    pub fn as_digit(self) -> char {
        match self {
            Preference::Available => '0',
            Preference::Reluctant => '1',
            Preference::Unavailable => '2',
        }
    }
}

/// Preference codes for every worker over every (day, shift) slot.
///
/// Row `w - 1` holds the codes of worker id `w`, laid out as
/// `day * shifts_per_day + shift`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AvailabilityMatrix {
    params: StructuralParams,
    rows: Vec<Vec<Preference>>,
}

impl AvailabilityMatrix {
    /// Builds a matrix, checking there is one full row per worker.
    pub fn new(params: StructuralParams, rows: Vec<Vec<Preference>>) -> Result<Self> {
        if rows.len() != params.worker_count {
            return Err(RosterError::InvalidConfig(format!(
                "expected {} availability rows, got {}",
                params.worker_count,
                rows.len()
            )));
        }
        for (i, row) in rows.iter().enumerate() {
            check_row_len(&params, i + 1, row)?;
        }
        Ok(Self { params, rows })
    }

    /// A matrix where every worker is available for every slot.
    pub fn all_available(params: StructuralParams) -> Self {
        let row = vec![Preference::Available; params.codes_per_worker()];
        Self {
            params,
            rows: vec![row; params.worker_count],
        }
    }

    /// Shape the matrix was built for.
    pub fn params(&self) -> &StructuralParams {
        &self.params
    }

    /// Number of worker rows.
    pub fn worker_count(&self) -> usize {
        self.rows.len()
    }

    /// Preference of `worker` for the code at `code_index`.
    ///
    /// # Panics
    ///
    /// Panics if `worker` is outside `1..=worker_count` or `code_index`
    /// is outside the row.
    pub fn preference(&self, worker: WorkerId, code_index: usize) -> Preference {
        self.rows[worker - 1][code_index]
    }

    /// Full preference row of `worker`, or `None` for an unknown id.
    pub fn worker_codes(&self, worker: WorkerId) -> Option<&[Preference]> {
        worker
            .checked_sub(1)
            .and_then(|i| self.rows.get(i))
            .map(Vec::as_slice)
    }

    /// Replaces one worker's preference row.
    ///
    /// Used when a worker re-enters their availability. Any cached
    /// penalty computed against the old row becomes stale.
    pub fn set_worker_codes(&mut self, worker: WorkerId, codes: Vec<Preference>) -> Result<()> {
        if worker == 0 || worker > self.rows.len() {
            return Err(RosterError::InvalidConfig(format!(
                "worker id {worker} outside 1..={}",
                self.rows.len()
            )));
        }
        check_row_len(&self.params, worker, &codes)?;
        self.rows[worker - 1] = codes;
        Ok(())
    }
}

fn check_row_len(params: &StructuralParams, worker: WorkerId, row: &[Preference]) -> Result<()> {
    if row.len() != params.codes_per_worker() {
        return Err(RosterError::InvalidConfig(format!(
            "worker {worker} has {} preference codes, expected {}",
            row.len(),
            params.codes_per_worker()
        )));
    }
    Ok(())
}
