//! Error types for loading, construction and optimization.

use std::io;
use std::path::PathBuf;

use crate::constraints::Violation;

/// Errors surfaced by the roster engine.
///
/// Infeasible neighbor proposals inside the annealing loop are routine and
/// never produce an error; they are retried locally.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    /// A required input source could not be opened.
    #[error("input source '{}' could not be opened: {source}", .path.display())]
    InputMissing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input does not match the expected line-oriented format.
    ///
    /// `line` is 1-based over non-blank lines; `0` means the input ended
    /// before the expected line was found.
    #[error("malformed input at line {line}: {reason}")]
    InputMalformed { line: usize, reason: String },

    /// No feasible roster could be constructed for the structural parameters.
    #[error("infeasible configuration after {attempts} attempts: {reason}")]
    InfeasibleConfiguration { attempts: usize, reason: String },

    /// A roster handed to the optimizer breaks a feasibility rule.
    #[error("roster is infeasible: {0}")]
    InfeasibleRoster(Violation),

    /// A generator or annealing configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Writing to a trace or result sink failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl RosterError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        RosterError::InputMalformed {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn infeasible(attempts: usize, reason: impl Into<String>) -> Self {
        RosterError::InfeasibleConfiguration {
            attempts,
            reason: reason.into(),
        }
    }
}

/// Result alias using [`RosterError`].
pub type Result<T> = std::result::Result<T, RosterError>;
