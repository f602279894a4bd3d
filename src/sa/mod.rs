//! Simulated annealing over rosters.
//!
//! Each iteration proposes a feasible neighbor of the current roster
//! (infeasible proposals are redrawn), accepts it outright if it lowers the
//! penalty, and otherwise accepts it with the Metropolis probability
//! `exp(-delta / T)`. The temperature `T` cools geometrically from
//! `initial_temperature` to `min_temperature`. Once the penalty reaches
//! zero no further moves are proposed.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast Computing Machines"

mod config;
mod runner;
mod types;

pub use config::{AnnealConfig, Neighborhood};
pub use runner::{acceptance_probability, neighbor, AnnealStats, Annealer};
pub use types::{AcceptEvent, AnnealMonitor, NoopMonitor};
