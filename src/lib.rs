//! Shift roster optimization.
//!
//! Assigns workers to recurring shift slots over a fixed horizon so that
//! hard feasibility rules always hold while the total preference penalty
//! is driven down by simulated annealing.
//!
//! - **Model** ([`model`]): structural parameters, availability matrix,
//!   roster, worker registry and the schedule state that pairs a roster
//!   with its cached penalty.
//! - **Constraints** ([`constraints`]): distinct workers per shift, no
//!   double shift on one day, a per-worker cap over the horizon.
//! - **Penalty** ([`penalty`]): sum of preference codes over all positions.
//! - **Generation** ([`generate`]): random generate-and-test construction
//!   of the first feasible roster.
//! - **Annealing** ([`sa`]): single-slot (or swap) moves, Metropolis
//!   acceptance, geometric cooling.
//! - **I/O** ([`io`]): line-oriented input sources, penalty trace and
//!   result log sinks.
//! - **Batch** ([`batch`]): repeated independent runs.
//!
//! # Example
//!
//! ```
//! use u_roster::generate::{generate, GeneratorConfig};
//! use u_roster::io::parse_problem;
//! use u_roster::model::ScheduleState;
//! use u_roster::sa::{AnnealConfig, Annealer};
//!
//! let input = parse_problem("1\n1\n2\n3\n100\n010\n").unwrap();
//! let roster = generate(input.params(), &GeneratorConfig::default().with_seed(1)).unwrap();
//! let mut state = ScheduleState::new(roster, &input.availability).unwrap();
//!
//! let config = AnnealConfig::default().with_seed(1);
//! Annealer::optimize(&mut state, &input.availability, &config).unwrap();
//! assert_eq!(state.penalty(), 0);
//! ```

pub mod batch;
pub mod constraints;
pub mod error;
pub mod generate;
pub mod io;
pub mod model;
pub mod penalty;
pub mod random;
pub mod sa;

pub use error::{Result, RosterError};
