//! Input sources and output sinks.
//!
//! Sources are line-oriented text: an availability file carrying the
//! structural parameters and per-worker preference codes, and a name file
//! with one worker per line. Sinks are a penalty trace, overwritten on
//! open, and an append-only result log.

mod loader;
mod sinks;

pub use loader::{
    load, load_problem, load_registry, parse_problem, parse_registry, LoadedInput, ProblemInput,
};
pub use sinks::{summary_line, PenaltyTrace, ResultLog, DEFAULT_TRACE_EVERY};
