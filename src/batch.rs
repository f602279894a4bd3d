//! Repeated independent runs.
//!
//! Each run builds its own initial roster and anneals it with a seed
//! derived from `base_seed`, so a batch is reproducible as a whole. With the
//! `parallel` feature runs are spread over the rayon thread pool; every run
//! still owns its schedule state exclusively.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::Result;
use crate::generate::{generate, GeneratorConfig};
use crate::model::{AvailabilityMatrix, ScheduleState};
use crate::sa::{AnnealConfig, AnnealStats, Annealer};

/// Outcome of one run in a batch.
#[derive(Debug, Clone)]
pub struct BatchRun {
    /// Seed used for both construction and annealing.
    pub seed: u64,
    pub state: ScheduleState,
    pub stats: AnnealStats,
}

/// Runs `runs` independent generate-then-anneal passes.
///
/// Run `i` uses seed `base_seed + i`. Results are returned in run order;
/// the first failing run aborts the batch.
pub fn run_batch(
    availability: &AvailabilityMatrix,
    generator: &GeneratorConfig,
    anneal: &AnnealConfig,
    runs: usize,
    base_seed: u64,
) -> Result<Vec<BatchRun>> {
    let run_one = |i: usize| -> Result<BatchRun> {
        let seed = base_seed.wrapping_add(i as u64);
        let roster = generate(availability.params(), &generator.clone().with_seed(seed))?;
        let mut state = ScheduleState::new(roster, availability)?;
        let stats = Annealer::optimize(&mut state, availability, &anneal.clone().with_seed(seed))?;
        tracing::debug!(run = i, seed, penalty = stats.final_penalty, "batch run done");
        Ok(BatchRun { seed, state, stats })
    };

    #[cfg(feature = "parallel")]
    let results: Result<Vec<BatchRun>> = (0..runs).into_par_iter().map(run_one).collect();

    #[cfg(not(feature = "parallel"))]
    let results: Result<Vec<BatchRun>> = (0..runs).map(run_one).collect();

    results
}

/// The run with the lowest final penalty; ties go to the earliest run.
pub fn best_run(runs: &[BatchRun]) -> Option<&BatchRun> {
    runs.iter().min_by_key(|r| r.state.penalty())
}
