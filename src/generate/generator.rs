//! Generate-and-test construction loop.

use rand::seq::index::sample;
use rand::Rng;

use super::config::GeneratorConfig;
use crate::constraints::is_feasible;
use crate::error::{Result, RosterError};
use crate::model::{Roster, StructuralParams};
use crate::random::create_rng;

/// Produces a feasible roster for `params`.
///
/// Fails with [`RosterError::InfeasibleConfiguration`] immediately when the
/// shape can never be satisfied, or after `config.max_attempts` rejected
/// candidates.
pub fn generate(params: &StructuralParams, config: &GeneratorConfig) -> Result<Roster> {
    let mut rng = create_rng(config.seed);
    generate_with_rng(params, config, &mut rng)
}

/// Like [`generate`], drawing from a caller-supplied generator.
///
/// `config.seed` is ignored.
#[tracing::instrument(level = "debug", skip(config, rng))]
pub fn generate_with_rng<R: Rng>(
    params: &StructuralParams,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Roster> {
    config.validate()?;
    params.validate()?;
    if let Some(reason) = params.structural_infeasibility() {
        return Err(RosterError::infeasible(0, reason));
    }

    for attempt in 1..=config.max_attempts {
        let candidate = random_candidate(params, rng);
        if is_feasible(candidate.as_slice(), params) {
            tracing::debug!(attempt, "feasible initial roster found");
            return Ok(candidate);
        }
    }

    tracing::warn!(
        attempts = config.max_attempts,
        "no feasible initial roster found"
    );
    Err(RosterError::infeasible(
        config.max_attempts,
        "random construction found no roster satisfying every rule",
    ))
}

/// Builds one complete, unchecked candidate.
///
/// Every shift-instance gets `workers_per_shift` distinct workers drawn
/// uniformly from `1..=worker_count`; nothing else is enforced.
///
/// # Panics
///
/// Panics if `workers_per_shift > worker_count`.
pub fn random_candidate<R: Rng>(params: &StructuralParams, rng: &mut R) -> Roster {
    let mut slots = Vec::with_capacity(params.slot_count());
    for _ in 0..params.shift_instance_count() {
        let picked = sample(rng, params.worker_count, params.workers_per_shift);
        slots.extend(picked.into_iter().map(|i| i + 1));
    }
    Roster::new(slots)
}
