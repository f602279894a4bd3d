//! Annealing loop over a schedule state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;

use super::config::{AnnealConfig, Neighborhood};
use super::types::{AcceptEvent, AnnealMonitor, NoopMonitor};
use crate::constraints::{check, is_feasible};
use crate::error::{Result, RosterError};
use crate::model::{AvailabilityMatrix, Roster, ScheduleState, StructuralParams};
use crate::penalty::penalty_of;
use crate::random::create_rng;

/// Counters describing a finished annealing run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealStats {
    /// Neighbor proposals made, feasible or not.
    pub attempts: usize,

    /// Value of `attempts` at the most recent strict improvement, or 0.
    pub last_improvement: usize,

    /// Accepted moves, improving or not.
    pub accepted_moves: usize,

    /// Strictly improving moves.
    pub improving_moves: usize,

    /// Temperature levels completed.
    pub temperature_levels: usize,

    /// Temperature when the run stopped.
    pub final_temperature: f64,

    /// Penalty of the state when the run stopped.
    pub final_penalty: u32,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Whether the run stopped because no feasible neighbor was found
    /// within `max_neighbor_attempts` proposals.
    pub stalled: bool,
}

/// Metropolis acceptance probability of a move that worsens the penalty by
/// `delta` at `temperature`.
///
/// Returns 1 or more for `delta <= 0`.
pub fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
    (-delta / temperature).exp()
}

/// Runs simulated annealing on a schedule state.
pub struct Annealer;

impl Annealer {
    /// Improves `state` in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_roster::model::{AvailabilityMatrix, Preference, Roster, ScheduleState, StructuralParams};
    /// use u_roster::sa::{AnnealConfig, Annealer};
    ///
    /// let params = StructuralParams::new(1, 1, 2, 1).unwrap();
    /// let m = AvailabilityMatrix::new(
    ///     params,
    ///     vec![vec![Preference::Available], vec![Preference::Unavailable]],
    /// )
    /// .unwrap();
    /// let mut state = ScheduleState::new(Roster::new(vec![2]), &m).unwrap();
    ///
    /// Annealer::optimize(&mut state, &m, &AnnealConfig::default().with_seed(1)).unwrap();
    /// assert_eq!(state.roster().as_slice(), &[1]);
    /// assert_eq!(state.penalty(), 0);
    /// ```
    pub fn optimize(
        state: &mut ScheduleState,
        availability: &AvailabilityMatrix,
        config: &AnnealConfig,
    ) -> Result<AnnealStats> {
        Self::optimize_with(state, availability, config, &mut NoopMonitor, None)
    }

    /// Improves `state` in place, reporting accepted moves to `monitor` and
    /// checking `cancel` before every temperature level.
    ///
    /// The state only ever holds feasible rosters. A cancelled or stalled
    /// run leaves the last accepted roster in place.
    #[tracing::instrument(level = "debug", name = "anneal", skip_all, fields(seed = ?config.seed))]
    pub fn optimize_with<M: AnnealMonitor>(
        state: &mut ScheduleState,
        availability: &AvailabilityMatrix,
        config: &AnnealConfig,
        monitor: &mut M,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AnnealStats> {
        config.validate()?;
        let params = availability.params();
        check(state.roster().as_slice(), params).map_err(RosterError::InfeasibleRoster)?;
        // the state may have been priced against another matrix
        state.refresh(availability);

        let mut rng = create_rng(config.seed);

        let mut stats = AnnealStats {
            attempts: 0,
            last_improvement: 0,
            accepted_moves: 0,
            improving_moves: 0,
            temperature_levels: 0,
            final_temperature: config.initial_temperature,
            final_penalty: state.penalty(),
            cancelled: false,
            stalled: false,
        };

        tracing::info!(penalty = state.penalty(), "annealing started");

        let mut temperature = config.initial_temperature;

        'cooling: while temperature > config.min_temperature {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    stats.cancelled = true;
                    break;
                }
            }

            for _ in 0..config.iterations_per_temperature {
                // Nothing left to improve; remaining levels are no-ops.
                if state.penalty() == 0 {
                    break;
                }

                let Some((candidate, penalty)) =
                    propose(state.roster(), availability, config, &mut rng, &mut stats.attempts)
                else {
                    tracing::warn!(
                        attempts = stats.attempts,
                        max_neighbor_attempts = config.max_neighbor_attempts,
                        "no feasible neighbor found, stopping"
                    );
                    stats.stalled = true;
                    break 'cooling;
                };

                let previous = state.penalty();
                let improved = penalty < previous;
                let accept = improved || {
                    let delta = f64::from(penalty - previous);
                    let draw = f64::from(rng.random_range(0..1000u32)) / 1000.0;
                    acceptance_probability(delta, temperature) > draw
                };

                if accept {
                    state.accept(candidate, penalty);
                    stats.accepted_moves += 1;
                    if improved {
                        stats.improving_moves += 1;
                        stats.last_improvement = stats.attempts;
                    }
                    monitor.on_accept(&AcceptEvent {
                        attempt: stats.attempts,
                        previous,
                        penalty,
                        temperature,
                    })?;
                }
            }

            tracing::debug!(
                temperature,
                penalty = state.penalty(),
                attempts = stats.attempts,
                "temperature level done"
            );
            stats.temperature_levels += 1;
            temperature *= config.cooling_factor;
        }

        stats.final_temperature = temperature;
        stats.final_penalty = state.penalty();

        tracing::info!(
            penalty = stats.final_penalty,
            attempts = stats.attempts,
            accepted = stats.accepted_moves,
            improving = stats.improving_moves,
            cancelled = stats.cancelled,
            stalled = stats.stalled,
            "annealing finished"
        );

        Ok(stats)
    }
}

/// Draws neighbors until one is feasible, returning it with its penalty.
///
/// Gives up after `config.max_neighbor_attempts` infeasible proposals.
fn propose<R: Rng>(
    current: &Roster,
    availability: &AvailabilityMatrix,
    config: &AnnealConfig,
    rng: &mut R,
    attempts: &mut usize,
) -> Option<(Roster, u32)> {
    let params = availability.params();
    for _ in 0..config.max_neighbor_attempts {
        *attempts += 1;
        let candidate = neighbor(current, params, config.neighborhood, rng);
        if is_feasible(candidate.as_slice(), params) {
            let penalty = penalty_of(candidate.as_slice(), availability);
            return Some((candidate, penalty));
        }
    }
    None
}

/// Derives one unchecked neighbor of `current`.
pub fn neighbor<R: Rng>(
    current: &Roster,
    params: &StructuralParams,
    neighborhood: Neighborhood,
    rng: &mut R,
) -> Roster {
    let mut candidate = current.clone();
    let n = candidate.len();
    match neighborhood {
        Neighborhood::Reassign => {
            let slot = rng.random_range(0..n);
            let worker = rng.random_range(1..=params.worker_count);
            candidate.assign(slot, worker);
        }
        Neighborhood::Swap => {
            let a = rng.random_range(0..n);
            let b = rng.random_range(0..n);
            candidate.swap(a, b);
        }
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{generate, GeneratorConfig};
    use crate::model::Preference;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// One slot, worker 1 available, worker 2 unavailable.
    fn single_slot() -> AvailabilityMatrix {
        let params = StructuralParams::new(1, 1, 2, 1).unwrap();
        AvailabilityMatrix::new(
            params,
            vec![vec![Preference::Available], vec![Preference::Unavailable]],
        )
        .unwrap()
    }

    /// A week of two three-worker shifts with pseudo-random preferences.
    fn week() -> AvailabilityMatrix {
        let params = StructuralParams::new(2, 3, 10, 7).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let rows = (0..10)
            .map(|_| {
                (0..14)
                    .map(|_| match rng.random_range(0..3) {
                        0 => Preference::Available,
                        1 => Preference::Reluctant,
                        _ => Preference::Unavailable,
                    })
                    .collect()
            })
            .collect();
        AvailabilityMatrix::new(params, rows).unwrap()
    }

    fn quick_config(seed: u64) -> AnnealConfig {
        AnnealConfig::default()
            .with_initial_temperature(10.0)
            .with_cooling_factor(0.9)
            .with_min_temperature(0.05)
            .with_iterations_per_temperature(200)
            .with_seed(seed)
    }

    fn initial_week_state(m: &AvailabilityMatrix) -> ScheduleState {
        let roster = generate(m.params(), &GeneratorConfig::default().with_seed(5)).unwrap();
        ScheduleState::new(roster, m).unwrap()
    }

    #[test]
    fn test_single_slot_converges() {
        let m = single_slot();
        let mut state = ScheduleState::new(Roster::new(vec![2]), &m).unwrap();
        let stats = Annealer::optimize(&mut state, &m, &AnnealConfig::default().with_seed(42))
            .unwrap();

        assert_eq!(state.roster().as_slice(), &[1]);
        assert_eq!(state.penalty(), 0);
        assert_eq!(stats.final_penalty, 0);
        assert_eq!(stats.improving_moves, 1);
        assert!(stats.last_improvement >= 1);
        assert!(!stats.cancelled && !stats.stalled);
    }

    #[test]
    fn test_dormant_at_zero_penalty() {
        let m = single_slot();
        let config = AnnealConfig::default().with_seed(1);
        let mut state = ScheduleState::new(Roster::new(vec![1]), &m).unwrap();
        let stats = Annealer::optimize(&mut state, &m, &config).unwrap();

        assert_eq!(stats.attempts, 0);
        assert_eq!(stats.accepted_moves, 0);
        // cooling still runs to the floor
        assert_eq!(stats.temperature_levels, config.temperature_levels());
        assert!(stats.final_temperature <= config.min_temperature);
    }

    #[test]
    fn test_week_improves_and_stays_feasible() {
        let m = week();
        let mut state = initial_week_state(&m);
        let initial = state.penalty();

        let stats = Annealer::optimize(&mut state, &m, &quick_config(42)).unwrap();

        assert!(is_feasible(state.roster().as_slice(), m.params()));
        assert_eq!(state.penalty(), penalty_of(state.roster().as_slice(), &m));
        assert!(state.penalty() <= initial);
        assert!(stats.attempts >= stats.accepted_moves);
        assert!(stats.accepted_moves >= stats.improving_moves);
    }

    #[test]
    fn test_swap_neighborhood() {
        let m = week();
        let mut state = initial_week_state(&m);
        let initial = state.penalty();
        let config = quick_config(8).with_neighborhood(Neighborhood::Swap);

        Annealer::optimize(&mut state, &m, &config).unwrap();

        assert!(is_feasible(state.roster().as_slice(), m.params()));
        assert!(state.penalty() <= initial);
    }

    #[test]
    fn test_accept_events_are_consistent() {
        let m = week();
        let mut state = initial_week_state(&m);
        let mut events: Vec<AcceptEvent> = Vec::new();

        let stats =
            Annealer::optimize_with(&mut state, &m, &quick_config(3), &mut events, None).unwrap();

        assert_eq!(events.len(), stats.accepted_moves);
        assert_eq!(
            events.iter().filter(|e| e.improved()).count(),
            stats.improving_moves
        );
        for pair in events.windows(2) {
            // each move starts from the state left by the previous one
            assert_eq!(pair[1].previous, pair[0].penalty);
            assert!(pair[1].attempt > pair[0].attempt);
        }
        if let Some(last) = events.last() {
            assert_eq!(last.penalty, state.penalty());
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let m = week();
        let mut a = initial_week_state(&m);
        let mut b = initial_week_state(&m);
        let sa = Annealer::optimize(&mut a, &m, &quick_config(77)).unwrap();
        let sb = Annealer::optimize(&mut b, &m, &quick_config(77)).unwrap();
        assert_eq!(a, b);
        assert_eq!(sa, sb);
    }

    #[test]
    fn test_cancellation() {
        let m = week();
        let mut state = initial_week_state(&m);
        let before = state.clone();
        let cancel = Arc::new(AtomicBool::new(true));

        let stats = Annealer::optimize_with(
            &mut state,
            &m,
            &quick_config(1),
            &mut NoopMonitor,
            Some(cancel),
        )
        .unwrap();

        assert!(stats.cancelled);
        assert_eq!(stats.attempts, 0);
        assert_eq!(state, before);
    }

    #[test]
    fn test_stall_is_reported() {
        // Two slots in one shift, two workers: only [1, 2] and [2, 1] are
        // feasible and a single reassignment can never reach the other.
        let params = StructuralParams::new(1, 2, 2, 1).unwrap();
        let m = AvailabilityMatrix::new(
            params,
            vec![vec![Preference::Unavailable], vec![Preference::Reluctant]],
        )
        .unwrap();
        let mut state = ScheduleState::new(Roster::new(vec![1, 2]), &m).unwrap();
        let config = quick_config(4).with_max_neighbor_attempts(1);

        let stats = Annealer::optimize(&mut state, &m, &config).unwrap();

        assert!(stats.stalled);
        assert_eq!(state.roster().as_slice(), &[1, 2]);
        assert_eq!(state.penalty(), 3);
    }

    #[test]
    fn test_infeasible_start_rejected() {
        // [1, 1] covers two days with one shift each, but the same two
        // positions form a single day under the second shape.
        let two_days = StructuralParams::new(1, 1, 2, 2).unwrap();
        let one_day = StructuralParams::new(2, 1, 2, 1).unwrap();
        let built_against = AvailabilityMatrix::all_available(two_days);
        let m = AvailabilityMatrix::all_available(one_day);
        let mut state = ScheduleState::new(Roster::new(vec![1, 1]), &built_against).unwrap();

        let err = Annealer::optimize(&mut state, &m, &AnnealConfig::default()).unwrap_err();
        assert!(matches!(err, RosterError::InfeasibleRoster(_)));
        assert_eq!(state.roster().as_slice(), &[1, 1]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let m = single_slot();
        let mut state = ScheduleState::new(Roster::new(vec![2]), &m).unwrap();
        let config = AnnealConfig::default().with_cooling_factor(1.5);
        assert!(matches!(
            Annealer::optimize(&mut state, &m, &config),
            Err(RosterError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_acceptance_probability() {
        assert!((acceptance_probability(0.0, 5.0) - 1.0).abs() < 1e-12);
        assert!(acceptance_probability(1.0, 5.0) > acceptance_probability(2.0, 5.0));
        assert!(acceptance_probability(1.0, 10.0) > acceptance_probability(1.0, 1.0));
    }

    #[test]
    fn test_reassign_changes_at_most_one_slot() {
        let params = StructuralParams::new(2, 3, 10, 7).unwrap();
        let current = Roster::new((0..42).map(|p| p % 10 + 1).collect());
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            let n = neighbor(&current, &params, Neighborhood::Reassign, &mut rng);
            let changed = (0..42).filter(|&i| n[i] != current[i]).count();
            assert!(changed <= 1);
        }
    }
}
