use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use u_roster::batch::{best_run, run_batch};
use u_roster::generate::{generate, GeneratorConfig};
use u_roster::io::{self, PenaltyTrace, ResultLog};
use u_roster::model::{AvailabilityMatrix, ScheduleState, WorkerRegistry};
use u_roster::penalty::slot_preference;
use u_roster::sa::{AnnealConfig, Annealer, Neighborhood};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Move {
    Reassign,
    Swap,
}

impl From<Move> for Neighborhood {
    fn from(m: Move) -> Self {
        match m {
            Move::Reassign => Neighborhood::Reassign,
            Move::Swap => Neighborhood::Swap,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "u-roster")]
#[command(about = "Builds a shift roster and improves it by simulated annealing", long_about = None)]
struct Args {
    /// Availability source: structural header followed by one code row per worker
    #[arg(long, default_value = "data.txt")]
    data: PathBuf,

    /// Worker names, one per line
    #[arg(long, default_value = "worker_list.txt")]
    names: PathBuf,

    /// Penalty trace of a single run, overwritten on every invocation
    #[arg(long, default_value = "penalty.txt")]
    trace: PathBuf,

    /// Result log, one summary line appended per run
    #[arg(long, default_value = "result.txt")]
    results: PathBuf,

    /// Random seed; omit for a fresh one
    #[arg(long)]
    seed: Option<u64>,

    /// Independent runs to perform; the best is reported
    #[arg(long, default_value_t = 1)]
    runs: usize,

    #[arg(long, default_value_t = 10.0)]
    initial_temperature: f64,

    #[arg(long, default_value_t = 0.95)]
    cooling_factor: f64,

    #[arg(long, default_value_t = 0.05)]
    min_temperature: f64,

    #[arg(long, default_value_t = 1000)]
    iterations: usize,

    /// Neighbor move
    #[arg(long, value_enum, default_value_t = Move::Reassign)]
    neighborhood: Move,

    /// Complete candidates tried before the initial roster is declared infeasible
    #[arg(long, default_value_t = 1_000_000)]
    max_generate_attempts: usize,
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn main() -> u_roster::Result<()> {
    enable_tracing();
    let args = Args::parse();

    let input = io::load(&args.data, &args.names)?;

    let generator = GeneratorConfig::default().with_max_attempts(args.max_generate_attempts);
    let anneal = AnnealConfig::default()
        .with_initial_temperature(args.initial_temperature)
        .with_cooling_factor(args.cooling_factor)
        .with_min_temperature(args.min_temperature)
        .with_iterations_per_temperature(args.iterations)
        .with_neighborhood(args.neighborhood.into());

    let mut results = ResultLog::open(&args.results)?;

    let state = if args.runs > 1 {
        let base_seed = args.seed.unwrap_or_else(rand::random);
        let runs = run_batch(&input.availability, &generator, &anneal, args.runs, base_seed)?;
        for run in &runs {
            results.record(&run.stats, run.state.roster())?;
        }
        match best_run(&runs) {
            Some(best) => best.state.clone(),
            None => return Ok(()),
        }
    } else {
        let generator = match args.seed {
            Some(seed) => generator.with_seed(seed),
            None => generator,
        };
        let anneal = match args.seed {
            Some(seed) => anneal.with_seed(seed),
            None => anneal,
        };

        let roster = generate(input.params(), &generator)?;
        let mut state = ScheduleState::new(roster, &input.availability)?;

        let mut trace = PenaltyTrace::create(&args.trace)?;
        let stats = Annealer::optimize_with(
            &mut state,
            &input.availability,
            &anneal,
            &mut trace,
            None,
        )?;
        trace.finish()?;
        results.record(&stats, state.roster())?;
        state
    };

    report(&state, &input.availability, &input.registry);
    Ok(())
}

/// Logs the roster day by day with worker names and preference codes.
fn report(state: &ScheduleState, availability: &AvailabilityMatrix, registry: &WorkerRegistry) {
    let params = availability.params();
    let slots = state.roster().as_slice();
    for day in 0..params.day_count {
        for shift in 0..params.shifts_per_day {
            let start = day * params.block_size() + shift * params.workers_per_shift;
            let crew: Vec<String> = (start..start + params.workers_per_shift)
                .map(|slot| {
                    let worker = slots[slot];
                    let name = registry.name(worker).unwrap_or("?");
                    let pref = slot_preference(slots, availability, slot);
                    format!("{name}({})", pref.as_digit())
                })
                .collect();
            tracing::info!(day = day + 1, shift = shift + 1, "{}", crew.join(", "));
        }
    }
    tracing::info!(penalty = state.penalty(), "final roster");
}
