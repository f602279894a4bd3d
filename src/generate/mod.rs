//! Initial roster generation.
//!
//! Builds complete candidates by sampling distinct workers for every
//! shift-instance, then tests the whole candidate for feasibility. A
//! rejected candidate is discarded entirely and rebuilt from scratch;
//! there is no backtracking.

mod config;
mod generator;

pub use config::GeneratorConfig;
pub use generator::{generate, generate_with_rng, random_candidate};
