//! Runs the search once per register size and collects the success rates.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, instrument};

use crate::config::{SweepConfig, TargetChoice};
use crate::error::{GroverError, Result};
use crate::oracle::validate_target;

#[derive(Clone, Debug, PartialEq)]
pub struct SweepPoint {
    pub num_of_qbits: usize,
    pub search_space: usize,
    pub target: usize,
    pub iterations: usize,
    pub found_index: usize,
    pub success_probability: f64,
    pub theoretical_probability: f64,
}

#[instrument(skip(config), fields(min = config.min_qubits, max = config.max_qubits))]
pub fn run_sweep(config: &SweepConfig) -> Result<Vec<SweepPoint>> {
    if config.min_qubits == 0 || config.min_qubits > config.max_qubits {
        return Err(GroverError::InvalidSweepRange {
            min: config.min_qubits,
            max: config.max_qubits,
        });
    }
    if config.max_qubits > config.search.max_qubits {
        return Err(GroverError::CapacityExceeded {
            requested: config.max_qubits,
            max: config.search.max_qubits,
        });
    }
    if let TargetChoice::Fixed(target) = config.target {
        validate_target(config.min_qubits, target)?;
    }

    let mut targets = match config.search.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut runner = config.search.runner();

    let mut points = Vec::with_capacity(config.max_qubits - config.min_qubits + 1);
    for num_of_qbits in config.min_qubits..=config.max_qubits {
        let search_space = 1_usize << num_of_qbits;
        let target = match config.target {
            TargetChoice::Random => targets.random_range(0..search_space),
            TargetChoice::Fixed(target) => target,
        };

        let outcome = runner.run(num_of_qbits, target, config.search.shots)?;
        info!(
            search_space,
            target,
            success_probability = outcome.success_probability,
            "sweep point"
        );

        points.push(SweepPoint {
            num_of_qbits,
            search_space,
            target,
            iterations: outcome.iterations,
            found_index: outcome.found_index,
            success_probability: outcome.success_probability,
            theoretical_probability: outcome.theoretical_probability,
        });
    }

    Ok(points)
}
