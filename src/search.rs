//! Search runner: assembles the full Grover circuit, samples it and reduces
//! the counts to a found index and an empirical success rate.

use std::f64::consts::PI;

use tracing::{debug, info, instrument};

use crate::circuit::{Circuit, GateKind};
use crate::error::{GroverError, Result};
use crate::iterate::build_iterate;
use crate::oracle::{build_oracle, validate_target};
use crate::simulator::{Counts, Simulator, StateVectorSimulator};

pub const DEFAULT_SHOTS: usize = 1000;

/// How the number of Grover iterations is derived from the register size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IterationSchedule {
    /// round(pi/4 * sqrt(N))
    #[default]
    Rounded,
    /// floor(pi/4 * sqrt(N))
    Floor,
    /// floor(pi / (4 * asin(1/sqrt(N)))), the count maximizing the success probability.
    Optimal,
}

impl IterationSchedule {
    /// Iteration count for a register of `num_of_qbits`, never less than 1.
    pub fn iterations(&self, num_of_qbits: usize) -> usize {
        let size = search_space_size(num_of_qbits);
        let k = match self {
            IterationSchedule::Rounded => (PI / 4.0 * size.sqrt()).round(),
            IterationSchedule::Floor => (PI / 4.0 * size.sqrt()).floor(),
            IterationSchedule::Optimal => (PI / (4.0 * mixing_angle(num_of_qbits))).floor(),
        };
        (k as usize).max(1)
    }
}

fn search_space_size(num_of_qbits: usize) -> f64 {
    2f64.powi(num_of_qbits as i32)
}

/// theta with sin(theta) = 1/sqrt(N): the rotation one iterate applies is 2 theta.
fn mixing_angle(num_of_qbits: usize) -> f64 {
    (1.0 / search_space_size(num_of_qbits).sqrt()).asin()
}

/// Exact probability of measuring the target after `iterations` iterates,
/// sin^2((2k + 1) theta).
pub fn theoretical_success_probability(num_of_qbits: usize, iterations: usize) -> f64 {
    let theta = mixing_angle(num_of_qbits);
    ((2 * iterations + 1) as f64 * theta).sin().powi(2)
}

/// Hadamard layer, `iterations` Grover iterates, measurement of every qubit.
pub fn build_search_circuit(
    num_of_qbits: usize,
    target: usize,
    iterations: usize,
) -> Result<Circuit> {
    let oracle = build_oracle(num_of_qbits, target)?;
    let iterate = build_iterate(num_of_qbits, &oracle)?;

    let mut circuit = Circuit::new(num_of_qbits);
    circuit.add_layer(GateKind::H)?;
    for _ in 0..iterations {
        circuit.append(&iterate)?;
    }
    circuit.measure_all();

    Ok(circuit)
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome {
    pub found_index: usize,
    pub success_probability: f64,
    pub theoretical_probability: f64,
    pub iterations: usize,
    pub shots: usize,
    pub counts: Counts,
}

impl SearchOutcome {
    pub fn found_target(&self, target: usize) -> bool {
        self.found_index == target
    }
}

pub struct SearchRunner<S> {
    simulator: S,
    schedule: IterationSchedule,
}

impl<S: Simulator> SearchRunner<S> {
    pub fn new(simulator: S) -> Self {
        Self {
            simulator,
            schedule: IterationSchedule::default(),
        }
    }

    pub fn with_schedule(mut self, schedule: IterationSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn schedule(&self) -> IterationSchedule {
        self.schedule
    }

    pub fn simulator(&self) -> &S {
        &self.simulator
    }

    #[instrument(skip(self), fields(schedule = ?self.schedule))]
    pub fn run(
        &mut self,
        num_of_qbits: usize,
        target: usize,
        shots: usize,
    ) -> Result<SearchOutcome> {
        validate_target(num_of_qbits, target)?;
        if shots == 0 {
            return Err(GroverError::ZeroShots);
        }
        // The iterate count grows as 2^(n/2); refuse before building anything.
        let max = self.simulator.max_qubits();
        if num_of_qbits > max {
            return Err(GroverError::CapacityExceeded {
                requested: num_of_qbits,
                max,
            });
        }

        let iterations = self.schedule.iterations(num_of_qbits);
        let circuit = build_search_circuit(num_of_qbits, target, iterations)?;
        debug!(iterations, gates = circuit.len(), "circuit built");

        let counts = self.simulator.sample(&circuit, shots)?;

        // With no observations every count ties at zero, so index 0 wins.
        let found_index = counts.most_frequent().unwrap_or(0);
        let success_probability = counts.get(target) as f64 / shots as f64;
        let theoretical_probability = theoretical_success_probability(num_of_qbits, iterations);

        info!(
            found_index,
            success_probability, theoretical_probability, "search complete"
        );

        Ok(SearchOutcome {
            found_index,
            success_probability,
            theoretical_probability,
            iterations,
            shots,
            counts,
        })
    }
}

/// Runs one search on a fresh, unseeded simulator with the default schedule.
pub fn run_grover_search(
    num_of_qbits: usize,
    target: usize,
    shots: usize,
) -> Result<SearchOutcome> {
    SearchRunner::new(StateVectorSimulator::new()).run(num_of_qbits, target, shots)
}
