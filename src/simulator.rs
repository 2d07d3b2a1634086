//! State-vector simulation behind a narrow trait, so the search code can run
//! against the in-process simulator or a stub in tests.

use std::collections::BTreeMap;
use std::fmt::Display;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use crate::circuit::Circuit;
use crate::error::{GroverError, Result};
use crate::qstate::QState;

pub const DEFAULT_MAX_QUBITS: usize = 12;

pub trait Simulator {
    /// Largest register this simulator can hold.
    fn max_qubits(&self) -> usize;

    /// Exact amplitudes of `circuit` applied to |0...0>, before any measurement.
    fn statevector(&self, circuit: &Circuit) -> Result<QState>;

    /// Measures every qubit of a measured circuit `shots` times.
    fn sample(&mut self, circuit: &Circuit, shots: usize) -> Result<Counts>;
}

/// Observed measurement outcomes, keyed by basis-state index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Counts {
    num_of_qbits: usize,
    counts: BTreeMap<usize, usize>,
    shots: usize,
}

impl Counts {
    pub fn new(num_of_qbits: usize) -> Self {
        Self {
            num_of_qbits,
            counts: BTreeMap::new(),
            shots: 0,
        }
    }

    pub fn record(&mut self, outcome: usize) {
        *self.counts.entry(outcome).or_insert(0) += 1;
        self.shots += 1;
    }

    pub fn get(&self, outcome: usize) -> usize {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    pub fn shots(&self) -> usize {
        self.shots
    }

    pub fn num_of_qbits(&self) -> usize {
        self.num_of_qbits
    }

    /// Outcomes in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.counts.iter().map(|(&outcome, &count)| (outcome, count))
    }

    /// Outcome with the highest count; ties go to the lowest index.
    pub fn most_frequent(&self) -> Option<usize> {
        self.iter()
            .fold(None, |best: Option<(usize, usize)>, (outcome, count)| {
                match best {
                    Some((_, best_count)) if best_count >= count => best,
                    _ => Some((outcome, count)),
                }
            })
            .map(|(outcome, _)| outcome)
    }

    pub fn frequency(&self, outcome: usize) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.get(outcome) as f64 / self.shots as f64
    }

    /// Bit string of `outcome`, most significant qubit first.
    pub fn bitstring(&self, outcome: usize) -> String {
        format!("{:0width$b}", outcome, width = self.num_of_qbits)
    }
}

impl Display for Counts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (outcome, count) in self.iter() {
            writeln!(f, "|{}>: {}", self.bitstring(outcome), count)?;
        }
        Ok(())
    }
}

/// Dense state-vector simulator with a seedable sampler.
pub struct StateVectorSimulator {
    rng: StdRng,
    max_qubits: usize,
}

impl StateVectorSimulator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            max_qubits: DEFAULT_MAX_QUBITS,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            max_qubits: DEFAULT_MAX_QUBITS,
        }
    }

    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    fn check_capacity(&self, num_of_qbits: usize) -> Result<()> {
        if num_of_qbits > self.max_qubits || num_of_qbits >= usize::BITS as usize {
            return Err(GroverError::CapacityExceeded {
                requested: num_of_qbits,
                max: self.max_qubits,
            });
        }
        Ok(())
    }
}

impl Default for StateVectorSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator for StateVectorSimulator {
    fn max_qubits(&self) -> usize {
        self.max_qubits
    }

    #[instrument(
        skip(self, circuit),
        fields(qubits = circuit.num_of_qbits(), gates = circuit.len())
    )]
    fn statevector(&self, circuit: &Circuit) -> Result<QState> {
        self.check_capacity(circuit.num_of_qbits())?;
        circuit.apply(&QState::zero_state(circuit.num_of_qbits()))
    }

    #[instrument(skip(self, circuit), fields(qubits = circuit.num_of_qbits()))]
    fn sample(&mut self, circuit: &Circuit, shots: usize) -> Result<Counts> {
        if !circuit.is_measured() {
            return Err(GroverError::NotMeasured);
        }
        if shots == 0 {
            return Err(GroverError::ZeroShots);
        }

        let state = self.statevector(circuit)?;

        let mut cumulative = Vec::with_capacity(1 << state.num_of_qbits());
        let mut total = 0.0;
        for p in state.probabilities() {
            total += p;
            cumulative.push(total);
        }

        let mut counts = Counts::new(circuit.num_of_qbits());
        for _ in 0..shots {
            let r = self.rng.random::<f64>() * total;
            // Rounding can leave `r` past the last bucket.
            let outcome = cumulative
                .partition_point(|&c| c <= r)
                .min(cumulative.len() - 1);
            counts.record(outcome);
        }

        debug!(shots, distinct = counts.counts.len(), "sampling complete");
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::GateKind;

    #[test]
    fn test_counts_most_frequent_breaks_ties_low() {
        let mut counts = Counts::new(2);
        for outcome in [3, 1, 3, 1, 2] {
            counts.record(outcome);
        }

        assert_eq!(counts.most_frequent(), Some(1));
        assert_eq!(counts.get(3), 2);
        assert_eq!(counts.get(0), 0);
        assert_eq!(counts.shots(), 5);
    }

    #[test]
    fn test_counts_empty() {
        let counts = Counts::new(3);
        assert_eq!(counts.most_frequent(), None);
        assert_eq!(counts.frequency(0), 0.0);
    }

    #[test]
    fn test_counts_display() {
        let mut counts = Counts::new(3);
        counts.record(5);
        counts.record(5);
        counts.record(0);

        assert_eq!(counts.to_string(), "|000>: 1\n|101>: 2\n");
    }

    #[test]
    fn test_sample_basis_state_is_certain() -> Result<()> {
        let mut circuit = Circuit::new(3).X(1)?;
        circuit.measure_all();

        let counts = StateVectorSimulator::with_seed(7).sample(&circuit, 100)?;

        assert_eq!(counts.get(2), 100);
        assert_eq!(counts.most_frequent(), Some(2));

        Ok(())
    }

    #[test]
    fn test_sample_is_reproducible_with_seed() -> Result<()> {
        let mut circuit = Circuit::new(3);
        circuit.add_layer(GateKind::H)?;
        circuit.measure_all();

        let first = StateVectorSimulator::with_seed(42).sample(&circuit, 500)?;
        let second = StateVectorSimulator::with_seed(42).sample(&circuit, 500)?;

        assert_eq!(first, second);
        assert_eq!(first.shots(), 500);

        Ok(())
    }

    #[test]
    fn test_sample_requires_measurement() -> Result<()> {
        let circuit = Circuit::new(1).H(0)?;
        let result = StateVectorSimulator::with_seed(0).sample(&circuit, 10);
        assert!(matches!(result, Err(GroverError::NotMeasured)));
        Ok(())
    }

    #[test]
    fn test_sample_rejects_zero_shots() {
        let mut circuit = Circuit::new(1);
        circuit.measure_all();
        let result = StateVectorSimulator::with_seed(0).sample(&circuit, 0);
        assert!(matches!(result, Err(GroverError::ZeroShots)));
    }

    #[test]
    fn test_capacity_exceeded() {
        let circuit = Circuit::new(5);
        let simulator = StateVectorSimulator::with_seed(0).with_max_qubits(4);

        assert!(matches!(
            simulator.statevector(&circuit),
            Err(GroverError::CapacityExceeded {
                requested: 5,
                max: 4
            })
        ));
    }
}
