use crate::search::{IterationSchedule, SearchRunner, DEFAULT_SHOTS};
use crate::simulator::{StateVectorSimulator, DEFAULT_MAX_QUBITS};

/// Settings for a single search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchConfig {
    pub shots: usize,
    /// Sampler seed; `None` seeds from the operating system.
    pub seed: Option<u64>,
    pub max_qubits: usize,
    pub schedule: IterationSchedule,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            shots: DEFAULT_SHOTS,
            seed: None,
            max_qubits: DEFAULT_MAX_QUBITS,
            schedule: IterationSchedule::default(),
        }
    }
}

impl SearchConfig {
    pub fn simulator(&self) -> StateVectorSimulator {
        let simulator = match self.seed {
            Some(seed) => StateVectorSimulator::with_seed(seed),
            None => StateVectorSimulator::new(),
        };
        simulator.with_max_qubits(self.max_qubits)
    }

    pub fn runner(&self) -> SearchRunner<StateVectorSimulator> {
        SearchRunner::new(self.simulator()).with_schedule(self.schedule)
    }
}

/// Which index the sweep searches for at each size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TargetChoice {
    /// Drawn uniformly from the search space at each size.
    #[default]
    Random,
    /// The same index at every size; must fit the smallest register.
    Fixed(usize),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SweepConfig {
    pub search: SearchConfig,
    pub min_qubits: usize,
    pub max_qubits: usize,
    pub target: TargetChoice,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            min_qubits: 2,
            max_qubits: 10,
            target: TargetChoice::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::Simulator;

    #[test]
    fn test_defaults() {
        let config = SweepConfig::default();

        assert_eq!(config.search.shots, 1000);
        assert_eq!(config.search.schedule, IterationSchedule::Rounded);
        assert_eq!((config.min_qubits, config.max_qubits), (2, 10));
        assert_eq!(config.target, TargetChoice::Random);
    }

    #[test]
    fn test_runner_carries_settings() {
        let config = SearchConfig {
            seed: Some(3),
            max_qubits: 5,
            schedule: IterationSchedule::Optimal,
            ..SearchConfig::default()
        };
        let runner = config.runner();

        assert_eq!(runner.schedule(), IterationSchedule::Optimal);
        assert_eq!(runner.simulator().max_qubits(), 5);
    }
}
