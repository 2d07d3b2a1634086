//! Grover's search on a small sparse-matrix state-vector simulator.
//!
//! The oracle and diffusion operators are built as plain gate lists
//! ([`oracle::build_oracle`], [`iterate::build_iterate`]), the search runner
//! ([`search::SearchRunner`]) assembles and samples the full circuit, and the
//! sweep driver ([`sweep::run_sweep`]) records how the success rate behaves
//! as the search space grows.

pub mod circuit;
pub mod config;
pub mod error;
pub mod gates;
pub mod iterate;
pub mod oracle;
pub mod qstate;
pub mod report;
pub mod search;
pub mod simulator;
pub mod sweep;

#[cfg(test)]
mod test_util;

use num_complex::Complex;

pub use circuit::Circuit;
pub use error::{GroverError, Result};
pub use qstate::QState;
pub use search::{run_grover_search, SearchOutcome, SearchRunner};
pub use simulator::{Counts, Simulator, StateVectorSimulator};

pub type Qbit = Complex<f64>;
