use std::fmt::Display;
use std::str::FromStr;

use nalgebra::DVector;
use num_complex::Complex;

use crate::error::{GroverError, Result};
use crate::Qbit;

/// Dense state vector over `2^n` computational basis states.
///
/// Basis index bit `i` is the value of qubit `i`.
#[derive(Clone, Debug)]
pub struct QState {
    pub(crate) state: DVector<Qbit>,
}

impl QState {
    pub fn new(state: &[Qbit]) -> Result<Self> {
        let len = state.len();
        if len == 0 || (len & (len - 1)) != 0 {
            return Err(GroverError::InvalidStateLength(len));
        }

        let state = DVector::from_row_slice(state);
        Ok(Self { state })
    }

    pub fn zero_state(num_of_qbits: usize) -> Self {
        let size = 1_usize << num_of_qbits;
        let mut state = DVector::zeros(size);
        state[0] = Complex::new(1.0, 0.0); // |0...0> state
        Self { state }
    }

    /// Equal superposition of every basis state, i.e. `H^n |0...0>`.
    pub fn uniform(num_of_qbits: usize) -> Self {
        let size = 1_usize << num_of_qbits;
        let amplitude = Complex::new(1.0 / (size as f64).sqrt(), 0.0);
        Self {
            state: DVector::from_element(size, amplitude),
        }
    }

    pub fn num_of_qbits(&self) -> usize {
        self.state.len().ilog2() as usize
    }

    pub fn amplitude(&self, index: usize) -> Option<Qbit> {
        self.state.get(index).copied()
    }

    pub fn amplitudes(&self) -> &[Qbit] {
        self.state.as_slice()
    }

    /// Born-rule probability of measuring each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.state.iter().map(|amp| amp.norm_sqr()).collect()
    }

    pub fn probability(&self, index: usize) -> f64 {
        self.amplitude(index).map_or(0.0, |amp| amp.norm_sqr())
    }
}

impl FromStr for QState {
    type Err = GroverError;

    /// Parses a basis state written most significant qubit first, e.g. `"101"`.
    fn from_str(qbits: &str) -> Result<Self> {
        if qbits.is_empty() || qbits.len() >= usize::BITS as usize {
            return Err(GroverError::InvalidBitString(qbits.to_string()));
        }
        let index = usize::from_str_radix(qbits, 2)
            .map_err(|_| GroverError::InvalidBitString(qbits.to_string()))?;
        let mut state = DVector::zeros(1_usize << qbits.len());
        state[index] = Complex::new(1.0, 0.0);

        Ok(Self { state })
    }
}

impl Display for QState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bin_width = self.num_of_qbits();

        for (i, value) in self.state.iter().enumerate() {
            writeln!(f, "|{:0width$b}>: {}", i, value, width = bin_width)?;
        }

        Ok(())
    }
}

impl From<QState> for DVector<Qbit> {
    fn from(qstate: QState) -> Self {
        qstate.state
    }
}
