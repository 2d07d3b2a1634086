//! Grover iterate: oracle followed by inversion about the mean.

use crate::circuit::{Circuit, GateKind};
use crate::error::{GroverError, Result};
use crate::oracle::phase_flip;

/// Inversion about the mean: H on every qubit, phase flip of |0...0>,
/// H on every qubit. Correct up to a global phase of -1.
pub fn build_diffusion(num_of_qbits: usize) -> Result<Circuit> {
    let mut circuit = Circuit::new(num_of_qbits);
    circuit.add_layer(GateKind::H)?;
    circuit.append(&phase_flip(num_of_qbits, 0)?)?;
    circuit.add_layer(GateKind::H)?;
    Ok(circuit)
}

/// One amplification step: `oracle` then diffusion.
pub fn build_iterate(num_of_qbits: usize, oracle: &Circuit) -> Result<Circuit> {
    if oracle.num_of_qbits() != num_of_qbits {
        return Err(GroverError::RegisterMismatch {
            expected: num_of_qbits,
            found: oracle.num_of_qbits(),
        });
    }

    let mut circuit = oracle.clone();
    circuit.append(&build_diffusion(num_of_qbits)?)?;
    Ok(circuit)
}
