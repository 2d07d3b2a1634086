//! Oracle construction: a phase flip on exactly one basis state.

use crate::circuit::{Circuit, GateKind};
use crate::error::{GroverError, Result};

/// Checks that `target` is a basis state of an `num_of_qbits`-qubit register.
pub fn validate_target(num_of_qbits: usize, target: usize) -> Result<()> {
    if num_of_qbits == 0 {
        return Err(GroverError::EmptyRegister);
    }
    // Registers at least as wide as usize hold every representable target.
    if num_of_qbits >= usize::BITS as usize {
        return Ok(());
    }
    let max = (1_usize << num_of_qbits) - 1;
    if target > max {
        return Err(GroverError::TargetOutOfRange {
            target,
            num_of_qbits,
            max,
        });
    }
    Ok(())
}

/// Multiplies the amplitude of basis state `index` by -1 and leaves every
/// other basis state alone.
///
/// Qubits whose bit in `index` is 0 are wrapped in X so that the
/// multi-controlled Z, which fires on all ones, fires on `index` instead.
pub fn phase_flip(num_of_qbits: usize, index: usize) -> Result<Circuit> {
    validate_target(num_of_qbits, index)?;

    let zero_bits = (0..num_of_qbits)
        .filter(|&i| index.checked_shr(i as u32).unwrap_or(0) & 1 == 0)
        .collect::<Vec<_>>();
    let controls = (1..num_of_qbits).collect::<Vec<_>>();

    let mut circuit = Circuit::new(num_of_qbits);
    for &i in &zero_bits {
        circuit.add_gate_at(i, GateKind::X)?;
    }
    circuit.add_controlled_gate(&controls, 0, GateKind::Z)?;
    for &i in &zero_bits {
        circuit.add_gate_at(i, GateKind::X)?;
    }

    Ok(circuit)
}

/// Oracle marking `target` by a sign flip.
pub fn build_oracle(num_of_qbits: usize, target: usize) -> Result<Circuit> {
    phase_flip(num_of_qbits, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_complex_eq;
    use crate::qstate::QState;
    use crate::simulator::{Simulator, StateVectorSimulator};

    fn oracle_on_uniform(num_of_qbits: usize, target: usize) -> Result<QState> {
        let mut circuit = Circuit::new(num_of_qbits);
        circuit.add_layer(GateKind::H)?;
        circuit.append(&build_oracle(num_of_qbits, target)?)?;
        StateVectorSimulator::with_seed(0).statevector(&circuit)
    }

    #[test]
    fn test_oracle_flips_only_target() -> Result<()> {
        for num_of_qbits in 1..=4 {
            let size = 1 << num_of_qbits;
            let amp = 1.0 / (size as f64).sqrt();
            for target in 0..size {
                let state = oracle_on_uniform(num_of_qbits, target)?;
                for (i, value) in state.amplitudes().iter().enumerate() {
                    let expected = if i == target { -amp } else { amp };
                    assert_approx_complex_eq!(expected, 0.0, *value);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_single_qubit_oracle() -> Result<()> {
        // target 1: bare Z
        let oracle = build_oracle(1, 1)?;
        assert_eq!(oracle.to_string(), "Z q0\n");

        // target 0: Z wrapped in X
        let oracle = build_oracle(1, 0)?;
        assert_eq!(oracle.to_string(), "X q0\nZ q0\nX q0\n");

        Ok(())
    }

    #[test]
    fn test_target_zero_wraps_every_qubit() -> Result<()> {
        let oracle = build_oracle(3, 0)?;
        let x_count = oracle
            .gates()
            .iter()
            .filter(|g| g.kind == GateKind::X)
            .count();
        assert_eq!(x_count, 6);
        assert_eq!(oracle.len(), 7);
        Ok(())
    }

    #[test]
    fn test_all_ones_target_needs_no_x() -> Result<()> {
        let oracle = build_oracle(3, 7)?;
        assert_eq!(oracle.to_string(), "CZ [q1, q2] -> q0\n");
        Ok(())
    }

    #[test]
    fn test_out_of_range_target() {
        assert!(matches!(
            build_oracle(3, 8),
            Err(GroverError::TargetOutOfRange {
                target: 8,
                num_of_qbits: 3,
                max: 7
            })
        ));
        assert!(matches!(build_oracle(0, 0), Err(GroverError::EmptyRegister)));
    }

    #[test]
    fn test_construction_is_deterministic() -> Result<()> {
        assert_eq!(build_oracle(4, 9)?, build_oracle(4, 9)?);
        Ok(())
    }
}
