use std::collections::HashMap;
use std::fmt::Display;

use nalgebra_sparse::{coo::CooMatrix, csr::CsrMatrix};
use tracing::trace;

use crate::error::{GroverError, Result};
use crate::gates::{h_matrix, one_projector, x_matrix, z_matrix};
use crate::qstate::QState;
use crate::Qbit;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GateKind {
    H,
    X,
    Z,
}

impl GateKind {
    pub fn matrix(&self) -> CsrMatrix<Qbit> {
        match self {
            GateKind::H => h_matrix(),
            GateKind::X => x_matrix(),
            GateKind::Z => z_matrix(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GateKind::H => "H",
            GateKind::X => "X",
            GateKind::Z => "Z",
        }
    }
}

/// One elementary gate: `kind` acts on `target` when every qubit in
/// `controls` is |1>. An empty `controls` list is an ordinary single-qubit gate.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Gate {
    pub kind: GateKind,
    pub target: usize,
    pub controls: Vec<usize>,
}

/// Ordered list of gates over a fixed-size register, optionally terminated by
/// a measurement of every qubit.
///
/// Gate indices are validated when the gate is added, so a built circuit is
/// always well formed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Circuit {
    gates: Vec<Gate>,
    num_of_qbits: usize,
    measured: bool,
}

impl Circuit {
    pub fn new(num_of_qbits: usize) -> Self {
        Self {
            gates: Vec::new(),
            num_of_qbits,
            measured: false,
        }
    }

    pub fn num_of_qbits(&self) -> usize {
        self.num_of_qbits
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    pub fn is_measured(&self) -> bool {
        self.measured
    }

    fn check_index(&self, index: usize) -> Result<usize> {
        if index >= self.num_of_qbits {
            return Err(GroverError::QubitOutOfBounds {
                index,
                num_of_qbits: self.num_of_qbits,
            });
        }
        Ok(index)
    }

    pub fn add_gate_at(&mut self, index: usize, kind: GateKind) -> Result<()> {
        self.add_controlled_gate(&[], index, kind)
    }

    pub fn add_controlled_gate(
        &mut self,
        controls: &[usize],
        target: usize,
        kind: GateKind,
    ) -> Result<()> {
        let target = self.check_index(target)?;
        for (i, &control) in controls.iter().enumerate() {
            self.check_index(control)?;
            if control == target || controls[..i].contains(&control) {
                return Err(GroverError::DuplicateQubit(control));
            }
        }

        self.gates.push(Gate {
            kind,
            target,
            controls: controls.to_vec(),
        });
        Ok(())
    }

    /// Adds `kind` on every qubit of the register.
    pub fn add_layer(&mut self, kind: GateKind) -> Result<()> {
        for i in 0..self.num_of_qbits {
            self.add_gate_at(i, kind)?;
        }
        Ok(())
    }

    #[allow(non_snake_case)]
    pub fn H(mut self, index: usize) -> Result<Self> {
        self.add_gate_at(index, GateKind::H)?;
        Ok(self)
    }

    #[allow(non_snake_case)]
    pub fn X(mut self, index: usize) -> Result<Self> {
        self.add_gate_at(index, GateKind::X)?;
        Ok(self)
    }

    #[allow(non_snake_case)]
    pub fn Z(mut self, index: usize) -> Result<Self> {
        self.add_gate_at(index, GateKind::Z)?;
        Ok(self)
    }

    pub fn mcz(mut self, controls: &[usize], target: usize) -> Result<Self> {
        self.add_controlled_gate(controls, target, GateKind::Z)?;
        Ok(self)
    }

    /// Appends every gate of `other` to this circuit.
    pub fn append(&mut self, other: &Circuit) -> Result<()> {
        if other.num_of_qbits != self.num_of_qbits {
            return Err(GroverError::RegisterMismatch {
                expected: self.num_of_qbits,
                found: other.num_of_qbits,
            });
        }
        self.gates.extend_from_slice(&other.gates);
        Ok(())
    }

    pub fn measure_all(&mut self) {
        self.measured = true;
    }

    /// Applies every gate to `state`. Measurement is left to the simulator.
    ///
    /// Each distinct gate is expanded to the full register once; repeated
    /// iterates reuse the expanded matrix.
    pub fn apply(&self, state: &QState) -> Result<QState> {
        if state.num_of_qbits() != self.num_of_qbits {
            return Err(GroverError::RegisterMismatch {
                expected: self.num_of_qbits,
                found: state.num_of_qbits(),
            });
        }

        let mut expanded: HashMap<&Gate, CsrMatrix<Qbit>> = HashMap::new();
        let mut result = state.state.clone();
        for gate in &self.gates {
            trace!(
                kind = gate.kind.name(),
                target = gate.target,
                controls = ?gate.controls,
                "apply gate"
            );
            let matrix = expanded
                .entry(gate)
                .or_insert_with(|| self.gate_matrix(gate));
            result = &*matrix * result;
        }
        trace!(distinct = expanded.len(), "gate matrices expanded");
        Ok(QState { state: result })
    }

    fn gate_matrix(&self, gate: &Gate) -> CsrMatrix<Qbit> {
        let op = gate.kind.matrix();
        let id = CsrMatrix::<Qbit>::identity(2);

        if gate.controls.is_empty() {
            return self.expand(|qbit| if qbit == gate.target { &op } else { &id });
        }

        // I - P + P(U), where P projects onto "all controls set"
        let projector = one_projector();
        let controls_set = self.expand(|qbit| {
            if gate.controls.contains(&qbit) {
                &projector
            } else {
                &id
            }
        });
        let active = self.expand(|qbit| {
            if qbit == gate.target {
                &op
            } else if gate.controls.contains(&qbit) {
                &projector
            } else {
                &id
            }
        });

        CsrMatrix::<Qbit>::identity(1 << self.num_of_qbits) - controls_set + active
    }

    /// Kronecker product of one 2x2 factor per qubit. The most significant
    /// qubit is the leftmost factor.
    fn expand<'a>(&self, factor: impl Fn(usize) -> &'a CsrMatrix<Qbit>) -> CsrMatrix<Qbit> {
        let mut matrix = CsrMatrix::identity(1);
        for position in 0..self.num_of_qbits {
            let qbit = self.num_of_qbits - 1 - position;
            matrix = kronecker_product(&matrix, factor(qbit));
        }
        matrix
    }
}

impl Display for Circuit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for Gate {
            kind,
            target,
            controls,
        } in &self.gates
        {
            if controls.is_empty() {
                writeln!(f, "{} q{}", kind.name(), target)?;
            } else {
                let controls = controls
                    .iter()
                    .map(|c| format!("q{c}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                writeln!(f, "C{} [{}] -> q{}", kind.name(), controls, target)?;
            }
        }
        if self.measured {
            writeln!(f, "M q0..q{}", self.num_of_qbits.saturating_sub(1))?;
        }
        Ok(())
    }
}

pub fn kronecker_product(x: &CsrMatrix<Qbit>, y: &CsrMatrix<Qbit>) -> CsrMatrix<Qbit> {
    let mut result = CooMatrix::new(x.nrows() * y.nrows(), x.ncols() * y.ncols());

    for (rx, cx, value_x) in x.triplet_iter() {
        for (ry, cy, value_y) in y.triplet_iter() {
            let new_row = rx * y.nrows() + ry;
            let new_col = cx * y.ncols() + cy;
            let new_value = value_x * value_y;
            result.push(new_row, new_col, new_value);
        }
    }

    CsrMatrix::from(&result)
}
