//! Error types for circuit construction, simulation and search.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GroverError {
    /// The target index does not fit in the register.
    #[error("target {target} is out of range for {num_of_qbits} qubits (valid: 0..={max})")]
    TargetOutOfRange {
        target: usize,
        num_of_qbits: usize,
        max: usize,
    },

    #[error("register must contain at least one qubit")]
    EmptyRegister,

    /// The state vector for the requested size would exceed the simulator's capacity.
    #[error("requested {requested} qubits but the state-vector simulator holds at most {max}")]
    CapacityExceeded { requested: usize, max: usize },

    #[error("qubit index {index} is out of bounds for {num_of_qbits} qubits")]
    QubitOutOfBounds { index: usize, num_of_qbits: usize },

    #[error("qubit {0} is used more than once in the same gate")]
    DuplicateQubit(usize),

    #[error("cannot combine a {found}-qubit operation with a {expected}-qubit register")]
    RegisterMismatch { expected: usize, found: usize },

    #[error("circuit has no measurement layer")]
    NotMeasured,

    #[error("shot count must be at least 1")]
    ZeroShots,

    #[error("state vector length must be a non-zero power of 2, got {0}")]
    InvalidStateLength(usize),

    #[error("invalid basis state bit string {0:?}")]
    InvalidBitString(String),

    #[error("invalid sweep range {min}..={max}")]
    InvalidSweepRange { min: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, GroverError>;
