//! Errors raised while reading circuits and evolving states.
//!
//! Problems local to a single time step are described by [`ColumnError`] and
//! reported through [`SimError::Column`], which attaches the step (the column
//! index in the circuit). Qubits are identified by their row index, counting
//! from the most significant bit.

use thiserror::Error;

pub type SimResult<T> = Result<T, SimError>;

/// Top-level error type for building circuits and running them.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SimError {
    /// Qubit counts must be positive and small enough that 2<sup>*n*</sup>
    /// fits in a `usize`.
    #[error("invalid qubit count {0}")]
    InvalidQubitCount(usize),

    #[error("invalid initial state: {0}")]
    InvalidInitialState(String),

    #[error("malformed circuit: {0}")]
    MalformedCircuit(String),

    #[error("invalid column at step {step}: {source}")]
    Column { step: usize, #[source] source: ColumnError },

    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
}

/// A single time step that can't be turned into a matrix.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ColumnError {
    #[error("column has no qubits")]
    Empty,

    #[error("unrecognized gate symbol {symbol:?} on qubit {qubit}")]
    UnrecognizedGateSymbol { qubit: usize, symbol: char },

    /// Only one controlled-X is supported per time step.
    #[error("{count} control markers in one column; at most one is supported")]
    UnsupportedMultiControl { count: usize },

    #[error(
        "control qubit {control} for target {target} is out of range for \
        {num_qubits} qubits"
    )]
    ControlOutOfRange { target: usize, control: usize, num_qubits: usize },

    #[error("qubit {qubit} is marked as its own control")]
    SelfControl { qubit: usize },

    /// The controlled-X decomposition places identities on every other qubit,
    /// so anything else in the column would be lost.
    #[error("gate {gate} on qubit {qubit} shares a column with a controlled-X")]
    GateBesideControl { qubit: usize, gate: char },
}

impl ColumnError {
    pub(crate) fn at(self, step: usize) -> SimError {
        SimError::Column { step, source: self }
    }
}
