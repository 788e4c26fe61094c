//! Tools for simulating small registers of qubits by explicit state-vector
//! evolution.
//!
//! Circuits are described column by column: at each time step every qubit
//! gets one single-qubit gate (*I*, *H*, *X*, or one of the projectors
//! ∣0⟩⟨0∣, ∣1⟩⟨1∣), or a single pair of qubits shares a controlled-X. Each
//! column is expanded into a dense 2<sup>*n*</sup>×2<sup>*n*</sup> matrix and
//! applied to a dense vector of 2<sup>*n*</sup> amplitudes, so both time and
//! memory grow as 4<sup>*n*</sup>; this is meant for registers of a dozen
//! qubits or fewer.
//!
//! # Example
//! ```
//! use nqsim::{ circuit::{ simulate, Circuit }, column::ParseMode, state::StateVector };
//!
//! // one row per qubit; the digit in row 1 makes qubit 0 its control
//! let rows = ["HI", "I0"];
//! let state = simulate(2, "00", &rows, ParseMode::Strict).unwrap();
//! println!("{}", state);
//! // +0.7071+0.0000i∣00⟩ +0.7071+0.0000i∣11⟩
//!
//! // or, equivalently
//! let circuit = Circuit::from_rows(2, &rows, ParseMode::Strict).unwrap();
//! let mut state2 = StateVector::zero(2).unwrap();
//! circuit.run(&mut state2).unwrap();
//! assert_eq!(state, state2);
//! ```

pub mod error;
pub mod gate;
pub mod tensor;
pub mod column;
pub mod state;
pub mod circuit;

pub use error::{ ColumnError, SimError, SimResult };
pub use gate::{ Cell, Gate };
pub use column::{ Column, ControlSpec, ParseMode };
pub use state::StateVector;
pub use circuit::{ simulate, Circuit };
