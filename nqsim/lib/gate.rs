//! Fixed single-qubit gate matrices and the per-qubit entries of a circuit
//! column.
//!
//! Besides the usual unitaries (*I*, *H*, *X*), the library includes the two
//! computational-basis projectors ∣0⟩⟨0∣ and ∣1⟩⟨1∣, which are the building
//! blocks of the controlled-X decomposition in [`column`][crate::column].

use std::fmt;
use nalgebra as na;
use num_complex::Complex64 as C64;
use once_cell::sync::Lazy;
use rand::Rng;

/// A single-qubit gate drawn from the fixed library.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Identity
    I,
    /// Hadamard
    H,
    /// π rotation about X
    X,
    /// Projector onto ∣0⟩ (not unitary)
    E,
    /// Projector onto ∣1⟩ (not unitary)
    F,
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl Gate {
    /// Look up a gate by its one-character symbol.
    ///
    /// Returns `None` for anything outside `H`, `X`, `I`, `E`, `F`.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            'I' => Some(Self::I),
            'H' => Some(Self::H),
            'X' => Some(Self::X),
            'E' => Some(Self::E),
            'F' => Some(Self::F),
            _ => None,
        }
    }

    /// Return the one-character symbol for `self`.
    pub fn symbol(&self) -> char {
        match self {
            Self::I => 'I',
            Self::H => 'H',
            Self::X => 'X',
            Self::E => 'E',
            Self::F => 'F',
        }
    }

    /// Return a reference to the 2×2 matrix for `self`.
    pub fn matrix(&self) -> &'static na::Matrix2<C64> {
        match self {
            Self::I => Lazy::force(&IDENTITY),
            Self::H => Lazy::force(&HADAMARD),
            Self::X => Lazy::force(&PAULI_X),
            Self::E => Lazy::force(&PROJ_0),
            Self::F => Lazy::force(&PROJ_1),
        }
    }

    /// Return `true` if `self` is `I`.
    pub fn is_identity(&self) -> bool { matches!(self, Self::I) }

    /// Return `false` for the two projectors.
    pub fn is_unitary(&self) -> bool { !matches!(self, Self::E | Self::F) }

    /// Sample a random unitary gate (`I`, `H`, or `X`).
    pub fn sample_single<R>(rng: &mut R) -> Self
    where R: Rng + ?Sized
    {
        match rng.gen_range(0..3_usize) {
            0 => Self::I,
            1 => Self::H,
            2 => Self::X,
            _ => unreachable!(),
        }
    }
}

/// A single-qubit identity matrix.
pub static IDENTITY: Lazy<na::Matrix2<C64>> =
    Lazy::new(|| na::Matrix2::identity());

/// A single-qubit Hadamard matrix.
pub static HADAMARD: Lazy<na::Matrix2<C64>> =
    Lazy::new(|| {
        use std::f64::consts::FRAC_1_SQRT_2;
        let p = C64::from(FRAC_1_SQRT_2);
        na::Matrix2::new(
            p,  p,
            p, -p,
        )
    });

/// A single-qubit Pauli *X* matrix.
pub static PAULI_X: Lazy<na::Matrix2<C64>> =
    Lazy::new(|| {
        let mut x: na::Matrix2<C64> = na::Matrix2::zeros();
        x[(0, 1)] = C64::from(1.0);
        x[(1, 0)] = C64::from(1.0);
        x
    });

/// The projector ∣0⟩⟨0∣.
pub static PROJ_0: Lazy<na::Matrix2<C64>> =
    Lazy::new(|| {
        let mut e: na::Matrix2<C64> = na::Matrix2::zeros();
        e[(0, 0)] = C64::from(1.0);
        e
    });

/// The projector ∣1⟩⟨1∣.
pub static PROJ_1: Lazy<na::Matrix2<C64>> =
    Lazy::new(|| {
        let mut f: na::Matrix2<C64> = na::Matrix2::zeros();
        f[(1, 1)] = C64::from(1.0);
        f
    });

/// A single entry in a circuit column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// A plain single-qubit gate.
    Gate(Gate),
    /// Marks the qubit holding this cell as the target of a controlled-X.
    CX {
        /// Index of the control qubit.
        control: usize,
    },
}

impl From<Gate> for Cell {
    fn from(gate: Gate) -> Self { Self::Gate(gate) }
}

impl Default for Cell {
    fn default() -> Self { Self::Gate(Gate::I) }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gate(g) => write!(f, "{}", g),
            Self::CX { control } if *control < 10 => write!(f, "{}", control),
            Self::CX { control } => write!(f, "({})", control),
        }
    }
}

impl Cell {
    /// Return `true` if `self` is a control marker.
    pub fn is_cx(&self) -> bool { matches!(self, Self::CX { .. }) }

    /// Return `true` if `self` is the identity gate.
    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Gate(Gate::I))
    }
}
