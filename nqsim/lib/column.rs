//! A single time step of a circuit and its full 2<sup>*n*</sup>×2<sup>*n*</sup>
//! matrix.
//!
//! A column holds one [`Cell`] per qubit. Columns without a control marker
//! are plain tensor products of library gates. A column with a marker on
//! qubit *t* naming control qubit *c* is realized as a controlled-X through
//! the projector decomposition
//!
//! > CX(*c*, *t*) = ∣0⟩⟨0∣<sub>*c*</sub> ⊗ *I*<sub>*t*</sub> +
//! > ∣1⟩⟨1∣<sub>*c*</sub> ⊗ *X*<sub>*t*</sub>
//!
//! with identities on every other qubit. Both terms are themselves
//! marker-free columns, so building them is a single level of recursion.
//!
//! The cost of a column's matrix is *O*(4<sup>*n*</sup>) in both time and
//! memory; this is the practical limit on register size.

use itertools::Itertools;
use nalgebra as na;
use num_complex::Complex64 as C64;
use rand::Rng;
use tracing::warn;
use crate::{
    error::ColumnError,
    gate::{ Cell, Gate },
    tensor::kron_fold,
};

/// Rules for reading a textual column.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ParseMode {
    /// Accept only `H`, `X`, `I`, and digits `0`-`9`. Anything else is an
    /// error.
    #[default]
    Strict,
    /// Permissive reading for hand-written circuits: projector symbols `E`
    /// and `F` are accepted, unknown symbols are read as `I`, only the last
    /// digit in a column is kept, and gates sharing a column with a digit are
    /// replaced by `I`.
    ///
    /// Out-of-range and self-referencing control indices are still errors.
    Lenient,
}

/// The control/target pair of a controlled-X.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ControlSpec {
    pub control: usize,
    pub target: usize,
}

/// One time step: one [`Cell`] per qubit, qubit 0 first.
///
/// All `Column`s are validated on construction: there is at least one cell, at
/// most one control marker, and a marker's control index is a different qubit
/// within the register. No other gate may share a column with a marker.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Column(Vec<Cell>);

impl IntoIterator for Column {
    type Item = Cell;
    type IntoIter = <Vec<Cell> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter { self.0.into_iter() }
}

impl<'a> IntoIterator for &'a Column {
    type Item = &'a Cell;
    type IntoIter = <&'a Vec<Cell> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.iter().try_for_each(|cell| write!(f, "{}", cell))
    }
}

impl Column {
    /// Create a new column from a sequence of cells, checking that it
    /// describes at most one controlled-X.
    pub fn new<I>(cells: I) -> Result<Self, ColumnError>
    where I: IntoIterator<Item = Cell>
    {
        let cells: Vec<Cell> = cells.into_iter().collect();
        if cells.is_empty() { return Err(ColumnError::Empty); }
        let n = cells.len();
        let targets: Vec<usize> =
            cells.iter().positions(|cell| cell.is_cx()).collect();
        match targets[..] {
            [] => { },
            [target] => {
                let Cell::CX { control } = cells[target]
                    else { unreachable!() };
                if control >= n {
                    return Err(ColumnError::ControlOutOfRange {
                        target, control, num_qubits: n });
                }
                if control == target {
                    return Err(ColumnError::SelfControl { qubit: target });
                }
                let extra =
                    cells.iter().enumerate()
                    .find_map(|(k, cell)| match cell {
                        Cell::Gate(g) if !g.is_identity() => Some((k, *g)),
                        _ => None,
                    });
                if let Some((qubit, g)) = extra {
                    return Err(ColumnError::GateBesideControl {
                        qubit, gate: g.symbol() });
                }
            },
            _ => {
                return Err(ColumnError::UnsupportedMultiControl {
                    count: targets.len() });
            },
        }
        Ok(Self(cells))
    }

    /// Create a new column of plain gates.
    pub fn from_gates<I>(gates: I) -> Result<Self, ColumnError>
    where I: IntoIterator<Item = Gate>
    {
        Self::new(gates.into_iter().map(Cell::Gate))
    }

    /// Create a new column of `n` identities.
    ///
    /// *Panics if `n == 0`.*
    pub fn identity(n: usize) -> Self {
        assert!(n > 0, "Column::identity: column must have at least one qubit");
        Self(vec![Cell::default(); n])
    }

    /// Create a new column holding a single controlled-X.
    pub fn cx(n: usize, control: usize, target: usize)
        -> Result<Self, ColumnError>
    {
        if target >= n {
            return Err(ColumnError::ControlOutOfRange {
                target, control, num_qubits: n });
        }
        let mut cells = vec![Cell::default(); n];
        cells[target] = Cell::CX { control };
        Self::new(cells)
    }

    /// Read a column from a string holding one symbol per qubit.
    ///
    /// A digit *d* at position *t* makes qubit *t* the target of a
    /// controlled-X whose control is qubit *d*.
    pub fn parse(symbols: &str, mode: ParseMode) -> Result<Self, ColumnError> {
        let mut cells: Vec<Cell> = Vec::with_capacity(symbols.len());
        for (qubit, symbol) in symbols.chars().enumerate() {
            let cell =
                match (symbol, mode) {
                    ('H' | 'X' | 'I', _)
                        => Gate::from_symbol(symbol).map(Cell::Gate),
                    ('E' | 'F', ParseMode::Lenient)
                        => Gate::from_symbol(symbol).map(Cell::Gate),
                    _ => symbol.to_digit(10)
                        .map(|d| Cell::CX { control: d as usize }),
                };
            match (cell, mode) {
                (Some(cell), _) => { cells.push(cell); },
                (None, ParseMode::Strict) => {
                    return Err(ColumnError::UnrecognizedGateSymbol {
                        qubit, symbol });
                },
                (None, ParseMode::Lenient) => {
                    warn!(qubit, ?symbol, "unrecognized gate symbol read as I");
                    cells.push(Cell::default());
                },
            }
        }
        if mode == ParseMode::Lenient { lenient_control(&mut cells); }
        Self::new(cells)
    }

    /// Sample a random column on `n` qubits.
    ///
    /// With probability `p_cx` (and only if `n ≥ 2`), the column is a single
    /// controlled-X between two distinct random qubits; otherwise each qubit
    /// gets an independent random `I`, `H`, or `X`.
    ///
    /// *Panics if `n == 0` or `p_cx` is not a valid probability.*
    pub fn sample<R>(n: usize, p_cx: f64, rng: &mut R) -> Self
    where R: Rng + ?Sized
    {
        assert!(n > 0, "Column::sample: column must have at least one qubit");
        if !(0.0..=1.0).contains(&p_cx) {
            panic!("Column::sample: p_cx must be a valid probability");
        }
        if n >= 2 && rng.gen::<f64>() < p_cx {
            let control = rng.gen_range(0..n);
            let target = (control + rng.gen_range(1..n)) % n;
            let mut cells = vec![Cell::default(); n];
            cells[target] = Cell::CX { control };
            Self(cells)
        } else {
            Self((0..n).map(|_| Cell::Gate(Gate::sample_single(rng))).collect())
        }
    }

    /// Return the number of qubits.
    pub fn num_qubits(&self) -> usize { self.0.len() }

    /// Return the cells of `self`, qubit 0 first.
    pub fn cells(&self) -> &[Cell] { &self.0 }

    /// Return the controlled-X in `self`, if there is one.
    pub fn control(&self) -> Option<ControlSpec> { last_control(&self.0) }

    /// Return `true` if every cell is unitary.
    pub fn is_unitary(&self) -> bool {
        self.0.iter()
            .all(|cell| match cell {
                Cell::Gate(g) => g.is_unitary(),
                Cell::CX { .. } => true,
            })
    }

    /// Construct the full 2<sup>*n*</sup>×2<sup>*n*</sup> matrix for `self`.
    ///
    /// The first cell acts on the most significant bit of the basis index.
    pub fn matrix(&self) -> na::DMatrix<C64> {
        build_matrix(&self.0)
    }
}

// keep only the last digit and clear anything else sharing its column
fn lenient_control(cells: &mut [Cell]) {
    let Some(last) = cells.iter().rposition(|cell| cell.is_cx())
        else { return; };
    for (k, cell) in cells.iter_mut().enumerate() {
        if k == last || cell.is_identity() { continue; }
        warn!(qubit = k, cell = %cell, "dropped from a controlled-X column");
        *cell = Cell::default();
    }
}

// scan left to right; a later marker replaces an earlier one
fn last_control(cells: &[Cell]) -> Option<ControlSpec> {
    cells.iter().enumerate()
        .fold(None, |acc, (target, cell)| match cell {
            Cell::CX { control } => Some(ControlSpec {
                control: *control, target }),
            _ => acc,
        })
}

fn build_matrix(cells: &[Cell]) -> na::DMatrix<C64> {
    let n = cells.len();
    match last_control(cells) {
        None => {
            kron_fold(
                cells.iter()
                .map(|cell| match cell {
                    Cell::Gate(g) => g.matrix(),
                    Cell::CX { .. } => unreachable!(),
                })
            )
        },
        Some(ControlSpec { control, target }) => {
            let mut off = vec![Cell::default(); n];
            off[control] = Cell::Gate(Gate::E);
            let mut on = vec![Cell::default(); n];
            on[control] = Cell::Gate(Gate::F);
            on[target] = Cell::Gate(Gate::X);
            build_matrix(&off) + build_matrix(&on)
        },
    }
}
