//! Abstractions for driving a state vector through a circuit, one time step
//! at a time.
//!
//! A circuit on *n* qubits is written as *n* rows of equal length *T*, one row
//! per qubit; character *i* of row *j* is the gate on qubit *j* at step *i*.
//! Steps are applied strictly in order, each as a single
//! 2<sup>*n*</sup>×2<sup>*n*</sup> matrix.

use itertools::Itertools;
use nalgebra as na;
use num_complex::Complex64 as C64;
use rand::Rng;
use tracing::debug;
use crate::{
    column::{ Column, ParseMode },
    error::{ SimError, SimResult },
    state::{ self, StateVector },
};

/// A sequence of [`Column`]s on a fixed number of qubits.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Circuit {
    n: usize,
    columns: Vec<Column>,
}

impl IntoIterator for Circuit {
    type Item = Column;
    type IntoIter = <Vec<Column> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter { self.columns.into_iter() }
}

impl<'a> IntoIterator for &'a Circuit {
    type Item = &'a Column;
    type IntoIter = <&'a Vec<Column> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter { self.columns.iter() }
}

impl Circuit {
    /// Create a new circuit from a series of columns, verifying that each acts
    /// on exactly `n` qubits.
    pub fn new<I>(n: usize, columns: I) -> SimResult<Self>
    where I: IntoIterator<Item = Column>
    {
        state::dim(n)?;
        let columns: Vec<Column> = columns.into_iter().collect();
        if let Some((step, col)) =
            columns.iter().enumerate().find(|(_, col)| col.num_qubits() != n)
        {
            return Err(SimError::MalformedCircuit(
                format!(
                    "column {} acts on {} qubits; expected {}",
                    step, col.num_qubits(), n,
                )
            ));
        }
        Ok(Self { n, columns })
    }

    /// Read a circuit from `n` rows of gate symbols, one row per qubit.
    ///
    /// All rows must have the same length. See [`ParseMode`] for how symbols
    /// are interpreted.
    pub fn from_rows<S>(n: usize, rows: &[S], mode: ParseMode)
        -> SimResult<Self>
    where S: AsRef<str>
    {
        state::dim(n)?;
        if rows.len() != n {
            return Err(SimError::MalformedCircuit(
                format!("expected {} rows, got {}", n, rows.len())));
        }
        let rows: Vec<Vec<char>> =
            rows.iter().map(|row| row.as_ref().chars().collect()).collect();
        if !rows.iter().map(|row| row.len()).all_equal() {
            let lens = rows.iter().map(|row| row.len()).join(", ");
            return Err(SimError::MalformedCircuit(
                format!("rows have unequal lengths ({})", lens)));
        }
        let depth = rows[0].len();
        let columns: Vec<Column> =
            (0..depth)
            .map(|step| {
                let symbols: String = rows.iter().map(|row| row[step]).collect();
                Column::parse(&symbols, mode).map_err(|err| err.at(step))
            })
            .collect::<SimResult<_>>()?;
        Ok(Self { n, columns })
    }

    /// Sample a random circuit of `depth` columns on `n` qubits.
    ///
    /// See [`Column::sample`] for the distribution of each column.
    ///
    /// *Panics if `n == 0` or `p_cx` is not a valid probability.*
    pub fn sample<R>(n: usize, depth: usize, p_cx: f64, rng: &mut R) -> Self
    where R: Rng + ?Sized
    {
        let columns: Vec<Column> =
            (0..depth).map(|_| Column::sample(n, p_cx, rng)).collect();
        Self { n, columns }
    }

    /// Return the number of qubits.
    pub fn num_qubits(&self) -> usize { self.n }

    /// Return the number of time steps.
    pub fn depth(&self) -> usize { self.columns.len() }

    /// Return the columns of `self` in time order.
    pub fn columns(&self) -> &[Column] { &self.columns }

    /// Render `self` back into one row of symbols per qubit.
    ///
    /// Control indices above 9 have no single-character form and are written
    /// in parentheses.
    pub fn rows(&self) -> Vec<String> {
        (0..self.n)
            .map(|k| {
                self.columns.iter()
                    .map(|col| col.cells()[k].to_string())
                    .collect()
            })
            .collect()
    }

    /// Iterate over the full matrix for each time step, in order.
    pub fn column_matrices(&self)
        -> impl Iterator<Item = na::DMatrix<C64>> + '_
    {
        self.columns.iter().map(|col| col.matrix())
    }

    /// Apply every column to `state`, in order.
    pub fn run<'a>(&self, state: &'a mut StateVector)
        -> SimResult<&'a mut StateVector>
    {
        if state.num_qubits() != self.n {
            return Err(SimError::DimensionMismatch {
                expected: self.n,
                found: state.num_qubits(),
            });
        }
        for (step, col) in self.columns.iter().enumerate() {
            let u = col.matrix();
            debug!(
                step,
                column = %col,
                dim = u.nrows(),
                controlled = col.control().is_some(),
                "applying column"
            );
            state.evolve(&u)?;
        }
        Ok(state)
    }
}

/// Simulate a circuit given as `n` rows of symbols, starting from the basis
/// state described by `init` (one `0` or `1` per qubit, most significant
/// first), and return the final state.
pub fn simulate<S>(n: usize, init: &str, rows: &[S], mode: ParseMode)
    -> SimResult<StateVector>
where S: AsRef<str>
{
    state::dim(n)?;
    let init_len = init.chars().count();
    if init_len != n {
        return Err(SimError::InvalidInitialState(
            format!("expected {} qubit values, got {}", n, init_len)));
    }
    let mut state = StateVector::from_bits(init)?;
    let circuit = Circuit::from_rows(n, rows, mode)?;
    circuit.run(&mut state)?;
    Ok(state)
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::{ rngs::StdRng, SeedableRng };
    use crate::error::ColumnError;

    #[test]
    fn single_hadamard() {
        let state = simulate(1, "0", &["H"], ParseMode::Strict).unwrap();
        let amps = state.amplitudes();
        assert_abs_diff_eq!(amps[0].re, std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-12);
        assert_abs_diff_eq!(amps[1].re, std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-12);
        let p = state.probabilities();
        assert_abs_diff_eq!(p[0], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(p[1], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn cnot_flips_target() {
        let state = simulate(2, "10", &["I", "0"], ParseMode::Strict).unwrap();
        let expected = StateVector::from_bits("11").unwrap();
        assert_eq!(state, expected);
    }

    #[test]
    fn bell_state() {
        let state = simulate(2, "00", &["HI", "I0"], ParseMode::Strict).unwrap();
        let p = state.probabilities();
        assert_abs_diff_eq!(p[0], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(p[1], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p[2], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p[3], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn columns_from_rows() {
        let circuit =
            Circuit::from_rows(3, &["HI1", "XII", "I0I"], ParseMode::Strict)
            .unwrap();
        assert_eq!(circuit.depth(), 3);
        assert_eq!(circuit.columns()[0].to_string(), "HXI");
        assert_eq!(circuit.columns()[1].to_string(), "II0");
        assert_eq!(circuit.columns()[2].to_string(), "1II");
        assert_eq!(circuit.rows(), vec!["HI1", "XII", "I0I"]);
    }

    #[test]
    fn empty_rows_leave_state_unchanged() {
        let state = simulate(2, "01", &["", ""], ParseMode::Strict).unwrap();
        assert_eq!(state, StateVector::from_bits("01").unwrap());
    }

    #[test]
    fn malformed_inputs() {
        assert_eq!(
            simulate::<&str>(0, "", &[], ParseMode::Strict),
            Err(SimError::InvalidQubitCount(0)),
        );
        assert!(matches!(
            simulate(2, "0", &["H", "H"], ParseMode::Strict),
            Err(SimError::InvalidInitialState(_)),
        ));
        assert!(matches!(
            simulate(2, "0a", &["H", "H"], ParseMode::Strict),
            Err(SimError::InvalidInitialState(_)),
        ));
        assert!(matches!(
            simulate(2, "00", &["H"], ParseMode::Strict),
            Err(SimError::MalformedCircuit(_)),
        ));
        assert!(matches!(
            simulate(2, "00", &["HH", "H"], ParseMode::Strict),
            Err(SimError::MalformedCircuit(_)),
        ));
    }

    #[test]
    fn errors_name_the_step() {
        assert_eq!(
            simulate(2, "00", &["HHQ", "III"], ParseMode::Strict),
            Err(ColumnError::UnrecognizedGateSymbol { qubit: 0, symbol: 'Q' }
                .at(2)),
        );
        assert_eq!(
            simulate(3, "000", &["I1", "I2", "II"], ParseMode::Strict),
            Err(ColumnError::UnsupportedMultiControl { count: 2 }.at(1)),
        );
    }

    #[test]
    fn lenient_reads_unknown_as_identity() {
        let strict = simulate(2, "00", &["HI", "I0"], ParseMode::Strict).unwrap();
        let lenient =
            simulate(2, "00", &["HI", "Y0"], ParseMode::Lenient).unwrap();
        assert_eq!(strict, lenient);
    }

    #[test]
    fn typed_columns_checked_against_width() {
        let cols = vec![Column::identity(2), Column::identity(3)];
        assert!(matches!(
            Circuit::new(2, cols),
            Err(SimError::MalformedCircuit(_)),
        ));
    }

    #[test]
    fn run_checks_register_size() {
        let circuit = Circuit::new(2, [Column::identity(2)]).unwrap();
        let mut state = StateVector::zero(3).unwrap();
        assert_eq!(
            circuit.run(&mut state).map(|_| ()),
            Err(SimError::DimensionMismatch { expected: 2, found: 3 }),
        );
    }

    #[test]
    fn random_circuits_preserve_norm() {
        let mut rng = StdRng::seed_from_u64(10546);
        for n in 1..=4 {
            for _ in 0..10 {
                let circuit = Circuit::sample(n, 12, 0.3, &mut rng);
                let index = rng.gen_range(0..1 << n);
                let mut state = StateVector::basis(n, index).unwrap();
                circuit.run(&mut state).unwrap();
                assert_abs_diff_eq!(state.norm_sqr(), 1.0, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn column_matrices_match_columns() {
        let circuit =
            Circuit::from_rows(2, &["HI", "X0"], ParseMode::Strict).unwrap();
        let mats: Vec<_> = circuit.column_matrices().collect();
        assert_eq!(mats.len(), 2);
        assert_eq!(mats[1], circuit.columns()[1].matrix());
        assert_eq!(mats[0].shape(), (4, 4));
    }
}
