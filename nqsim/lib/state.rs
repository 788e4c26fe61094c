//! Dense state vectors over a register of *n* qubits.
//!
//! The amplitude at index *i* belongs to the basis state whose binary digits,
//! most significant first, give the value of each qubit in order: qubit 0 is
//! the most significant bit.
//!
//! Normalization is never enforced. Applying a non-unitary matrix (e.g. a
//! column containing a projector) is allowed and will change the norm.

use std::fmt;
use nalgebra as na;
use num_complex::Complex64 as C64;
use tracing::trace;
use crate::error::{ SimError, SimResult };

/// Return 2<sup>`n`</sup>, failing if `n` is zero or the result overflows.
pub(crate) fn dim(n: usize) -> SimResult<usize> {
    if n == 0 { return Err(SimError::InvalidQubitCount(n)); }
    u32::try_from(n).ok()
        .and_then(|k| 1_usize.checked_shl(k))
        .ok_or(SimError::InvalidQubitCount(n))
}

/// A complex amplitude vector of length 2<sup>*n*</sup>.
#[derive(Clone, Debug, PartialEq)]
pub struct StateVector {
    n: usize,
    data: na::DVector<C64>,
}

impl StateVector {
    /// Create a new state initialized to the basis state ∣`index`⟩.
    pub fn basis(n: usize, index: usize) -> SimResult<Self> {
        let size = dim(n)?;
        if index >= size {
            return Err(SimError::InvalidInitialState(
                format!("basis index {} out of range for {} qubits", index, n)
            ));
        }
        let mut data: na::DVector<C64> = na::DVector::zeros(size);
        data[index] = C64::from(1.0);
        Ok(Self { n, data })
    }

    /// Create a new state initialized to ∣0...0⟩.
    pub fn zero(n: usize) -> SimResult<Self> { Self::basis(n, 0) }

    /// Create a new basis state from a string of `0`s and `1`s, one per qubit,
    /// most significant first.
    pub fn from_bits(bits: &str) -> SimResult<Self> {
        let n = bits.chars().count();
        if n == 0 {
            return Err(SimError::InvalidInitialState(
                "empty qubit string".to_string()));
        }
        let index =
            bits.chars().enumerate()
            .try_fold(0_usize, |acc, (k, b)| match b {
                '0' => Ok(acc << 1),
                '1' => Ok((acc << 1) | 1),
                _ => Err(SimError::InvalidInitialState(
                    format!("qubit {} has value {:?}; expected '0' or '1'", k, b)
                )),
            })?;
        Self::basis(n, index)
    }

    /// Create a new state from raw amplitudes.
    ///
    /// The number of amplitudes must be a power of two, at least 2.
    pub fn from_amplitudes<I>(amps: I) -> SimResult<Self>
    where I: IntoIterator<Item = C64>
    {
        let amps: Vec<C64> = amps.into_iter().collect();
        let len = amps.len();
        if len < 2 || !len.is_power_of_two() {
            return Err(SimError::InvalidInitialState(
                format!("{} amplitudes is not a power of two", len)));
        }
        let n = len.trailing_zeros() as usize;
        Ok(Self { n, data: na::DVector::from_vec(amps) })
    }

    /// Return the number of qubits.
    pub fn num_qubits(&self) -> usize { self.n }

    /// Return the number of amplitudes, 2<sup>*n*</sup>.
    pub fn len(&self) -> usize { self.data.len() }

    /// Always `false`, since a state has at least one qubit.
    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    /// Return a reference to the amplitudes, in basis-index order.
    pub fn amplitudes(&self) -> &na::DVector<C64> { &self.data }

    /// Consume `self`, returning the amplitudes.
    pub fn into_amplitudes(self) -> na::DVector<C64> { self.data }

    /// Return the squared magnitude of each amplitude, in basis-index order.
    pub fn probabilities(&self) -> Vec<f64> {
        self.data.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Return the sum of squared magnitudes.
    pub fn norm_sqr(&self) -> f64 {
        self.data.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Replace `self` with `u · self`.
    ///
    /// Each new amplitude is the plain (unconjugated) dot product of a row of
    /// `u` with the current amplitudes.
    pub fn evolve(&mut self, u: &na::DMatrix<C64>) -> SimResult<&mut Self> {
        let size = self.data.len();
        if u.nrows() != size || u.ncols() != size {
            return Err(SimError::DimensionMismatch {
                expected: size,
                found: if u.nrows() != size { u.nrows() } else { u.ncols() },
            });
        }
        self.data = u * &self.data;
        trace!(norm_sqr = self.norm_sqr(), "evolved state");
        Ok(self)
    }

    /// Iterate over the nonzero terms of `self` as `(index, amplitude)`
    /// pairs.
    pub fn terms(&self) -> impl Iterator<Item = (usize, C64)> + '_ {
        self.data.iter().copied().enumerate()
            .filter(|(_, a)| a.norm_sqr() > 0.0)
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut terms = self.terms().peekable();
        if terms.peek().is_none() { return write!(f, "0"); }
        while let Some((k, a)) = terms.next() {
            write!(f, "{:+.4}{:+.4}i∣", a.re, a.im)?;
            for j in (0..self.n).rev() {
                write!(f, "{}", (k >> j) & 1)?;
            }
            write!(f, "⟩")?;
            if terms.peek().is_some() { write!(f, " ")?; }
        }
        Ok(())
    }
}
