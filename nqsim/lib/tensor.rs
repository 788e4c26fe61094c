//! Incremental Kronecker products, one qubit at a time.
//!
//! A multi-qubit operator is assembled by starting from the 1×1 matrix [1] and
//! folding in single-qubit matrices from left to right, so that the first
//! matrix folded in acts on the most significant bit of the basis index.

use nalgebra as na;
use num_complex::Complex64 as C64;

/// Extend an *m*×*m* operator `acc` by one qubit acting as `b`, returning the
/// 2*m*×2*m* matrix `acc ⊗ b`.
///
/// Element-wise, `C[i, j] = acc[i / 2, j / 2] * b[i % 2, j % 2]`.
pub fn kron_step(acc: &na::DMatrix<C64>, b: &na::Matrix2<C64>)
    -> na::DMatrix<C64>
{
    let m = acc.nrows();
    debug_assert_eq!(m, acc.ncols(), "kron_step: accumulator must be square");
    na::DMatrix::from_fn(
        2 * m,
        2 * m,
        |i, j| acc[(i >> 1, j >> 1)] * b[(i & 1, j & 1)],
    )
}

/// Fold a sequence of single-qubit matrices into their full tensor product.
///
/// An empty sequence gives the 1×1 identity.
pub fn kron_fold<'a, I>(mats: I) -> na::DMatrix<C64>
where I: IntoIterator<Item = &'a na::Matrix2<C64>>
{
    mats.into_iter()
        .fold(
            na::DMatrix::from_element(1, 1, C64::from(1.0)),
            |acc, b| kron_step(&acc, b),
        )
}
