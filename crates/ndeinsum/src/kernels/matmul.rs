//! Matrix product through faer.

use faer::linalg::matmul::matmul as faer_matmul;
use faer::{Accum, MatMut, MatRef, Par};

use crate::scalar::Scalar;

/// `c = a * b` for row-major `a` (`m x k`), `b` (`k x n`) and `c` (`m x n`).
///
/// The buffers are viewed in place; nothing is copied or transposed.
///
/// # Panics
///
/// Panics if a buffer length does not match its dimensions.
pub fn matmul<T: Scalar>(a: &[T], b: &[T], c: &mut [T], m: usize, k: usize, n: usize) {
    let a = MatRef::from_row_major_slice(a, m, k);
    let b = MatRef::from_row_major_slice(b, k, n);
    let c = MatMut::from_row_major_slice_mut(c, m, n);
    faer_matmul(c, Accum::Replace, a, b, T::one(), Par::Seq);
}
