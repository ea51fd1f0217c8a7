//! Dyadic product in Voigt form.
//!
//! A symmetric 3x3 tensor has six independent components. Voigt packing
//! indexes them with a single subscript, so the dyadic product of two 3x3
//! tensors (a rank-4 tensor with 81 entries) becomes a 6x6 matrix.

use crate::scalar::Scalar;

/// Voigt subscript to matrix position.
pub const VOIGT_MAP: [(usize, usize); 6] = [(0, 0), (1, 1), (2, 2), (0, 1), (0, 2), (1, 2)];

/// `c[I][J] = a[v(I)] * b[v(J)]` for row-major 3x3 `a`, `b` and 6x6 `c`.
///
/// Off-diagonal entries are taken from the upper triangle as-is; no
/// symmetrization or shear factor is applied.
pub fn voigt_dyadic<T: Scalar>(a: &[T], b: &[T], c: &mut [T]) {
    debug_assert_eq!(a.len(), 9);
    debug_assert_eq!(b.len(), 9);
    debug_assert_eq!(c.len(), 36);

    for (row, &(i, j)) in VOIGT_MAP.iter().enumerate() {
        let aij = a[i * 3 + j];
        for (col, &(k, l)) in VOIGT_MAP.iter().enumerate() {
            c[row * 6 + col] = aij * b[k * 3 + l];
        }
    }
}
