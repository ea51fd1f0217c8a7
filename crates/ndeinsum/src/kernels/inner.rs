//! Full inner products and reductions.

use crate::scalar::Scalar;
use crate::simd;
use crate::vectorize::advise_reduction;

/// `sum(a[x] * b[x])` over two equally shaped row-major buffers.
///
/// Accumulates in lanes sized for `T` when the length allows it.
pub fn double_contraction<T: Scalar>(a: &[T], b: &[T]) -> T {
    debug_assert_eq!(a.len(), b.len());
    match advise_reduction(a.len(), T::WIDTH_BYTES).stride {
        8 => simd::dot::<T, 8>(a, b),
        4 => simd::dot::<T, 4>(a, b),
        2 => simd::dot::<T, 2>(a, b),
        _ => simd::dot::<T, 1>(a, b),
    }
}

/// Sum of every element.
pub fn reduce_sum<T: Scalar>(a: &[T]) -> T {
    match advise_reduction(a.len(), T::WIDTH_BYTES).stride {
        8 => simd::sum::<T, 8>(a),
        4 => simd::sum::<T, 4>(a),
        2 => simd::sum::<T, 2>(a),
        _ => simd::sum::<T, 1>(a),
    }
}

/// `sum(a[i,j,k] * b[i,j,k])` for rank-3 operands of `shape`.
pub fn triple_contraction<T: Scalar>(a: &[T], b: &[T], shape: &[usize]) -> T {
    let [d0, d1, d2] = [shape[0], shape[1], shape[2]];
    let mut acc = T::zero();
    for i in 0..d0 {
        for j in 0..d1 {
            let row = (i * d1 + j) * d2;
            for k in 0..d2 {
                acc += a[row + k] * b[row + k];
            }
        }
    }
    acc
}

/// `sum(a[i,j,k,l] * b[i,j,k,l])` for rank-4 operands of `shape`.
pub fn quadruple_contraction<T: Scalar>(a: &[T], b: &[T], shape: &[usize]) -> T {
    let [d0, d1, d2, d3] = [shape[0], shape[1], shape[2], shape[3]];
    let mut acc = T::zero();
    for i in 0..d0 {
        for j in 0..d1 {
            for k in 0..d2 {
                let row = ((i * d1 + j) * d2 + k) * d3;
                for l in 0..d3 {
                    acc += a[row + l] * b[row + l];
                }
            }
        }
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::c64;
    use approx::assert_relative_eq;

    #[test]
    fn test_double_contraction_identity() {
        let eye = [1.0, 0.0, 0.0, 1.0];
        let b = [2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(double_contraction(&eye, &b), 7.0);
    }

    #[test]
    fn test_double_contraction_odd_length() {
        let a: Vec<f64> = (0..9).map(f64::from).collect();
        assert_relative_eq!(double_contraction(&a, &a), 204.0);
    }

    #[test]
    fn test_double_contraction_is_bilinear_not_sesquilinear() {
        let a = [c64::new(0.0, 1.0), c64::new(1.0, 0.0)];
        // i*i + 1*1 = 0
        assert_eq!(double_contraction(&a, &a), c64::new(0.0, 0.0));
    }

    #[test]
    fn test_triple_and_quadruple() {
        let a: Vec<f64> = (0..8).map(f64::from).collect();
        let ones = vec![1.0; 8];
        assert_relative_eq!(triple_contraction(&a, &ones, &[2, 2, 2]), 28.0);

        let a: Vec<f64> = (0..16).map(f64::from).collect();
        let ones = vec![1.0; 16];
        assert_relative_eq!(quadruple_contraction(&a, &ones, &[2, 2, 2, 2]), 120.0);
    }

    #[test]
    fn test_reduce_sum() {
        let a: Vec<f32> = (1..=10).map(|x| x as f32).collect();
        assert_relative_eq!(reduce_sum(&a), 55.0);
        assert_relative_eq!(reduce_sum(&[3.0f64]), 3.0);
    }
}
