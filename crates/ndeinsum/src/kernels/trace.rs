use crate::scalar::Scalar;

/// Sum of the diagonal of a row-major `n x n` matrix.
pub fn trace<T: Scalar>(data: &[T], n: usize) -> T {
    debug_assert_eq!(data.len(), n * n);
    (0..n).fold(T::zero(), |acc, i| acc + data[i * n + i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::c64;

    #[test]
    fn test_trace_2x2() {
        assert_eq!(trace(&[1.0, 2.0, 3.0, 4.0], 2), 5.0);
    }

    #[test]
    fn test_trace_complex() {
        let data = [
            c64::new(1.0, 1.0),
            c64::new(9.0, 9.0),
            c64::new(9.0, 9.0),
            c64::new(2.0, -3.0),
        ];
        assert_eq!(trace(&data, 2), c64::new(3.0, -2.0));
    }
}
