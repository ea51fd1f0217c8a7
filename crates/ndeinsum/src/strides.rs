//! Stride computation utilities.
//!
//! Uses row-major (C) order: the last axis varies fastest.

/// Compute row-major strides from shape.
///
/// For shape [d0, d1, d2], returns strides [d1*d2, d2, 1]. The stride of the
/// last axis is 1 and every other stride is `extent[k+1] * stride[k+1]`,
/// filled right to left.
///
/// # Examples
///
/// ```
/// use ndeinsum::strides::compute_strides;
///
/// assert_eq!(compute_strides(&[3, 4, 5]), vec![20, 5, 1]);
/// assert_eq!(compute_strides(&[2, 3]), vec![3, 1]);
/// assert_eq!(compute_strides(&[5]), vec![1]);
/// assert_eq!(compute_strides(&[]), Vec::<usize>::new());
/// ```
pub fn compute_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![0; shape.len()];
    let mut stride = 1;

    for (k, &dim) in shape.iter().enumerate().rev() {
        strides[k] = stride;
        stride *= dim;
    }

    strides
}

/// Convert cartesian indices to a linear index.
///
/// # Arguments
///
/// * `indices` - Cartesian indices for each dimension
/// * `strides` - Strides for each dimension
#[inline]
pub fn cartesian_to_linear(indices: &[usize], strides: &[usize]) -> usize {
    indices
        .iter()
        .zip(strides.iter())
        .map(|(&idx, &stride)| idx * stride)
        .sum()
}

/// Convert a linear index to cartesian indices using row-major order.
pub fn linear_to_cartesian(mut linear: usize, shape: &[usize]) -> Vec<usize> {
    let mut indices = vec![0; shape.len()];

    for (k, &dim) in shape.iter().enumerate().rev() {
        indices[k] = linear % dim;
        linear /= dim;
    }

    indices
}
