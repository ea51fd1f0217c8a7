//! Generic loop-nest execution.
//!
//! Walks the iteration domain of a [`ContractionPlan`] and accumulates the
//! product of the operands into the output at every coordinate. With no
//! contracted label each output element is written exactly once.

use crate::plan::{ContractionPlan, Odometer};
use crate::scalar::Scalar;
use crate::simd::Lanes;
use crate::vectorize::VectorizationDescriptor;

/// Run a planned contraction into `output`.
///
/// `output` is zeroed first. `operands` are the operand buffers in plan
/// order, each laid out row-major. The hint only selects how the innermost
/// label is stepped; the arithmetic per element is the same either way.
///
/// Buffer lengths are assumed to match the plan.
///
/// # Example
///
/// ```
/// use ndeinsum::engine::execute;
/// use ndeinsum::plan::ContractionPlan;
/// use ndeinsum::vectorize::VectorizationDescriptor;
///
/// // y[i] = A[i,j] * x[j]
/// let plan = ContractionPlan::new(&[&[0, 1], &[1]], &[&[2, 2], &[2]]).unwrap();
/// let a = [1.0, 2.0, 3.0, 4.0];
/// let x = [1.0, 1.0];
/// let mut y = [0.0; 2];
/// execute(&plan, &[&a, &x], &mut y, VectorizationDescriptor::SCALAR);
/// assert_eq!(y, [3.0, 7.0]);
/// ```
#[tracing::instrument(
    level = "trace",
    skip_all,
    fields(domain = plan.domain_size(), lanes = hint.stride)
)]
pub fn execute<T: Scalar>(
    plan: &ContractionPlan,
    operands: &[&[T]],
    output: &mut [T],
    hint: VectorizationDescriptor,
) {
    debug_assert_eq!(operands.len(), plan.num_operands());
    debug_assert_eq!(output.len(), plan.output().len());
    debug_assert!(!operands.is_empty());

    output.fill(T::zero());

    let Some((&inner, outer)) = plan.extents().split_last() else {
        // Every operand is rank 0.
        output[0] = product(operands.iter().map(|op| op[0]));
        return;
    };
    let last = outer.len();

    let out_stride = plan.output_label_strides()[last];
    let inner_strides: Vec<usize> = (0..operands.len())
        .map(|op| plan.operand_label_strides(op)[last])
        .collect();

    let lanes = if hint.is_vectorized()
        && !plan.innermost_contracted()
        && out_stride == 1
        && inner % hint.stride == 0
    {
        hint.stride
    } else {
        1
    };

    let mut bases = vec![0usize; operands.len()];
    let mut odo = Odometer::new(outer);
    loop {
        let coords = odo.coords();
        for (op, base) in bases.iter_mut().enumerate() {
            *base = plan.operand_offset(op, coords);
        }
        let row = InnerRow {
            operands,
            bases: &bases,
            strides: &inner_strides,
            out_base: plan.output_offset(coords),
            len: inner,
        };

        match lanes {
            8 => row.accumulate_lanes::<8>(output),
            4 => row.accumulate_lanes::<4>(output),
            2 => row.accumulate_lanes::<2>(output),
            _ => row.accumulate(output, out_stride),
        }

        if !odo.advance() {
            break;
        }
    }
}

fn product<T: Scalar>(mut values: impl Iterator<Item = T>) -> T {
    let first = values.next().unwrap_or_else(T::one);
    values.fold(first, |acc, v| acc * v)
}

/// One pass of the innermost label at a fixed outer coordinate.
struct InnerRow<'a, T: Scalar> {
    operands: &'a [&'a [T]],
    bases: &'a [usize],
    strides: &'a [usize],
    out_base: usize,
    len: usize,
}

impl<T: Scalar> InnerRow<'_, T> {
    fn accumulate(&self, output: &mut [T], out_stride: usize) {
        for t in 0..self.len {
            let term = product(
                self.operands
                    .iter()
                    .zip(self.bases.iter().zip(self.strides))
                    .map(|(op, (&base, &stride))| op[base + t * stride]),
            );
            output[self.out_base + t * out_stride] += term;
        }
    }

    /// Output must be contiguous along the innermost label.
    fn accumulate_lanes<const W: usize>(&self, output: &mut [T]) {
        for t in (0..self.len).step_by(W) {
            let mut gathered = self
                .operands
                .iter()
                .zip(self.bases.iter().zip(self.strides))
                .map(|(op, (&base, &stride))| Lanes::<T, W>::gather(op, base + t * stride, stride));
            let Some(first) = gathered.next() else {
                return;
            };
            let term = gathered.fold(first, |acc, v| acc * v);
            let o = self.out_base + t;
            (Lanes::load(output, o) + term).store(output, o);
        }
    }
}
