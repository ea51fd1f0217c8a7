//! Label-based tensor contraction.
//!
//! Every axis of every operand carries a [`Label`]. A label that appears
//! once is kept in the result; a label that appears twice (in the same
//! operand or across both) is summed over. The result's axes follow the
//! order in which the kept labels first appear, left operand first.
//!
//! # Example
//!
//! ```
//! use ndeinsum::{Tensor, contract};
//! use ndeinsum::labels::parse_labels;
//!
//! // Matrix multiplication: C[i,k] = A[i,j] * B[j,k]
//! let a = Tensor::<f64>::ones(&[2, 3]);
//! let b = Tensor::<f64>::ones(&[3, 4]);
//!
//! let c = contract(&parse_labels("ij")?, &parse_labels("jk")?, &a, &b)?;
//! assert_eq!(c.shape(), &[2, 4]);
//! assert_eq!(c.get(&[1, 3]), Some(&3.0));
//! # Ok::<(), ndeinsum::TensorError>(())
//! ```

use std::sync::Arc;

use crate::cache::PlanCache;
use crate::engine;
use crate::error::{Result, TensorError};
use crate::kernels::{self, ContractionKind};
use crate::labels::Label;
use crate::options::{ContractOptions, Notation};
use crate::plan::ContractionPlan;
use crate::scalar::Scalar;
use crate::shape::output_spec;
use crate::tensor::Tensor;
use crate::vectorize::VectorizationDescriptor;

/// Contract two tensors.
///
/// # Errors
///
/// - `RankMismatch` if a label set's length differs from its tensor's rank.
/// - `DimensionMismatch` if a shared label binds different extents.
/// - `OverContraction` if a label appears more than twice.
///
/// No output is produced on error.
pub fn contract<T: Scalar>(
    left_labels: &[Label],
    right_labels: &[Label],
    left: &Tensor<T>,
    right: &Tensor<T>,
) -> Result<Tensor<T>> {
    contract_with_options(
        &[left_labels, right_labels],
        &[left, right],
        &ContractOptions::default(),
    )
}

/// Contract a single tensor with itself: traces, partial traces, and copies.
///
/// A full reduction returns a rank-0 tensor.
///
/// ```
/// use ndeinsum::{Tensor, contract_unary};
///
/// let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
/// let tr = contract_unary(&[0, 0], &t).unwrap();
/// assert_eq!(tr.into_scalar(), Some(5.0));
/// ```
pub fn contract_unary<T: Scalar>(labels: &[Label], tensor: &Tensor<T>) -> Result<Tensor<T>> {
    contract_with_options(&[labels], &[tensor], &ContractOptions::default())
}

/// Contract one or two tensors with explicit options.
///
/// # Errors
///
/// `UnsupportedOperandCount` unless there are one or two operands with one
/// label set each, `InvalidNotation` when Voigt notation does not apply,
/// plus every error of [`contract`].
pub fn contract_with_options<T: Scalar>(
    label_sets: &[&[Label]],
    operands: &[&Tensor<T>],
    options: &ContractOptions,
) -> Result<Tensor<T>> {
    let count = operands.len();
    if !(1..=2).contains(&count) || label_sets.len() != count {
        return Err(TensorError::UnsupportedOperandCount {
            count: label_sets.len().max(count),
        });
    }

    let shapes: Vec<&[usize]> = operands.iter().map(|t| t.shape()).collect();
    let data: Vec<&[T]> = operands.iter().map(|t| t.data()).collect();

    let kind = if options.specialized_kernels || options.notation == Notation::Voigt {
        kernels::select(label_sets, &shapes, options.notation)?
    } else {
        ContractionKind::Generic
    };

    if kind.is_specialized() {
        let (resolved, _) = output_spec(label_sets, &shapes)?;
        let mut out = Tensor::zeros(&kind.output_shape(&resolved));
        tracing::debug!(?kind, shape = ?out.shape(), "dispatching contraction");
        let handled = kernels::run(kind, &shapes, &data, out.data_mut());
        debug_assert!(handled);
        return Ok(out);
    }

    let plan = if options.use_cache {
        PlanCache::global().get_or_plan(label_sets, &shapes)?
    } else {
        Arc::new(ContractionPlan::new(label_sets, &shapes)?)
    };
    let hint = if options.vectorize {
        plan.vectorization::<T>()
    } else {
        VectorizationDescriptor::SCALAR
    };
    tracing::debug!(
        kind = ?ContractionKind::Generic,
        shape = ?plan.output().shape(),
        ?hint,
        "dispatching contraction"
    );

    let mut out = Tensor::zeros(plan.output().shape());
    engine::execute(&plan, &data, out.data_mut(), hint);
    Ok(out)
}

/// Sum of the diagonal of a square matrix.
///
/// ```
/// use ndeinsum::{Tensor, trace};
///
/// let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
/// assert_eq!(trace(&t).unwrap(), 5.0);
/// ```
///
/// # Errors
///
/// `RankMismatch` for a tensor that is not rank 2, `DimensionMismatch` for a
/// non-square one.
pub fn trace<T: Scalar>(tensor: &Tensor<T>) -> Result<T> {
    let out = contract_unary(&[0, 0], tensor)?;
    Ok(out.data()[0])
}

/// Full inner product `sum(a[x] * b[x])` of two equally shaped tensors.
///
/// No complex conjugation is applied.
///
/// ```
/// use ndeinsum::{Tensor, double_contract};
///
/// let a = Tensor::from_vec(vec![1.0, 0.0, 0.0, 1.0], &[2, 2]).unwrap();
/// let b = Tensor::from_vec(vec![2.0, 3.0, 4.0, 5.0], &[2, 2]).unwrap();
/// assert_eq!(double_contract(&a, &b).unwrap(), 7.0);
/// ```
pub fn double_contract<T: Scalar>(a: &Tensor<T>, b: &Tensor<T>) -> Result<T> {
    let labels: Vec<Label> = (0..a.rank() as Label).collect();
    let out = contract(&labels, &labels, a, b)?;
    Ok(out.data()[0])
}

/// Sum of every element.
pub fn summation<T: Scalar>(tensor: &Tensor<T>) -> T {
    kernels::reduce_sum(tensor.data())
}
