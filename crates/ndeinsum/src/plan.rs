//! Loop planning.
//!
//! A [`ContractionPlan`] folds every operand's strides onto the ordered set of
//! unique labels, so that one nested iteration over the unique labels visits
//! every element of every operand and of the output.
//!
//! # Layout
//!
//! All buffers are row-major. The iteration domain has one counter per unique
//! label, in first-occurrence order, with the last label varying fastest.
//! The flat offset of a buffer at a domain coordinate is
//! `sum(label_stride[l] * coord[l])`, where a label absent from the buffer
//! has stride 0. A label repeated inside one operand (a trace) contributes
//! the sum of the strides of its axes.

use crate::error::Result;
use crate::labels::{Classification, DimensionBinding, Label, concat_labels, occurrences};
use crate::scalar::Scalar;
use crate::shape::{OutputSpec, output_spec};
use crate::strides::compute_strides;
use crate::vectorize::{VectorizationDescriptor, advise};

/// Precomputed stride arithmetic for one contraction signature.
///
/// A plan depends only on the label sets and shapes, never on data. Two plans
/// built from the same signature compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContractionPlan {
    labels: Vec<Label>,
    extents: Vec<usize>,
    contracted: Vec<bool>,
    operand_strides: Vec<Vec<usize>>,
    operand_label_strides: Vec<Vec<usize>>,
    output_label_strides: Vec<usize>,
    output: OutputSpec,
    classifications: Vec<Classification>,
}

impl ContractionPlan {
    /// Validate a signature and build its plan.
    ///
    /// All contraction errors surface here.
    ///
    /// # Example
    ///
    /// ```
    /// use ndeinsum::plan::ContractionPlan;
    ///
    /// // C[i,k] = A[i,j] * B[j,k] with A 2x3 and B 3x4
    /// let plan = ContractionPlan::new(&[&[0, 1], &[1, 2]], &[&[2, 3], &[3, 4]]).unwrap();
    /// assert_eq!(plan.labels(), &[0, 1, 2]);
    /// assert_eq!(plan.contracted(), &[false, true, false]);
    /// assert_eq!(plan.operand_label_strides(0), &[3, 1, 0]);
    /// assert_eq!(plan.operand_label_strides(1), &[0, 4, 1]);
    /// assert_eq!(plan.output_label_strides(), &[4, 0, 1]);
    /// assert_eq!(plan.output().shape(), &[2, 4]);
    /// ```
    pub fn new(label_sets: &[&[Label]], shapes: &[&[usize]]) -> Result<Self> {
        let (output, classifications) = output_spec(label_sets, shapes)?;

        let all_labels = concat_labels(label_sets);
        let all_extents: Vec<usize> = shapes.iter().flat_map(|s| s.iter().copied()).collect();
        let binding = DimensionBinding::bind(&all_labels, &all_extents)?;

        let (labels, extents): (Vec<Label>, Vec<usize>) = binding.iter().unzip();
        let contracted: Vec<bool> = labels
            .iter()
            .map(|&l| occurrences(&all_labels, l) == 2)
            .collect();

        let operand_strides: Vec<Vec<usize>> =
            shapes.iter().map(|shape| compute_strides(shape)).collect();

        let operand_label_strides: Vec<Vec<usize>> = label_sets
            .iter()
            .zip(&operand_strides)
            .map(|(set, strides)| fold_strides(&labels, set, strides))
            .collect();

        let output_strides = compute_strides(output.shape());
        let output_label_strides = fold_strides(&labels, output.labels(), &output_strides);

        tracing::debug!(
            labels = ?labels,
            extents = ?extents,
            output = ?output.labels(),
            "planned contraction"
        );

        Ok(Self {
            labels,
            extents,
            contracted,
            operand_strides,
            operand_label_strides,
            output_label_strides,
            output,
            classifications,
        })
    }

    /// Unique labels of the iteration domain, in first-occurrence order.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Extent of each unique label.
    pub fn extents(&self) -> &[usize] {
        &self.extents
    }

    /// Whether each unique label is summed over.
    pub fn contracted(&self) -> &[bool] {
        &self.contracted
    }

    /// Row-major strides of operand `i`, one per axis.
    pub fn operand_strides(&self, i: usize) -> &[usize] {
        &self.operand_strides[i]
    }

    /// Strides of operand `i` folded onto the unique labels.
    pub fn operand_label_strides(&self, i: usize) -> &[usize] {
        &self.operand_label_strides[i]
    }

    /// Output strides folded onto the unique labels; 0 for contracted labels.
    pub fn output_label_strides(&self) -> &[usize] {
        &self.output_label_strides
    }

    pub fn output(&self) -> &OutputSpec {
        &self.output
    }

    /// Classification of each position of the concatenated label sets.
    pub fn classifications(&self) -> &[Classification] {
        &self.classifications
    }

    pub fn num_operands(&self) -> usize {
        self.operand_strides.len()
    }

    /// Number of coordinates in the iteration domain.
    pub fn domain_size(&self) -> usize {
        self.extents.iter().product()
    }

    /// Fastest-varying label, `None` when every operand is rank 0.
    pub fn innermost_label(&self) -> Option<Label> {
        self.labels.last().copied()
    }

    /// Whether the fastest-varying label is summed over.
    pub fn innermost_contracted(&self) -> bool {
        self.contracted.last().copied().unwrap_or(false)
    }

    /// Vectorization hint for the innermost loop with elements of type `T`.
    pub fn vectorization<T: Scalar>(&self) -> VectorizationDescriptor {
        match self.extents.last() {
            Some(&extent) => advise(extent, self.innermost_contracted(), T::WIDTH_BYTES),
            None => VectorizationDescriptor::SCALAR,
        }
    }

    /// Flat offset into operand `op` at a domain coordinate.
    ///
    /// A shorter coordinate addresses only the leading labels.
    #[inline]
    pub fn operand_offset(&self, op: usize, coords: &[usize]) -> usize {
        dot(&self.operand_label_strides[op], coords)
    }

    /// Flat offset into the output at a domain coordinate.
    #[inline]
    pub fn output_offset(&self, coords: &[usize]) -> usize {
        dot(&self.output_label_strides, coords)
    }

    /// Odometer over the whole domain.
    pub fn odometer(&self) -> Odometer<'_> {
        Odometer::new(&self.extents)
    }
}

fn fold_strides(labels: &[Label], axis_labels: &[Label], strides: &[usize]) -> Vec<usize> {
    labels
        .iter()
        .map(|&label| {
            axis_labels
                .iter()
                .zip(strides)
                .filter(|&(&l, _)| l == label)
                .map(|(_, &s)| s)
                .sum()
        })
        .collect()
}

#[inline]
fn dot(strides: &[usize], coords: &[usize]) -> usize {
    strides.iter().zip(coords).map(|(&s, &c)| s * c).sum()
}

/// Mixed-radix counter over a rectangular domain, last digit fastest.
///
/// ```
/// use ndeinsum::plan::Odometer;
///
/// let extents = [2, 2];
/// let mut odo = Odometer::new(&extents);
/// let mut seen = vec![odo.coords().to_vec()];
/// while odo.advance() {
///     seen.push(odo.coords().to_vec());
/// }
/// assert_eq!(seen, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
/// ```
#[derive(Debug, Clone)]
pub struct Odometer<'a> {
    extents: &'a [usize],
    coords: Vec<usize>,
}

impl<'a> Odometer<'a> {
    /// Start at the all-zero coordinate.
    pub fn new(extents: &'a [usize]) -> Self {
        Self {
            extents,
            coords: vec![0; extents.len()],
        }
    }

    #[inline]
    pub fn coords(&self) -> &[usize] {
        &self.coords
    }

    /// Step to the next coordinate. Returns `false` once the domain wraps.
    #[inline]
    pub fn advance(&mut self) -> bool {
        for (c, &extent) in self.coords.iter_mut().zip(self.extents).rev() {
            *c += 1;
            if *c < extent {
                return true;
            }
            *c = 0;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TensorError;
    use crate::vectorize::VectorKind;

    #[test]
    fn test_trace_folds_repeated_label() {
        let plan = ContractionPlan::new(&[&[0, 0]], &[&[3, 3]]).unwrap();
        assert_eq!(plan.labels(), &[0]);
        assert_eq!(plan.operand_label_strides(0), &[4]);
        assert_eq!(plan.output_label_strides(), &[0]);
        assert_eq!(plan.output().rank(), 0);
        assert_eq!(plan.domain_size(), 3);
    }

    #[test]
    fn test_swapped_matmul_labels() {
        // (j,k) x (i,j): unique labels in order j, k, i; output (k, i)
        let plan = ContractionPlan::new(&[&[1, 2], &[0, 1]], &[&[3, 4], &[2, 3]]).unwrap();
        assert_eq!(plan.labels(), &[1, 2, 0]);
        assert_eq!(plan.extents(), &[3, 4, 2]);
        assert_eq!(plan.output().labels(), &[2, 0]);
        assert_eq!(plan.output_label_strides(), &[0, 2, 1]);
        assert_eq!(plan.operand_strides(1), &[3, 1]);
        assert_eq!(plan.operand_label_strides(1), &[1, 0, 3]);
    }

    #[test]
    fn test_offsets() {
        let plan = ContractionPlan::new(&[&[0, 1], &[1, 2]], &[&[2, 3], &[3, 4]]).unwrap();
        let coords = [1, 2, 3];
        assert_eq!(plan.operand_offset(0, &coords), 5);
        assert_eq!(plan.operand_offset(1, &coords), 11);
        assert_eq!(plan.output_offset(&coords), 7);
        // partial coordinates address the leading labels only
        assert_eq!(plan.output_offset(&[1]), 4);
    }

    #[test]
    fn test_identical_signatures_give_equal_plans() {
        let a = ContractionPlan::new(&[&[0, 1], &[1, 2]], &[&[2, 3], &[3, 4]]).unwrap();
        let b = ContractionPlan::new(&[&[0, 1], &[1, 2]], &[&[2, 3], &[3, 4]]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_dimension_mismatch_is_reported() {
        let err = ContractionPlan::new(&[&[0, 1], &[1, 2]], &[&[2, 3], &[4, 5]]).unwrap_err();
        assert_eq!(
            err,
            TensorError::DimensionMismatch {
                label: 1,
                expected: 3,
                actual: 4
            }
        );
    }

    #[test]
    fn test_vectorization_hint() {
        let plan = ContractionPlan::new(&[&[0, 1], &[1, 2]], &[&[2, 3], &[3, 8]]).unwrap();
        let hint = plan.vectorization::<f64>();
        assert_eq!(hint.kind, VectorKind::Wide);
        assert_eq!(hint.stride, 4);

        let dot = ContractionPlan::new(&[&[0], &[0]], &[&[8], &[8]]).unwrap();
        assert!(dot.innermost_contracted());
        assert!(!dot.vectorization::<f64>().is_vectorized());
    }

    #[test]
    fn test_odometer_visits_domain_once() {
        let extents = [2, 3, 2];
        let mut odo = Odometer::new(&extents);
        let mut count = 1;
        while odo.advance() {
            count += 1;
        }
        assert_eq!(count, 12);
        assert_eq!(odo.coords(), &[0, 0, 0]);
    }

    #[test]
    fn test_odometer_empty_domain_has_one_point() {
        let mut odo = Odometer::new(&[]);
        assert!(odo.coords().is_empty());
        assert!(!odo.advance());
    }
}
