//! Output shape resolution.
//!
//! The output keeps every free label, in the order the labels first appear
//! across the operands (left operand before right).

use crate::error::{Result, TensorError};
use crate::labels::{Classification, Label, classify, concat_labels};

/// Ordered labels and extents of a contraction result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct OutputSpec {
    labels: Vec<Label>,
    shape: Vec<usize>,
}

impl OutputSpec {
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn rank(&self) -> usize {
        self.labels.len()
    }

    /// Number of output elements; 1 for a scalar result.
    pub fn len(&self) -> usize {
        self.shape.iter().product()
    }

    /// Always false: even a scalar output holds one element.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Axis of the output carrying `label`.
    pub fn position(&self, label: Label) -> Option<usize> {
        self.labels.iter().position(|&l| l == label)
    }

    /// Extent of the last output axis, or `None` for a scalar result.
    pub fn trailing_extent(&self) -> Option<usize> {
        self.shape.last().copied()
    }
}

/// Keep the positions classified [`Classification::Keep`], in input order.
///
/// # Example
///
/// ```
/// use ndeinsum::labels::classify;
/// use ndeinsum::shape::resolve;
///
/// let labels = [0, 1, 1, 2];
/// let extents = [2, 3, 3, 4];
/// let classes = classify(&labels, &extents).unwrap();
/// let out = resolve(&labels, &extents, &classes);
/// assert_eq!(out.labels(), &[0, 2]);
/// assert_eq!(out.shape(), &[2, 4]);
/// ```
pub fn resolve(
    labels: &[Label],
    extents: &[usize],
    classifications: &[Classification],
) -> OutputSpec {
    let (labels, shape) = labels
        .iter()
        .zip(extents)
        .zip(classifications)
        .filter(|(_, class)| **class == Classification::Keep)
        .map(|((&label, &extent), _)| (label, extent))
        .unzip();
    OutputSpec { labels, shape }
}

/// Check label sets against operand shapes, classify, and resolve the output.
///
/// Returns the output together with the per-position classification of the
/// concatenated label set.
pub fn output_spec(
    label_sets: &[&[Label]],
    shapes: &[&[usize]],
) -> Result<(OutputSpec, Vec<Classification>)> {
    if label_sets.len() != shapes.len() {
        return Err(TensorError::UnsupportedOperandCount {
            count: label_sets.len(),
        });
    }
    for (operand, (labels, shape)) in label_sets.iter().zip(shapes).enumerate() {
        if labels.len() != shape.len() {
            return Err(TensorError::RankMismatch {
                operand,
                expected: shape.len(),
                actual: labels.len(),
            });
        }
    }

    let labels = concat_labels(label_sets);
    let extents: Vec<usize> = shapes.iter().flat_map(|s| s.iter().copied()).collect();
    let classes = classify(&labels, &extents)?;
    Ok((resolve(&labels, &extents, &classes), classes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matmul_output() {
        let (out, _) = output_spec(&[&[0, 1], &[1, 2]], &[&[2, 3], &[3, 4]]).unwrap();
        assert_eq!(out.labels(), &[0, 2]);
        assert_eq!(out.shape(), &[2, 4]);
        assert_eq!(out.rank(), 2);
        assert_eq!(out.len(), 8);
        assert_eq!(out.position(2), Some(1));
        assert_eq!(out.position(1), None);
        assert_eq!(out.trailing_extent(), Some(4));
    }

    #[test]
    fn test_swapped_operands_keep_first_occurrence_order() {
        let (out, _) = output_spec(&[&[1, 2], &[0, 1]], &[&[3, 4], &[2, 3]]).unwrap();
        assert_eq!(out.labels(), &[2, 0]);
        assert_eq!(out.shape(), &[4, 2]);
    }

    #[test]
    fn test_scalar_output() {
        let (out, classes) = output_spec(&[&[0, 1], &[0, 1]], &[&[2, 2], &[2, 2]]).unwrap();
        assert_eq!(out.rank(), 0);
        assert_eq!(out.len(), 1);
        assert_eq!(out.trailing_extent(), None);
        assert!(classes.iter().all(|c| c.is_contract()));
    }

    #[test]
    fn test_outer_product_keeps_everything() {
        let (out, _) = output_spec(&[&[0, 1], &[2, 3]], &[&[3, 3], &[3, 3]]).unwrap();
        assert_eq!(out.labels(), &[0, 1, 2, 3]);
        assert_eq!(out.len(), 81);
    }

    #[test]
    fn test_rank_mismatch() {
        let err = output_spec(&[&[0, 1], &[1]], &[&[2, 3], &[3, 4]]).unwrap_err();
        assert_eq!(
            err,
            TensorError::RankMismatch {
                operand: 1,
                expected: 2,
                actual: 1
            }
        );
    }
}
