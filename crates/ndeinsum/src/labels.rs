//! Index algebra over axis labels.
//!
//! A contraction is described by attaching one [`Label`] to every axis of
//! every operand. Labels that appear once survive into the output; labels
//! that appear exactly twice are summed over. Everything here is pure and
//! operates on the concatenation of all operands' label sets.

use crate::error::{Result, TensorError};

/// Symbolic name of one logical tensor axis.
pub type Label = u32;

/// Decision for one position of a concatenated label set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// The label occurs once and becomes an output axis.
    Keep,
    /// The label occurs exactly twice and is summed away.
    Contract,
}

impl Classification {
    #[inline]
    pub fn is_contract(self) -> bool {
        matches!(self, Classification::Contract)
    }
}

/// Parse letter notation into labels.
///
/// `a`..`z` map to 0..25 and `A`..`Z` to 26..51.
///
/// # Example
///
/// ```
/// use ndeinsum::labels::parse_labels;
///
/// assert_eq!(parse_labels("ij").unwrap(), vec![8, 9]);
/// assert_eq!(parse_labels("aZ").unwrap(), vec![0, 51]);
/// assert!(parse_labels("i j").is_err());
/// ```
pub fn parse_labels(notation: &str) -> Result<Vec<Label>> {
    notation
        .chars()
        .map(|c| match c {
            'a'..='z' => Ok(c as Label - 'a' as Label),
            'A'..='Z' => Ok(c as Label - 'A' as Label + 26),
            _ => Err(TensorError::InvalidLabel { symbol: c }),
        })
        .collect()
}

/// Concatenate per-operand label sets in operand order.
pub fn concat_labels(label_sets: &[&[Label]]) -> Vec<Label> {
    label_sets.iter().flat_map(|set| set.iter().copied()).collect()
}

/// Number of positions carrying `label`.
#[inline]
pub fn occurrences(labels: &[Label], label: Label) -> usize {
    labels.iter().filter(|&&l| l == label).count()
}

/// True if no other position shares the label at position `i`.
#[inline]
pub fn is_unique(labels: &[Label], i: usize) -> bool {
    occurrences(labels, labels[i]) == 1
}

/// Unique labels across all operands, each at its first appearance.
pub fn unique_labels(label_sets: &[&[Label]]) -> Vec<Label> {
    let mut unique = Vec::new();
    for &label in label_sets.iter().flat_map(|set| set.iter()) {
        if !unique.contains(&label) {
            unique.push(label);
        }
    }
    unique
}

/// Label to extent mapping in first-occurrence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionBinding {
    entries: Vec<(Label, usize)>,
}

impl DimensionBinding {
    /// Bind every label to the extent of its axis.
    ///
    /// Every occurrence of a label must carry the extent first observed for
    /// it. Zero extents are rejected.
    pub fn bind(labels: &[Label], extents: &[usize]) -> Result<Self> {
        if labels.len() != extents.len() {
            return Err(TensorError::WrongNumberOfIndices {
                expected: labels.len(),
                actual: extents.len(),
            });
        }

        let mut entries: Vec<(Label, usize)> = Vec::new();
        for (&label, &extent) in labels.iter().zip(extents) {
            if extent == 0 {
                return Err(TensorError::InvalidExtent { label });
            }
            match entries.iter().find(|(l, _)| *l == label) {
                Some(&(_, bound)) if bound != extent => {
                    return Err(TensorError::DimensionMismatch {
                        label,
                        expected: bound,
                        actual: extent,
                    });
                }
                Some(_) => {}
                None => entries.push((label, extent)),
            }
        }
        Ok(Self { entries })
    }

    /// Extent bound to `label`, if present.
    pub fn extent(&self, label: Label) -> Option<usize> {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|&(_, e)| e)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Label, usize)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Classify every position of a concatenated label set.
///
/// # Errors
///
/// - `DimensionMismatch` if a shared label binds two different extents.
/// - `OverContraction` if a label appears at three or more positions.
/// - `InvalidExtent` for a zero extent.
/// - `WrongNumberOfIndices` if the slices differ in length.
///
/// # Example
///
/// ```
/// use ndeinsum::labels::{classify, Classification::*};
///
/// // (i, j) x (j, k)
/// let classes = classify(&[0, 1, 1, 2], &[2, 3, 3, 4]).unwrap();
/// assert_eq!(classes, vec![Keep, Contract, Contract, Keep]);
/// ```
pub fn classify(labels: &[Label], extents: &[usize]) -> Result<Vec<Classification>> {
    DimensionBinding::bind(labels, extents)?;

    labels
        .iter()
        .map(|&label| match occurrences(labels, label) {
            1 => Ok(Classification::Keep),
            2 => Ok(Classification::Contract),
            n => Err(TensorError::OverContraction {
                label,
                occurrences: n,
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use Classification::*;

    #[test]
    fn test_parse_labels() {
        assert_eq!(parse_labels("").unwrap(), Vec::<Label>::new());
        assert_eq!(parse_labels("abc").unwrap(), vec![0, 1, 2]);
        assert_eq!(parse_labels("zA").unwrap(), vec![25, 26]);
        assert_eq!(
            parse_labels("i1"),
            Err(TensorError::InvalidLabel { symbol: '1' })
        );
    }

    #[test]
    fn test_is_unique_and_occurrences() {
        let labels = [0, 1, 1, 2];
        assert!(is_unique(&labels, 0));
        assert!(!is_unique(&labels, 1));
        assert!(!is_unique(&labels, 2));
        assert!(is_unique(&labels, 3));
        assert_eq!(occurrences(&labels, 1), 2);
        assert_eq!(occurrences(&labels, 9), 0);
    }

    #[test]
    fn test_unique_labels_first_occurrence_order() {
        let a: &[Label] = &[3, 1];
        let b: &[Label] = &[1, 0, 3, 5];
        assert_eq!(unique_labels(&[a, b]), vec![3, 1, 0, 5]);
        assert_eq!(concat_labels(&[a, b]), vec![3, 1, 1, 0, 3, 5]);
    }

    #[test]
    fn test_binding() {
        let binding = DimensionBinding::bind(&[0, 1, 1, 2], &[2, 3, 3, 4]).unwrap();
        assert_eq!(binding.len(), 3);
        assert_eq!(binding.extent(1), Some(3));
        assert_eq!(binding.extent(7), None);
        assert_eq!(binding.iter().collect::<Vec<_>>(), vec![(0, 2), (1, 3), (2, 4)]);
    }

    #[test]
    fn test_classify_matmul() {
        let classes = classify(&[0, 1, 1, 2], &[2, 3, 3, 4]).unwrap();
        assert_eq!(classes, vec![Keep, Contract, Contract, Keep]);
    }

    #[test]
    fn test_classify_trace_within_one_operand() {
        assert_eq!(classify(&[0, 0], &[3, 3]).unwrap(), vec![Contract, Contract]);
    }

    #[test]
    fn test_classify_outer_product_all_keep() {
        let classes = classify(&[0, 1, 2, 3], &[3, 3, 3, 3]).unwrap();
        assert!(classes.iter().all(|c| *c == Keep));
    }

    #[test]
    fn test_classify_dimension_mismatch() {
        // (i, j) shape (2, 3) with (j, k) shape (4, 5)
        let err = classify(&[8, 9, 9, 10], &[2, 3, 4, 5]).unwrap_err();
        assert_eq!(
            err,
            TensorError::DimensionMismatch {
                label: 9,
                expected: 3,
                actual: 4
            }
        );
    }

    #[test]
    fn test_classify_over_contraction() {
        let err = classify(&[0, 0, 0], &[2, 2, 2]).unwrap_err();
        assert_eq!(
            err,
            TensorError::OverContraction {
                label: 0,
                occurrences: 3
            }
        );
    }

    #[test]
    fn test_classify_zero_extent() {
        assert_eq!(
            classify(&[0, 1], &[2, 0]),
            Err(TensorError::InvalidExtent { label: 1 })
        );
    }

    #[test]
    fn test_classify_length_mismatch() {
        assert!(matches!(
            classify(&[0, 1], &[2]),
            Err(TensorError::WrongNumberOfIndices { .. })
        ));
    }
}
