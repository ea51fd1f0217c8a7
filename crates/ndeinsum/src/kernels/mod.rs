//! Specialized contraction kernels.
//!
//! [`select`] recognizes a handful of common label patterns from ranks and
//! label equality alone, never from data:
//!
//! - `Trace`: `(i,i)`, sum of the diagonal
//! - `MatMul`: `(i,j) x (j,k)`, matrix product through faer
//! - `DoubleContraction` / `TripleContraction` / `QuadrupleContraction`:
//!   two operands of rank 2/3/4 with identical label sets, a full inner product
//! - `VoigtDyadic`: `(i,j) x (k,l)` on 3x3 operands packed into a 6x6 result
//!
//! Anything else is `Generic` and runs through the loop engine.

mod inner;
mod matmul;
mod trace;
mod voigt;

pub use inner::{double_contraction, quadruple_contraction, reduce_sum, triple_contraction};
pub use matmul::matmul;
pub use trace::trace;
pub use voigt::{VOIGT_MAP, voigt_dyadic};

use crate::error::{Result, TensorError};
use crate::labels::Label;
use crate::options::Notation;
use crate::scalar::Scalar;
use crate::shape::{OutputSpec, output_spec};

/// Contraction pattern recognized for a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractionKind {
    /// One square rank-2 operand with both axes labeled alike.
    Trace,
    /// `(m x k) . (k x n)`.
    MatMul { m: usize, k: usize, n: usize },
    DoubleContraction,
    TripleContraction,
    QuadrupleContraction,
    /// Outer product of two 3x3 operands in 6x6 Voigt form.
    VoigtDyadic,
    /// No specialized kernel applies.
    Generic,
}

impl ContractionKind {
    pub fn is_specialized(self) -> bool {
        self != ContractionKind::Generic
    }

    /// Shape of the buffer this kind writes.
    ///
    /// Voigt packing changes the output shape; every other kind writes the
    /// resolved einsum output.
    pub fn output_shape(self, resolved: &OutputSpec) -> Vec<usize> {
        match self {
            ContractionKind::VoigtDyadic => vec![6, 6],
            _ => resolved.shape().to_vec(),
        }
    }
}

/// Choose a kernel for a signature.
///
/// The signature is validated first, so a malformed one reports the same
/// error it would report through the generic path.
///
/// # Errors
///
/// Any validation error, or `InvalidNotation` when Voigt notation is
/// requested for operands that are not two 3x3 tensors with disjoint labels.
///
/// # Example
///
/// ```
/// use ndeinsum::kernels::{select, ContractionKind};
/// use ndeinsum::options::Notation;
///
/// let kind = select(&[&[0, 1], &[1, 2]], &[&[2, 3], &[3, 4]], Notation::Standard).unwrap();
/// assert_eq!(kind, ContractionKind::MatMul { m: 2, k: 3, n: 4 });
/// ```
pub fn select(
    label_sets: &[&[Label]],
    shapes: &[&[usize]],
    notation: Notation,
) -> Result<ContractionKind> {
    output_spec(label_sets, shapes)?;

    let kind = match (label_sets, shapes) {
        ([a], [_]) if a.len() == 2 && a[0] == a[1] => ContractionKind::Trace,
        ([a, b], [sa, sb]) => binary_kind(a, b, sa, sb, notation),
        _ => ContractionKind::Generic,
    };

    match (notation, kind) {
        (Notation::Voigt, ContractionKind::VoigtDyadic) | (Notation::Standard, _) => Ok(kind),
        (Notation::Voigt, _) => Err(TensorError::InvalidNotation {
            reason: "Voigt notation requires two 3x3 operands with four distinct labels"
                .to_string(),
        }),
    }
}

fn binary_kind(
    a: &[Label],
    b: &[Label],
    sa: &[usize],
    sb: &[usize],
    notation: Notation,
) -> ContractionKind {
    if a.len() == 2 && b.len() == 2 {
        if notation == Notation::Voigt {
            let disjoint = a.iter().all(|l| !b.contains(l)) && a[0] != a[1] && b[0] != b[1];
            let three_by_three = sa == [3, 3] && sb == [3, 3];
            return if disjoint && three_by_three {
                ContractionKind::VoigtDyadic
            } else {
                ContractionKind::Generic
            };
        }
        if a[1] == b[0] && a[0] != a[1] && b[0] != b[1] && a[0] != b[1] {
            return ContractionKind::MatMul {
                m: sa[0],
                k: sa[1],
                n: sb[1],
            };
        }
    }

    if a == b {
        return match a.len() {
            2 => ContractionKind::DoubleContraction,
            3 => ContractionKind::TripleContraction,
            4 => ContractionKind::QuadrupleContraction,
            _ => ContractionKind::Generic,
        };
    }
    ContractionKind::Generic
}

/// Run a specialized kernel, overwriting `output`.
///
/// Returns `false` and leaves `output` untouched for
/// [`ContractionKind::Generic`].
pub fn run<T: Scalar>(
    kind: ContractionKind,
    shapes: &[&[usize]],
    operands: &[&[T]],
    output: &mut [T],
) -> bool {
    tracing::debug!(?kind, "running specialized kernel");
    match kind {
        ContractionKind::Trace => output[0] = trace(operands[0], shapes[0][0]),
        ContractionKind::MatMul { m, k, n } => matmul(operands[0], operands[1], output, m, k, n),
        ContractionKind::DoubleContraction => {
            output[0] = double_contraction(operands[0], operands[1])
        }
        ContractionKind::TripleContraction => {
            output[0] = triple_contraction(operands[0], operands[1], shapes[0])
        }
        ContractionKind::QuadrupleContraction => {
            output[0] = quadruple_contraction(operands[0], operands[1], shapes[0])
        }
        ContractionKind::VoigtDyadic => voigt_dyadic(operands[0], operands[1], output),
        ContractionKind::Generic => return false,
    }
    true
}
