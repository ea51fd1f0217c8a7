//! Vectorization advice for the innermost loop.
//!
//! The advisor only looks at the trailing axis of the iteration domain. Its
//! answer is a hint: the engine produces identical results whether or not it
//! is honored.

/// Register width class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VectorKind {
    /// Scalar loop.
    #[default]
    None,
    /// 128-bit registers.
    Narrow,
    /// 256-bit registers.
    Wide,
}

impl VectorKind {
    /// Register size in bytes, 0 for scalar.
    pub const fn bytes(self) -> usize {
        match self {
            VectorKind::None => 0,
            VectorKind::Narrow => NARROW_BYTES,
            VectorKind::Wide => WIDE_BYTES,
        }
    }
}

/// Width class and lane count chosen for the innermost loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VectorizationDescriptor {
    pub kind: VectorKind,
    /// Elements processed per step; 1 for scalar.
    pub stride: usize,
}

impl VectorizationDescriptor {
    pub const SCALAR: Self = Self {
        kind: VectorKind::None,
        stride: 1,
    };

    #[inline]
    pub fn is_vectorized(&self) -> bool {
        self.kind != VectorKind::None && self.stride > 1
    }
}

impl Default for VectorizationDescriptor {
    fn default() -> Self {
        Self::SCALAR
    }
}

pub const NARROW_BYTES: usize = 16;
pub const WIDE_BYTES: usize = 32;

/// Lanes of `kind` for elements of `element_width` bytes, if at least two fit.
fn lanes(kind: VectorKind, element_width: usize) -> Option<usize> {
    if element_width == 0 {
        return None;
    }
    let n = kind.bytes() / element_width;
    (n >= 2).then_some(n)
}

/// Pick a register width for a trailing axis of `trailing_extent` elements.
///
/// A contracted trailing axis is never vectorized. Otherwise the widest lane
/// count that divides the extent wins.
///
/// # Example
///
/// ```
/// use ndeinsum::vectorize::{advise, VectorKind};
///
/// // f64 with 8 trailing elements: 4 lanes of 256-bit
/// let hint = advise(8, false, 8);
/// assert_eq!(hint.kind, VectorKind::Wide);
/// assert_eq!(hint.stride, 4);
///
/// // contracted trailing axis
/// assert_eq!(advise(8, true, 8).kind, VectorKind::None);
/// ```
pub fn advise(
    trailing_extent: usize,
    trailing_contracted: bool,
    element_width: usize,
) -> VectorizationDescriptor {
    if trailing_contracted {
        return VectorizationDescriptor::SCALAR;
    }
    advise_reduction(trailing_extent, element_width)
}

/// Same rule as [`advise`] without the contracted-axis check.
///
/// Used by full reductions, which have no output axis to keep contiguous.
pub fn advise_reduction(extent: usize, element_width: usize) -> VectorizationDescriptor {
    for kind in [VectorKind::Wide, VectorKind::Narrow] {
        match lanes(kind, element_width) {
            Some(n) if extent % n == 0 => return VectorizationDescriptor { kind, stride: n },
            _ => {}
        }
    }
    VectorizationDescriptor::SCALAR
}
