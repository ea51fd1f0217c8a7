//! Scalar trait for tensor element types.

use faer_traits::ComplexField;
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul};

pub use faer::{c32, c64};

/// Trait for scalar types supported by ndeinsum.
///
/// This wraps faer's `ComplexField` (needed by the matrix-product kernel)
/// with the arithmetic the contraction loops use directly.
pub trait Scalar:
    ComplexField
    + Copy
    + Debug
    + Default
    + PartialEq
    + Add<Output = Self>
    + Mul<Output = Self>
    + AddAssign
    + Send
    + Sync
    + 'static
{
    /// Width of one element in bytes, used to size vector registers.
    const WIDTH_BYTES: usize = std::mem::size_of::<Self>();

    /// Returns the additive identity (zero).
    fn zero() -> Self {
        Self::default()
    }

    /// Returns the multiplicative identity (one).
    fn one() -> Self;
}

impl Scalar for f32 {
    fn one() -> Self {
        1.0
    }
}

impl Scalar for f64 {
    fn one() -> Self {
        1.0
    }
}

impl Scalar for c32 {
    fn one() -> Self {
        c32::new(1.0, 0.0)
    }
}

impl Scalar for c64 {
    fn one() -> Self {
        c64::new(1.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_widths() {
        assert_eq!(f32::WIDTH_BYTES, 4);
        assert_eq!(f64::WIDTH_BYTES, 8);
        assert_eq!(c32::WIDTH_BYTES, 8);
        assert_eq!(c64::WIDTH_BYTES, 16);
    }

    #[test]
    fn test_zero_one() {
        assert_eq!(<f64 as Scalar>::zero(), 0.0);
        assert_eq!(<f64 as Scalar>::one(), 1.0);
        assert_eq!(<f32 as Scalar>::one(), 1.0);
        assert_eq!(<c64 as Scalar>::zero(), c64::new(0.0, 0.0));
        assert_eq!(<c64 as Scalar>::one(), c64::new(1.0, 0.0));
    }
}
