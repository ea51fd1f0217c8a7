//! Random operand construction.
//!
//! Used for benchmarks and property tests that need arbitrary operands of a
//! given shape. Seeded variants give reproducible contractions.

use rand::Rng;
use rand::distr::StandardUniform;
use rand_distr::StandardNormal;

use crate::scalar::{Scalar, c32, c64};
use crate::tensor::Tensor;

/// Element types that can be drawn from the uniform distribution on [0, 1).
pub trait RandomUniform: Scalar {
    /// Draw one value. Complex types draw both parts independently.
    fn sample_uniform<R: Rng>(rng: &mut R) -> Self;
}

/// Element types that can be drawn from the standard normal distribution.
pub trait RandomNormal: Scalar {
    fn sample_normal<R: Rng>(rng: &mut R) -> Self;
}

macro_rules! impl_random_real {
    ($($ty:ty),*) => {
        $(
            impl RandomUniform for $ty {
                fn sample_uniform<R: Rng>(rng: &mut R) -> Self {
                    rng.sample(StandardUniform)
                }
            }

            impl RandomNormal for $ty {
                fn sample_normal<R: Rng>(rng: &mut R) -> Self {
                    rng.sample(StandardNormal)
                }
            }
        )*
    };
}

impl_random_real!(f32, f64);

impl RandomUniform for c32 {
    fn sample_uniform<R: Rng>(rng: &mut R) -> Self {
        c32::new(rng.sample(StandardUniform), rng.sample(StandardUniform))
    }
}

impl RandomUniform for c64 {
    fn sample_uniform<R: Rng>(rng: &mut R) -> Self {
        c64::new(rng.sample(StandardUniform), rng.sample(StandardUniform))
    }
}

// Standard complex normal: each part is N(0, 1/2) so that E|z|^2 = 1.
impl RandomNormal for c32 {
    fn sample_normal<R: Rng>(rng: &mut R) -> Self {
        let scale = std::f32::consts::FRAC_1_SQRT_2;
        c32::new(
            rng.sample::<f32, _>(StandardNormal) * scale,
            rng.sample::<f32, _>(StandardNormal) * scale,
        )
    }
}

impl RandomNormal for c64 {
    fn sample_normal<R: Rng>(rng: &mut R) -> Self {
        let scale = std::f64::consts::FRAC_1_SQRT_2;
        c64::new(
            rng.sample::<f64, _>(StandardNormal) * scale,
            rng.sample::<f64, _>(StandardNormal) * scale,
        )
    }
}

impl<T: RandomUniform> Tensor<T> {
    /// Create a tensor with uniform random values in [0, 1).
    ///
    /// ```
    /// use ndeinsum::Tensor;
    ///
    /// let t: Tensor<f64> = Tensor::random(&[2, 3]);
    /// assert_eq!(t.shape(), &[2, 3]);
    /// assert!(t.data().iter().all(|v| (0.0..1.0).contains(v)));
    /// ```
    pub fn random(shape: &[usize]) -> Self {
        Self::random_with_rng(shape, &mut rand::rng())
    }

    /// Create a tensor with uniform random values drawn from `rng`.
    ///
    /// ```
    /// use ndeinsum::Tensor;
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let a: Tensor<f64> = Tensor::random_with_rng(&[2, 3], &mut StdRng::seed_from_u64(42));
    /// let b: Tensor<f64> = Tensor::random_with_rng(&[2, 3], &mut StdRng::seed_from_u64(42));
    /// assert_eq!(a, b);
    /// ```
    pub fn random_with_rng<R: Rng>(shape: &[usize], rng: &mut R) -> Self {
        Self::from_fn(shape, |_| T::sample_uniform(rng))
    }
}

impl<T: RandomNormal> Tensor<T> {
    /// Create a tensor with standard normal random values.
    pub fn randn(shape: &[usize]) -> Self {
        Self::randn_with_rng(shape, &mut rand::rng())
    }

    /// Create a tensor with standard normal random values drawn from `rng`.
    pub fn randn_with_rng<R: Rng>(shape: &[usize], rng: &mut R) -> Self {
        Self::from_fn(shape, |_| T::sample_normal(rng))
    }
}
