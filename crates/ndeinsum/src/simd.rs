//! Fixed-width lane vectors.
//!
//! `Lanes<T, W>` is a plain `[T; W]` with elementwise arithmetic. Loops
//! written over it are laid out so the compiler can map them onto 128-bit
//! or 256-bit registers; correctness never depends on that happening.

use std::ops::{Add, AddAssign, Mul};

use crate::scalar::Scalar;

/// `W` elements of `T` processed together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lanes<T: Scalar, const W: usize>([T; W]);

impl<T: Scalar, const W: usize> Lanes<T, W> {
    pub const WIDTH: usize = W;

    /// Every lane set to `value`.
    #[inline]
    pub fn splat(value: T) -> Self {
        Self([value; W])
    }

    #[inline]
    pub fn zero() -> Self {
        Self::splat(T::zero())
    }

    /// Load `W` contiguous elements starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `W` elements remain after `offset`.
    #[inline]
    pub fn load(src: &[T], offset: usize) -> Self {
        let mut lanes = [T::zero(); W];
        lanes.copy_from_slice(&src[offset..offset + W]);
        Self(lanes)
    }

    /// Load `W` elements `stride` apart, starting at `base`.
    ///
    /// A stride of 0 broadcasts `src[base]`.
    #[inline]
    pub fn gather(src: &[T], base: usize, stride: usize) -> Self {
        if stride == 1 {
            return Self::load(src, base);
        }
        let mut lanes = [T::zero(); W];
        for (k, lane) in lanes.iter_mut().enumerate() {
            *lane = src[base + k * stride];
        }
        Self(lanes)
    }

    /// Write all lanes to `dst[offset..offset + W]`.
    #[inline]
    pub fn store(self, dst: &mut [T], offset: usize) {
        dst[offset..offset + W].copy_from_slice(&self.0);
    }

    /// Lane `i`.
    ///
    /// # Panics
    ///
    /// Panics on an out-of-range lane.
    #[inline]
    pub fn get(&self, i: usize) -> T {
        assert!(i < W, "invalid axis request: lane {} of {}", i, W);
        self.0[i]
    }

    /// Horizontal sum of all lanes.
    #[inline]
    pub fn sum(self) -> T {
        self.0.into_iter().fold(T::zero(), |acc, x| acc + x)
    }

    /// Horizontal product of all lanes.
    #[inline]
    pub fn product(self) -> T {
        self.0.into_iter().fold(T::one(), |acc, x| acc * x)
    }

    /// Sum of the lane-wise product.
    #[inline]
    pub fn dot(self, other: Self) -> T {
        (self * other).sum()
    }

    /// Lanes in reverse order.
    #[inline]
    pub fn reverse(mut self) -> Self {
        self.0.reverse();
        self
    }

    #[inline]
    pub fn as_array(&self) -> &[T; W] {
        &self.0
    }
}

impl<T: Scalar, const W: usize> Add for Lanes<T, W> {
    type Output = Self;

    #[inline]
    fn add(mut self, rhs: Self) -> Self {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a += b;
        }
        self
    }
}

impl<T: Scalar, const W: usize> AddAssign for Lanes<T, W> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Scalar, const W: usize> Mul for Lanes<T, W> {
    type Output = Self;

    #[inline]
    fn mul(mut self, rhs: Self) -> Self {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a = *a * b;
        }
        self
    }
}

/// Dot product of two equal-length slices, accumulated `W` lanes at a time.
pub fn dot<T: Scalar, const W: usize>(a: &[T], b: &[T]) -> T {
    debug_assert_eq!(a.len(), b.len());
    let n = a.len();
    let blocks = n / W;

    let mut acc = Lanes::<T, W>::zero();
    for i in 0..blocks {
        let off = i * W;
        acc += Lanes::load(a, off) * Lanes::load(b, off);
    }
    let mut sum = acc.sum();
    for i in blocks * W..n {
        sum += a[i] * b[i];
    }
    sum
}

/// Sum of a slice, accumulated `W` lanes at a time.
pub fn sum<T: Scalar, const W: usize>(a: &[T]) -> T {
    let blocks = a.len() / W;
    let mut acc = Lanes::<T, W>::zero();
    for i in 0..blocks {
        acc += Lanes::load(a, i * W);
    }
    let mut total = acc.sum();
    for &x in &a[blocks * W..] {
        total += x;
    }
    total
}
