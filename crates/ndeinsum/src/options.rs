//! Contraction options.

/// How a dyadic product of 3x3 operands is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Notation {
    /// Plain einsum output.
    #[default]
    Standard,
    /// Pack `(i,j) x (k,l)` on 3x3 operands into a 6x6 Voigt matrix.
    Voigt,
}

/// Knobs for [`contract_with_options`](crate::contract_with_options).
///
/// None of the execution switches change results: disabling kernels,
/// vectorization or caching only changes how the same values are computed.
///
/// # Example
///
/// ```
/// use ndeinsum::options::{ContractOptions, Notation};
///
/// let opts = ContractOptions::default().with_vectorize(false).with_cache(true);
/// assert_eq!(opts.notation, Notation::Standard);
/// assert!(opts.specialized_kernels);
/// assert!(!opts.vectorize);
/// assert!(opts.use_cache);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractOptions {
    pub notation: Notation,
    /// Dispatch recognized patterns to closed-form kernels.
    pub specialized_kernels: bool,
    /// Honor the vectorization hint in the generic loop.
    pub vectorize: bool,
    /// Reuse plans from the process-wide cache.
    pub use_cache: bool,
}

impl Default for ContractOptions {
    fn default() -> Self {
        Self {
            notation: Notation::Standard,
            specialized_kernels: true,
            vectorize: true,
            use_cache: false,
        }
    }
}

impl ContractOptions {
    pub fn with_notation(mut self, notation: Notation) -> Self {
        self.notation = notation;
        self
    }

    pub fn with_specialized_kernels(mut self, enabled: bool) -> Self {
        self.specialized_kernels = enabled;
        self
    }

    pub fn with_vectorize(mut self, enabled: bool) -> Self {
        self.vectorize = enabled;
        self
    }

    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.use_cache = enabled;
        self
    }

    /// Everything off: generic scalar loop with a fresh plan.
    pub fn reference() -> Self {
        Self {
            notation: Notation::Standard,
            specialized_kernels: false,
            vectorize: false,
            use_cache: false,
        }
    }
}
