//! ndeinsum - Einstein-summation contraction over dense row-major tensors
//!
//! Operands carry one symbolic [`Label`](labels::Label) per axis. Labels
//! seen once survive into the result, labels seen twice are summed over.
//!
//! # Architecture
//!
//! ```text
//! labels    → classify each label as kept or contracted, bind extents
//! shape     → output labels and extents (first-occurrence order)
//! kernels   → recognize trace / matmul / inner products / Voigt dyadic
//! plan      → fold strides onto the unique labels, iteration domain
//! vectorize → lane width for the innermost loop
//! engine    → generic loop nest over the plan
//! cache     → memoized plans keyed by signature
//! ```
//!
//! # Example
//!
//! ```
//! use ndeinsum::{Tensor, contract, trace};
//!
//! // C[i,k] = A[i,j] * B[j,k], row-major data
//! let a = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
//! let b = Tensor::from_vec(vec![5.0, 6.0, 7.0, 8.0], &[2, 2]).unwrap();
//! let c = contract(&[0, 1], &[1, 2], &a, &b).unwrap();
//! assert_eq!(c.data(), &[19.0, 22.0, 43.0, 50.0]);
//!
//! assert_eq!(trace(&a).unwrap(), 5.0);
//! ```

pub mod cache;
pub mod contract;
pub mod engine;
pub mod error;
pub mod kernels;
pub mod labels;
pub mod options;
pub mod plan;
pub mod random;
pub mod scalar;
pub mod shape;
pub mod simd;
pub mod strides;
pub mod tensor;
pub mod vectorize;

pub use contract::{
    contract, contract_unary, contract_with_options, double_contract, summation, trace,
};
pub use error::{Result, TensorError};
pub use labels::Label;
pub use options::{ContractOptions, Notation};
pub use scalar::{Scalar, c32, c64};
pub use tensor::Tensor;
