//! Property-based tests for contraction invariants.

use std::sync::Arc;

use ndeinsum::cache::PlanCache;
use ndeinsum::engine::execute;
use ndeinsum::plan::ContractionPlan;
use ndeinsum::vectorize::VectorizationDescriptor;
use ndeinsum::{ContractOptions, Tensor, contract, contract_with_options, trace};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
}

proptest! {
    /// The matrix-product kernel agrees with the generic loop nest.
    #[test]
    fn prop_matmul_fast_path_matches_generic(
        m in 1usize..6,
        k in 1usize..6,
        n in 1usize..6,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let a = Tensor::<f64>::randn_with_rng(&[m, k], &mut rng);
        let b = Tensor::<f64>::randn_with_rng(&[k, n], &mut rng);

        let fast = contract(&[0, 1], &[1, 2], &a, &b).unwrap();
        let slow = contract_with_options(
            &[&[0, 1], &[1, 2]],
            &[&a, &b],
            &ContractOptions::reference(),
        ).unwrap();

        prop_assert_eq!(fast.shape(), &[m, n]);
        for (f, s) in fast.data().iter().zip(slow.data()) {
            prop_assert!(close(*f, *s), "fast {} vs generic {}", f, s);
        }
    }

    /// Trace equals the sum of the diagonal.
    #[test]
    fn prop_trace_is_diagonal_sum(n in 1usize..8, seed in any::<u64>()) {
        let t = Tensor::<f64>::randn_with_rng(&[n, n], &mut StdRng::seed_from_u64(seed));
        let diag: f64 = (0..n).map(|i| *t.get(&[i, i]).unwrap()).sum();
        prop_assert!(close(trace(&t).unwrap(), diag));
    }

    /// Vectorized and scalar execution of the same plan are identical.
    #[test]
    fn prop_vectorized_matches_scalar(
        i in 1usize..5,
        j in 1usize..5,
        lanes in prop::sample::select(vec![1usize, 2, 4, 8]),
        seed in any::<u64>(),
    ) {
        // out[i,k] = A[i,j] * B[j,k] with the trailing extent a multiple of `lanes`
        let k = lanes * 2;
        let mut rng = StdRng::seed_from_u64(seed);
        let a = Tensor::<f64>::randn_with_rng(&[i, j], &mut rng);
        let b = Tensor::<f64>::randn_with_rng(&[j, k], &mut rng);
        let plan = ContractionPlan::new(&[&[0, 1], &[1, 2]], &[&[i, j], &[j, k]]).unwrap();

        let mut scalar = vec![0.0; plan.output().len()];
        execute(&plan, &[a.data(), b.data()], &mut scalar, VectorizationDescriptor::SCALAR);

        let mut vector = vec![0.0; plan.output().len()];
        execute(&plan, &[a.data(), b.data()], &mut vector, plan.vectorization::<f64>());

        prop_assert_eq!(scalar, vector);
    }

    /// Plans are pure functions of the signature, and the cache hands back one plan.
    #[test]
    fn prop_plan_idempotent(a in 1usize..5, b in 1usize..5, c in 1usize..5) {
        let sets: &[&[u32]] = &[&[0, 1], &[1, 2]];
        let shape_a = [a, b];
        let shape_b = [b, c];
        let shapes: &[&[usize]] = &[&shape_a, &shape_b];

        let p1 = ContractionPlan::new(sets, shapes).unwrap();
        let p2 = ContractionPlan::new(sets, shapes).unwrap();
        prop_assert_eq!(&p1, &p2);

        let cache = PlanCache::new();
        let c1 = cache.get_or_plan(sets, shapes).unwrap();
        let c2 = cache.get_or_plan(sets, shapes).unwrap();
        prop_assert!(Arc::ptr_eq(&c1, &c2));
        prop_assert_eq!(&*c1, &p1);
    }

    /// Mismatched extents on a shared label always fail before any output exists.
    #[test]
    fn prop_mismatch_rejected(x in 1usize..6, y in 1usize..6) {
        prop_assume!(x != y);
        let a = Tensor::<f64>::ones(&[2, x]);
        let b = Tensor::<f64>::ones(&[y, 2]);
        let is_mismatch = matches!(
            contract(&[0, 1], &[1, 2], &a, &b),
            Err(ndeinsum::TensorError::DimensionMismatch { label: 1, .. })
        );
        prop_assert!(is_mismatch);
    }
}
