//! Plan memoization.
//!
//! Plans depend only on label sets and shapes, so repeated contractions with
//! the same signature can share one [`ContractionPlan`]. The cache never
//! evicts; it is read-mostly and inserts at most once per key.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use ndeinsum::cache::PlanCache;
//!
//! let cache = PlanCache::new();
//! let p1 = cache.get_or_plan(&[&[0, 1], &[1, 2]], &[&[2, 3], &[3, 4]]).unwrap();
//! let p2 = cache.get_or_plan(&[&[0, 1], &[1, 2]], &[&[2, 3], &[3, 4]]).unwrap();
//! assert!(Arc::ptr_eq(&p1, &p2));
//! assert_eq!(cache.stats().hits, 1);
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use crate::error::Result;
use crate::labels::Label;
use crate::plan::ContractionPlan;

/// Contraction signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PlanKey {
    label_sets: Vec<Vec<Label>>,
    shapes: Vec<Vec<usize>>,
}

impl PlanKey {
    fn new(label_sets: &[&[Label]], shapes: &[&[usize]]) -> Self {
        Self {
            label_sets: label_sets.iter().map(|s| s.to_vec()).collect(),
            shapes: shapes.iter().map(|s| s.to_vec()).collect(),
        }
    }
}

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    /// Plans currently stored.
    pub entries: usize,
}

impl CacheStats {
    /// Fraction of lookups served from the cache (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Thread-safe map from contraction signature to plan.
#[derive(Debug, Default)]
pub struct PlanCache {
    plans: RwLock<HashMap<PlanKey, Arc<ContractionPlan>>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl PlanCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache used by [`ContractOptions::use_cache`](crate::options::ContractOptions).
    pub fn global() -> &'static PlanCache {
        static GLOBAL: OnceLock<PlanCache> = OnceLock::new();
        GLOBAL.get_or_init(PlanCache::new)
    }

    /// Return the cached plan for a signature, building it on first use.
    ///
    /// Invalid signatures are never cached; the planning error is returned
    /// on every call.
    pub fn get_or_plan(
        &self,
        label_sets: &[&[Label]],
        shapes: &[&[usize]],
    ) -> Result<Arc<ContractionPlan>> {
        let key = PlanKey::new(label_sets, shapes);

        if let Some(plan) = self.plans.read().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(labels = ?key.label_sets, "plan cache hit");
            return Ok(Arc::clone(plan));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(labels = ?key.label_sets, "plan cache miss");
        let plan = Arc::new(ContractionPlan::new(label_sets, shapes)?);

        // Another thread may have planned the same key meanwhile; keep theirs.
        let mut plans = self.plans.write();
        Ok(Arc::clone(plans.entry(key).or_insert(plan)))
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }

    pub fn hit_rate(&self) -> f64 {
        self.stats().hit_rate()
    }

    pub fn len(&self) -> usize {
        self.plans.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.read().is_empty()
    }

    /// Drop every plan and reset the counters.
    pub fn clear(&self) {
        self.plans.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}
