//! Atomically swapped rule and threshold snapshots.
//!
//! Both stores follow the same shape: `load()` fetches from the
//! collaborator store and replaces the in-memory snapshot in one swap, so
//! readers never observe a partially-updated set; `rules()` /
//! [`ThresholdStore::for_type`] read the current snapshot without blocking
//! on IO. A failed load keeps the last-known-good snapshot — the caller
//! logs and retries on the next reload tick.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use agrihub_domain::alarm::AlarmThreshold;
use agrihub_domain::error::AgriHubError;
use agrihub_domain::rule::Rule;

use crate::ports::{RuleRepository, ThresholdRepository};

/// Holds the current enabled rule set, priority-ordered.
pub struct RuleStore<R> {
    repo: R,
    snapshot: RwLock<Arc<[Rule]>>,
}

impl<R: RuleRepository> RuleStore<R> {
    /// Create a store with an empty snapshot; call [`load`](Self::load) to
    /// populate it.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            snapshot: RwLock::new(Arc::from(Vec::new())),
        }
    }

    /// Fetch all enabled rules and atomically replace the snapshot.
    ///
    /// Rules are ordered by priority descending; the stable sort keeps the
    /// repository's creation order as the tiebreaker. Returns the number of
    /// loaded rules.
    ///
    /// # Errors
    ///
    /// Returns a store error from the repository; the previous snapshot is
    /// kept untouched in that case.
    pub async fn load(&self) -> Result<usize, AgriHubError> {
        let mut rules = self.repo.get_enabled().await?;
        rules.sort_by(|a, b| b.priority.cmp(&a.priority));
        let count = rules.len();
        *self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::from(rules);
        Ok(count)
    }

    /// Current snapshot, without blocking on IO.
    ///
    /// The returned `Arc` stays consistent for the caller even if a reload
    /// swaps the snapshot mid-evaluation.
    #[must_use]
    pub fn rules(&self) -> Arc<[Rule]> {
        Arc::clone(
            &self
                .snapshot
                .read()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }
}

/// Holds the current alarm thresholds, indexed by sensor type.
pub struct ThresholdStore<T> {
    repo: T,
    snapshot: RwLock<Arc<HashMap<String, Vec<AlarmThreshold>>>>,
}

impl<T: ThresholdRepository> ThresholdStore<T> {
    /// Create a store with an empty snapshot.
    pub fn new(repo: T) -> Self {
        Self {
            repo,
            snapshot: RwLock::new(Arc::new(HashMap::new())),
        }
    }

    /// Fetch all thresholds and atomically replace the by-type index.
    ///
    /// # Errors
    ///
    /// Returns a store error from the repository; the previous snapshot is
    /// kept untouched in that case.
    pub async fn load(&self) -> Result<usize, AgriHubError> {
        let thresholds = self.repo.get_all().await?;
        let count = thresholds.len();
        let mut index: HashMap<String, Vec<AlarmThreshold>> = HashMap::new();
        for threshold in thresholds {
            index
                .entry(threshold.sensor_type.clone())
                .or_default()
                .push(threshold);
        }
        *self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(index);
        Ok(count)
    }

    /// All thresholds configured for `sensor_type`; empty when none.
    #[must_use]
    pub fn for_type(&self, sensor_type: &str) -> Vec<AlarmThreshold> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(sensor_type)
            .cloned()
            .unwrap_or_default()
    }
}
