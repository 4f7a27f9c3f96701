//! Rule engine — evaluates every reading against the loaded rule set.

use std::sync::Arc;

use agrihub_domain::reading::SensorReading;
use agrihub_domain::rule::Action;

use crate::ports::RuleRepository;
use crate::rule_store::RuleStore;

/// Evaluates readings against the rule snapshot and emits actions.
///
/// Rules are visited in priority order and **all** matching rules fire;
/// priority orders evaluation, it never grants exclusivity. Evaluation is
/// pure: side effects are restricted to the returned action list.
pub struct RuleEngine<R> {
    store: Arc<RuleStore<R>>,
}

impl<R: RuleRepository> RuleEngine<R> {
    /// Create an engine over a shared rule snapshot.
    pub fn new(store: Arc<RuleStore<R>>) -> Self {
        Self { store }
    }

    /// Evaluate one reading, returning the actions of all matching rules in
    /// priority order.
    ///
    /// The snapshot is taken once per call, so a concurrent reload can
    /// never make a single evaluation see a mix of old and new rules.
    #[must_use]
    pub fn evaluate(&self, reading: &SensorReading) -> Vec<Action> {
        let rules = self.store.rules();
        let mut actions = Vec::new();
        for rule in rules.iter() {
            if rule.condition.matches(reading) {
                tracing::debug!(
                    rule = %rule.name,
                    sensor_id = %reading.sensor_id,
                    "rule matched"
                );
                actions.push(rule.action.clone());
            }
        }
        actions
    }
}
