//! In-memory rule repository.

use std::sync::{Mutex, PoisonError};

use agrihub_app::ports::RuleRepository;
use agrihub_domain::error::AgriHubError;
use agrihub_domain::rule::Rule;

/// Seedable rule storage, enabled-only reads.
#[derive(Debug, Default)]
pub struct InMemoryRuleRepository {
    rules: Mutex<Vec<Rule>>,
}

impl InMemoryRuleRepository {
    #[must_use]
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            rules: Mutex::new(rules),
        }
    }

    /// Append a rule, keeping creation order.
    pub fn insert(&self, rule: Rule) {
        self.rules
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(rule);
    }
}

impl RuleRepository for InMemoryRuleRepository {
    async fn get_enabled(&self) -> Result<Vec<Rule>, AgriHubError> {
        Ok(self
            .rules
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|rule| rule.enabled)
            .cloned()
            .collect())
    }
}
