//! Rule — condition tree → action, with priority and enabled flag.
//!
//! Rules drive automated actuator/robot control. They are loaded in bulk
//! from the collaborator store, owned by the rule store, and immutable once
//! loaded: operator edits cause a full reload, never in-place mutation.

mod action;
mod condition;

pub use action::Action;
pub use condition::{Comparator, ConditionNode};

use serde::{Deserialize, Serialize};

use crate::error::{AgriHubError, ValidationError};
use crate::id::RuleId;

/// An automation rule.
///
/// `priority` orders evaluation (higher first). Every matching rule fires;
/// priority never grants exclusivity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: RuleId,
    pub name: String,
    pub priority: i32,
    pub enabled: bool,
    pub condition: ConditionNode,
    pub action: Action,
}

impl Rule {
    /// Create a builder for constructing a [`Rule`].
    #[must_use]
    pub fn builder() -> RuleBuilder {
        RuleBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AgriHubError::Validation`] when `name` is empty
    /// ([`ValidationError::EmptyName`]).
    pub fn validate(&self) -> Result<(), AgriHubError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Rule`].
#[derive(Debug, Default)]
pub struct RuleBuilder {
    id: Option<RuleId>,
    name: Option<String>,
    priority: Option<i32>,
    enabled: Option<bool>,
    condition: Option<ConditionNode>,
    action: Option<Action>,
}

impl RuleBuilder {
    #[must_use]
    pub fn id(mut self, id: RuleId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    #[must_use]
    pub fn condition(mut self, condition: ConditionNode) -> Self {
        self.condition = Some(condition);
        self
    }

    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Consume the builder, validate, and return a [`Rule`].
    ///
    /// # Errors
    ///
    /// Returns [`AgriHubError::Validation`] if required fields are missing
    /// or empty.
    pub fn build(self) -> Result<Rule, AgriHubError> {
        let condition = self.condition.ok_or(ValidationError::NoCondition)?;
        let action = self.action.ok_or(ValidationError::NoAction)?;
        let rule = Rule {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            priority: self.priority.unwrap_or(0),
            enabled: self.enabled.unwrap_or(true),
            condition,
            action,
        };
        rule.validate()?;
        Ok(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ActuatorId;

    fn any_condition() -> ConditionNode {
        ConditionNode::Sensor {
            sensor_id: None,
            sensor_type: "temperature".to_string(),
            operator: Comparator::Gt,
            threshold: 30.0,
        }
    }

    fn any_action() -> Action {
        Action::Actuator {
            actuator_id: ActuatorId::new(5),
            status: "on".to_string(),
            value: None,
        }
    }

    #[test]
    fn should_build_valid_rule_when_required_fields_provided() {
        let rule = Rule::builder()
            .name("Ventilate when hot")
            .priority(10)
            .condition(any_condition())
            .action(any_action())
            .build()
            .unwrap();
        assert_eq!(rule.name, "Ventilate when hot");
        assert_eq!(rule.priority, 10);
        assert!(rule.enabled);
    }

    #[test]
    fn should_default_to_enabled_and_zero_priority() {
        let rule = Rule::builder()
            .name("Default flags")
            .condition(any_condition())
            .action(any_action())
            .build()
            .unwrap();
        assert!(rule.enabled);
        assert_eq!(rule.priority, 0);
    }

    #[test]
    fn should_return_validation_error_when_name_is_empty() {
        let result = Rule::builder()
            .condition(any_condition())
            .action(any_action())
            .build();
        assert!(matches!(
            result,
            Err(AgriHubError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_return_validation_error_when_condition_is_missing() {
        let result = Rule::builder().name("No condition").action(any_action()).build();
        assert!(matches!(
            result,
            Err(AgriHubError::Validation(ValidationError::NoCondition))
        ));
    }

    #[test]
    fn should_return_validation_error_when_action_is_missing() {
        let result = Rule::builder()
            .name("No action")
            .condition(any_condition())
            .build();
        assert!(matches!(
            result,
            Err(AgriHubError::Validation(ValidationError::NoAction))
        ));
    }

    #[test]
    fn should_set_custom_id_via_builder() {
        let id = RuleId::new();
        let rule = Rule::builder()
            .id(id)
            .name("Custom id")
            .condition(any_condition())
            .action(any_action())
            .build()
            .unwrap();
        assert_eq!(rule.id, id);
    }

    #[test]
    fn should_roundtrip_rule_through_serde_json() {
        let rule = Rule::builder()
            .name("Roundtrip")
            .priority(3)
            .enabled(false)
            .condition(any_condition())
            .action(any_action())
            .build();
        // A disabled rule still builds; enabled only affects loading.
        let rule = rule.unwrap();
        let json = serde_json::to_string(&rule).unwrap();
        let parsed: Rule = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, rule);
    }
}
