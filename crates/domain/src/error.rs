//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`AgriHubError`]
//! via `#[from]` or an explicit bridge (see the adapter crates).

use std::error::Error;

/// Top-level error type crossing port boundaries.
#[derive(Debug, thiserror::Error)]
pub enum AgriHubError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A referenced object does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The collaborator store failed (load or persist).
    #[error("store error")]
    Store(#[source] Box<dyn Error + Send + Sync>),

    /// An outbound or inbound transport failed (broker, socket).
    #[error("transport error")]
    Transport(#[source] Box<dyn Error + Send + Sync>),
}

impl AgriHubError {
    /// Wrap an arbitrary error as a store failure.
    pub fn store(err: impl Error + Send + Sync + 'static) -> Self {
        Self::Store(Box::new(err))
    }

    /// Wrap an arbitrary error as a transport failure.
    pub fn transport(err: impl Error + Send + Sync + 'static) -> Self {
        Self::Transport(Box::new(err))
    }
}

/// Violations of domain invariants.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A rule name must not be empty.
    #[error("name must not be empty")]
    EmptyName,

    /// A rule must have a condition tree.
    #[error("rule has no condition")]
    NoCondition,

    /// A rule must have an action.
    #[error("rule has no action")]
    NoAction,

    /// A threshold must carry at least one bound.
    #[error("threshold has neither min nor max")]
    EmptyThreshold,
}

/// A lookup by identifier found nothing.
#[derive(Debug, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    /// Kind of object that was looked up (e.g. `"Actuator"`).
    pub entity: &'static str,
    /// The identifier that failed to resolve, as text.
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_validation_error() {
        let err = ValidationError::EmptyName;
        assert_eq!(err.to_string(), "name must not be empty");
    }

    #[test]
    fn should_convert_validation_error_into_agrihub_error() {
        let err: AgriHubError = ValidationError::NoAction.into();
        assert!(matches!(err, AgriHubError::Validation(_)));
    }

    #[test]
    fn should_display_not_found_with_entity_and_id() {
        let err = NotFoundError {
            entity: "Actuator",
            id: "5".to_string(),
        };
        assert_eq!(err.to_string(), "Actuator not found: 5");
    }

    #[test]
    fn should_wrap_arbitrary_error_as_store_error() {
        let inner = std::io::Error::other("disk on fire");
        let err = AgriHubError::store(inner);
        assert!(matches!(err, AgriHubError::Store(_)));
    }

    #[test]
    fn should_wrap_arbitrary_error_as_transport_error() {
        let inner = std::io::Error::other("broker gone");
        let err = AgriHubError::transport(inner);
        assert!(matches!(err, AgriHubError::Transport(_)));
    }
}
