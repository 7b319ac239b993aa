//!
//! Defines error types for the authorization engine.

use std::fmt;

use uuid::Uuid;

use crate::types::{AuthorizationPolicyType, Privilege};

/// Details attached to a denied privilege check so the caller can log or
/// audit the refusal without re-deriving it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditContext {
    /// Caller supplied description of the attempted operation.
    pub message: String,
    pub policy_id: Uuid,
    pub policy_type: AuthorizationPolicyType,
    /// Identity of the actor, when known.
    pub actor_id: Option<String>,
}

impl fmt::Display for AuditContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (policy {} of type {}",
            self.message, self.policy_id, self.policy_type
        )?;
        if let Some(actor) = &self.actor_id {
            write!(f, ", actor {}", actor)?;
        }
        f.write_str(")")
    }
}

/// Represents errors raised while building, recomputing or evaluating policies.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthorizationError {
    /// A relation required by the engine was not hydrated by the caller.
    #[error("Relationship not found for resource {resource_id}: {message}")]
    RelationshipNotFound { resource_id: String, message: String },
    /// A policy or child collection is missing where one is required.
    #[error("Entity not initialized for resource {resource_id}: {message}")]
    EntityNotInitialized { resource_id: String, message: String },
    /// The actor does not hold the required privilege.
    #[error("Authorization: unable to grant '{privilege}' privilege: {context}")]
    Forbidden {
        privilege: Privilege,
        context: AuditContext,
    },
    /// A rule or enum value was malformed.
    #[error("Invalid authorization rule: {0}")]
    Validation(String),
    /// No persisted policy exists with the given id.
    #[error("Authorization policy not found: {policy_id}")]
    EntityNotFound { policy_id: Uuid },
    /// A persisted record or configuration document could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AuthorizationError {
    pub fn relationship_not_found(
        resource_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        AuthorizationError::RelationshipNotFound {
            resource_id: resource_id.into(),
            message: message.into(),
        }
    }

    pub fn entity_not_initialized(
        resource_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        AuthorizationError::EntityNotInitialized {
            resource_id: resource_id.into(),
            message: message.into(),
        }
    }

    /// True for the caller-bug class of errors that must abort a propagation
    /// pass without retry.
    pub fn is_hydration_failure(&self) -> bool {
        matches!(
            self,
            AuthorizationError::RelationshipNotFound { .. }
                | AuthorizationError::EntityNotInitialized { .. }
        )
    }
}

impl From<serde_json::Error> for AuthorizationError {
    fn from(err: serde_json::Error) -> Self {
        AuthorizationError::Serialization(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AuthorizationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_message_carries_audit_context() {
        let policy_id = Uuid::nil();
        let err = AuthorizationError::Forbidden {
            privilege: Privilege::Update,
            context: AuditContext {
                message: "update tagset".into(),
                policy_id,
                policy_type: AuthorizationPolicyType::Tagset,
                actor_id: Some("user-7".into()),
            },
        };
        let text = err.to_string();
        assert!(
            text.starts_with("Authorization: unable to grant 'UPDATE' privilege: update tagset")
        );
        assert!(text.contains("TAGSET"));
        assert!(text.contains("actor user-7"));
    }

    #[test]
    fn test_hydration_failures() {
        assert!(AuthorizationError::relationship_not_found("r", "children").is_hydration_failure());
        assert!(AuthorizationError::entity_not_initialized("r", "policy").is_hydration_failure());
        assert!(!AuthorizationError::Validation("x".into()).is_hydration_failure());
    }
}
