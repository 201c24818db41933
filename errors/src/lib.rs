//! # SixDegrees Errors
//!
//! Error taxonomy shared by the entity store, the query engine and the
//! dispatcher.
//!
//! Follows Microsoft Pragmatic Rust Guidelines:
//! - Uses `thiserror` for structured error definitions
//! - Named fields on every variant
//! - Stable machine-readable codes via [`GraphError::code`]

use serde::Serialize;
use strum::Display;
use thiserror::Error;

/// Kind of graph element an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Actor,
    Movie,
    Relationship,
    #[strum(serialize = "Path to reference actor")]
    BaconPath,
}

/// Graph errors
///
/// Request-level outcomes are ordinary values of this type. Invariant
/// violations detected at runtime are reported as [`GraphError::Internal`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("{entity} already exists: {id}")]
    Conflict { entity: EntityKind, id: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    #[error("Internal error: {reason}")]
    Internal { reason: String },
}

impl GraphError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn conflict(entity: EntityKind, id: impl Into<String>) -> Self {
        Self::Conflict {
            entity,
            id: id.into(),
        }
    }

    pub fn not_found(entity: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal {
            reason: reason.into(),
        }
    }

    /// Stable code used in transport error bodies and metric labels.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Conflict { .. } => "CONFLICT",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// True for outcomes caused by the request rather than by the store.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Internal { .. })
    }
}

pub type GraphResult<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = GraphError::validation("actorId", "must not be empty");
        assert_eq!(err.to_string(), "Invalid actorId: must not be empty");
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_conflict_display() {
        let err = GraphError::conflict(EntityKind::Actor, "nm0000102");
        assert_eq!(err.to_string(), "Actor already exists: nm0000102");
    }

    #[test]
    fn test_not_found_display() {
        let err = GraphError::not_found(EntityKind::Relationship, "a1->m1");
        assert_eq!(err.to_string(), "Relationship not found: a1->m1");

        let err = GraphError::not_found(EntityKind::BaconPath, "a2");
        assert_eq!(err.to_string(), "Path to reference actor not found: a2");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(GraphError::conflict(EntityKind::Movie, "m1").is_client_error());
        assert!(GraphError::not_found(EntityKind::Actor, "a1").is_client_error());
        assert!(!GraphError::internal("lock poisoned").is_client_error());
    }
}
