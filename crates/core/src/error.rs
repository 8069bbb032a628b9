//! Error types for the Strata domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use std::fmt;

use thiserror::Error;

/// The top-level error type for all Strata operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Registry errors ---
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Which level of the hierarchy an identifier belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Pipeline,
    Stage,
    Strategy,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pipeline => f.write_str("Pipeline"),
            Self::Stage => f.write_str("Stage"),
            Self::Strategy => f.write_str("Strategy"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A lookup by id missed. `scope` names the container that was searched,
    /// e.g. `orchestrator` or `stage 'MISSING_VALUES'`.
    #[error("{kind} '{id}' not found in {scope}")]
    NotFound {
        kind: EntityKind,
        id: String,
        scope: String,
    },

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl RegistryError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>, scope: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
            scope: scope.into(),
        }
    }

    /// The offending identifier, if this is a not-found error.
    pub fn missing_id(&self) -> Option<&str> {
        match self {
            Self::NotFound { id, .. } => Some(id),
            Self::Validation(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Tool execution failed: {tool_name}: {reason}")]
    ExecutionFailed { tool_name: String, reason: String },

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_displays_kind_id_and_scope() {
        let err = RegistryError::not_found(EntityKind::Strategy, "MISSING", "stage 'MISSING_VALUES'");
        let msg = err.to_string();
        assert!(msg.contains("Strategy"));
        assert!(msg.contains("'MISSING'"));
        assert!(msg.contains("stage 'MISSING_VALUES'"));
        assert_eq!(err.missing_id(), Some("MISSING"));
        assert!(err.is_not_found());
    }

    #[test]
    fn registry_error_converts_into_top_level() {
        let err: Error = RegistryError::Validation("empty id".into()).into();
        assert!(err.to_string().contains("Registry error"));
        assert!(err.to_string().contains("empty id"));
    }

    #[test]
    fn json_error_converts_into_top_level() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Serialization(_)));
        assert!(err.to_string().starts_with("Serialization error"));
    }

    #[test]
    fn tool_error_displays_correctly() {
        let err = Error::Tool(ToolError::ExecutionFailed {
            tool_name: "compose_prompt".into(),
            reason: "Strategy 'X' not found in orchestrator".into(),
        });
        assert!(err.to_string().contains("compose_prompt"));
        assert!(err.to_string().contains("'X'"));
    }
}
