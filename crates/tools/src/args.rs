//! Argument parsing and schema helpers shared by the planning tools.

use serde_json::Value;
use strata_core::{RegistryError, ToolError};

/// Read `key` from the arguments object as a list of id strings.
pub(crate) fn id_list(arguments: &Value, key: &str) -> Result<Vec<String>, ToolError> {
    let value = arguments
        .get(key)
        .ok_or_else(|| ToolError::InvalidArguments(format!("Missing '{key}' argument")))?;

    let items = value.as_array().ok_or_else(|| {
        ToolError::InvalidArguments(format!("'{key}' must be a list of strings"))
    })?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                ToolError::InvalidArguments(format!("'{key}[{i}]' must be a string, got {item}"))
            })
        })
        .collect()
}

/// Wrap a registry failure so the agent sees the not-found message.
pub(crate) fn execution_failed(tool_name: &str, err: RegistryError) -> ToolError {
    ToolError::ExecutionFailed {
        tool_name: tool_name.to_string(),
        reason: err.to_string(),
    }
}

/// JSON Schema for a single required list-of-ids parameter.
pub(crate) fn id_list_schema(key: &str, description: &str) -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            key: {
                "type": "array",
                "items": { "type": "string" },
                "description": description
            }
        },
        "required": [key]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use strata_core::EntityKind;

    #[test]
    fn reads_string_list_in_order() {
        let ids = id_list(&json!({"stages_id": ["b", "A", "b"]}), "stages_id").unwrap();
        assert_eq!(ids, ["b", "A", "b"]);
    }

    #[test]
    fn empty_list_is_valid() {
        let ids = id_list(&json!({"stages_id": []}), "stages_id").unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn missing_key_rejected() {
        let err = id_list(&json!({}), "stages_id").unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
        assert!(err.to_string().contains("stages_id"));
    }

    #[test]
    fn scalar_rejected() {
        let err = id_list(&json!({"stages_id": "missing_values"}), "stages_id").unwrap_err();
        assert!(err.to_string().contains("must be a list of strings"));
    }

    #[test]
    fn non_string_element_rejected() {
        let err = id_list(&json!({"stages_id": ["a", 7]}), "stages_id").unwrap_err();
        assert!(err.to_string().contains("'stages_id[1]'"));
    }

    #[test]
    fn registry_error_becomes_execution_failure() {
        let err = execution_failed(
            "compose_prompt",
            RegistryError::not_found(EntityKind::Strategy, "MISSING", "orchestrator"),
        );
        match err {
            ToolError::ExecutionFailed { tool_name, reason } => {
                assert_eq!(tool_name, "compose_prompt");
                assert!(reason.contains("MISSING"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn schema_requires_key() {
        let schema = id_list_schema("pipelines_id", "Pipeline ids");
        assert_eq!(schema["required"][0], "pipelines_id");
        assert_eq!(schema["properties"]["pipelines_id"]["type"], "array");
    }
}
