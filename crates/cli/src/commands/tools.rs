//! `strata tools` / `strata call`: Agent tool inspection and invocation.

use std::sync::Arc;

use strata_core::{Orchestrator, ToolCall};

pub async fn list(
    orchestrator: Arc<Orchestrator>,
    include_instructions: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = strata_tools::registry_with(orchestrator, include_instructions);
    println!("{}", registry.definitions_json()?);
    Ok(())
}

pub async fn call(
    orchestrator: Arc<Orchestrator>,
    include_instructions: bool,
    tool: &str,
    args_json: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let arguments: serde_json::Value = serde_json::from_str(args_json)
        .map_err(|e| format!("Arguments must be valid JSON: {e}"))?;
    if !arguments.is_object() {
        return Err(format!("Arguments must be a JSON object, got: {args_json}").into());
    }

    let registry = strata_tools::registry_with(orchestrator, include_instructions);
    let call = ToolCall {
        id: "cli".into(),
        name: tool.to_string(),
        arguments,
    };

    let result = registry.execute(&call).await?;
    println!("{}", result.output);
    Ok(())
}
