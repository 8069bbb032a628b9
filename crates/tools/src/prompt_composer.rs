//! Prompt composer tool: the last planning step.
//!
//! Takes a strictly ordered list of strategy ids and returns their prompts
//! joined in that order. Nothing is reordered or deduplicated.

use std::sync::Arc;

use async_trait::async_trait;
use strata_core::Orchestrator;
use strata_core::error::ToolError;
use strata_core::tool::{Tool, ToolResult};

use crate::args::{execution_failed, id_list, id_list_schema};

pub struct PromptComposerTool {
    orchestrator: Arc<Orchestrator>,
}

impl PromptComposerTool {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self { orchestrator }
    }
}

#[async_trait]
impl Tool for PromptComposerTool {
    fn name(&self) -> &str {
        "compose_prompt"
    }

    fn description(&self) -> &str {
        "Use this tool to compose the final dynamic prompt after selecting all relevant strategies.\n\n\
         - Input: a list of strategy IDs, in the **exact logical order** required.\n\
         - This tool must be called only **after all planning and strategy selection is complete**.\n\
         - The **order of strategies is critical**. Any misordering will result in a broken or invalid prompt.\n\n\
         The composed prompt is the final output of the planning process and will be used to answer the user's question. \
         It integrates all selected components and determines the behavior of the resulting prompt."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        id_list_schema("strategies_id", "Strategy IDs, in the exact order to compose")
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let ids = id_list(&arguments, "strategies_id")?;

        let prompt = self
            .orchestrator
            .compose_prompt(&ids)
            .map_err(|e| execution_failed(self.name(), e))?;

        tracing::debug!(strategies = ids.len(), chars = prompt.len(), "Composed prompt");
        Ok(ToolResult {
            call_id: String::new(),
            success: true,
            output: prompt,
            data: Some(serde_json::json!({ "strategies_id": ids })),
        })
    }
}
