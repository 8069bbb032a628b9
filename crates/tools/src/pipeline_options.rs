//! Pipeline listing tool: the first step of prompt planning.
//!
//! Returns every registered pipeline with its description so the agent can
//! pick the workflows that match the user's question, combine several, or
//! decline when none applies.

use std::sync::Arc;

use async_trait::async_trait;
use strata_core::Orchestrator;
use strata_core::error::ToolError;
use strata_core::tool::{Tool, ToolResult};

use crate::with_instructions;

const INSTRUCTIONS: &str = "Here is the list of all registered pipelines in the Prompt Engine.\n\n\
Instructions:\n\
- Select the pipeline(s) that are most relevant to the user's question.\n\
- If no single pipeline fully matches, consider combining multiple pipelines.\n\
- If none are applicable, respond that the question is outside your scope and only supported pipelines can be handled.";

pub struct PipelineOptionsTool {
    orchestrator: Arc<Orchestrator>,
    include_instructions: bool,
}

impl PipelineOptionsTool {
    pub fn new(orchestrator: Arc<Orchestrator>, include_instructions: bool) -> Self {
        Self {
            orchestrator,
            include_instructions,
        }
    }
}

#[async_trait]
impl Tool for PipelineOptionsTool {
    fn name(&self) -> &str {
        "get_available_pipelines"
    }

    fn description(&self) -> &str {
        "Use this tool to retrieve all available ML pipelines in the Prompt Engine. \
         It helps you understand what pipelines exist so you can select the most appropriate ones \
         based on the user's question. This tool is essential at the beginning of prompt planning."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "question": {
                    "type": "string",
                    "description": "The user's question (informational only)"
                }
            }
        })
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let summary = self.orchestrator.pipelines_usage_summary();
        tracing::debug!(
            pipelines = self.orchestrator.pipeline_count(),
            "Listing pipelines for agent"
        );
        Ok(ToolResult::text(with_instructions(
            summary,
            INSTRUCTIONS,
            self.include_instructions,
        )))
    }
}
