//! Stage listing tool: called once the agent has chosen pipelines.

use std::sync::Arc;

use async_trait::async_trait;
use strata_core::Orchestrator;
use strata_core::error::ToolError;
use strata_core::tool::{Tool, ToolResult};

use crate::args::{execution_failed, id_list, id_list_schema};
use crate::with_instructions;

const INSTRUCTIONS: &str = "These are the stages defined in the selected pipelines.\n\n\
Instructions:\n\
- Carefully review the stages and their descriptions.\n\
- Select only the stages relevant to the current user question.\n\
- Preserve the original stage order as defined in each pipeline.\n\
- If using multiple pipelines, you may combine compatible stages across them.\n\
- This step prepares the reasoning path for selecting appropriate strategies.\n\
- If none of the stages are applicable to the task, respond that the question is outside your scope \
and only supported pipelines and their stages can be handled.";

pub struct StageOptionsTool {
    orchestrator: Arc<Orchestrator>,
    include_instructions: bool,
}

impl StageOptionsTool {
    pub fn new(orchestrator: Arc<Orchestrator>, include_instructions: bool) -> Self {
        Self {
            orchestrator,
            include_instructions,
        }
    }
}

#[async_trait]
impl Tool for StageOptionsTool {
    fn name(&self) -> &str {
        "get_available_stages"
    }

    fn description(&self) -> &str {
        "Use this tool after selecting relevant pipelines. \
         It retrieves all stages within those pipelines and provides structured guidance for choosing the right ones.\n\n\
         - Input: a list of pipeline IDs (in order).\n\
         - Output: summaries of available stages from the selected pipelines.\n\
         - This step is required before selecting strategies, as it defines the intermediate logic blocks needed \
         to construct the final prompt.\n\n\
         **Important:** Only use this tool once pipelines are selected. The output will guide stage selection."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        id_list_schema("pipelines_id", "Pipeline IDs, in order")
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let ids = id_list(&arguments, "pipelines_id")?;
        tracing::debug!(?ids, "Listing stages for agent");

        let summary = self
            .orchestrator
            .pipelines_stages_summary(&ids)
            .map_err(|e| execution_failed(self.name(), e))?;

        Ok(ToolResult::text(with_instructions(
            summary,
            INSTRUCTIONS,
            self.include_instructions,
        )))
    }
}
