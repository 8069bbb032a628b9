//! Strategy listing tool: called once the agent has chosen stages.

use std::sync::Arc;

use async_trait::async_trait;
use strata_core::Orchestrator;
use strata_core::error::ToolError;
use strata_core::tool::{Tool, ToolResult};

use crate::args::{execution_failed, id_list, id_list_schema};
use crate::with_instructions;

const INSTRUCTIONS: &str = "These are the strategies defined within the selected stages.\n\n\
Instructions:\n\
- Review each strategy and its description carefully.\n\
- Select only the strategies directly relevant to solving the user's question.\n\
- Follow the original stage order when arranging selected strategies.\n\
- If a stage contains multiple strategies, combine only those strictly necessary.\n\
- The selected strategies will later be passed to the prompt composer in exact sequence.\n\
- If none of the strategies are applicable, respond that the question is outside your scope \
and only supported pipelines, stages, and strategies can be handled.";

pub struct StrategyOptionsTool {
    orchestrator: Arc<Orchestrator>,
    include_instructions: bool,
}

impl StrategyOptionsTool {
    pub fn new(orchestrator: Arc<Orchestrator>, include_instructions: bool) -> Self {
        Self {
            orchestrator,
            include_instructions,
        }
    }
}

#[async_trait]
impl Tool for StrategyOptionsTool {
    fn name(&self) -> &str {
        "get_available_strategies"
    }

    fn description(&self) -> &str {
        "Use this tool after selecting the stages for the current task. \
         It retrieves all strategy components defined within those stages.\n\n\
         - Input: a list of stage IDs (in logical order).\n\
         - Output: summaries of available strategies tied to those stages.\n\
         - This step is required before using the prompt composer tool, as strategies define \
         the concrete logic units used to dynamically answer the user's question.\n\n\
         **Important:** Only call this tool *after* selecting the most relevant stages for the task."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        id_list_schema("stages_id", "Stage IDs, in logical order")
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let ids = id_list(&arguments, "stages_id")?;
        tracing::debug!(?ids, "Listing strategies for agent");

        let summary = self
            .orchestrator
            .stages_strategies_summary(&ids)
            .map_err(|e| execution_failed(self.name(), e))?;

        Ok(ToolResult::text(with_instructions(
            summary,
            INSTRUCTIONS,
            self.include_instructions,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::eda_orchestrator;

    #[tokio::test]
    async fn lists_strategies_in_stage_order() {
        let tool = StrategyOptionsTool::new(eda_orchestrator(), false);
        let result = tool
            .execute(serde_json::json!({"stages_id": ["missing_values"]}))
            .await
            .unwrap();
        let mean = result.output.find("IMPUTE_MEAN").unwrap();
        let median = result.output.find("IMPUTE_MEDIAN").unwrap();
        assert!(mean < median);
        assert!(!result.output.contains("Instructions:"));
    }

    #[tokio::test]
    async fn unknown_stage_fails() {
        let tool = StrategyOptionsTool::new(eda_orchestrator(), true);
        let err = tool
            .execute(serde_json::json!({"stages_id": ["outliers_detection"]}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("OUTLIERS_DETECTION"));
    }
}
