//! Agent-callable tools over the Strata registry.
//!
//! An agent plans a prompt in four calls, each narrowing the previous one:
//!
//! 1. `get_available_pipelines`: every registered pipeline
//! 2. `get_available_stages`: stages of the chosen pipelines
//! 3. `get_available_strategies`: strategies of the chosen stages
//! 4. `compose_prompt`: the final prompt from an ordered strategy list
//!
//! Listing tools append a short block of planning instructions to their
//! summary unless disabled.

mod args;
pub mod pipeline_options;
pub mod prompt_composer;
pub mod stage_options;
pub mod strategy_options;

use std::sync::Arc;

use strata_core::Orchestrator;
use strata_core::tool::ToolRegistry;

pub use pipeline_options::PipelineOptionsTool;
pub use prompt_composer::PromptComposerTool;
pub use stage_options::StageOptionsTool;
pub use strategy_options::StrategyOptionsTool;

/// Create a tool registry with all four planning tools, instructions on.
pub fn default_registry(orchestrator: Arc<Orchestrator>) -> ToolRegistry {
    registry_with(orchestrator, true)
}

/// Create a tool registry, choosing whether listing tools append their
/// planning instructions.
pub fn registry_with(orchestrator: Arc<Orchestrator>, include_instructions: bool) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(PipelineOptionsTool::new(
        orchestrator.clone(),
        include_instructions,
    )));
    registry.register(Box::new(StageOptionsTool::new(
        orchestrator.clone(),
        include_instructions,
    )));
    registry.register(Box::new(StrategyOptionsTool::new(
        orchestrator.clone(),
        include_instructions,
    )));
    registry.register(Box::new(PromptComposerTool::new(orchestrator)));
    registry
}

/// Join a summary and its instruction block the way every listing tool does.
pub(crate) fn with_instructions(summary: String, instructions: &str, include: bool) -> String {
    if include {
        format!("{summary}\n\n{instructions}")
    } else {
        summary
    }
}
