//! `strata pipelines|stages|strategies|compose`: Registry queries.

use strata_core::Orchestrator;

pub async fn pipelines(orchestrator: &Orchestrator) -> Result<(), Box<dyn std::error::Error>> {
    let summary = orchestrator.pipelines_usage_summary();
    if summary.is_empty() {
        println!("No pipelines registered.");
    } else {
        println!("{summary}");
    }
    Ok(())
}

pub async fn stages(
    orchestrator: &Orchestrator,
    pipeline_ids: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", orchestrator.pipelines_stages_summary(pipeline_ids)?);
    Ok(())
}

pub async fn strategies(
    orchestrator: &Orchestrator,
    stage_ids: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", orchestrator.stages_strategies_summary(stage_ids)?);
    Ok(())
}

pub async fn compose(
    orchestrator: &Orchestrator,
    strategy_ids: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let prompt = orchestrator.compose_prompt(strategy_ids)?;
    println!("{prompt}");
    Ok(())
}
