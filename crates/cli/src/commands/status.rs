//! `strata status`: Show configuration and registry counts.

use strata_config::AppConfig;
use strata_core::{CascadeRemoval, Orchestrator};

pub async fn run(
    config: &AppConfig,
    orchestrator: &Orchestrator,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Strata Status");
    println!("=============");
    println!("  Config dir:     {}", AppConfig::config_dir().display());
    println!("  Log level:      {}", config.log_level);
    println!("  Cascade:        {}", policy_label(orchestrator.removal_policy()));
    println!(
        "  Built-in:       {}",
        if config.catalog.builtin { "enabled" } else { "disabled" }
    );
    println!("  Catalog files:  {}", config.catalog.paths.len());
    for path in &config.catalog.paths {
        println!("    - {}", path.display());
    }
    println!(
        "  Instructions:   {}",
        if config.tools.include_instructions { "included" } else { "omitted" }
    );
    println!();
    println!("  Pipelines:      {}", orchestrator.pipeline_count());
    println!("  Stages:         {}", orchestrator.stage_count());
    println!("  Strategies:     {}", orchestrator.strategy_count());

    if AppConfig::config_path().exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file, run `strata config init` to create one");
    }

    Ok(())
}

fn policy_label(policy: CascadeRemoval) -> &'static str {
    match policy {
        CascadeRemoval::RetainShared => "retain_shared",
        CascadeRemoval::Unconditional => "unconditional",
    }
}
