pub mod catalog;
pub mod config_cmd;
pub mod registry;
pub mod status;
pub mod tools;

use std::path::PathBuf;
use std::sync::Arc;

use strata_config::AppConfig;
use strata_core::Orchestrator;

/// Build the orchestrator and register the configured catalogs: the
/// built-in one first, then config paths, then `--catalog` files.
pub fn bootstrap(
    config: &AppConfig,
    extra_catalogs: &[PathBuf],
) -> Result<Arc<Orchestrator>, Box<dyn std::error::Error>> {
    let orchestrator = Orchestrator::with_removal(config.registry.cascade_removal);

    if config.catalog.builtin {
        strata_catalog::builtin()?.register(&orchestrator);
    }

    for path in config.catalog.paths.iter().chain(extra_catalogs) {
        strata_catalog::load_file(path)
            .map_err(|e| format!("Failed to load catalog: {e}"))?
            .register(&orchestrator);
    }

    tracing::debug!(
        pipelines = orchestrator.pipeline_count(),
        stages = orchestrator.stage_count(),
        strategies = orchestrator.strategy_count(),
        "Registry ready"
    );

    Ok(Arc::new(orchestrator))
}
