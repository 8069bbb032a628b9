//! Declarative catalogs of pipelines, stages, and strategies.
//!
//! A catalog is a TOML document listing strategies, the stages that group
//! them, and the pipelines that group stages. References are by id and are
//! case-insensitive. Listing order inside a stage or pipeline is the order
//! an agent will see.
//!
//! # Example Catalog
//!
//! ```toml
//! [[strategies]]
//! id = "impute_mean"
//! description = "Use when missing values are numeric and roughly normal."
//! prompt = "Replace missing values with the column mean."
//!
//! [[stages]]
//! id = "missing_values"
//! description = "Use to identify and impute missing values."
//! strategies = ["impute_mean"]
//!
//! [[pipelines]]
//! id = "eda"
//! description = "Use for structured exploratory data analysis."
//! stages = ["missing_values"]
//! ```
//!
//! The crate ships one catalog, the EDA pipeline, available through
//! [`builtin`].

mod document;

use std::path::{Path, PathBuf};

pub use document::{Catalog, CatalogDocument, PipelineDef, StageDef, StrategyDef};

/// Source of the embedded exploratory-data-analysis catalog.
pub const BUILTIN_EDA: &str = include_str!("../catalogs/eda.toml");

/// Re-export for convenience.
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Errors from the catalog subsystem.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid catalog entry: {0}")]
    Invalid(String),

    #[error("{owner_kind} '{owner}' references unknown {kind} '{id}'")]
    UnknownReference {
        owner_kind: &'static str,
        owner: String,
        kind: &'static str,
        id: String,
    },

    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Parse and assemble the embedded EDA catalog.
pub fn builtin() -> CatalogResult<Catalog> {
    CatalogDocument::from_toml(BUILTIN_EDA)?.build()
}

/// Parse and assemble a catalog file.
pub fn load_file(path: &Path) -> CatalogResult<Catalog> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = CatalogDocument::from_toml(&content)?.build()?;
    tracing::info!(
        path = %path.display(),
        pipelines = catalog.pipelines.len(),
        strategies = catalog.strategies.len(),
        "Loaded catalog"
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::Orchestrator;

    const EDA_STAGES: [&str; 6] = [
        "CARDINALITY_ANALYSIS",
        "MISSING_VALUES",
        "OUTLIERS_DETECTION",
        "TARGET_ANALYSIS",
        "TYPE_HANDLING",
        "DATA_INGESTION",
    ];

    #[test]
    fn builtin_catalog_parses() {
        let catalog = builtin().unwrap();
        assert_eq!(catalog.pipelines.len(), 1);
        assert_eq!(catalog.stages.len(), 6);
        assert_eq!(catalog.strategies.len(), 14);
    }

    #[test]
    fn builtin_stage_order_matches_definition() {
        let catalog = builtin().unwrap();
        let eda = &catalog.pipelines[0];
        assert_eq!(eda.id(), "EDA");
        let ids: Vec<&str> = eda.iter().map(|s| s.id().as_str()).collect();
        assert_eq!(ids, EDA_STAGES);
    }

    #[test]
    fn builtin_prompts_are_not_placeholders() {
        let catalog = builtin().unwrap();
        for strategy in &catalog.strategies {
            assert!(
                strategy.prompt().len() > 100,
                "{} has a placeholder prompt",
                strategy.id()
            );
        }
    }

    #[test]
    fn builtin_registers_everything() {
        let orch = Orchestrator::new();
        builtin().unwrap().register(&orch);
        assert_eq!(orch.pipeline_count(), 1);
        assert_eq!(orch.stage_count(), 6);
        assert_eq!(orch.strategy_count(), 14);

        let strategies = orch.stages_strategies_summary(["missing_values"]).unwrap();
        for id in ["IMPUTE_MEAN", "IMPUTE_MEDIAN", "IMPUTE_MODE", "FILL_CONSTANT"] {
            assert!(strategies.contains(id));
        }
    }

    #[test]
    fn load_file_reads_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nlp.toml");
        std::fs::write(
            &path,
            r#"
[[strategies]]
id = "tokenize"
description = "Split text into tokens."
prompt = "Tokenize the text."

[[stages]]
id = "preprocessing"
description = "Clean text."
strategies = ["tokenize"]

[[pipelines]]
id = "nlp"
description = "Text analysis."
stages = ["preprocessing"]
"#,
        )
        .unwrap();

        let catalog = load_file(&path).unwrap();
        assert_eq!(catalog.pipelines[0].id(), "NLP");
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let err = load_file(Path::new("/nonexistent/catalog.toml")).unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/catalog.toml"));
    }
}
