//! Catalog document model and assembly into shared registry values.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strata_core::{Identifier, Orchestrator, Pipeline, Stage, Strategy};

use crate::{CatalogError, CatalogResult};

/// A catalog as written in TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub strategies: Vec<StrategyDef>,

    #[serde(default)]
    pub stages: Vec<StageDef>,

    #[serde(default)]
    pub pipelines: Vec<PipelineDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyDef {
    pub id: Identifier,

    /// When an agent should pick this strategy.
    #[serde(default)]
    pub description: String,

    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageDef {
    pub id: Identifier,

    #[serde(default)]
    pub description: String,

    /// Strategy ids, in listing order.
    #[serde(default)]
    pub strategies: Vec<Identifier>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineDef {
    pub id: Identifier,

    #[serde(default)]
    pub description: String,

    /// Stage ids, in listing order.
    #[serde(default)]
    pub stages: Vec<Identifier>,
}

/// An assembled catalog: shared values ready for registration.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub pipelines: Vec<Arc<Pipeline>>,
    pub stages: Vec<Arc<Stage>>,
    pub strategies: Vec<Arc<Strategy>>,
}

impl Catalog {
    /// Register every pipeline (and, by cascade, its stages and strategies).
    pub fn register(&self, orchestrator: &Orchestrator) {
        orchestrator.add_pipelines(self.pipelines.iter().cloned());
    }
}

impl CatalogDocument {
    /// Parse and validate a TOML catalog.
    pub fn from_toml(toml_str: &str) -> CatalogResult<Self> {
        let document: CatalogDocument = toml::from_str(toml_str)?;
        document.validate()?;
        Ok(document)
    }

    /// Check ids are present and unique per level, and every reference
    /// resolves within this document.
    pub fn validate(&self) -> CatalogResult<()> {
        check_ids("strategy", self.strategies.iter().map(|s| &s.id))?;
        check_ids("stage", self.stages.iter().map(|s| &s.id))?;
        check_ids("pipeline", self.pipelines.iter().map(|p| &p.id))?;

        let strategy_ids: HashSet<&Identifier> = self.strategies.iter().map(|s| &s.id).collect();
        for stage in &self.stages {
            check_refs("stage", &stage.id, "strategy", &stage.strategies, &strategy_ids)?;
        }

        let stage_ids: HashSet<&Identifier> = self.stages.iter().map(|s| &s.id).collect();
        for pipeline in &self.pipelines {
            check_refs("pipeline", &pipeline.id, "stage", &pipeline.stages, &stage_ids)?;
        }

        Ok(())
    }

    /// Assemble shared values. A strategy listed in two stages becomes one
    /// `Arc` held by both; likewise for stages shared between pipelines.
    pub fn build(&self) -> CatalogResult<Catalog> {
        self.validate()?;

        let strategies: HashMap<&Identifier, Arc<Strategy>> = self
            .strategies
            .iter()
            .map(|def| {
                let strategy = Strategy::new(&def.id, def.description.clone(), def.prompt.clone());
                (&def.id, Arc::new(strategy))
            })
            .collect();

        let mut stages: HashMap<&Identifier, Arc<Stage>> = HashMap::new();
        for def in &self.stages {
            let members = resolve("stage", &def.id, "strategy", &def.strategies, &strategies)?;
            let stage = Stage::with_strategies(&def.id, def.description.clone(), members);
            stages.insert(&def.id, Arc::new(stage));
        }

        let mut pipelines = Vec::with_capacity(self.pipelines.len());
        for def in &self.pipelines {
            let members = resolve("pipeline", &def.id, "stage", &def.stages, &stages)?;
            pipelines.push(Arc::new(Pipeline::with_stages(
                &def.id,
                def.description.clone(),
                members,
            )));
        }

        let unused = self
            .stages
            .iter()
            .filter(|s| !self.pipelines.iter().any(|p| p.stages.contains(&s.id)))
            .count();
        if unused > 0 {
            tracing::debug!(unused, "Catalog stages not reachable from any pipeline");
        }

        // Keep document order for the flat lists.
        Ok(Catalog {
            pipelines,
            stages: self
                .stages
                .iter()
                .filter_map(|def| stages.get(&def.id).cloned())
                .collect(),
            strategies: self
                .strategies
                .iter()
                .filter_map(|def| strategies.get(&def.id).cloned())
                .collect(),
        })
    }
}

fn check_ids<'a, I>(kind: &str, ids: I) -> CatalogResult<()>
where
    I: IntoIterator<Item = &'a Identifier>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if id.is_blank() {
            return Err(CatalogError::Invalid(format!("{kind} id cannot be empty")));
        }
        if !seen.insert(id) {
            return Err(CatalogError::Invalid(format!("duplicate {kind} id '{id}'")));
        }
    }
    Ok(())
}

fn check_refs(
    owner_kind: &'static str,
    owner: &Identifier,
    kind: &'static str,
    refs: &[Identifier],
    known: &HashSet<&Identifier>,
) -> CatalogResult<()> {
    match refs.iter().find(|id| !known.contains(id)) {
        Some(missing) => Err(CatalogError::UnknownReference {
            owner_kind,
            owner: owner.to_string(),
            kind,
            id: missing.to_string(),
        }),
        None => Ok(()),
    }
}

fn resolve<T>(
    owner_kind: &'static str,
    owner: &Identifier,
    kind: &'static str,
    refs: &[Identifier],
    known: &HashMap<&Identifier, Arc<T>>,
) -> CatalogResult<Vec<Arc<T>>> {
    refs.iter()
        .map(|id| {
            known
                .get(id)
                .cloned()
                .ok_or_else(|| CatalogError::UnknownReference {
                    owner_kind,
                    owner: owner.to_string(),
                    kind,
                    id: id.to_string(),
                })
        })
        .collect()
}
