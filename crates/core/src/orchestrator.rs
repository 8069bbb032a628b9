//! Orchestrator: the flat indexes behind agent queries.
//!
//! ```text
//!  add_pipelines([EDA])
//!        │
//!        ▼
//!  ┌────────────┐   ┌──────────────────┐   ┌──────────────────┐
//!  │ pipelines  │   │ stages           │   │ strategies       │
//!  │  EDA       │──▶│  MISSING_VALUES  │──▶│  IMPUTE_MEAN     │
//!  │            │   │  TYPE_HANDLING   │   │  IMPUTE_MEDIAN   │
//!  └────────────┘   └──────────────────┘   │  PARSE_DATETIME  │
//!                                          └──────────────────┘
//! ```
//!
//! Registration is a snapshot cascade: it indexes whatever a pipeline holds
//! at call time. All three indexes sit behind one lock, so readers never see
//! a pipeline without its stages.

use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EntityKind, RegistryError};
use crate::id::{Identifier, normalize};
use crate::pipeline::Pipeline;
use crate::stage::Stage;
use crate::strategy::Strategy;

const SCOPE: &str = "orchestrator";

/// What happens to stages and strategies when their container is removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CascadeRemoval {
    /// Keep an entry indexed while a registered container still reaches it.
    #[default]
    RetainShared,
    /// Drop every entry the removed container holds, shared or not.
    Unconditional,
}

impl FromStr for CascadeRemoval {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retain_shared" => Ok(Self::RetainShared),
            "unconditional" => Ok(Self::Unconditional),
            other => Err(RegistryError::Validation(format!(
                "unknown cascade removal policy '{other}' (expected retain_shared or unconditional)"
            ))),
        }
    }
}

/// A detached copy of the three indexes.
#[derive(Debug, Clone, Default)]
pub struct RegistrySnapshot {
    pub pipelines: IndexMap<Identifier, Arc<Pipeline>>,
    pub stages: IndexMap<Identifier, Arc<Stage>>,
    pub strategies: IndexMap<Identifier, Arc<Strategy>>,
}

#[derive(Debug, Default)]
struct Indexes {
    pipelines: IndexMap<Identifier, Arc<Pipeline>>,
    stages: IndexMap<Identifier, Arc<Stage>>,
    strategies: IndexMap<Identifier, Arc<Strategy>>,
}

/// Coordinator owning the pipeline, stage, and strategy indexes.
///
/// Build one at startup and share it as `Arc<Orchestrator>`.
#[derive(Debug, Default)]
pub struct Orchestrator {
    indexes: RwLock<Indexes>,
    removal: CascadeRemoval,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_removal(removal: CascadeRemoval) -> Self {
        Self {
            indexes: RwLock::default(),
            removal,
        }
    }

    pub fn removal_policy(&self) -> CascadeRemoval {
        self.removal
    }

    // --- Registration ---

    /// Index each pipeline, every stage it holds, and every strategy those
    /// stages hold. Existing ids are overwritten.
    pub fn add_pipelines<I>(&self, pipelines: I)
    where
        I: IntoIterator<Item = Arc<Pipeline>>,
    {
        let mut idx = self.write();
        let mut count = 0;
        for pipeline in pipelines {
            let stages: Vec<Arc<Stage>> = pipeline.iter().cloned().collect();
            idx.pipelines.insert(pipeline.id().clone(), pipeline);
            insert_stages(&mut idx, stages);
            count += 1;
        }
        debug!(
            pipelines = count,
            total_stages = idx.stages.len(),
            total_strategies = idx.strategies.len(),
            "Registered pipelines"
        );
    }

    /// Index stages and their strategies without a parent pipeline.
    pub fn add_stages<I>(&self, stages: I)
    where
        I: IntoIterator<Item = Arc<Stage>>,
    {
        let mut idx = self.write();
        insert_stages(&mut idx, stages);
    }

    pub fn add_strategies<I>(&self, strategies: I)
    where
        I: IntoIterator<Item = Arc<Strategy>>,
    {
        let mut idx = self.write();
        insert_strategies(&mut idx, strategies);
    }

    // --- Removal ---

    /// Remove pipelines by id and cascade into their stages and strategies
    /// according to the removal policy. Unknown ids are ignored.
    pub fn remove_pipelines<I>(&self, pipeline_ids: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut idx = self.write();
        for raw in pipeline_ids {
            let Some(pipeline) = idx.pipelines.shift_remove(normalize(raw.as_ref()).as_str())
            else {
                continue;
            };
            debug!(pipeline = %pipeline.id(), "Removing pipeline");
            let stages: Vec<Arc<Stage>> = pipeline.iter().cloned().collect();
            self.drop_stages(&mut idx, stages);
        }
    }

    /// Remove stages by id, cascading into their strategies.
    ///
    /// The named stages are always unindexed. With
    /// [`CascadeRemoval::RetainShared`] a cascaded strategy that another
    /// indexed stage still holds stays indexed.
    pub fn remove_stages<I>(&self, stage_ids: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut idx = self.write();
        for raw in stage_ids {
            let Some(stage) = idx.stages.shift_remove(normalize(raw.as_ref()).as_str()) else {
                continue;
            };
            debug!(stage = %stage.id(), "Removing stage");
            self.drop_strategies_of(&mut idx, &stage);
        }
    }

    /// Remove strategies by id. The named strategies are always unindexed,
    /// even when a stage still holds them.
    pub fn remove_strategies<I>(&self, strategy_ids: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut idx = self.write();
        for raw in strategy_ids {
            idx.strategies.shift_remove(normalize(raw.as_ref()).as_str());
        }
    }

    fn drop_stages(&self, idx: &mut Indexes, stages: Vec<Arc<Stage>>) {
        for stage in stages {
            let shared = self.removal == CascadeRemoval::RetainShared
                && idx.pipelines.values().any(|p| p.contains(stage.id()));
            if shared {
                debug!(stage = %stage.id(), "Stage still reachable, keeping it indexed");
                continue;
            }
            idx.stages.shift_remove(stage.id().as_str());
            self.drop_strategies_of(idx, &stage);
        }
    }

    fn drop_strategies_of(&self, idx: &mut Indexes, stage: &Stage) {
        for strategy in stage.iter() {
            let shared = self.removal == CascadeRemoval::RetainShared
                && idx.stages.values().any(|s| s.contains(strategy.id()));
            if !shared {
                idx.strategies.shift_remove(strategy.id().as_str());
            }
        }
    }

    // --- Lookup ---

    pub fn get_pipeline(&self, pipeline_id: &str) -> Result<Arc<Pipeline>, RegistryError> {
        lookup(&self.read().pipelines, EntityKind::Pipeline, pipeline_id).cloned()
    }

    pub fn get_stage(&self, stage_id: &str) -> Result<Arc<Stage>, RegistryError> {
        lookup(&self.read().stages, EntityKind::Stage, stage_id).cloned()
    }

    pub fn get_strategy(&self, strategy_id: &str) -> Result<Arc<Strategy>, RegistryError> {
        lookup(&self.read().strategies, EntityKind::Strategy, strategy_id).cloned()
    }

    pub fn pipeline_count(&self) -> usize {
        self.read().pipelines.len()
    }

    pub fn stage_count(&self) -> usize {
        self.read().stages.len()
    }

    pub fn strategy_count(&self) -> usize {
        self.read().strategies.len()
    }

    // --- Agent queries ---

    /// One usage line per registered pipeline, in registration order.
    pub fn pipelines_usage_summary(&self) -> String {
        self.read()
            .pipelines
            .values()
            .map(|p| p.usage_summary())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Stage overviews of the given pipelines. Fails on the first unknown id
    /// without producing partial output.
    pub fn pipelines_stages_summary<I>(&self, pipeline_ids: I) -> Result<String, RegistryError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let idx = self.read();
        let summaries = pipeline_ids
            .into_iter()
            .map(|raw| {
                lookup(&idx.pipelines, EntityKind::Pipeline, raw.as_ref()).map(|p| p.stages_summary())
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(summaries.join("\n"))
    }

    /// Strategy overviews of the given stages. Same failure rule as
    /// [`pipelines_stages_summary`](Self::pipelines_stages_summary).
    pub fn stages_strategies_summary<I>(&self, stage_ids: I) -> Result<String, RegistryError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let idx = self.read();
        let summaries = stage_ids
            .into_iter()
            .map(|raw| {
                lookup(&idx.stages, EntityKind::Stage, raw.as_ref()).map(|s| s.strategies_summary())
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(summaries.join("\n"))
    }

    /// Join the prompts of the given strategies with `\n`, in exactly the
    /// order given. Duplicates are kept. An empty list composes to `""`.
    pub fn compose_prompt<I>(&self, strategy_ids: I) -> Result<String, RegistryError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let idx = self.read();
        let fragments = strategy_ids
            .into_iter()
            .map(|raw| {
                lookup(&idx.strategies, EntityKind::Strategy, raw.as_ref()).map(|s| s.prompt())
            })
            .collect::<Result<Vec<&str>, _>>()?;
        Ok(fragments.join("\n"))
    }

    /// Copy of all three indexes for inspection. Changes to the copy do not
    /// reach the orchestrator.
    pub fn snapshot(&self) -> RegistrySnapshot {
        let idx = self.read();
        RegistrySnapshot {
            pipelines: idx.pipelines.clone(),
            stages: idx.stages.clone(),
            strategies: idx.strategies.clone(),
        }
    }

    // Every write leaves the maps valid, so a poisoned lock is still usable.
    fn read(&self) -> RwLockReadGuard<'_, Indexes> {
        self.indexes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Indexes> {
        self.indexes.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn insert_stages<I>(idx: &mut Indexes, stages: I)
where
    I: IntoIterator<Item = Arc<Stage>>,
{
    for stage in stages {
        let strategies: Vec<Arc<Strategy>> = stage.iter().cloned().collect();
        idx.stages.insert(stage.id().clone(), stage);
        insert_strategies(idx, strategies);
    }
}

fn insert_strategies<I>(idx: &mut Indexes, strategies: I)
where
    I: IntoIterator<Item = Arc<Strategy>>,
{
    for strategy in strategies {
        idx.strategies.insert(strategy.id().clone(), strategy);
    }
}

fn lookup<'a, T>(
    map: &'a IndexMap<Identifier, Arc<T>>,
    kind: EntityKind,
    raw: &str,
) -> Result<&'a Arc<T>, RegistryError> {
    let key = normalize(raw);
    map.get(key.as_str())
        .ok_or_else(|| RegistryError::not_found(kind, key, SCOPE))
}
