//! Pipeline: a complete workflow made of stages.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{EntityKind, RegistryError};
use crate::id::Identifier;
use crate::registry::{Entry, Registry};
use crate::stage::Stage;

/// A workflow such as `EDA`. Same contract as [`Stage`], one level up.
#[derive(Debug, Clone)]
pub struct Pipeline {
    stages: Registry<Stage>,
}

impl Pipeline {
    pub fn new(id: impl AsRef<str>, description: impl Into<String>) -> Self {
        Self {
            stages: Registry::new(EntityKind::Pipeline, id, description),
        }
    }

    pub fn with_stages<I>(id: impl AsRef<str>, description: impl Into<String>, stages: I) -> Self
    where
        I: IntoIterator<Item = Arc<Stage>>,
    {
        let mut pipeline = Self::new(id, description);
        pipeline.add_stages(stages);
        pipeline
    }

    pub fn id(&self) -> &Identifier {
        self.stages.id()
    }

    pub fn description(&self) -> &str {
        self.stages.description()
    }

    /// Upsert stages by id, last write wins.
    pub fn add_stages<I>(&mut self, stages: I)
    where
        I: IntoIterator<Item = Arc<Stage>>,
    {
        self.stages.insert_all(stages);
    }

    /// Remove stages by id. Unknown ids are ignored.
    pub fn remove_stages<I>(&mut self, stage_ids: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.stages.remove_all(stage_ids);
    }

    pub fn get_stage(&self, stage_id: &str) -> Result<&Arc<Stage>, RegistryError> {
        self.stages.get(stage_id)
    }

    pub fn contains(&self, stage_id: &str) -> bool {
        self.stages.contains(stage_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Stage>> {
        self.stages.iter()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn usage_summary(&self) -> String {
        Entry::usage_summary(self)
    }

    pub fn stages_summary(&self) -> String {
        self.stages.children_summary()
    }

    pub fn get_registry(&self) -> IndexMap<Identifier, Arc<Stage>> {
        self.stages.snapshot()
    }
}

impl Entry for Pipeline {
    const KIND: EntityKind = EntityKind::Pipeline;

    fn id(&self) -> &Identifier {
        self.stages.id()
    }

    fn description(&self) -> &str {
        self.stages.description()
    }
}

impl<'a> IntoIterator for &'a Pipeline {
    type Item = &'a Arc<Stage>;
    type IntoIter = indexmap::map::Values<'a, Identifier, Arc<Stage>>;

    fn into_iter(self) -> Self::IntoIter {
        (&self.stages).into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::Strategy;

    fn stage(id: &str) -> Arc<Stage> {
        let strategy = Arc::new(Strategy::new(format!("{id}_strategy"), "", "..."));
        Arc::new(Stage::with_strategies(id, format!("{id} stage"), [strategy]))
    }

    #[test]
    fn get_registry_is_detached() {
        let p = Pipeline::with_stages("eda", "", [stage("data_ingestion"), stage("missing_values")]);
        let mut copy = p.get_registry();
        copy.clear();
        assert!(copy.is_empty());
        assert_eq!(p.len(), 2);
        assert!(p.get_stage("missing_values").is_ok());
    }

    #[test]
    fn get_stage_is_case_insensitive() {
        let p = Pipeline::with_stages("eda", "Exploratory analysis", [stage("data_ingestion")]);
        assert_eq!(p.id(), "EDA");
        for id in ["data_ingestion", "DATA_INGESTION", "Data_Ingestion"] {
            assert_eq!(p.get_stage(id).unwrap().id(), "DATA_INGESTION");
        }
    }

    #[test]
    fn get_missing_stage_fails() {
        let p = Pipeline::new("eda", "");
        let err = p.get_stage("type_handling").unwrap_err();
        assert_eq!(
            err,
            RegistryError::not_found(EntityKind::Stage, "TYPE_HANDLING", "pipeline 'EDA'")
        );
    }

    #[test]
    fn shared_stage_is_not_copied() {
        let shared = stage("missing_values");
        let a = Pipeline::with_stages("a", "", [shared.clone()]);
        let b = Pipeline::with_stages("b", "", [shared.clone()]);
        assert!(Arc::ptr_eq(a.get_stage("missing_values").unwrap(), &shared));
        assert!(Arc::ptr_eq(b.get_stage("missing_values").unwrap(), &shared));
    }

    #[test]
    fn remove_stages_by_id() {
        let mut p = Pipeline::with_stages("eda", "", [stage("a"), stage("b")]);
        p.remove_stages(["A", "missing"]);
        assert!(!p.contains("a"));
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn stages_summary_format() {
        let p = Pipeline::with_stages("eda", "", [stage("type_handling"), stage("data_ingestion")]);
        let summary = p.stages_summary();
        let lines: Vec<&str> = summary.split('\n').collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], " Pipeline: EDA");
        assert_eq!(lines[2], "├── Stages Overview:");
        assert!(lines[3].starts_with("- TYPE_HANDLING"));
        assert!(lines[4].starts_with("- DATA_INGESTION"));
        assert!(summary.contains("data_ingestion stage"));
    }

    #[test]
    fn empty_pipeline_summary() {
        assert_eq!(
            Pipeline::new("eda", "").stages_summary(),
            "No stages registered for pipeline 'EDA'."
        );
    }
}
