//! Stage: a named phase holding strategies.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{EntityKind, RegistryError};
use crate::id::Identifier;
use crate::registry::{Entry, Registry};
use crate::strategy::Strategy;

/// A processing phase, e.g. `MISSING_VALUES`, that groups the strategies an
/// agent may pick from for that phase.
///
/// Strategies are held as `Arc` handles, so the same strategy can be part of
/// several stages. Listing order is the order strategies were added in.
#[derive(Debug, Clone)]
pub struct Stage {
    strategies: Registry<Strategy>,
}

impl Stage {
    pub fn new(id: impl AsRef<str>, description: impl Into<String>) -> Self {
        Self {
            strategies: Registry::new(EntityKind::Stage, id, description),
        }
    }

    /// Build a stage and add `strategies` in one go.
    pub fn with_strategies<I>(id: impl AsRef<str>, description: impl Into<String>, strategies: I) -> Self
    where
        I: IntoIterator<Item = Arc<Strategy>>,
    {
        let mut stage = Self::new(id, description);
        stage.add_strategies(strategies);
        stage
    }

    pub fn id(&self) -> &Identifier {
        self.strategies.id()
    }

    pub fn description(&self) -> &str {
        self.strategies.description()
    }

    /// Upsert strategies by id. Adding an id that is already present replaces
    /// the previous strategy.
    pub fn add_strategies<I>(&mut self, strategies: I)
    where
        I: IntoIterator<Item = Arc<Strategy>>,
    {
        self.strategies.insert_all(strategies);
    }

    /// Remove strategies by id. Unknown ids are ignored.
    pub fn remove_strategies<I>(&mut self, strategy_ids: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.strategies.remove_all(strategy_ids);
    }

    pub fn get_strategy(&self, strategy_id: &str) -> Result<&Arc<Strategy>, RegistryError> {
        self.strategies.get(strategy_id)
    }

    /// Prompt text of one strategy in this stage. Other stages are not
    /// consulted.
    pub fn get_prompt(&self, strategy_id: &str) -> Result<&str, RegistryError> {
        self.get_strategy(strategy_id).map(|s| s.prompt())
    }

    pub fn contains(&self, strategy_id: &str) -> bool {
        self.strategies.contains(strategy_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Strategy>> {
        self.strategies.iter()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub fn usage_summary(&self) -> String {
        Entry::usage_summary(self)
    }

    /// Header plus one bulleted usage line per strategy.
    pub fn strategies_summary(&self) -> String {
        self.strategies.children_summary()
    }

    /// Shallow copy of the strategy map.
    pub fn get_registry(&self) -> IndexMap<Identifier, Arc<Strategy>> {
        self.strategies.snapshot()
    }
}

impl Entry for Stage {
    const KIND: EntityKind = EntityKind::Stage;

    fn id(&self) -> &Identifier {
        self.strategies.id()
    }

    fn description(&self) -> &str {
        self.strategies.description()
    }
}

impl<'a> IntoIterator for &'a Stage {
    type Item = &'a Arc<Strategy>;
    type IntoIter = indexmap::map::Values<'a, Identifier, Arc<Strategy>>;

    fn into_iter(self) -> Self::IntoIter {
        (&self.strategies).into_iter()
    }
}
