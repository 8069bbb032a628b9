//! Generic id-keyed container shared by [`Stage`](crate::Stage) and
//! [`Pipeline`](crate::Pipeline).
//!
//! A `Registry<T>` is itself a named entry (it carries an id and a
//! description) holding shared handles to child entries. Keys are always the
//! child's own normalised id, so `registry[k].id() == k` holds by
//! construction.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{EntityKind, RegistryError};
use crate::id::{Identifier, normalize};

/// Anything that can live inside a [`Registry`].
pub trait Entry {
    /// Hierarchy level of this entry, used in error messages and summaries.
    const KIND: EntityKind;

    fn id(&self) -> &Identifier;

    fn description(&self) -> &str;

    /// One line: the id left-aligned in 20 columns, then the description.
    fn usage_summary(&self) -> String {
        usage_line(self.id(), self.description())
    }
}

/// Format the one-line listing used at every level.
///
/// Ids wider than 20 columns are printed in full.
pub fn usage_line(id: &Identifier, description: &str) -> String {
    format!("{:<20} : {}", id.as_str(), description)
}

impl EntityKind {
    /// Lowercase singular label, e.g. `stage`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pipeline => "pipeline",
            Self::Stage => "stage",
            Self::Strategy => "strategy",
        }
    }

    /// Capitalised plural label, e.g. `Strategies`.
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Pipeline => "Pipelines",
            Self::Stage => "Stages",
            Self::Strategy => "Strategies",
        }
    }
}

/// An insertion-ordered set of shared child entries under a named container.
#[derive(Debug, Clone)]
pub struct Registry<T> {
    kind: EntityKind,
    id: Identifier,
    description: String,
    items: IndexMap<Identifier, Arc<T>>,
}

impl<T: Entry> Registry<T> {
    pub fn new(kind: EntityKind, id: impl AsRef<str>, description: impl Into<String>) -> Self {
        Self {
            kind,
            id: Identifier::new(id),
            description: description.into(),
            items: IndexMap::new(),
        }
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The container's own level.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Upsert each item under its own id. An overwritten key keeps its
    /// original position.
    pub fn insert_all<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = Arc<T>>,
    {
        for item in items {
            self.items.insert(item.id().clone(), item);
        }
    }

    /// Remove each id if present. Remaining entries keep their order.
    pub fn remove_all<I>(&mut self, ids: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for raw in ids {
            self.items.shift_remove(normalize(raw.as_ref()).as_str());
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(normalize(id).as_str())
    }

    /// Look up a child by id, case-insensitively.
    pub fn get(&self, id: &str) -> Result<&Arc<T>, RegistryError> {
        let key = normalize(id);
        self.items
            .get(key.as_str())
            .ok_or_else(|| RegistryError::not_found(T::KIND, key, self.scope()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.items.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &Identifier> {
        self.items.keys()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Shallow copy of the backing map.
    pub fn snapshot(&self) -> IndexMap<Identifier, Arc<T>> {
        self.items.clone()
    }

    /// Multi-line overview of the children, in insertion order.
    pub fn children_summary(&self) -> String {
        if self.is_empty() {
            return format!(
                "No {} registered for {} '{}'.",
                T::KIND.plural().to_lowercase(),
                self.kind.label(),
                self.id
            );
        }
        let mut lines = Vec::with_capacity(self.len() + 2);
        lines.push(format!("\n {}: {}", self.kind, self.id));
        lines.push(format!("├── {} Overview:", T::KIND.plural()));
        for item in self.iter() {
            lines.push(format!("- {}", item.usage_summary()));
        }
        lines.join("\n")
    }

    fn scope(&self) -> String {
        format!("{} '{}'", self.kind.label(), self.id)
    }
}

impl<'a, T: Entry> IntoIterator for &'a Registry<T> {
    type Item = &'a Arc<T>;
    type IntoIter = indexmap::map::Values<'a, Identifier, Arc<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.values()
    }
}
