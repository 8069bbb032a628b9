//! Strategy: the atomic prompt fragment.

use serde::Serialize;

use crate::error::EntityKind;
use crate::id::Identifier;
use crate::registry::Entry;

/// An immutable prompt fragment with metadata.
///
/// The id is uppercased in the constructor; there is no way to change any
/// field afterwards. Uniqueness is only enforced by the registry holding the
/// strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Strategy {
    id: Identifier,
    description: String,
    #[serde(skip_serializing)]
    prompt: String,
}

impl Strategy {
    pub fn new(
        id: impl AsRef<str>,
        description: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            id: Identifier::new(id),
            description: description.into(),
            prompt: prompt.into(),
        }
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// When and why to pick this strategy.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The prompt text, returned exactly as supplied.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn usage_summary(&self) -> String {
        Entry::usage_summary(self)
    }
}

impl Entry for Strategy {
    const KIND: EntityKind = EntityKind::Strategy;

    fn id(&self) -> &Identifier {
        &self.id
    }

    fn description(&self) -> &str {
        &self.description
    }
}
