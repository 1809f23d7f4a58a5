//! Static model registry: upstream model ids and capability flags.

use std::collections::BTreeMap;

const BUILTIN_MODELS: &[(&str, bool)] = &[
    ("grok-2", false),
    ("grok-3", false),
    ("grok-3-reasoning", true),
    ("grok-4", false),
    ("grok-4-reasoning", true),
];

/// Capability flags for one registered model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSpec {
    pub reasoning: bool,
}

/// Name → capability table, fixed for the life of the process.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    entries: BTreeMap<String, ModelSpec>,
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new(BUILTIN_MODELS.iter().map(|&(id, reasoning)| (id, ModelSpec { reasoning })))
    }
}

impl ModelRegistry {
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a str, ModelSpec)>) -> Self {
        Self {
            entries: entries.into_iter().map(|(id, spec)| (id.to_string(), spec)).collect(),
        }
    }

    pub fn is_valid(&self, model: &str) -> bool {
        self.entries.contains_key(model)
    }

    /// False for unknown models.
    pub fn is_reasoning(&self, model: &str) -> bool {
        self.entries.get(model).map(|spec| spec.reasoning).unwrap_or(false)
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
