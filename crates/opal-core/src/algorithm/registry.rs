//! Algorithm registry -- named factories for every selectable algorithm.
//!
//! The dispatcher looks algorithms up by `(module, class)` at runtime, the way
//! a command line like `opal-dispatch builtin Echo ...` names them. Each entry
//! is a zero-argument factory, so every lookup yields a fresh instance.

use std::collections::BTreeMap;

use thiserror::Error;

use super::builtin;
use super::trait_def::Algorithm;

/// Zero-argument constructor for an algorithm instance.
pub type AlgorithmFactory = fn() -> Box<dyn Algorithm>;

/// Errors returned when a `(module, class)` pair cannot be resolved.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no algorithm module named {module:?} (available: {available})")]
    ModuleNotFound { module: String, available: String },

    #[error("module {module:?} has no class named {class:?} (available: {available})")]
    ClassNotFound {
        module: String,
        class: String,
        available: String,
    },
}

/// A collection of algorithm factories keyed by module name, then class name.
///
/// # Example
///
/// ```ignore
/// let registry = AlgorithmRegistry::with_builtins();
/// let algorithm = registry.resolve("builtin", "Echo")?;
/// ```
#[derive(Default)]
pub struct AlgorithmRegistry {
    modules: BTreeMap<String, BTreeMap<String, AlgorithmFactory>>,
}

impl AlgorithmRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with the built-in algorithms.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        builtin::register(&mut registry);
        registry
    }

    /// Register a factory under `module`/`class`.
    ///
    /// If a factory is already registered under the same key, it is replaced
    /// and the old one is returned.
    pub fn register(
        &mut self,
        module: &str,
        class: &str,
        factory: AlgorithmFactory,
    ) -> Option<AlgorithmFactory> {
        self.modules
            .entry(module.to_string())
            .or_default()
            .insert(class.to_string(), factory)
    }

    /// Look up `module`/`class` and instantiate it.
    pub fn resolve(&self, module: &str, class: &str) -> Result<Box<dyn Algorithm>, ResolveError> {
        let classes = self
            .modules
            .get(module)
            .ok_or_else(|| ResolveError::ModuleNotFound {
                module: module.to_string(),
                available: join_or_none(self.modules.keys()),
            })?;

        let factory = classes
            .get(class)
            .ok_or_else(|| ResolveError::ClassNotFound {
                module: module.to_string(),
                class: class.to_string(),
                available: join_or_none(classes.keys()),
            })?;

        tracing::debug!(module, class, "instantiating algorithm");
        Ok(factory())
    }

    /// List registered module names in sorted order.
    pub fn modules(&self) -> Vec<&str> {
        self.modules.keys().map(|s| s.as_str()).collect()
    }

    /// List the class names registered under `module`, sorted.
    ///
    /// Returns `None` if the module is unknown.
    pub fn classes(&self, module: &str) -> Option<Vec<&str>> {
        self.modules
            .get(module)
            .map(|classes| classes.keys().map(|s| s.as_str()).collect())
    }

    /// Return the total number of registered classes across all modules.
    pub fn len(&self) -> usize {
        self.modules.values().map(BTreeMap::len).sum()
    }

    /// Return `true` if no classes are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries: Vec<String> = self
            .modules
            .iter()
            .flat_map(|(module, classes)| {
                classes.keys().map(move |class| format!("{module}.{class}"))
            })
            .collect();
        f.debug_struct("AlgorithmRegistry")
            .field("algorithms", &entries)
            .finish()
    }
}

fn join_or_none<'a>(names: impl Iterator<Item = &'a String>) -> String {
    let joined = names.map(String::as_str).collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "none".to_string()
    } else {
        joined
    }
}
