//! Builder registration.
//!
//! Builders are contributed by extensions. An extension is a `setup` function
//! that registers builders (and may first set up the extensions it depends on)
//! and returns [`ExtensionMetadata`] describing what a scheduler may do with
//! it.

use std::collections::BTreeMap;

use folio_config::BuildConfig;

use crate::builder::Builder;

/// Capabilities declared by an extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionMetadata {
    /// Extension version, "builtin" for those shipped with Folio.
    pub version: &'static str,
    /// Documents may be read concurrently.
    pub parallel_read_safe: bool,
    /// Documents may be written concurrently.
    pub parallel_write_safe: bool,
}

/// Creates a builder from the resolved build configuration.
pub type BuilderFactory = fn(&BuildConfig) -> Box<dyn Builder>;

/// Extension entry point.
pub type SetupFn = fn(&mut Registry) -> Result<ExtensionMetadata, RegistryError>;

/// Error returned by the registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Builder {name:?} is already registered by extension {extension:?}")]
    DuplicateBuilder {
        name: &'static str,
        extension: &'static str,
    },
    #[error("Builder name {0:?} not registered")]
    UnknownBuilder(String),
}

struct BuilderEntry {
    extension: &'static str,
    factory: BuilderFactory,
}

/// Named builders and the extensions that provided them.
#[derive(Default)]
pub struct Registry {
    builders: BTreeMap<&'static str, BuilderEntry>,
    extensions: BTreeMap<&'static str, ExtensionMetadata>,
    /// Extensions whose `setup` is currently running, innermost last.
    loading: Vec<&'static str>,
}

impl Registry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the `html` and `dirhtml` builders.
    pub fn with_builtins() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        registry.setup_extension("html", crate::html::setup)?;
        registry.setup_extension("dirhtml", crate::dirhtml::setup)?;
        Ok(registry)
    }

    /// Run `setup` for extension `name` unless it is already loaded.
    pub fn setup_extension(&mut self, name: &'static str, setup: SetupFn) -> Result<(), RegistryError> {
        if self.is_loaded(name) || self.loading.contains(&name) {
            return Ok(());
        }

        self.loading.push(name);
        let result = setup(self);
        self.loading.pop();

        let metadata = result?;
        tracing::debug!(extension = name, version = metadata.version, "Extension loaded");
        self.extensions.insert(name, metadata);
        Ok(())
    }

    /// Register a builder under a unique name.
    pub fn add_builder(&mut self, name: &'static str, factory: BuilderFactory) -> Result<(), RegistryError> {
        if let Some(existing) = self.builders.get(name) {
            return Err(RegistryError::DuplicateBuilder {
                name,
                extension: existing.extension,
            });
        }
        let extension = self.loading.last().copied().unwrap_or(name);
        self.builders.insert(name, BuilderEntry { extension, factory });
        Ok(())
    }

    /// Instantiate the builder registered as `name`.
    pub fn create(&self, name: &str, config: &BuildConfig) -> Result<Box<dyn Builder>, RegistryError> {
        let entry = self
            .builders
            .get(name)
            .ok_or_else(|| RegistryError::UnknownBuilder(name.to_owned()))?;
        Ok((entry.factory)(config))
    }

    /// Whether extension `name` finished its setup.
    pub fn is_loaded(&self, name: &str) -> bool {
        self.extensions.contains_key(name)
    }

    /// Metadata of a loaded extension.
    pub fn extension(&self, name: &str) -> Option<&ExtensionMetadata> {
        self.extensions.get(name)
    }

    /// Registered builder names, sorted.
    pub fn builder_names(&self) -> Vec<&'static str> {
        self.builders.keys().copied().collect()
    }

    /// Whether pages of builder `name` may be written concurrently.
    pub fn is_parallel_write_safe(&self, name: &str) -> bool {
        self.builders
            .get(name)
            .and_then(|entry| self.extensions.get(entry.extension))
            .is_some_and(|m| m.parallel_write_safe)
    }
}
