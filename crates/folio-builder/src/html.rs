//! Standalone HTML builder (`html`).

use folio_config::BuildConfig;

use crate::builder::{Builder, DEFAULT_SUFFIX};
use crate::registry::{ExtensionMetadata, Registry, RegistryError};

/// Writes every document to `{docname}{suffix}`.
#[derive(Debug, Clone)]
pub struct StandaloneHtmlBuilder {
    link_suffix: String,
}

impl StandaloneHtmlBuilder {
    /// Builder linking documents with `link_suffix` (e.g. ".html").
    #[must_use]
    pub fn new(link_suffix: impl Into<String>) -> Self {
        Self {
            link_suffix: link_suffix.into(),
        }
    }
}

impl Default for StandaloneHtmlBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_SUFFIX)
    }
}

impl Builder for StandaloneHtmlBuilder {
    fn name(&self) -> &'static str {
        "html"
    }

    fn link_suffix(&self) -> &str {
        &self.link_suffix
    }
}

/// Moved to [`crate::dirhtml::DirectoryHtmlBuilder`]; kept here for one major
/// version.
#[deprecated(
    since = "0.2.0",
    note = "use `folio_builder::dirhtml::DirectoryHtmlBuilder` instead"
)]
pub type DirectoryHtmlBuilder = crate::dirhtml::DirectoryHtmlBuilder;

fn create(config: &BuildConfig) -> Box<dyn Builder> {
    Box::new(StandaloneHtmlBuilder::new(config.out_suffix.clone()))
}

/// Register the `html` builder.
pub fn setup(registry: &mut Registry) -> Result<ExtensionMetadata, RegistryError> {
    registry.add_builder("html", create)?;

    Ok(ExtensionMetadata {
        version: "builtin",
        parallel_read_safe: true,
        parallel_write_safe: true,
    })
}
