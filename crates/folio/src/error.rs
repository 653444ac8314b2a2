//! CLI error types.

use folio_builder::{BuildError, RegistryError};
use folio_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Registry(#[from] RegistryError),

    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("{0}")]
    Catalogs(String),
}
