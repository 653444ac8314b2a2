//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod catalogs;

pub(crate) use build::BuildArgs;
pub(crate) use catalogs::CatalogsCommand;
