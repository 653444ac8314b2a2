//! Catalog compile policies.

use crate::{CatalogInfo, CatalogRepository};

/// Which catalogs a compile pass should touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileTarget {
    /// Every catalog in the repository.
    All,
    /// Only catalogs whose domain is listed. Unknown names are ignored.
    Domains(Vec<String>),
    /// Only catalogs whose `.mo` is missing or older than the `.po`.
    Outdated,
}

impl CompileTarget {
    fn selects(&self, catalog: &CatalogInfo) -> bool {
        match self {
            Self::All => true,
            Self::Domains(domains) => domains.iter().any(|d| *d == catalog.domain),
            Self::Outdated => catalog.is_outdated(),
        }
    }

    fn describe(&self, count: usize) -> String {
        match self {
            Self::All => format!("all of {count} po files"),
            Self::Domains(_) => format!("targets for {count} po files that are specified"),
            Self::Outdated => format!("targets for {count} po files that are out of date"),
        }
    }
}

/// Options for a compile pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompileOptions {
    /// Keep translations marked fuzzy.
    pub use_fuzzy: bool,
}

/// Outcome of a compile pass.
#[derive(Debug, Default)]
pub struct CompileReport {
    /// Domains whose `.mo` was written.
    pub compiled: Vec<String>,
    /// Domains that failed to compile.
    pub failed: Vec<String>,
}

/// Compile the catalogs selected by `target`.
///
/// Failures are logged and reported but never stop the pass.
pub fn compile_catalogs(
    repo: &CatalogRepository,
    target: &CompileTarget,
    options: CompileOptions,
) -> CompileReport {
    let selected: Vec<CatalogInfo> = repo
        .catalogs()
        .into_iter()
        .filter(|c| target.selects(c))
        .collect();

    tracing::info!(summary = %target.describe(selected.len()), "building [mo]");

    let mut report = CompileReport::default();
    for catalog in selected {
        match catalog.write_mo(options.use_fuzzy) {
            Ok(()) => {
                tracing::debug!(domain = %catalog.domain, path = %catalog.mo_path().display(), "Compiled catalog");
                report.compiled.push(catalog.domain);
            }
            Err(e) => {
                tracing::warn!(domain = %catalog.domain, error = %e, "Failed to compile catalog");
                report.failed.push(catalog.domain);
            }
        }
    }
    report
}
