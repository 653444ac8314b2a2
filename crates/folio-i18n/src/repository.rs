//! Catalog discovery under the configured locale directories.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{Catalog, CatalogError, write_mo};

/// Directory below `{locale_dir}/{lang}` that holds the catalogs.
const MESSAGES_DIR: &str = "LC_MESSAGES";

/// Finds `.po` sources for one language across several locale directories.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    locale_dirs: Vec<PathBuf>,
    language: Option<String>,
}

impl CatalogRepository {
    /// Create a repository.
    ///
    /// With `language` set to `None` the repository is always empty.
    #[must_use]
    pub fn new(locale_dirs: Vec<PathBuf>, language: Option<String>) -> Self {
        Self {
            locale_dirs,
            language,
        }
    }

    /// `{locale_dir}/{lang}/LC_MESSAGES` directories that exist on disk.
    pub fn message_dirs(&self) -> Vec<PathBuf> {
        let Some(language) = &self.language else {
            return Vec::new();
        };
        self.locale_dirs
            .iter()
            .map(|dir| dir.join(language).join(MESSAGES_DIR))
            .filter(|dir| {
                let exists = dir.is_dir();
                if !exists {
                    tracing::debug!(path = %dir.display(), "Locale directory not found");
                }
                exists
            })
            .collect()
    }

    /// All catalogs found, in a stable order.
    ///
    /// Missing directories are skipped; unreadable ones are logged.
    pub fn catalogs(&self) -> Vec<CatalogInfo> {
        let mut catalogs = Vec::new();
        for base_dir in self.message_dirs() {
            let mut domains = Vec::new();
            collect_po_files(&base_dir, "", &mut domains);
            domains.sort();
            catalogs.extend(domains.into_iter().map(|domain| CatalogInfo {
                base_dir: base_dir.clone(),
                domain,
            }));
        }
        catalogs
    }
}

/// Recursively collect `.po` domains below `dir`.
fn collect_po_files(dir: &Path, prefix: &str, domains: &mut Vec<String>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(path = %dir.display(), error = %e, "Failed to read locale directory");
            return;
        }
    };

    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
        let qualified = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}/{name}")
        };

        if is_dir {
            collect_po_files(&entry.path(), &qualified, domains);
        } else if let Some(domain) = qualified.strip_suffix(".po") {
            domains.push(domain.to_owned());
        }
    }
}

/// One source catalog and the location of its compiled counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogInfo {
    /// The `LC_MESSAGES` directory the catalog was found in.
    pub base_dir: PathBuf,
    /// Domain name, `/`-separated for catalogs in subdirectories.
    pub domain: String,
}

impl CatalogInfo {
    /// Path of the `.po` source.
    pub fn po_path(&self) -> PathBuf {
        self.base_dir.join(native(&format!("{}.po", self.domain)))
    }

    /// Path of the compiled `.mo` file (next to the source).
    pub fn mo_path(&self) -> PathBuf {
        self.base_dir.join(native(&format!("{}.mo", self.domain)))
    }

    /// Whether the compiled file is missing or older than its source.
    pub fn is_outdated(&self) -> bool {
        let modified = |path: PathBuf| fs::metadata(path).and_then(|m| m.modified()).ok();
        match (modified(self.mo_path()), modified(self.po_path())) {
            (Some(mo), Some(po)) => mo < po,
            _ => true,
        }
    }

    /// Read the source and write the compiled catalog.
    ///
    /// A failed write removes the partial `.mo`, so the catalog stays
    /// outdated.
    pub fn write_mo(&self, use_fuzzy: bool) -> Result<(), CatalogError> {
        let po_path = self.po_path();
        let source = fs::read_to_string(&po_path)?;
        let catalog = Catalog::parse(&source).map_err(|e| match e {
            CatalogError::Syntax { line, message, .. } => CatalogError::Syntax {
                path: po_path.clone(),
                line,
                message,
            },
            other => other,
        })?;

        let mut compiled = Vec::new();
        write_mo(&catalog, use_fuzzy, &mut compiled)?;

        let mo_path = self.mo_path();
        fs::write(&mo_path, &compiled).map_err(|e| {
            if let Err(remove_err) = fs::remove_file(&mo_path) {
                tracing::debug!(path = %mo_path.display(), error = %remove_err, "Failed to remove partial catalog");
            }
            CatalogError::Io(e)
        })
    }
}

/// Map a document name to the catalog domain holding its messages.
///
/// In compact mode every document below a top-level directory shares that
/// directory's domain.
pub fn docname_to_domain(docname: &str, compact: bool) -> &str {
    if compact {
        docname.split('/').next().unwrap_or(docname)
    } else {
        docname
    }
}

/// Convert a `/`-separated domain to a relative filesystem path.
fn native(domain: &str) -> PathBuf {
    domain.split('/').collect()
}
