//! Gettext catalog handling for Folio.
//!
//! Translation sources live in a fixed layout under each configured locale
//! directory:
//!
//! ```text
//! {locale_dir}/
//! +-- {lang}/
//!     +-- LC_MESSAGES/
//!         +-- admonitions.po     # source catalog, domain "admonitions"
//!         +-- admonitions.mo     # compiled next to its source
//!         +-- guide/
//!             +-- intro.po       # domain "guide/intro"
//! ```
//!
//! [`CatalogRepository`] discovers the sources, [`compile_catalogs`] turns them
//! into binary `.mo` files according to a [`CompileTarget`] policy.
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use folio_i18n::{compile_catalogs, CatalogRepository, CompileOptions, CompileTarget};
//!
//! let repo = CatalogRepository::new(vec![PathBuf::from("locales")], Some("de".to_owned()));
//! let report = compile_catalogs(&repo, &CompileTarget::Outdated, CompileOptions::default());
//! println!("{} catalogs compiled", report.compiled.len());
//! ```

mod compile;
mod mo;
mod po;
mod repository;

use std::path::PathBuf;

pub use compile::{CompileOptions, CompileReport, CompileTarget, compile_catalogs};
pub use mo::write_mo;
pub use po::{Catalog, Message};
pub use repository::{CatalogInfo, CatalogRepository, docname_to_domain};

/// Error raised while reading or compiling a single catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed `.po` source.
    #[error("{}:{line}: {message}", path.display())]
    Syntax {
        /// Source file (empty when parsing from memory).
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },
    /// Catalog too large for the 32-bit `.mo` offsets.
    #[error("catalog exceeds the .mo size limit")]
    TooLarge,
}
