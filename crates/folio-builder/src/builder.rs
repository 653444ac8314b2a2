//! The [`Builder`] trait and the per-build rendering context.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::util::{os_path, relative_uri};

/// Name of the root document of a project.
pub const MASTER_DOC: &str = "index";

/// Default suffix for hyperlinks and output files.
pub(crate) const DEFAULT_SUFFIX: &str = ".html";

/// Per-build state shared with the rendering stage.
///
/// Filled by [`Builder::prepare_writing`] before the first page is written
/// and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildContext {
    /// Project name shown in page titles.
    pub project: String,
    /// Target language, if any.
    pub language: Option<String>,
    /// Suffix of written files (e.g. ".html").
    pub file_suffix: String,
    /// Search results link to target URIs instead of `docname + file_suffix`.
    pub no_search_suffix: bool,
    /// Number of documents about to be written; published in the search index.
    pub document_count: usize,
}

/// An output strategy selected by name at build time.
///
/// The provided methods implement the standalone HTML layout; alternative
/// builders override what they lay out differently.
pub trait Builder: Send + Sync {
    /// Registered name (e.g. "html").
    fn name(&self) -> &'static str;

    /// Suffix appended to document names in hyperlinks.
    fn link_suffix(&self) -> &str {
        DEFAULT_SUFFIX
    }

    /// Hyperlink target for `docname`, relative to the site root.
    fn target_uri(&self, docname: &str) -> String {
        format!("{docname}{}", self.link_suffix())
    }

    /// File `docname` is written to.
    fn output_path(&self, docname: &str, outdir: &Path, out_suffix: &str) -> PathBuf {
        outdir.join(os_path(&format!("{docname}{out_suffix}")))
    }

    /// Hook run once before any page is written.
    fn prepare_writing(&self, ctx: &mut BuildContext, docnames: &BTreeSet<String>) {
        prepare_base_context(ctx, docnames);
    }

    /// Link from the page of `from` to the page of `to`.
    fn relative_uri(&self, from: &str, to: &str) -> String {
        relative_uri(&self.target_uri(from), &self.target_uri(to))
    }
}

/// Context setup every builder starts from.
pub fn prepare_base_context(ctx: &mut BuildContext, docnames: &BTreeSet<String>) {
    ctx.no_search_suffix = false;
    ctx.document_count = docnames.len();
}
