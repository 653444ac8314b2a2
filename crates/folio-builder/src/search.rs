//! Search index written next to the site root.

use serde::Serialize;

use crate::builder::{BuildContext, Builder};
use crate::render::RenderedDocument;

/// File name of the search index inside the output directory.
pub(crate) const SEARCH_INDEX_FILE: &str = "searchindex.json";

#[derive(Debug, Serialize)]
pub(crate) struct SearchIndex<'a> {
    /// Suffix the client appends to `docname` when `link` is not used.
    pub file_suffix: &'a str,
    /// Number of documents in the build.
    pub document_count: usize,
    pub entries: Vec<SearchEntry<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchEntry<'a> {
    pub docname: &'a str,
    pub title: &'a str,
    /// Result link relative to the site root.
    pub link: String,
}

/// Build the search index for `documents`.
///
/// With `no_search_suffix` set, result links are the builder's target URIs
/// (`guide/intro/`) and the advertised suffix is empty; otherwise links are
/// `docname + file_suffix`.
pub(crate) fn build_index<'a>(
    documents: &'a [RenderedDocument],
    ctx: &'a BuildContext,
    builder: &dyn Builder,
) -> SearchIndex<'a> {
    let file_suffix = if ctx.no_search_suffix { "" } else { ctx.file_suffix.as_str() };
    let entries = documents
        .iter()
        .map(|doc| SearchEntry {
            docname: &doc.docname,
            title: &doc.title,
            link: if ctx.no_search_suffix {
                builder.target_uri(&doc.docname)
            } else {
                format!("{}{file_suffix}", doc.docname)
            },
        })
        .collect();

    SearchIndex {
        file_suffix,
        document_count: ctx.document_count,
        entries,
    }
}
