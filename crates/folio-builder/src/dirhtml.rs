//! Directory HTML builder (`dirhtml`).
//!
//! Every page is written as `index.html` inside a directory named after the
//! document, so links never carry a `.html` suffix:
//!
//! | document      | link           | file                          |
//! |---------------|----------------|-------------------------------|
//! | `index`       | ``             | `{outdir}/index.html`         |
//! | `guide/index` | `guide/`       | `{outdir}/guide/index.html`   |
//! | `guide/intro` | `guide/intro/` | `{outdir}/guide/intro/index.html` |

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use folio_config::BuildConfig;

use crate::builder::{BuildContext, Builder, MASTER_DOC, prepare_base_context};
use crate::registry::{ExtensionMetadata, Registry, RegistryError};
use crate::util::os_path;

const INDEX_SEGMENT: &str = "/index";

/// Writes every document as a directory index file.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryHtmlBuilder;

impl DirectoryHtmlBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// `index` itself or a name whose last segment is `index`.
fn is_index(docname: &str) -> bool {
    docname == MASTER_DOC || docname.ends_with(INDEX_SEGMENT)
}

impl Builder for DirectoryHtmlBuilder {
    fn name(&self) -> &'static str {
        "dirhtml"
    }

    fn target_uri(&self, docname: &str) -> String {
        if docname == MASTER_DOC {
            return String::new();
        }
        if let Some(dir) = docname.strip_suffix(MASTER_DOC)
            && dir.ends_with('/')
        {
            return dir.to_owned();
        }
        format!("{docname}/")
    }

    fn output_path(&self, docname: &str, outdir: &Path, out_suffix: &str) -> PathBuf {
        if is_index(docname) {
            outdir.join(os_path(&format!("{docname}{out_suffix}")))
        } else {
            outdir
                .join(os_path(docname))
                .join(format!("{MASTER_DOC}{out_suffix}"))
        }
    }

    fn prepare_writing(&self, ctx: &mut BuildContext, docnames: &BTreeSet<String>) {
        prepare_base_context(ctx, docnames);
        ctx.no_search_suffix = true;
    }
}

fn create(_config: &BuildConfig) -> Box<dyn Builder> {
    Box::new(DirectoryHtmlBuilder)
}

/// Register the `dirhtml` builder on top of the `html` extension.
pub fn setup(registry: &mut Registry) -> Result<ExtensionMetadata, RegistryError> {
    registry.setup_extension("html", crate::html::setup)?;
    registry.add_builder("dirhtml", create)?;

    Ok(ExtensionMetadata {
        version: "builtin",
        parallel_read_safe: true,
        parallel_write_safe: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn outdir() -> PathBuf {
        PathBuf::from("/site").join("_build")
    }

    #[test]
    fn test_target_uri_root() {
        assert_eq!(DirectoryHtmlBuilder.target_uri("index"), "");
    }

    #[test]
    fn test_target_uri_nested_index() {
        let builder = DirectoryHtmlBuilder;
        assert_eq!(builder.target_uri("guide/index"), "guide/");
        assert_eq!(builder.target_uri("a/b/c/index"), "a/b/c/");
    }

    #[test]
    fn test_target_uri_plain_documents() {
        let builder = DirectoryHtmlBuilder;
        for docname in ["intro", "guide/intro", "a/b/c", "reindex", "guide/myindex"] {
            let uri = builder.target_uri(docname);
            assert_eq!(uri, format!("{docname}/"));
            assert!(!uri.contains(".html"));
        }
    }

    #[test]
    fn test_output_path_root() {
        assert_eq!(
            DirectoryHtmlBuilder.output_path("index", &outdir(), ".html"),
            outdir().join("index.html")
        );
    }

    #[test]
    fn test_output_path_nested_index_is_not_nested_again() {
        assert_eq!(
            DirectoryHtmlBuilder.output_path("guide/index", &outdir(), ".html"),
            outdir().join("guide").join("index.html")
        );
    }

    #[test]
    fn test_output_path_plain_document_gets_directory() {
        let builder = DirectoryHtmlBuilder;
        assert_eq!(
            builder.output_path("guide/intro", &outdir(), ".html"),
            outdir().join("guide").join("intro").join("index.html")
        );
        assert_eq!(
            builder.output_path("faq", &outdir(), ".htm"),
            outdir().join("faq").join("index.htm")
        );
    }

    #[test]
    fn test_mapping_is_pure() {
        let builder = DirectoryHtmlBuilder;
        for docname in ["index", "guide/index", "guide/intro"] {
            assert_eq!(builder.target_uri(docname), builder.target_uri(docname));
            assert_eq!(
                builder.output_path(docname, &outdir(), ".html"),
                builder.output_path(docname, &outdir(), ".html")
            );
        }
    }

    #[test]
    fn test_relative_uri_uses_directories() {
        let builder = DirectoryHtmlBuilder;
        assert_eq!(builder.relative_uri("guide/intro", "guide/index"), "../");
        assert_eq!(builder.relative_uri("guide/intro", "guide/setup"), "../setup/");
        assert_eq!(builder.relative_uri("index", "guide/intro"), "guide/intro/");
        assert_eq!(builder.relative_uri("guide/intro", "index"), "../../");
    }

    #[test]
    fn test_prepare_writing_sets_no_search_suffix() {
        let mut ctx = BuildContext::default();
        let docs = BTreeSet::from(["index".to_owned(), "guide/intro".to_owned()]);
        DirectoryHtmlBuilder.prepare_writing(&mut ctx, &docs);
        assert!(ctx.no_search_suffix);
        assert_eq!(ctx.document_count, 2);
    }

    #[test]
    fn test_setup_registers_html_dependency() {
        let mut registry = Registry::new();
        registry.setup_extension("dirhtml", setup).unwrap();

        assert_eq!(registry.builder_names(), vec!["dirhtml", "html"]);
        assert!(registry.is_loaded("html"));
        let metadata = registry.extension("dirhtml").unwrap();
        assert_eq!(metadata.version, "builtin");
        assert!(metadata.parallel_read_safe);
        assert!(metadata.parallel_write_safe);
    }
}
