//! Static site build: read every document, hand the context to the active
//! builder, then write pages and the search index.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use folio_config::{BuildConfig, Config, I18nConfig};
use folio_i18n::{
    CatalogRepository, CompileOptions, CompileReport, CompileTarget, compile_catalogs, docname_to_domain,
};
use rayon::prelude::*;

use crate::builder::{BuildContext, Builder};
use crate::registry::{Registry, RegistryError};
use crate::render::{RenderedDocument, render_document};
use crate::scanner::scan;
use crate::search::{SEARCH_INDEX_FILE, build_index};
use crate::template::{NavItemData, PageData, render_page};

/// Error returned by [`StaticSiteBuilder`].
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Builder lookup failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// Failed to read a source document.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Failed to write an output file.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Search index serialization failed.
    #[error("Failed to serialize search index: {0}")]
    SearchIndex(#[from] serde_json::Error),
}

/// Summary of a finished build.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Number of pages written.
    pub pages_written: usize,
    /// Catalog domains compiled by the automatic catalog update.
    pub catalogs_compiled: Vec<String>,
    /// Directory the site was written to.
    pub output_dir: PathBuf,
}

/// Builds a static site with the builder selected in the configuration.
pub struct StaticSiteBuilder {
    project: String,
    build: BuildConfig,
    i18n: I18nConfig,
    builder: Box<dyn Builder>,
    parallel: bool,
}

impl StaticSiteBuilder {
    /// Create a site builder, instantiating `build.builder` from `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Registry`] if the builder name is unknown.
    pub fn new(config: &Config, registry: &Registry) -> Result<Self, BuildError> {
        let build = config.build_resolved.clone();
        let builder = registry.create(&build.builder, &build)?;
        let parallel = build.parallel && registry.is_parallel_write_safe(&build.builder);

        Ok(Self {
            project: config.project.name.clone(),
            build,
            i18n: config.i18n_resolved.clone(),
            builder,
            parallel,
        })
    }

    /// The active builder.
    pub fn builder(&self) -> &dyn Builder {
        self.builder.as_ref()
    }

    /// Whether pages are written concurrently.
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Build the site.
    ///
    /// # Errors
    ///
    /// Returns an error if a document cannot be read or an output file cannot
    /// be written. Catalog failures are logged and do not stop the build.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let catalogs_compiled = if self.i18n.gettext_auto_build && self.i18n.language.is_some() {
            self.compile_update_catalogs().compiled
        } else {
            Vec::new()
        };

        let sources = scan(&self.build.source_dir);
        tracing::info!(
            builder = self.builder.name(),
            documents = sources.len(),
            source_dir = %self.build.source_dir.display(),
            "Building site"
        );

        let read = |source: &crate::scanner::SourceDocument| {
            let text = fs::read_to_string(&source.path).map_err(|e| BuildError::Read {
                path: source.path.clone(),
                source: e,
            })?;
            Ok::<_, BuildError>(render_document(&source.docname, &text, self.builder.as_ref()))
        };
        let documents: Vec<RenderedDocument> = if self.parallel {
            sources.par_iter().map(read).collect::<Result<_, _>>()?
        } else {
            sources.iter().map(read).collect::<Result<_, _>>()?
        };

        let docnames: BTreeSet<String> = documents.iter().map(|d| d.docname.clone()).collect();
        let mut ctx = BuildContext {
            project: self.project.clone(),
            language: self.i18n.language.clone(),
            file_suffix: self.build.out_suffix.clone(),
            ..BuildContext::default()
        };
        self.builder.prepare_writing(&mut ctx, &docnames);

        if self.parallel {
            documents
                .par_iter()
                .try_for_each(|doc| self.write_page(doc, &documents, &ctx))?;
        } else {
            documents
                .iter()
                .try_for_each(|doc| self.write_page(doc, &documents, &ctx))?;
        }

        self.write_search_index(&documents, &ctx)?;

        tracing::info!(
            pages = documents.len(),
            output_dir = %self.build.output_dir.display(),
            "Build finished"
        );

        Ok(BuildReport {
            pages_written: documents.len(),
            catalogs_compiled,
            output_dir: self.build.output_dir.clone(),
        })
    }

    fn write_page(
        &self,
        doc: &RenderedDocument,
        documents: &[RenderedDocument],
        ctx: &BuildContext,
    ) -> Result<(), BuildError> {
        let builder = self.builder.as_ref();
        let root = root_prefix(&builder.target_uri(&doc.docname));

        let navigation = documents
            .iter()
            .map(|other| NavItemData {
                title: other.title.clone(),
                href: builder.relative_uri(&doc.docname, &other.docname),
                is_active: other.docname == doc.docname,
            })
            .collect();

        let html = render_page(&PageData {
            title: &doc.title,
            project: &ctx.project,
            language: ctx.language.as_deref(),
            html_content: &doc.body,
            navigation,
            root_href: if root.is_empty() { "./".to_owned() } else { root.clone() },
            search_index_href: format!("{root}{SEARCH_INDEX_FILE}"),
            file_suffix: if ctx.no_search_suffix { "" } else { ctx.file_suffix.as_str() },
        });

        let path = builder.output_path(&doc.docname, &self.build.output_dir, &ctx.file_suffix);
        tracing::debug!(
            docname = %doc.docname,
            domain = docname_to_domain(&doc.docname, self.i18n.gettext_compact),
            path = %path.display(),
            "Writing page"
        );
        write_file(&path, html.as_bytes())
    }

    fn write_search_index(&self, documents: &[RenderedDocument], ctx: &BuildContext) -> Result<(), BuildError> {
        let index = build_index(documents, ctx, self.builder.as_ref());
        let json = serde_json::to_string_pretty(&index)?;
        write_file(&self.build.output_dir.join(SEARCH_INDEX_FILE), json.as_bytes())
    }

    fn catalog_repository(&self) -> CatalogRepository {
        CatalogRepository::new(self.i18n.locale_dirs.clone(), self.i18n.language.clone())
    }

    fn compile(&self, target: &CompileTarget) -> CompileReport {
        let options = CompileOptions {
            use_fuzzy: self.i18n.gettext_allow_fuzzy_translations,
        };
        compile_catalogs(&self.catalog_repository(), target, options)
    }

    /// Compile every catalog of the configured language.
    pub fn compile_all_catalogs(&self) -> CompileReport {
        self.compile(&CompileTarget::All)
    }

    /// Compile the catalogs whose domain is listed in `domains`.
    pub fn compile_specific_catalogs<S: AsRef<str>>(&self, domains: &[S]) -> CompileReport {
        let domains = domains.iter().map(|d| d.as_ref().to_owned()).collect();
        self.compile(&CompileTarget::Domains(domains))
    }

    /// Compile catalogs whose `.mo` is missing or older than the `.po`.
    pub fn compile_update_catalogs(&self) -> CompileReport {
        self.compile(&CompileTarget::Outdated)
    }
}

/// `../` once per directory level of a target URI.
fn root_prefix(uri: &str) -> String {
    "../".repeat(uri.matches('/').count())
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), BuildError> {
    let write = || {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
    };
    write().map_err(|e| BuildError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}
