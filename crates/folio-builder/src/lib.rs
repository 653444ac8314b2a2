//! Pluggable HTML builders and the static site build pipeline for Folio.
//!
//! A [`Builder`] decides how a document name becomes a hyperlink target and an
//! output file. Two builders ship with the crate:
//!
//! - [`html::StandaloneHtmlBuilder`] (`html`): `guide/intro` is written to
//!   `guide/intro.html` and linked as `guide/intro.html`.
//! - [`dirhtml::DirectoryHtmlBuilder`] (`dirhtml`): `guide/intro` is written to
//!   `guide/intro/index.html` and linked as `guide/intro/`.
//!
//! Builders are registered by name in a [`Registry`] and driven by
//! [`StaticSiteBuilder`], which also exposes gettext catalog compilation.

mod builder;
pub mod dirhtml;
pub mod html;
mod registry;
mod render;
mod scanner;
mod search;
mod site;
mod template;
mod util;

pub use builder::{BuildContext, Builder, MASTER_DOC, prepare_base_context};
pub use registry::{BuilderFactory, ExtensionMetadata, Registry, RegistryError, SetupFn};
pub use site::{BuildError, BuildReport, StaticSiteBuilder};
pub use util::{os_path, relative_uri};
